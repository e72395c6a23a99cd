//! Protocol builders
//!
//! - [`EmptyProtocol`]: shows nothing; the always-valid baseline
//! - [`StaticProtocol`]: one authored document, same for every participant
//! - any `Fn(&dyn ParticipantProfile, &SessionHistory) -> Result<ProtocolDocument>`
//!   for studies that want to branch on their inputs

pub mod empty;
pub mod fixed;

pub use empty::EmptyProtocol;
pub use fixed::StaticProtocol;

use protokit_common::{ParticipantProfile, ProtocolDocument, Result, SessionHistory};

/// Maps a participant and their session history to a protocol
///
/// Implementations must be pure: no clock, no randomness, no I/O. Two calls
/// with structurally equal inputs return structurally equal documents, and
/// neither input is modified.
pub trait ProtocolBuilder: Send + Sync {
    /// Short name for logs
    fn name(&self) -> &str;

    fn build(
        &self,
        profile: &dyn ParticipantProfile,
        history: &SessionHistory,
    ) -> Result<ProtocolDocument>;
}

impl<F> ProtocolBuilder for F
where
    F: Fn(&dyn ParticipantProfile, &SessionHistory) -> Result<ProtocolDocument> + Send + Sync,
{
    fn name(&self) -> &str {
        "custom"
    }

    fn build(
        &self,
        profile: &dyn ParticipantProfile,
        history: &SessionHistory,
    ) -> Result<ProtocolDocument> {
        self(profile, history)
    }
}
