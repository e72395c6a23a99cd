//! # Protokit Common
//!
//! Shared types and errors for building study session protocols.
//!
//! ## Core Types
//!
//! - [`ParticipantProfile`]: read-only, name-indexed participant record
//! - [`SessionHistory`]: non-empty, most-recent-first list of [`SessionRecord`]s
//! - [`ProtocolDocument`]: frame id to [`FrameConfig`] map plus presentation order
//! - [`InputFingerprint`]: deterministic digest of builder inputs for host caches
//!
//! ## Errors
//!
//! - [`ProtocolError::InvalidInput`]: caller supplied no profile or no sessions
//! - [`ProtocolError::MalformedOutput`]: a sequence step names a missing frame

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{DocumentError, InputError, ProtocolError, Result};
pub use types::{
    document::{DocumentBuilder, ProtocolDocument},
    fingerprint::InputFingerprint,
    frame::{FrameConfig, FrameKind},
    participant::{
        fields, ChildProfile, FieldValue, GestationalAge, ParticipantProfile, ProfileExt, Sex,
        UnknownFieldValue,
    },
    session::{SessionHistory, SessionRecord, TimingEvent},
};

/// Protokit version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
