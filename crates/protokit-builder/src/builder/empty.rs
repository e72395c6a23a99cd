//! Empty protocol - no frames, no steps

use protokit_common::{ParticipantProfile, ProtocolDocument, Result, SessionHistory};

use super::ProtocolBuilder;

/// Ignores its inputs and returns `{frames: {}, sequence: []}`
///
/// A renderable no-op: the host has nothing to show and the session ends
/// immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyProtocol;

impl ProtocolBuilder for EmptyProtocol {
    fn name(&self) -> &str {
        "empty"
    }

    fn build(
        &self,
        _profile: &dyn ParticipantProfile,
        _history: &SessionHistory,
    ) -> Result<ProtocolDocument> {
        Ok(ProtocolDocument::empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use protokit_common::{ChildProfile, SessionRecord};

    #[test]
    fn test_ignores_inputs() {
        let history = SessionHistory::first_visit(SessionRecord::new(
            Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
        ));
        let a = EmptyProtocol
            .build(&ChildProfile::new("A").with_condition("deaf"), &history)
            .unwrap();
        let b = EmptyProtocol.build(&ChildProfile::default(), &history).unwrap();

        assert_eq!(a, b);
        assert!(a.frames.is_empty());
        assert!(a.sequence.is_empty());
    }
}
