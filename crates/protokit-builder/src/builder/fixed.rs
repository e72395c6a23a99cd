//! Static protocol - one authored document for every participant

use std::path::Path;

use protokit_common::{ParticipantProfile, ProtocolDocument, Result, SessionHistory};
use tracing::debug;

use super::ProtocolBuilder;

/// Returns a fresh copy of the same authored document on every call
///
/// The document is checked once, at construction, so `build` cannot
/// produce a dangling sequence step.
#[derive(Debug, Clone)]
pub struct StaticProtocol {
    name: String,
    document: ProtocolDocument,
}

impl StaticProtocol {
    /// Wrap an authored document after checking its integrity
    pub fn new(name: impl Into<String>, document: ProtocolDocument) -> Result<Self> {
        document.validate()?;
        Ok(Self {
            name: name.into(),
            document,
        })
    }

    /// Parse a `{"frames": ..., "sequence": ...}` JSON protocol
    pub fn from_json(name: impl Into<String>, json: &str) -> Result<Self> {
        Self::new(name, ProtocolDocument::from_json(json)?)
    }

    /// Load a JSON protocol from disk, named after the file stem
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "file".to_string());

        debug!(path = %path.display(), "Loaded protocol file");
        Self::from_json(name, &content)
    }

    pub fn document(&self) -> &ProtocolDocument {
        &self.document
    }
}

impl ProtocolBuilder for StaticProtocol {
    fn name(&self) -> &str {
        &self.name
    }

    fn build(
        &self,
        _profile: &dyn ParticipantProfile,
        _history: &SessionHistory,
    ) -> Result<ProtocolDocument> {
        Ok(self.document.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use protokit_common::{ChildProfile, ProtocolError, SessionRecord};

    const TWO_FRAMES: &str = r#"{
        "frames": {
            "hello": {"kind": "exp-lookit-text", "blocks": [{"title": "Hi"}]},
            "bye": {"kind": "exp-lookit-text", "blocks": [{"title": "Bye"}]}
        },
        "sequence": ["hello", "bye"]
    }"#;

    #[test]
    fn test_returns_authored_document() {
        let protocol = StaticProtocol::from_json("two-frames", TWO_FRAMES).unwrap();
        let history = SessionHistory::first_visit(SessionRecord::new(
            Utc.with_ymd_and_hms(2026, 6, 1, 10, 0, 0).unwrap(),
        ));

        let doc = protocol.build(&ChildProfile::new("Mo"), &history).unwrap();
        assert_eq!(&doc, protocol.document());
        assert_eq!(doc.sequence, vec!["hello", "bye"]);
        assert_eq!(protocol.name(), "two-frames");
    }

    #[test]
    fn test_rejects_dangling_document() {
        let err = StaticProtocol::from_json(
            "broken",
            r#"{"frames": {}, "sequence": ["missing"]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ProtocolError::MalformedOutput(_)));
    }

    #[test]
    fn test_accepts_unused_frame_without_kind() {
        let protocol = StaticProtocol::from_json(
            "spare-frame",
            r#"{
                "frames": {"a": {"kind": "exp-lookit-text"}, "spare": {"kind": ""}},
                "sequence": ["a"]
            }"#,
        )
        .unwrap();
        assert_eq!(protocol.document().unused_frames(), vec!["spare"]);
    }

    #[test]
    fn test_missing_file() {
        let err = StaticProtocol::from_file("/nonexistent/protocol.json").unwrap_err();
        assert!(matches!(err, ProtocolError::Io(_)));
    }
}
