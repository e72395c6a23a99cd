//! FrameConfig - opaque, renderer-dispatched frame payload
//!
//! A frame is identified by its `kind`. Everything else belongs to the
//! renderer that handles that kind and is carried through verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Frame kinds the host ships renderers for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameKind {
    Text,
    Instructions,
    VideoConfig,
    VideoConsent,
    VideoPreview,
    WebcamDisplay,
    ExitSurvey,
}

impl FrameKind {
    pub const ALL: [FrameKind; 7] = [
        FrameKind::Text,
        FrameKind::Instructions,
        FrameKind::VideoConfig,
        FrameKind::VideoConsent,
        FrameKind::VideoPreview,
        FrameKind::WebcamDisplay,
        FrameKind::ExitSurvey,
    ];

    /// Discriminator string as it appears in `kind`
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameKind::Text => "exp-lookit-text",
            FrameKind::Instructions => "exp-lookit-instructions",
            FrameKind::VideoConfig => "exp-video-config",
            FrameKind::VideoConsent => "exp-lookit-video-consent",
            FrameKind::VideoPreview => "exp-video-preview",
            FrameKind::WebcamDisplay => "exp-lookit-webcam-display",
            FrameKind::ExitSurvey => "exp-lookit-exit-survey",
        }
    }

    pub fn from_kind(kind: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == kind)
    }

    /// Consent frames gate data collection
    pub fn is_consent(&self) -> bool {
        matches!(self, FrameKind::VideoConsent)
    }
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a single frame
///
/// Only `kind` is read here. All other fields are kept in `params` exactly
/// as authored and written back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameConfig {
    pub kind: String,

    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl FrameConfig {
    /// Frame with no renderer parameters
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            params: Map::new(),
        }
    }

    pub fn of_kind(kind: FrameKind) -> Self {
        Self::new(kind.as_str())
    }

    /// Build from an authored JSON object. The object must carry `kind`.
    pub fn from_value(value: Value) -> serde_json::Result<Self> {
        serde_json::from_value(value)
    }

    /// Set a renderer parameter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.params.get(key)
    }

    /// The well-known kind, if the host ships a renderer for it
    pub fn known_kind(&self) -> Option<FrameKind> {
        FrameKind::from_kind(&self.kind)
    }

    pub fn to_value(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_payload_round_trips_verbatim() {
        let authored = json!({
            "kind": "exp-lookit-text",
            "blocks": [{"title": "Hello", "listblocks": [{"text": "a"}, {"text": "b"}]}],
            "showPreviousButton": false,
            "custom": {"nested": [1, 2, {"deep": null}]}
        });
        let frame = FrameConfig::from_value(authored.clone()).unwrap();
        assert_eq!(frame.known_kind(), Some(FrameKind::Text));
        assert_eq!(frame.to_value().unwrap(), authored);
    }

    #[test]
    fn test_unknown_kind_is_preserved() {
        let frame = FrameConfig::new("exp-lab-custom-trial").with("duration", 12);
        assert!(frame.known_kind().is_none());
        assert_eq!(frame.param("duration"), Some(&json!(12)));
        assert_eq!(frame.to_value().unwrap()["kind"], "exp-lab-custom-trial");
    }

    #[test]
    fn test_kind_is_required() {
        assert!(FrameConfig::from_value(json!({"blocks": []})).is_err());
    }

    #[test]
    fn test_consent_kind() {
        assert!(FrameKind::VideoConsent.is_consent());
        assert!(!FrameKind::ExitSurvey.is_consent());
        assert_eq!(
            FrameKind::from_kind("exp-video-config"),
            Some(FrameKind::VideoConfig)
        );
    }
}
