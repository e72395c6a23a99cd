//! ProtocolDocument - the frames a session can show and the order it shows them
//!
//! Serialized as `{"frames": {...}, "sequence": [...]}`. The one structural
//! rule is referential integrity: every sequence step names a frame that
//! exists. Frames nobody references are allowed.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DocumentError, Result};
use crate::types::frame::FrameConfig;

/// Complete protocol for one session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProtocolDocument {
    /// Frame id to configuration
    #[serde(default)]
    pub frames: BTreeMap<String, FrameConfig>,

    /// Frame ids in presentation order
    #[serde(default)]
    pub sequence: Vec<String>,
}

impl ProtocolDocument {
    /// The empty protocol: no frames, nothing to show
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> DocumentBuilder {
        DocumentBuilder::new()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.sequence.is_empty()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn frame(&self, id: &str) -> Option<&FrameConfig> {
        self.frames.get(id)
    }

    /// Sequence steps paired with their frame configuration
    ///
    /// Steps that reference a missing frame are skipped; call
    /// [`validate`](Self::validate) first to rule them out.
    pub fn steps(&self) -> impl Iterator<Item = (&str, &FrameConfig)> {
        self.sequence
            .iter()
            .filter_map(|id| self.frames.get(id).map(|frame| (id.as_str(), frame)))
    }

    /// Check that every sequence step names a defined frame with a kind
    ///
    /// Frames no step reaches are not inspected.
    pub fn validate(&self) -> std::result::Result<(), DocumentError> {
        for (position, frame_id) in self.sequence.iter().enumerate() {
            match self.frames.get(frame_id) {
                None => {
                    return Err(DocumentError::DanglingReference {
                        frame_id: frame_id.clone(),
                        position,
                    })
                }
                Some(frame) if frame.kind.trim().is_empty() => {
                    return Err(DocumentError::MissingKind {
                        frame_id: frame_id.clone(),
                    })
                }
                Some(_) => {}
            }
        }

        Ok(())
    }

    /// Frames defined but never shown
    pub fn unused_frames(&self) -> Vec<&str> {
        let used: BTreeSet<&str> = self.sequence.iter().map(String::as_str).collect();
        self.frames
            .keys()
            .map(String::as_str)
            .filter(|id| !used.contains(id))
            .collect()
    }

    /// Frame ids that appear more than once in the sequence
    pub fn duplicate_steps(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        let mut duplicates = BTreeSet::new();
        for id in &self.sequence {
            if !seen.insert(id.as_str()) {
                duplicates.insert(id.as_str());
            }
        }
        duplicates.into_iter().collect()
    }
}

/// Builder for ProtocolDocument
#[derive(Debug, Default)]
pub struct DocumentBuilder {
    frames: BTreeMap<String, FrameConfig>,
    sequence: Vec<String>,
}

impl DocumentBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a frame without placing it in the sequence
    pub fn frame(mut self, id: impl Into<String>, config: FrameConfig) -> Self {
        self.frames.insert(id.into(), config);
        self
    }

    /// Append a step referencing a frame id
    pub fn step(mut self, id: impl Into<String>) -> Self {
        self.sequence.push(id.into());
        self
    }

    /// Define a frame and append it to the sequence
    pub fn frame_step(self, id: impl Into<String>, config: FrameConfig) -> Self {
        let id = id.into();
        self.frame(id.clone(), config).step(id)
    }

    /// Build the ProtocolDocument
    pub fn build(self) -> Result<ProtocolDocument> {
        let document = ProtocolDocument {
            frames: self.frames,
            sequence: self.sequence,
        };
        document.validate()?;
        Ok(document)
    }
}
