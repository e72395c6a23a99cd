//! Host-facing generator
//!
//! Wraps a [`ProtocolBuilder`] with the checks the host relies on: inputs
//! are rejected before the builder runs, and every document is validated
//! before it is handed back.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, Span};

use protokit_common::{
    ChildProfile, DocumentError, InputError, InputFingerprint, ParticipantProfile, ProtocolDocument,
    ProtocolError, Result, SessionHistory, SessionRecord,
};

use crate::builder::{ProtocolBuilder, StaticProtocol};
use crate::config::GeneratorSettings;

/// Generation request as the host sends it over the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolRequest {
    /// Participating child; `null` is rejected
    #[serde(default)]
    pub child: Option<ChildProfile>,

    /// Most-recent-first; index 0 is the current session
    #[serde(default)]
    pub past_sessions: Vec<SessionRecord>,
}

/// Validating front end for a protocol builder
pub struct ProtocolGenerator {
    builder: Box<dyn ProtocolBuilder>,
    log_unused_frames: bool,
}

impl ProtocolGenerator {
    pub fn new(builder: impl ProtocolBuilder + 'static) -> Self {
        Self::from_boxed(Box::new(builder))
    }

    pub fn from_boxed(builder: Box<dyn ProtocolBuilder>) -> Self {
        Self {
            builder,
            log_unused_frames: true,
        }
    }

    /// Pick the builder named by the settings
    pub fn from_settings(settings: &GeneratorSettings) -> Result<Self> {
        let builder: Box<dyn ProtocolBuilder> = match &settings.protocol_file {
            Some(path) => Box::new(StaticProtocol::from_file(path)?),
            None => settings.preset.builder()?,
        };

        Ok(Self::from_boxed(builder).log_unused_frames(settings.log_unused_frames))
    }

    pub fn log_unused_frames(mut self, enabled: bool) -> Self {
        self.log_unused_frames = enabled;
        self
    }

    pub fn builder_name(&self) -> &str {
        self.builder.name()
    }

    /// Build the protocol for one session
    ///
    /// Fails with [`ProtocolError::InvalidInput`] when `profile` is absent or
    /// `sessions` is empty, and with [`ProtocolError::MalformedOutput`] when
    /// the builder returns a sequence step that names no frame.
    #[instrument(
        skip_all,
        fields(
            builder = %self.builder.name(),
            sessions = sessions.len(),
            fingerprint = tracing::field::Empty
        )
    )]
    pub fn generate<P: ParticipantProfile>(
        &self,
        profile: Option<&P>,
        sessions: &[SessionRecord],
    ) -> Result<ProtocolDocument> {
        let profile = profile.ok_or(InputError::MissingProfile)?;
        let history = SessionHistory::new(sessions.to_vec())?;

        self.generate_for(profile, &history)
    }

    /// Build from an already-validated history
    pub fn generate_for(
        &self,
        profile: &dyn ParticipantProfile,
        history: &SessionHistory,
    ) -> Result<ProtocolDocument> {
        if let Ok(fingerprint) = InputFingerprint::compute(profile, history) {
            Span::current().record("fingerprint", fingerprint.short().as_str());
        }

        let document = match self.builder.build(profile, history) {
            Ok(document) => document,
            Err(ProtocolError::MalformedOutput(violation)) => return Err(self.malformed(violation)),
            Err(other) => return Err(other),
        };

        if let Err(violation) = document.validate() {
            return Err(self.malformed(violation));
        }

        if self.log_unused_frames {
            let unused = document.unused_frames();
            if !unused.is_empty() {
                debug!(?unused, "Protocol defines frames it never shows");
            }
        }

        debug!(
            frames = document.frame_count(),
            steps = document.sequence.len(),
            "Generated protocol"
        );
        Ok(document)
    }

    fn malformed(&self, violation: DocumentError) -> ProtocolError {
        error!(
            builder = %self.builder.name(),
            %violation,
            "Builder produced a malformed protocol"
        );
        ProtocolError::MalformedOutput(violation)
    }

    /// Build from a deserialized wire request
    pub fn generate_request(&self, request: &ProtocolRequest) -> Result<ProtocolDocument> {
        self.generate(request.child.as_ref(), &request.past_sessions)
    }
}

impl std::fmt::Debug for ProtocolGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolGenerator")
            .field("builder", &self.builder.name())
            .field("log_unused_frames", &self.log_unused_frames)
            .finish()
    }
}
