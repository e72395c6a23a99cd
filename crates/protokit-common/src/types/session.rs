//! Session history - what happened in earlier attempts at the same study
//!
//! Records arrive most-recent-first: index 0 is the session being built
//! right now, the last index is the participant's very first session.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{InputError, Result};

/// A named event recorded by the host during a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingEvent {
    /// Event name, e.g. `nextFrame` or `exitEarly`
    pub event_type: String,

    pub timestamp: DateTime<Utc>,
}

/// One attempt at a study, successful or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub created_on: DateTime<Utc>,

    /// Condition assignment, shape owned by the study
    #[serde(default)]
    pub conditions: Value,

    /// Data the frames produced
    #[serde(default)]
    pub exp_data: Value,

    /// Frame ids that were shown
    #[serde(default)]
    pub sequence: Vec<String>,

    #[serde(default)]
    pub completed: bool,

    #[serde(default)]
    pub global_event_timings: Vec<TimingEvent>,

    /// The consent frame was reached. Says nothing about whether consent
    /// was actually given.
    #[serde(default)]
    pub completed_consent_frame: bool,

    #[serde(default)]
    pub demographic_snapshot: Value,

    /// Rehearsal run that collected no data
    #[serde(default)]
    pub is_preview: bool,
}

impl SessionRecord {
    /// A fresh, in-progress session
    pub fn new(created_on: DateTime<Utc>) -> Self {
        Self {
            created_on,
            conditions: Value::Null,
            exp_data: Value::Null,
            sequence: Vec::new(),
            completed: false,
            global_event_timings: Vec::new(),
            completed_consent_frame: false,
            demographic_snapshot: Value::Null,
            is_preview: false,
        }
    }

    /// Whether the host logged an event with this name
    pub fn has_event(&self, event_type: &str) -> bool {
        self.global_event_timings
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

/// Non-empty, most-recent-first sequence of sessions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SessionHistory {
    records: Vec<SessionRecord>,
}

impl SessionHistory {
    /// Wrap host records. Fails when there is no current session.
    pub fn new(records: Vec<SessionRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(InputError::EmptyHistory.into());
        }
        Ok(Self { records })
    }

    /// History for a first-ever session
    pub fn first_visit(current: SessionRecord) -> Self {
        Self {
            records: vec![current],
        }
    }

    /// The in-progress session
    pub fn current(&self) -> &SessionRecord {
        &self.records[0]
    }

    /// Earlier sessions, newest first
    pub fn previous(&self) -> &[SessionRecord] {
        &self.records[1..]
    }

    /// The participant's first session for this study
    pub fn first_session(&self) -> &SessionRecord {
        &self.records[self.records.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Never true: a history always holds the current session
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_first_visit(&self) -> bool {
        self.records.len() == 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SessionRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[SessionRecord] {
        &self.records
    }

    /// Completed earlier sessions, excluding previews
    pub fn prior_completed_count(&self) -> usize {
        self.previous()
            .iter()
            .filter(|s| s.completed && !s.is_preview)
            .count()
    }

    /// Any earlier non-preview session reached the consent frame
    pub fn consent_previously_reached(&self) -> bool {
        self.previous()
            .iter()
            .any(|s| s.completed_consent_frame && !s.is_preview)
    }

    /// Sessions that collected data
    pub fn non_preview(&self) -> impl Iterator<Item = &SessionRecord> {
        self.records.iter().filter(|s| !s.is_preview)
    }
}

impl<'de> Deserialize<'de> for SessionHistory {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<SessionRecord>::deserialize(deserializer)?;
        SessionHistory::new(records).map_err(serde::de::Error::custom)
    }
}

impl TryFrom<Vec<SessionRecord>> for SessionHistory {
    type Error = crate::error::ProtocolError;

    fn try_from(records: Vec<SessionRecord>) -> Result<Self> {
        Self::new(records)
    }
}

impl<'a> IntoIterator for &'a SessionHistory {
    type Item = &'a SessionRecord;
    type IntoIter = std::slice::Iter<'a, SessionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProtocolError;
    use chrono::TimeZone;

    fn session(day: u32, completed: bool, consent: bool, preview: bool) -> SessionRecord {
        let mut record = SessionRecord::new(Utc.with_ymd_and_hms(2026, 1, day, 9, 0, 0).unwrap());
        record.completed = completed;
        record.completed_consent_frame = consent;
        record.is_preview = preview;
        record
    }

    #[test]
    fn test_empty_history_rejected() {
        let err = SessionHistory::new(Vec::new()).unwrap_err();
        assert!(matches!(
            err,
            ProtocolError::InvalidInput(InputError::EmptyHistory)
        ));
    }

    #[test]
    fn test_single_record_history() {
        let history = SessionHistory::new(vec![session(5, false, false, false)]).unwrap();
        assert!(history.is_first_visit());
        assert!(history.previous().is_empty());
        assert_eq!(history.current(), history.first_session());
        assert_eq!(history.prior_completed_count(), 0);
        assert!(!history.consent_previously_reached());
    }

    #[test]
    fn test_history_ordering() {
        let history = SessionHistory::new(vec![
            session(9, false, false, false),
            session(7, true, true, true),
            session(3, true, true, false),
        ])
        .unwrap();

        assert_eq!(history.current().created_on.format("%d").to_string(), "09");
        assert_eq!(history.first_session().created_on.format("%d").to_string(), "03");
        assert_eq!(history.prior_completed_count(), 1);
        assert!(history.consent_previously_reached());
        assert_eq!(history.non_preview().count(), 2);
    }

    #[test]
    fn test_wire_format() {
        let json = r#"[{
            "createdOn": "2026-02-01T10:00:00Z",
            "conditions": {"order": "AB"},
            "sequence": ["welcome-page"],
            "completed": false,
            "globalEventTimings": [
                {"eventType": "exitEarly", "timestamp": "2026-02-01T10:04:00Z"}
            ],
            "completedConsentFrame": true,
            "isPreview": false
        }]"#;
        let history: SessionHistory = serde_json::from_str(json).unwrap();
        assert_eq!(history.len(), 1);
        assert!(history.current().has_event("exitEarly"));
        assert_eq!(history.current().exp_data, Value::Null);

        assert!(serde_json::from_str::<SessionHistory>("[]").is_err());
    }
}
