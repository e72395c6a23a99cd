//! InputFingerprint - deterministic digest of builder inputs
//!
//! Hosts that cache generated protocols can key on this. Structurally equal
//! inputs always hash to the same value.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::participant::{fields, ParticipantProfile};
use crate::types::session::SessionHistory;

/// BLAKE3 digest over a profile and its session history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFingerprint([u8; 32]);

impl InputFingerprint {
    /// Hash the known profile fields and every history record
    pub fn compute(profile: &dyn ParticipantProfile, history: &SessionHistory) -> Result<Self> {
        let mut hasher = blake3::Hasher::new();

        for field in fields::ALL {
            hasher.update(field.as_bytes());
            hasher.update(&[0]);
            // unset fields hash as their name plus `null`
            let value = serde_json::to_vec(&profile.get(field))?;
            hasher.update(&(value.len() as u64).to_le_bytes());
            hasher.update(&value);
        }

        hasher.update(&(history.len() as u64).to_le_bytes());
        for record in history {
            let encoded = serde_json::to_vec(record)?;
            hasher.update(&(encoded.len() as u64).to_le_bytes());
            hasher.update(&encoded);
        }

        Ok(Self(*hasher.finalize().as_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First 8 bytes as hex, for log lines
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl std::fmt::Display for InputFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
