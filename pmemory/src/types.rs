//! Persisted transcript record.

use std::time::{SystemTime, UNIX_EPOCH};

use pprovider::Turn;
use serde::{Deserialize, Serialize};

/// The value stored under a transcript key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTranscript {
    pub turns: Vec<Turn>,
    pub last_updated_ms: u64,
}

impl StoredTranscript {
    pub fn new(turns: Vec<Turn>, last_updated_ms: u64) -> Self {
        Self {
            turns,
            last_updated_ms,
        }
    }

    /// Stamps `turns` with the current wall-clock time.
    pub fn now(turns: Vec<Turn>) -> Self {
        Self::new(turns, now_millis())
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use pprovider::Turn;

    use super::StoredTranscript;

    #[test]
    fn stored_transcript_uses_camel_case_keys() {
        let transcript = StoredTranscript::new(vec![Turn::user("hi")], 1_700_000_000_000);
        let json = serde_json::to_string(&transcript).expect("transcript should serialize");
        assert_eq!(
            json,
            r#"{"turns":[{"role":"user","content":"hi"}],"lastUpdatedMs":1700000000000}"#
        );
    }

    #[test]
    fn now_stamps_a_recent_time() {
        let transcript = StoredTranscript::now(Vec::new());
        assert!(transcript.last_updated_ms > 1_600_000_000_000);
    }
}
