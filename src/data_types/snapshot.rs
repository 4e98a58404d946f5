use eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};

/// A single submitted answer, as reported by the responses endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub answer_id: String,
    pub answer_text: String,
}

impl ResponseRecord {
    pub fn new(answer_id: impl Into<String>, answer_text: impl Into<String>) -> Self {
        Self {
            answer_id: answer_id.into(),
            answer_text: answer_text.into(),
        }
    }
}

/// Complete view state of the aside.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub is_open: bool,
    pub is_staff: bool,
    pub responses: Vec<ResponseRecord>,
}

impl Snapshot {
    /// Initial state read from the host block's `data-open` / `data-staff`
    /// attributes. Only the literal `"True"` counts as set.
    pub fn from_block_attributes(data_open: &str, data_staff: &str) -> Self {
        Self {
            is_open: data_open == "True",
            is_staff: data_staff == "True",
            responses: Vec::new(),
        }
    }

    /// Shallow merge: every field present in the patch replaces ours.
    pub fn apply(&mut self, patch: SnapshotPatch) {
        if let Some(is_open) = patch.is_open {
            self.is_open = is_open;
        }
        if let Some(is_staff) = patch.is_staff {
            self.is_staff = is_staff;
        }
        if let Some(responses) = patch.responses {
            self.responses = responses;
        }
    }

    /// Whether the poll loop may keep running on this state.
    pub fn should_poll(&self) -> bool {
        self.is_open && self.is_staff
    }
}

/// Payload returned by the responses and toggle endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_open: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_staff: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responses: Option<Vec<ResponseRecord>>,
}

impl SnapshotPatch {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).wrap_err("invalid snapshot payload")
    }
}

impl From<Snapshot> for SnapshotPatch {
    fn from(snapshot: Snapshot) -> Self {
        Self {
            is_open: Some(snapshot.is_open),
            is_staff: Some(snapshot.is_staff),
            responses: Some(snapshot.responses),
        }
    }
}
