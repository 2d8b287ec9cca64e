//! Request message and puzzle payload types.

use serde::*;

/// A request from a front end.
///
/// `data` carries a JSON [`PuzzlePayload`] when `dataType` is `"puzzle"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    nonce: i32,
    command: String,
    #[serde(rename = "dataType", default)]
    data_type: String,
    #[serde(default)]
    data: String,
    #[serde(default)]
    multithread: bool,
}

impl Message {
    pub fn new(nonce: i32, command: &str, data_type: &str, data: &str, multithread: bool) -> Self {
        Self {
            nonce,
            command: command.to_owned(),
            data_type: data_type.to_owned(),
            data: data.to_owned(),
            multithread,
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    pub fn nonce(&self) -> i32 {
        self.nonce
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn data_type(&self) -> &str {
        &self.data_type
    }

    pub fn data(&self) -> &str {
        &self.data
    }

    pub fn multithread(&self) -> bool {
        self.multithread
    }
}

/// One constraint of a puzzle payload: a registry name plus its options
/// string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleConstraintEntry {
    pub name: String,
    #[serde(default)]
    pub options: String,
}

/// The native puzzle description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzlePayload {
    #[serde(default = "PuzzlePayload::default_size")]
    pub size: usize,
    #[serde(default)]
    pub givens: String,
    #[serde(default)]
    pub candidates: String,
    #[serde(default)]
    pub constraints: Vec<PuzzleConstraintEntry>,
}

impl PuzzlePayload {
    fn default_size() -> usize {
        9
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}
