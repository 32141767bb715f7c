//! Fine-tuning dataset helpers.
//!
//! Training itself runs outside this library. These types build the JSONL payload that is
//! uploaded with [`OpenAIGateway::create_file`](crate::llm::gateways::OpenAIGateway::create_file)
//! and the command line used to start a training job.

use crate::error::Result;
use crate::llm::resources::FileCreate;
use serde::{Deserialize, Serialize};

pub const FINE_TUNE_PURPOSE: &str = "fine-tune";

/// A single prompt and its ideal completion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealPrompt {
    pub prompt: String,
    pub completion: String,
}

impl IdealPrompt {
    pub fn new(prompt: impl Into<String>, completion: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            completion: completion.into(),
        }
    }
}

/// A set of training examples
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSet {
    pub data: Vec<IdealPrompt>,
}

impl DataSet {
    pub fn new(data: Vec<IdealPrompt>) -> Self {
        Self { data }
    }

    pub fn push(&mut self, prompt: IdealPrompt) {
        self.data.push(prompt);
    }

    /// One JSON object per line
    pub fn to_jsonl(&self) -> Result<String> {
        let mut out = String::new();
        for example in &self.data {
            out.push_str(&serde_json::to_string(example)?);
            out.push('\n');
        }
        Ok(out)
    }

    /// Package the dataset as a fine-tune upload
    pub fn to_upload(&self, filename: impl Into<String>) -> Result<FileCreate> {
        Ok(FileCreate::new(filename, self.to_jsonl()?.into_bytes(), FINE_TUNE_PURPOSE))
    }
}

/// The command that starts a training job for a local dataset file.
///
/// The command is returned, never executed.
pub fn create_ptm_command(file_path: &str) -> String {
    format!("npm run train-model -- --file \"{}\"", file_path)
}
