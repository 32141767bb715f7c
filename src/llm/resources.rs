//! Typed shapes for the `assistants` and `files` sub-resources.
//!
//! These mirror the remote schemas field-for-field so they can be passed straight through
//! [`OpenAIGateway`](crate::llm::gateways::OpenAIGateway).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

/// Kinds of tools an assistant can be given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    CodeInterpreter,
    Retrieval,
    Function,
}

/// A tool attached to an assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantTool {
    pub r#type: ToolType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<Value>,
}

impl AssistantTool {
    pub fn code_interpreter() -> Self {
        Self {
            r#type: ToolType::CodeInterpreter,
            function: None,
        }
    }

    pub fn retrieval() -> Self {
        Self {
            r#type: ToolType::Retrieval,
            function: None,
        }
    }

    pub fn function(definition: Value) -> Self {
        Self {
            r#type: ToolType::Function,
            function: Some(definition),
        }
    }
}

/// An assistant as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assistant {
    pub id: String,
    pub object: String,
    pub created_at: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub model: String,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub tools: Vec<AssistantTool>,
    #[serde(default)]
    pub file_ids: Vec<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// Body for creating or updating an assistant
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantCreate {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<AssistantTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_ids: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl AssistantCreate {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<AssistantTool>) -> Self {
        self.tools = Some(tools);
        self
    }

    pub fn with_file_ids(mut self, file_ids: Vec<String>) -> Self {
        self.file_ids = Some(file_ids);
        self
    }
}

/// A page of assistants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantsResult {
    pub object: String,
    pub data: Vec<Assistant>,
    #[serde(default)]
    pub first_id: Option<String>,
    #[serde(default)]
    pub last_id: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

/// Query parameters for listing assistants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    /// `asc` or `desc`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
}

/// A file attached to an assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantFile {
    pub id: String,
    pub object: String,
    pub created_at: u64,
    pub assistant_id: String,
}

/// Body for attaching an uploaded file to an assistant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantFileCreate {
    #[serde(skip_serializing)]
    pub assistant_id: String,
    pub file_id: String,
}

/// A local file to upload
#[derive(Debug, Clone, PartialEq)]
pub struct FileCreate {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub purpose: String,
}

impl FileCreate {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, purpose: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
            purpose: purpose.into(),
        }
    }

    /// Read a file from disk for upload
    pub fn from_path(path: impl AsRef<Path>, purpose: impl Into<String>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self::new(filename, bytes, purpose))
    }
}

/// An uploaded file as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileResponse {
    pub id: String,
    pub object: String,
    pub bytes: u64,
    pub created_at: u64,
    pub filename: String,
    pub purpose: String,
}

/// Result of deleting an assistant, assistant file, or file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub id: String,
    pub object: String,
    pub deleted: bool,
}
