use std::fmt::Display;

use serde_json::json;

pub use crate::model::ErrorData;

impl Display for ErrorData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.0, self.message)?;
        if let Some(data) = &self.data {
            write!(f, "({})", data)?;
        }
        Ok(())
    }
}

impl std::error::Error for ErrorData {}

/// Errors raised while rendering or looking up a prompt.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),
    #[error("prompt not found: {0}")]
    PromptNotFound(String),
}

/// Errors raised while decoding a prompt message or its content block.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("content type not found or invalid")]
    MissingTypeDiscriminator,
    #[error("unknown content type: {0}")]
    UnknownContentType(String),
    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Errors raised while building a [`PromptRegistry`](crate::PromptRegistry).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate prompt name: {0}")]
    DuplicatePrompt(String),
    #[error("prompt name must not be empty")]
    EmptyName,
    #[error("invalid prompt registry document: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<PromptError> for ErrorData {
    fn from(error: PromptError) -> Self {
        let data = match &error {
            PromptError::MissingArgument(name) => json!({ "argument": name }),
            PromptError::PromptNotFound(name) => json!({ "prompt": name }),
        };
        ErrorData::invalid_params(error.to_string(), Some(data))
    }
}

impl From<DecodeError> for ErrorData {
    fn from(error: DecodeError) -> Self {
        let data = match &error {
            DecodeError::UnknownContentType(tag) => Some(json!({ "type": tag })),
            DecodeError::MissingTypeDiscriminator | DecodeError::MalformedPayload(_) => None,
        };
        ErrorData::invalid_params(error.to_string(), data)
    }
}
