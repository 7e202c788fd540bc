use std::collections::HashMap;

#[cfg(feature = "base64")]
use base64::engine::{Engine, general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use super::{
    AnnotateAble, Annotations, Content, GetPromptResult, RawEmbeddedResource,
    resource::ResourceContents,
};
use crate::PromptError;

/// A prompt that can be used to generate text from a model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Prompt {
    /// The name of the prompt
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Optional description of what the prompt does
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional arguments that can be passed to customize the prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arguments: Option<Vec<PromptArgument>>,
    /// Text with `{argument}` placeholders
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub template: String,
}

impl Prompt {
    /// Create a new prompt with the given name, description and arguments
    pub fn new<N, D>(
        name: N,
        description: Option<D>,
        arguments: Option<Vec<PromptArgument>>,
    ) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Prompt {
            name: name.into(),
            title: None,
            description: description.map(Into::into),
            arguments,
            template: String::new(),
        }
    }

    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    fn declared_arguments(&self) -> impl Iterator<Item = &PromptArgument> {
        self.arguments.iter().flatten()
    }

    /// Check that every argument declared as required is present in `args`.
    ///
    /// Keys in `args` that the prompt does not declare are ignored.
    pub fn validate_arguments(&self, args: &HashMap<String, String>) -> Result<(), PromptError> {
        match self
            .declared_arguments()
            .find(|argument| argument.is_required() && !args.contains_key(&argument.name))
        {
            Some(missing) => {
                tracing::debug!(
                    prompt = %self.name,
                    argument = %missing.name,
                    "missing required argument"
                );
                Err(PromptError::MissingArgument(missing.name.clone()))
            }
            None => Ok(()),
        }
    }

    /// Validate `args` and substitute them into the template.
    ///
    /// Every `{key}` with `key` in `args` is replaced by its value in a single
    /// pass, so substituted values are never scanned again. Placeholders
    /// without a matching key are kept verbatim.
    pub fn execute(&self, args: &HashMap<String, String>) -> Result<String, PromptError> {
        self.validate_arguments(args)?;
        Ok(substitute(&self.template, args))
    }

    /// Render the prompt into a single user message.
    pub fn render(&self, args: &HashMap<String, String>) -> Result<GetPromptResult, PromptError> {
        let text = self.execute(args)?;
        Ok(GetPromptResult {
            description: self.description.clone(),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }

    /// Distinct placeholder names in the template, in order of first use
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        let mut rest = self.template.as_str();
        while let Some(open) = rest.find('{') {
            rest = &rest[open + 1..];
            let Some(close) = rest.find('}') else {
                break;
            };
            let name = &rest[..close];
            if name.is_empty() || name.contains('{') {
                continue;
            }
            if !names.contains(&name) {
                names.push(name);
            }
            rest = &rest[close + 1..];
        }
        names
    }

    /// Placeholders that do not name a declared argument
    pub fn undeclared_placeholders(&self) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !self.declared_arguments().any(|arg| arg.name == *name))
            .collect()
    }
}

fn substitute(template: &str, args: &HashMap<String, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        rendered.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];
        let replacement = after_open
            .find('}')
            .and_then(|close| Some((close, args.get(&after_open[..close])?)));
        match replacement {
            Some((close, value)) => {
                rendered.push_str(value);
                rest = &after_open[close + 1..];
            }
            None => {
                rendered.push('{');
                rest = after_open;
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Represents a prompt argument that can be passed to customize the prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct PromptArgument {
    /// The name of the argument
    pub name: String,
    /// A human-readable title for the argument
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// A description of what the argument is used for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether this argument is required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
}

impl PromptArgument {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: None,
            required: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }

    /// An absent `required` flag means optional
    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }
}

/// Represents the role of a message sender in a prompt conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum PromptMessageRole {
    User,
    Assistant,
    System,
}

/// A message in a prompt conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct PromptMessage {
    /// The role of the message sender
    pub role: PromptMessageRole,
    /// The content of the message
    pub content: Content,
}

impl PromptMessage {
    pub fn new(role: PromptMessageRole, content: impl Into<Content>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a new text message with the given role and text content
    pub fn new_text<S: Into<String>>(role: PromptMessageRole, text: S) -> Self {
        Self {
            role,
            content: Content::text(text),
        }
    }

    /// Create a new image message from raw bytes. `meta` and `annotations` are optional.
    #[cfg(feature = "base64")]
    pub fn new_image(
        role: PromptMessageRole,
        data: &[u8],
        mime_type: &str,
        meta: Option<super::Meta>,
        annotations: Option<Annotations>,
    ) -> Self {
        Self {
            role,
            content: Content::Image(
                super::RawImageContent {
                    data: BASE64_STANDARD.encode(data),
                    mime_type: mime_type.into(),
                    meta,
                }
                .optional_annotate(annotations),
            ),
        }
    }

    /// Create a new embedded resource message
    pub fn new_resource(
        role: PromptMessageRole,
        resource: ResourceContents,
        annotations: Option<Annotations>,
    ) -> Self {
        Self {
            role,
            content: Content::Resource(
                RawEmbeddedResource {
                    meta: None,
                    resource,
                }
                .optional_annotate(annotations),
            ),
        }
    }
}
