//! Prompt lookup for MCP servers
//!
//! [`PromptRegistry`] holds the prompts a server offers and answers
//! `prompts/get` requests by rendering the named prompt against the request's
//! arguments. A registry is filled once, usually from a JSON document, and is
//! only read afterwards.

use std::{collections::HashMap, io::Read};

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    ErrorData, PromptError, RegistryError,
    model::{GetPromptRequest, GetPromptRequestParam, GetPromptResult, Prompt},
};

/// On-disk shape of a registry: `{"prompts": [...]}`
#[derive(Debug, Default, Serialize, Deserialize)]
struct RegistryDocument {
    #[serde(default)]
    prompts: Vec<Prompt>,
}

/// Prompts keyed by name, kept in insertion order for listing
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    prompts: Vec<Prompt>,
    index: HashMap<String, usize>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_prompts(prompts: impl IntoIterator<Item = Prompt>) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for prompt in prompts {
            registry.insert(prompt)?;
        }
        tracing::debug!(count = registry.len(), "prompt registry loaded");
        Ok(registry)
    }

    pub fn from_json_str(json: &str) -> Result<Self, RegistryError> {
        let document: RegistryDocument = serde_json::from_str(json)?;
        Self::from_prompts(document.prompts)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, RegistryError> {
        let document: RegistryDocument = serde_json::from_reader(reader)?;
        Self::from_prompts(document.prompts)
    }

    pub fn to_json_string(&self) -> Result<String, RegistryError> {
        let document = RegistryDocument {
            prompts: self.prompts.clone(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Add a prompt. Names must be non-empty and unique.
    pub fn insert(&mut self, prompt: Prompt) -> Result<(), RegistryError> {
        if prompt.name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.index.contains_key(&prompt.name) {
            return Err(RegistryError::DuplicatePrompt(prompt.name));
        }
        let undeclared = prompt.undeclared_placeholders();
        if !undeclared.is_empty() {
            tracing::warn!(
                prompt = %prompt.name,
                placeholders = ?undeclared,
                "template uses placeholders that are not declared arguments"
            );
        }
        self.index.insert(prompt.name.clone(), self.prompts.len());
        self.prompts.push(prompt);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Prompt> {
        self.index.get(name).map(|&i| &self.prompts[i])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All prompts, in the order they were added
    pub fn list(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Look up the named prompt and render it with the request's arguments.
    pub fn get_prompt(
        &self,
        GetPromptRequestParam { name, arguments }: GetPromptRequestParam,
    ) -> Result<GetPromptResult, PromptError> {
        let Some(prompt) = self.get(&name) else {
            tracing::debug!(prompt = %name, "prompt not found");
            return Err(PromptError::PromptNotFound(name));
        };
        prompt.render(&arguments.unwrap_or_default())
    }

    /// Answer a full `prompts/get` request, reporting failures as protocol errors.
    pub fn handle_get_prompt(&self, request: GetPromptRequest) -> Result<GetPromptResult, ErrorData> {
        self.get_prompt(request.params).map_err(|error| match error {
            PromptError::PromptNotFound(name) => {
                let available: Vec<&str> = self.prompts.iter().map(|p| p.name.as_str()).collect();
                ErrorData::invalid_params(
                    format!("prompt not found: {name}"),
                    Some(json!({ "prompt": name, "available_prompts": available })),
                )
            }
            error => error.into(),
        })
    }
}

impl<'a> IntoIterator for &'a PromptRegistry {
    type Item = &'a Prompt;
    type IntoIter = std::slice::Iter<'a, Prompt>;

    fn into_iter(self) -> Self::IntoIter {
        self.prompts.iter()
    }
}
