//! Content blocks carried by prompt messages.
//!
//! A block is exactly one of a closed set of variants, told apart on the wire
//! by its `type` field. Decoding reads that tag first and only then parses the
//! payload for the matching variant, see [`Content::from_value`].
use std::{fmt, str::FromStr};

#[cfg(feature = "base64")]
use base64::engine::{Engine, general_purpose::STANDARD as BASE64_STANDARD};
use serde::{Deserialize, Serialize};

use super::{AnnotateAble, Annotated, Annotations, Meta, resource::ResourceContents};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RawTextContent {
    pub text: String,
    /// Optional protocol-level metadata for this content block
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}
pub type TextContent = Annotated<RawTextContent>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RawImageContent {
    /// The base64-encoded image
    pub data: String,
    pub mime_type: String,
    /// Optional protocol-level metadata for this content block
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}
pub type ImageContent = Annotated<RawImageContent>;

#[cfg(feature = "base64")]
impl RawImageContent {
    /// Encode raw image bytes into an image block
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: BASE64_STANDARD.encode(bytes),
            mime_type: mime_type.into(),
            meta: None,
        }
    }

    /// Decode the base64 payload back into raw bytes
    pub fn decode_data(&self) -> Result<Vec<u8>, base64::DecodeError> {
        BASE64_STANDARD.decode(&self.data)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct RawEmbeddedResource {
    /// Optional protocol-level metadata for this content block
    #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
    pub resource: ResourceContents,
}
pub type EmbeddedResource = Annotated<RawEmbeddedResource>;

impl RawEmbeddedResource {
    /// The text of the embedded resource, or an empty string for blobs
    pub fn get_text(&self) -> String {
        match &self.resource {
            ResourceContents::TextResourceContents { text, .. } => text.clone(),
            _ => String::new(),
        }
    }
}

/// The `type` tag of a content block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum ContentType {
    Text,
    Image,
    Resource,
}

impl ContentType {
    pub const ALL: [ContentType; 3] = [Self::Text, Self::Image, Self::Resource];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::Resource => "resource",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = crate::DecodeError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|content_type| content_type.as_str() == tag)
            .ok_or_else(|| crate::DecodeError::UnknownContentType(tag.to_owned()))
    }
}

/// A single content block of a prompt message.
///
/// Serializes with its [`ContentType`] under the `type` key. Deserializing goes
/// through [`Content::from_value`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum Content {
    /// Plain text content
    Text(TextContent),
    /// Image content with base64-encoded data
    Image(ImageContent),
    /// Embedded server-side resource
    Resource(EmbeddedResource),
}

impl Content {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Content::Text(
            RawTextContent {
                text: text.into(),
                meta: None,
            }
            .no_annotation(),
        )
    }

    pub fn image<S: Into<String>, T: Into<String>>(data: S, mime_type: T) -> Self {
        Content::Image(
            RawImageContent {
                data: data.into(),
                mime_type: mime_type.into(),
                meta: None,
            }
            .no_annotation(),
        )
    }

    pub fn resource(resource: ResourceContents) -> Self {
        Content::Resource(
            RawEmbeddedResource {
                meta: None,
                resource,
            }
            .no_annotation(),
        )
    }

    pub fn embedded_text<S: Into<String>, T: Into<String>>(uri: S, content: T) -> Self {
        Self::resource(ResourceContents::text(content, uri))
    }

    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Text(_) => ContentType::Text,
            Content::Image(_) => ContentType::Image,
            Content::Resource(_) => ContentType::Resource,
        }
    }

    pub fn annotations(&self) -> Option<&Annotations> {
        match self {
            Content::Text(text) => text.annotations.as_ref(),
            Content::Image(image) => image.annotations.as_ref(),
            Content::Resource(resource) => resource.annotations.as_ref(),
        }
    }

    /// Get the text content if this is a Text variant
    pub fn as_text(&self) -> Option<&TextContent> {
        match self {
            Content::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Get the image content if this is an Image variant
    pub fn as_image(&self) -> Option<&ImageContent> {
        match self {
            Content::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Get the embedded resource if this is a Resource variant
    pub fn as_resource(&self) -> Option<&EmbeddedResource> {
        match self {
            Content::Resource(resource) => Some(resource),
            _ => None,
        }
    }
}

impl From<TextContent> for Content {
    fn from(value: TextContent) -> Self {
        Content::Text(value)
    }
}

impl From<ImageContent> for Content {
    fn from(value: ImageContent) -> Self {
        Content::Image(value)
    }
}

impl From<EmbeddedResource> for Content {
    fn from(value: EmbeddedResource) -> Self {
        Content::Resource(value)
    }
}
