use serde::{Deserialize, Deserializer, de::Error as _};
use serde_json::Value;

use super::{Content, ContentType, PromptMessage, PromptMessageRole};
use crate::DecodeError;

/// A prompt message with its content block not yet typed
#[derive(Deserialize)]
struct Envelope {
    role: PromptMessageRole,
    content: Value,
}

impl Content {
    /// Decode a content block whose variant is only known from its `type` tag.
    ///
    /// The tag is read from the generic JSON value first; the value is then
    /// parsed again as the variant the tag names.
    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let Value::Object(object) = &value else {
            return Err(DecodeError::MalformedPayload(serde_json::Error::custom(
                "content must be a JSON object",
            )));
        };
        let Some(Value::String(tag)) = object.get("type") else {
            tracing::debug!("content block has no string `type` field");
            return Err(DecodeError::MissingTypeDiscriminator);
        };
        let content_type = tag.parse::<ContentType>().inspect_err(|_| {
            tracing::debug!(tag = tag.as_str(), "rejecting unknown content type");
        })?;
        tracing::trace!(%content_type, "decoding content block");
        let content = match content_type {
            ContentType::Text => Content::Text(serde_json::from_value(value)?),
            ContentType::Image => Content::Image(serde_json::from_value(value)?),
            ContentType::Resource => Content::Resource(serde_json::from_value(value)?),
        };
        Ok(content)
    }
}

impl<'de> Deserialize<'de> for Content {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Content::from_value(value).map_err(D::Error::custom)
    }
}

impl PromptMessage {
    /// Decode a serialized prompt message.
    ///
    /// Unlike going through [`Deserialize`], the failure keeps its
    /// [`DecodeError`] variant.
    pub fn decode(raw: &[u8]) -> Result<Self, DecodeError> {
        let Envelope { role, content } = serde_json::from_slice(raw)?;
        Ok(PromptMessage {
            role,
            content: Content::from_value(content)?,
        })
    }

    pub fn decode_str(raw: &str) -> Result<Self, DecodeError> {
        Self::decode(raw.as_bytes())
    }
}
