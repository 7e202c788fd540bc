use serde::{Deserialize, Serialize};

use super::Meta;

/// The contents of a resource embedded in a prompt message.
///
/// The two shapes are told apart by which payload field is present, `text`
/// or `blob`; there is no tag on the wire.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub enum ResourceContents {
    #[serde(rename_all = "camelCase")]
    TextResourceContents {
        uri: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        text: String,
        #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
        meta: Option<Meta>,
    },
    #[serde(rename_all = "camelCase")]
    BlobResourceContents {
        uri: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        mime_type: Option<String>,
        /// base64-encoded bytes
        blob: String,
        #[serde(rename = "_meta", skip_serializing_if = "Option::is_none")]
        meta: Option<Meta>,
    },
}

impl ResourceContents {
    pub fn text(text: impl Into<String>, uri: impl Into<String>) -> Self {
        Self::TextResourceContents {
            uri: uri.into(),
            mime_type: Some("text".into()),
            text: text.into(),
            meta: None,
        }
    }

    pub fn blob(
        blob: impl Into<String>,
        uri: impl Into<String>,
        mime_type: Option<String>,
    ) -> Self {
        Self::BlobResourceContents {
            uri: uri.into(),
            mime_type,
            blob: blob.into(),
            meta: None,
        }
    }

    pub fn uri(&self) -> &str {
        match self {
            Self::TextResourceContents { uri, .. } | Self::BlobResourceContents { uri, .. } => uri,
        }
    }

    pub fn mime_type(&self) -> Option<&str> {
        match self {
            Self::TextResourceContents { mime_type, .. }
            | Self::BlobResourceContents { mime_type, .. } => mime_type.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_resource_contents_serialization() {
        let text_contents = ResourceContents::TextResourceContents {
            uri: "file:///test.txt".to_string(),
            mime_type: Some("text/plain".to_string()),
            text: "Hello world".to_string(),
            meta: None,
        };

        let json = serde_json::to_string(&text_contents).unwrap();

        // camelCase on the wire
        assert!(json.contains("mimeType"));
        assert!(!json.contains("mime_type"));
    }

    #[test]
    fn test_resource_contents_text() {
        let contents = ResourceContents::text("Hello", "file:///test.txt");
        assert_eq!(contents.uri(), "file:///test.txt");
        assert_eq!(contents.mime_type(), Some("text"));
        match contents {
            ResourceContents::TextResourceContents { text, .. } => assert_eq!(text, "Hello"),
            _ => panic!("Expected TextResourceContents"),
        }
    }

    #[test]
    fn test_resource_contents_blob() {
        let contents = ResourceContents::blob(
            "AQID",
            "file:///binary.dat",
            Some("application/octet-stream".to_string()),
        );
        let json = serde_json::to_value(&contents).unwrap();
        assert_eq!(
            json,
            json!({
                "uri": "file:///binary.dat",
                "mimeType": "application/octet-stream",
                "blob": "AQID"
            })
        );
    }

    #[test]
    fn test_resource_contents_with_meta() {
        let mut meta = Meta::new();
        meta.insert("key".to_string(), json!("value"));

        let contents = ResourceContents::TextResourceContents {
            uri: "file:///test.txt".to_string(),
            mime_type: None,
            text: "content".to_string(),
            meta: Some(meta),
        };

        let json = serde_json::to_value(&contents).unwrap();
        assert_eq!(json["_meta"]["key"], "value");
        assert!(json.get("mimeType").is_none());
    }

    #[test]
    fn test_resource_contents_deserialization_text() {
        let json = r#"{
            "uri": "file:///test.txt",
            "text": "content",
            "mimeType": "text/plain"
        }"#;
        let contents: ResourceContents = serde_json::from_str(json).unwrap();
        match contents {
            ResourceContents::TextResourceContents { text, .. } => {
                assert_eq!(text, "content");
            }
            _ => panic!("Expected TextResourceContents"),
        }
    }

    #[test]
    fn test_resource_contents_deserialization_blob() {
        let json = r#"{
            "uri": "file:///binary.dat",
            "blob": "blobdata",
            "mimeType": "application/octet-stream"
        }"#;
        let contents: ResourceContents = serde_json::from_str(json).unwrap();
        match contents {
            ResourceContents::BlobResourceContents { blob, .. } => {
                assert_eq!(blob, "blobdata");
            }
            _ => panic!("Expected BlobResourceContents"),
        }
    }

    #[test]
    fn test_resource_contents_without_payload_is_rejected() {
        let json = r#"{"uri": "file:///nothing"}"#;
        assert!(serde_json::from_str::<ResourceContents>(json).is_err());
    }
}
