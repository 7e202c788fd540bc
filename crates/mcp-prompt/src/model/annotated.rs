use std::ops::{Deref, DerefMut};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{RawEmbeddedResource, RawImageContent, RawTextContent, Role};

/// Hints for the client about how a content block should be used or shown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Annotations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<Vec<Role>>,
    /// Importance in `0.0..=1.0`, where 1 means effectively required
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none", rename = "lastModified")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Annotations {
    /// Whether the priority, if any, lies within `0.0..=1.0`
    pub fn is_valid(&self) -> bool {
        self.priority
            .is_none_or(|priority| (0.0..=1.0).contains(&priority))
    }
}

/// A content block together with its optional [`Annotations`].
///
/// Both parts share one JSON object on the wire, the raw fields are flattened
/// next to the `annotations` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Annotated<T: AnnotateAble> {
    #[serde(flatten)]
    pub raw: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Annotations>,
}

impl<T: AnnotateAble> Deref for Annotated<T> {
    type Target = T;
    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

impl<T: AnnotateAble> DerefMut for Annotated<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.raw
    }
}

impl<T: AnnotateAble> Annotated<T> {
    pub fn new(raw: T, annotations: Option<Annotations>) -> Self {
        Self { raw, annotations }
    }
    pub fn into_raw(self) -> T {
        self.raw
    }
    pub fn remove_annotation(&mut self) -> Option<Annotations> {
        self.annotations.take()
    }
    pub fn audience(&self) -> Option<&Vec<Role>> {
        self.annotations.as_ref().and_then(|a| a.audience.as_ref())
    }
    pub fn priority(&self) -> Option<f32> {
        self.annotations.as_ref().and_then(|a| a.priority)
    }
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        self.annotations.as_ref().and_then(|a| a.last_modified)
    }
    fn annotations_mut(&mut self) -> &mut Annotations {
        self.annotations.get_or_insert_with(Annotations::default)
    }
    pub fn with_audience(mut self, audience: Vec<Role>) -> Self {
        self.annotations_mut().audience = Some(audience);
        self
    }
    /// Set the priority, clamped into `0.0..=1.0`
    pub fn with_priority(mut self, priority: f32) -> Self {
        self.annotations_mut().priority = Some(priority.clamp(0.0, 1.0));
        self
    }
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.annotations_mut().last_modified = Some(timestamp);
        self
    }
    pub fn with_timestamp_now(self) -> Self {
        self.with_timestamp(Utc::now())
    }
}

mod sealed {
    pub trait Sealed {}
}
macro_rules! annotate {
    ($T: ident) => {
        impl sealed::Sealed for $T {}
        impl AnnotateAble for $T {}
    };
}

annotate!(RawTextContent);
annotate!(RawImageContent);
annotate!(RawEmbeddedResource);

/// Raw content blocks that can carry [`Annotations`]
pub trait AnnotateAble: sealed::Sealed + Sized {
    fn optional_annotate(self, annotations: Option<Annotations>) -> Annotated<Self> {
        Annotated::new(self, annotations)
    }
    fn annotate(self, annotations: Annotations) -> Annotated<Self> {
        Annotated::new(self, Some(annotations))
    }
    fn no_annotation(self) -> Annotated<Self> {
        Annotated::new(self, None)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn text(text: &str) -> RawTextContent {
        RawTextContent {
            text: text.to_string(),
            meta: None,
        }
    }

    #[test]
    fn test_annotations_default_is_valid() {
        let annotations = Annotations::default();
        assert_eq!(annotations.audience, None);
        assert_eq!(annotations.priority, None);
        assert!(annotations.is_valid());
    }

    #[test]
    fn test_annotations_out_of_range_priority_is_invalid() {
        let annotations = Annotations {
            priority: Some(1.5),
            ..Default::default()
        };
        assert!(!annotations.is_valid());
    }

    #[test]
    fn test_annotated_deref() {
        let mut annotated = text("test").no_annotation();
        assert_eq!(annotated.text, "test");
        annotated.text = "modified".to_string();
        assert_eq!(annotated.into_raw().text, "modified");
    }

    #[test]
    fn test_annotated_remove_annotation() {
        let mut annotated = text("test").annotate(Annotations::default());
        assert!(annotated.remove_annotation().is_some());
        assert!(annotated.annotations.is_none());
    }

    #[test]
    fn test_with_priority_clamps() {
        let annotated = text("test").no_annotation().with_priority(3.0);
        assert_eq!(annotated.priority(), Some(1.0));
        assert!(annotated.annotations.as_ref().unwrap().is_valid());
    }

    #[test]
    fn test_chaining_annotations_keeps_earlier_fields() {
        let timestamp = Utc::now();
        let annotated = text("test")
            .no_annotation()
            .with_audience(vec![Role::User])
            .with_priority(0.8)
            .with_timestamp(timestamp);

        assert_eq!(annotated.audience(), Some(&vec![Role::User]));
        assert_eq!(annotated.priority(), Some(0.8));
        assert_eq!(annotated.timestamp(), Some(timestamp));
    }

    #[test]
    fn test_with_timestamp_now() {
        let annotated = text("test").no_annotation().with_timestamp_now();
        assert!(annotated.timestamp().is_some());
    }

    #[test]
    fn test_annotated_flattens_raw_fields() {
        let annotated = text("hello")
            .no_annotation()
            .with_audience(vec![Role::Assistant]);
        let json = serde_json::to_value(&annotated).unwrap();
        assert_eq!(
            json,
            json!({"text": "hello", "annotations": {"audience": ["assistant"]}})
        );
    }

    #[test]
    fn test_annotated_without_annotations_omits_key() {
        let json = serde_json::to_value(text("hello").no_annotation()).unwrap();
        assert_eq!(json, json!({"text": "hello"}));
    }

    #[test]
    fn test_last_modified_wire_name() {
        let json = r#"{"lastModified": "2025-01-02T03:04:05Z", "priority": 0.25}"#;
        let annotations: Annotations = serde_json::from_str(json).unwrap();
        assert_eq!(annotations.priority, Some(0.25));
        assert_eq!(
            annotations.last_modified.unwrap().to_rfc3339(),
            "2025-01-02T03:04:05+00:00"
        );
    }
}
