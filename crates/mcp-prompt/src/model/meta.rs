use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use super::JsonObject;

/// Protocol-level metadata attached to a content block under the `_meta` key
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
#[cfg_attr(feature = "schemars", derive(schemars::JsonSchema))]
pub struct Meta(pub JsonObject);

impl Meta {
    pub fn new() -> Self {
        Self(JsonObject::new())
    }
}

impl Deref for Meta {
    type Target = JsonObject;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Meta {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<JsonObject> for Meta {
    fn from(object: JsonObject) -> Self {
        Self(object)
    }
}
