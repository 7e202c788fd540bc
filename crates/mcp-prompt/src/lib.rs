#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(docsrs, allow(unused_attributes))]
#![doc = include_str!("../README.md")]

mod error;
pub use error::{DecodeError, ErrorData, PromptError, RegistryError};

/// Basic data types for prompts and prompt messages
pub mod model;

pub mod handler;
pub use handler::server::prompt::PromptRegistry;

// re-export
#[cfg(feature = "schemars")]
pub use schemars;
pub use serde;
pub use serde_json;
