//! Response serialization formats

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::handlers::ApiError;

/// Content type produced by the JSON formats
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Format used to serialize entities into response bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializationFormat {
    /// Compact JSON
    #[default]
    Json,
    /// Indented JSON
    JsonPretty,
}

impl fmt::Display for SerializationFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::JsonPretty => write!(f, "json_pretty"),
        }
    }
}

/// A serialized payload and its content type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Serialized {
    /// MIME type of `body`
    pub content_type: &'static str,
    /// Encoded bytes
    pub body: Vec<u8>,
}

impl SerializationFormat {
    /// MIME type of the output
    #[must_use]
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::Json | Self::JsonPretty => JSON_CONTENT_TYPE,
        }
    }

    /// Serialize a value in this format
    ///
    /// # Example
    ///
    /// ```rust
    /// use softcrud::serializer::SerializationFormat;
    ///
    /// let out = SerializationFormat::Json.serialize(&vec![1, 2]).unwrap();
    /// assert_eq!(out.body, b"[1,2]");
    /// assert_eq!(out.content_type, "application/json");
    /// ```
    pub fn serialize<T: Serialize + ?Sized>(&self, value: &T) -> Result<Serialized, ApiError> {
        let body = match self {
            Self::Json => serde_json::to_vec(value),
            Self::JsonPretty => serde_json::to_vec_pretty(value),
        }
        .map_err(|e| {
            tracing::error!(format = %self, error = %e, "response serialization failed");
            ApiError::internal("Failed to serialize response")
        })?;

        Ok(Serialized {
            content_type: self.content_type(),
            body,
        })
    }
}
