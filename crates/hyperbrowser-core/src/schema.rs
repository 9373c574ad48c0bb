use std::path::Path;

use schemars::JsonSchema;
use schemars::schema::RootSchema;
use serde::{Serialize, Serializer};

use crate::error::HyperbrowserError;

/// A JSON Schema given either as a raw document or derived from a Rust type.
///
/// Both forms serialize to the plain JSON Schema document, so request
/// parameters never carry the distinction over the wire.
#[derive(Debug, Clone)]
pub enum SchemaInput {
    Json(serde_json::Value),
    Typed(Box<RootSchema>),
}

impl SchemaInput {
    /// Derive the schema of `T`.
    pub fn of<T: JsonSchema>() -> Self {
        SchemaInput::Typed(Box::new(schemars::schema_for!(T)))
    }

    /// Load a JSON Schema document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, HyperbrowserError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            HyperbrowserError::InvalidParams(format!(
                "Failed to read schema file {}: {e}",
                path.display()
            ))
        })?;
        let schema: serde_json::Value = serde_json::from_str(&raw).map_err(|e| {
            HyperbrowserError::InvalidParams(format!(
                "Invalid JSON in schema file {}: {e}",
                path.display()
            ))
        })?;
        if !schema.is_object() {
            return Err(HyperbrowserError::InvalidParams(format!(
                "Schema file {} must contain a JSON object",
                path.display()
            )));
        }
        Ok(SchemaInput::Json(schema))
    }

    /// The schema as a plain JSON document.
    pub fn to_json(&self) -> Result<serde_json::Value, HyperbrowserError> {
        match self {
            SchemaInput::Json(value) => Ok(value.clone()),
            SchemaInput::Typed(root) => Ok(serde_json::to_value(root)?),
        }
    }
}

impl From<serde_json::Value> for SchemaInput {
    fn from(value: serde_json::Value) -> Self {
        SchemaInput::Json(value)
    }
}

impl Serialize for SchemaInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SchemaInput::Json(value) => value.serialize(serializer),
            SchemaInput::Typed(root) => root.serialize(serializer),
        }
    }
}
