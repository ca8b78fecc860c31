use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use super::FieldModifier;

const PRINTED_VALUE_LIMIT: usize = 30;

#[derive(Error, Debug, PartialEq)]
pub enum InputDocError {
    #[error("Use set_field for new documents, got {modifier} for field: {field}")]
    ModifierOnNewDoc {
        field: String,
        modifier: FieldModifier,
    },
    #[error("Field is not an atomic update: {0}")]
    NotAtomic(String),
    #[error("No {modifier} value for field: {field}")]
    MissingModifierValue {
        field: String,
        modifier: FieldModifier,
    },
    #[error("No modifier value for field: {0}")]
    MissingValue(String),
}

/// A document for the update handler, either complete or an atomic update.
///
/// Serializes to the JSON object posted to `/update`.
///
/// ```
/// use solr_query::domain::InputDoc;
/// use serde_json::json;
///
/// let doc = InputDoc::to_update("id", "42")
///     .set_field("title", "New title")
///     .add_field("tags", "sale")
///     .unwrap()
///     .build();
///
/// assert_eq!(
///     serde_json::to_value(&doc).unwrap(),
///     json!({ "id": "42", "title": { "set": "New title" }, "tags": { "add": "sale" } })
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InputDoc {
    fields: Map<String, Value>,
}

impl InputDoc {
    pub fn builder(new_doc: bool, id_field: &str, id: impl Into<Value>) -> InputDocBuilder {
        InputDocBuilder::new(new_doc, id_field, id.into())
    }

    pub fn new_doc(id_field: &str, id: impl Into<Value>) -> InputDocBuilder {
        Self::builder(true, id_field, id)
    }

    pub fn to_update(id_field: &str, id: impl Into<Value>) -> InputDocBuilder {
        Self::builder(false, id_field, id)
    }

    /// The plain value of `field`, or for an atomic update the value of its
    /// first modifier.
    pub fn get(&self, field: &str) -> Result<Option<&Value>, InputDocError> {
        match self.fields.get(field) {
            Some(Value::Object(modifiers)) => FieldModifier::ALL
                .iter()
                .find_map(|m| modifiers.get(m.as_str()).filter(|v| !v.is_null()))
                .map(Some)
                .ok_or_else(|| InputDocError::MissingValue(field.to_string())),
            other => Ok(other),
        }
    }

    pub fn get_atomic(&self, field: &str, modifier: FieldModifier) -> Result<&Value, InputDocError> {
        let Some(Value::Object(modifiers)) = self.fields.get(field) else {
            return Err(InputDocError::NotAtomic(field.to_string()));
        };

        modifiers
            .get(modifier.as_str())
            .filter(|v| !v.is_null())
            .ok_or_else(|| InputDocError::MissingModifierValue {
                field: field.to_string(),
                modifier,
            })
    }

    pub fn get_raw(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl fmt::Display for InputDoc {
    /// Compact form for logs; long strings are cut short.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InputDoc{")?;
        for (field, value) in &self.fields {
            match value {
                Value::String(s) => {
                    let printed: String = s.chars().take(PRINTED_VALUE_LIMIT).collect();
                    write!(f, "{}={};", field, printed)?;
                }
                other => write!(f, "{}={};", field, other)?,
            }
        }
        f.write_str("}")
    }
}

pub struct InputDocBuilder {
    new_doc: bool,
    fields: Map<String, Value>,
}

impl InputDocBuilder {
    fn new(new_doc: bool, id_field: &str, id: Value) -> Self {
        let mut fields = Map::new();
        fields.insert(id_field.to_string(), id);
        Self { new_doc, fields }
    }

    /// Sets the value of a new document, or `set`s it on an update.
    ///
    /// `null` is ignored for updates.
    pub fn set_field(mut self, field: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        if self.new_doc {
            self.fields.insert(field.to_string(), value);
        } else if !value.is_null() {
            self.fields
                .insert(field.to_string(), with_modifier(value, FieldModifier::Set));
        }
        self
    }

    pub fn add_field(self, field: &str, value: impl Into<Value>) -> Result<Self, InputDocError> {
        self.modify_field(field, FieldModifier::Add, value)
    }

    /// Applies any atomic-update `modifier`; only valid for updates.
    pub fn modify_field(
        mut self,
        field: &str,
        modifier: FieldModifier,
        value: impl Into<Value>,
    ) -> Result<Self, InputDocError> {
        if self.new_doc {
            return Err(InputDocError::ModifierOnNewDoc {
                field: field.to_string(),
                modifier,
            });
        }

        self.fields
            .insert(field.to_string(), with_modifier(value.into(), modifier));
        Ok(self)
    }

    pub fn build(self) -> InputDoc {
        let doc = InputDoc {
            fields: self.fields,
        };
        tracing::trace!(%doc, new_doc = self.new_doc, "built input document");
        doc
    }
}

/// Wraps `value` as `{ modifier: value }`.
///
/// An empty list becomes `null`, which clears a multi-valued field.
fn with_modifier(value: Value, modifier: FieldModifier) -> Value {
    let value = match value {
        Value::Array(values) if values.is_empty() => Value::Null,
        other => other,
    };

    let mut modifiers = Map::with_capacity(1);
    modifiers.insert(modifier.as_str().to_string(), value);
    Value::Object(modifiers)
}
