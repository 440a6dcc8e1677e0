//! Declarative output contracts.
//!
//! One `OutputContract` per modality is the single source of truth for the shape of a
//! model answer. The same value is rendered into the model request (native response
//! schema, or JSON Schema text embedded in a prompt) and used to validate the answer, so
//! the two cannot drift apart.

use serde_json::{json, Map, Value};

use crate::error::AppError;

mod contracts;
mod validator;

pub use contracts::{
    AUDIO_AUTHENTICATOR_OUTPUT, IMAGE_VERIFIER_OUTPUT, NEWS_SLEUTH_OUTPUT, VIDEO_INTEGRITY_OUTPUT,
};
pub use validator::{ContractValidator, OutputRegime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    Number { min: f64, max: f64 },
    String,
    /// Required key whose value may be `null`.
    NullableString,
    Boolean,
    StringArray,
    Enum(&'static [&'static str]),
    Object(&'static [FieldSpec]),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutputContract {
    pub name: &'static str,
    pub fields: &'static [FieldSpec],
}

impl OutputContract {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// JSON Schema rendering, embedded verbatim into freeform prompts.
    pub fn to_json_schema(&self) -> Value {
        object_json_schema(self.fields)
    }

    /// Gemini `responseSchema` rendering (OpenAPI subset, upper-case type names).
    pub fn to_model_schema(&self) -> Value {
        object_model_schema(self.fields)
    }

    /// Check a parsed JSON value against the contract. Reports every violation found.
    pub fn validate(&self, value: &Value) -> Result<(), AppError> {
        let mut violations = Vec::new();
        check_object(self.fields, value, "$", &mut violations);
        if violations.is_empty() {
            return Ok(());
        }
        Err(AppError::new(
            "MODEL_OUTPUT_CONTRACT_VIOLATION",
            format!("Model output does not match the {} contract", self.name),
        )
        .with_details(violations.join("; ")))
    }
}

fn object_json_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    for f in fields {
        let mut prop = match f.kind {
            FieldKind::Number { min, max } => {
                json!({ "type": "number", "minimum": min, "maximum": max })
            }
            FieldKind::String => json!({ "type": "string" }),
            FieldKind::NullableString => json!({ "type": ["string", "null"] }),
            FieldKind::Boolean => json!({ "type": "boolean" }),
            FieldKind::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
            FieldKind::Enum(values) => json!({ "type": "string", "enum": values }),
            FieldKind::Object(inner) => object_json_schema(inner),
        };
        prop["description"] = Value::String(f.description.to_string());
        properties.insert(f.name.to_string(), prop);
        if f.required {
            required.push(f.name);
        }
    }
    json!({ "type": "object", "properties": properties, "required": required })
}

fn object_model_schema(fields: &[FieldSpec]) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();
    let mut ordering = Vec::new();
    for f in fields {
        let mut prop = match f.kind {
            FieldKind::Number { min, max } => {
                json!({ "type": "NUMBER", "minimum": min, "maximum": max })
            }
            FieldKind::String => json!({ "type": "STRING" }),
            FieldKind::NullableString => json!({ "type": "STRING", "nullable": true }),
            FieldKind::Boolean => json!({ "type": "BOOLEAN" }),
            FieldKind::StringArray => json!({ "type": "ARRAY", "items": { "type": "STRING" } }),
            FieldKind::Enum(values) => json!({ "type": "STRING", "enum": values }),
            FieldKind::Object(inner) => object_model_schema(inner),
        };
        prop["description"] = Value::String(f.description.to_string());
        properties.insert(f.name.to_string(), prop);
        ordering.push(f.name);
        if f.required {
            required.push(f.name);
        }
    }
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": required,
        "propertyOrdering": ordering,
    })
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_object(fields: &[FieldSpec], value: &Value, path: &str, out: &mut Vec<String>) {
    let Some(obj) = value.as_object() else {
        out.push(format!("{path}: expected object, got {}", type_name(value)));
        return;
    };
    for f in fields {
        let field_path = format!("{path}.{}", f.name);
        match obj.get(f.name) {
            None => {
                if f.required {
                    out.push(format!("{field_path}: missing required field"));
                }
            }
            // Optional sub-objects may be sent as explicit null.
            Some(Value::Null) if !f.required && matches!(f.kind, FieldKind::Object(_)) => {}
            Some(v) => check_field(f, v, &field_path, out),
        }
    }
}

fn check_field(f: &FieldSpec, v: &Value, path: &str, out: &mut Vec<String>) {
    match f.kind {
        FieldKind::Number { min, max } => match v.as_f64() {
            Some(n) if n >= min && n <= max => {}
            Some(n) => out.push(format!("{path}: {n} is outside [{min}, {max}]")),
            None => out.push(format!("{path}: expected number, got {}", type_name(v))),
        },
        FieldKind::String => {
            if !v.is_string() {
                out.push(format!("{path}: expected string, got {}", type_name(v)));
            }
        }
        FieldKind::NullableString => {
            if !(v.is_string() || v.is_null()) {
                out.push(format!("{path}: expected string or null, got {}", type_name(v)));
            }
        }
        FieldKind::Boolean => {
            if !v.is_boolean() {
                out.push(format!("{path}: expected boolean, got {}", type_name(v)));
            }
        }
        FieldKind::StringArray => match v.as_array() {
            Some(items) => {
                for (i, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        out.push(format!(
                            "{path}[{i}]: expected string, got {}",
                            type_name(item)
                        ));
                    }
                }
            }
            None => out.push(format!("{path}: expected array, got {}", type_name(v))),
        },
        FieldKind::Enum(values) => match v.as_str() {
            Some(s) if values.contains(&s) => {}
            Some(s) => out.push(format!(
                "{path}: {s:?} is not one of [{}]",
                values.join(", ")
            )),
            None => out.push(format!("{path}: expected string, got {}", type_name(v))),
        },
        FieldKind::Object(inner) => check_object(inner, v, path, out),
    }
}
