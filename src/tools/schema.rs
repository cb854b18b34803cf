//! Typed parameter schemas for tools.
//!
//! A schema is an ordered list of [`FieldSpec`]s. It does two jobs:
//!
//! - [`Schema::validate`] checks an argument object before any network
//!   activity, strips unknown keys and fills in defaults
//! - [`Schema::to_json_schema`] renders the `inputSchema` advertised in
//!   `tools/list`

use serde_json::{json, Map, Value};

/// The type of a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A JSON string.
    String,
    /// Any JSON number.
    Number,
    /// An array whose elements are all strings.
    StringArray,
    /// A nested object with its own fields.
    Object(Vec<FieldSpec>),
}

impl FieldType {
    const fn expected(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::StringArray => "array",
            Self::Object(_) => "object",
        }
    }
}

/// One named parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Argument key.
    pub name: &'static str,
    /// Shown to the calling agent.
    pub description: &'static str,
    /// Expected type.
    pub field_type: FieldType,
    /// Whether the field must be present.
    pub required: bool,
    /// Value inserted when an optional field is absent.
    pub default: Option<Value>,
}

impl FieldSpec {
    /// A field that must be present.
    #[must_use]
    pub const fn required(
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            field_type,
            required: true,
            default: None,
        }
    }

    /// A field that may be omitted.
    #[must_use]
    pub const fn optional(
        name: &'static str,
        field_type: FieldType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            field_type,
            required: false,
            default: None,
        }
    }

    /// Sets the value used when the field is absent.
    #[must_use]
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    fn to_json_schema(&self) -> Value {
        let mut schema = match &self.field_type {
            FieldType::String => json!({ "type": "string" }),
            FieldType::Number => json!({ "type": "number" }),
            FieldType::StringArray => json!({ "type": "array", "items": { "type": "string" } }),
            FieldType::Object(fields) => object_schema(fields),
        };
        if let Some(obj) = schema.as_object_mut() {
            if !self.description.is_empty() {
                obj.insert("description".to_string(), json!(self.description));
            }
            if let Some(default) = &self.default {
                obj.insert("default".to_string(), default.clone());
            }
        }
        schema
    }
}

/// An ordered set of fields describing a tool's arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    /// Creates a schema from fields in declaration order.
    #[must_use]
    pub const fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Validates `arguments` and returns the cleaned argument object.
    ///
    /// `null` arguments are treated as an empty object. The result holds only
    /// declared fields, in declaration order, with defaults applied.
    ///
    /// # Errors
    ///
    /// Returns a message naming the offending field path when a required
    /// field is missing or a value has the wrong type.
    pub fn validate(&self, arguments: &Value) -> Result<Map<String, Value>, String> {
        match arguments {
            Value::Null => validate_object(&self.fields, &Map::new(), ""),
            Value::Object(obj) => validate_object(&self.fields, obj, ""),
            other => Err(format!(
                "arguments: expected object, received {}",
                type_name(other)
            )),
        }
    }

    /// Renders the schema as a JSON Schema object.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        object_schema(&self.fields)
    }
}

fn object_schema(fields: &[FieldSpec]) -> Value {
    let properties: Map<String, Value> = fields
        .iter()
        .map(|f| (f.name.to_string(), f.to_json_schema()))
        .collect();
    let required: Vec<&str> = fields.iter().filter(|f| f.required).map(|f| f.name).collect();

    let mut schema = json!({
        "type": "object",
        "properties": properties,
    });
    if !required.is_empty() {
        schema["required"] = json!(required);
    }
    schema
}

fn validate_object(
    fields: &[FieldSpec],
    input: &Map<String, Value>,
    prefix: &str,
) -> Result<Map<String, Value>, String> {
    let mut output = Map::new();

    for field in fields {
        let path = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };

        match input.get(field.name) {
            Some(value) => {
                let checked = validate_value(&field.field_type, value, &path)?;
                output.insert(field.name.to_string(), checked);
            }
            None if field.required => {
                return Err(format!("{path}: required field is missing"));
            }
            None => {
                if let Some(default) = &field.default {
                    output.insert(field.name.to_string(), default.clone());
                }
            }
        }
    }

    Ok(output)
}

fn validate_value(field_type: &FieldType, value: &Value, path: &str) -> Result<Value, String> {
    let mismatch = || {
        format!(
            "{path}: expected {}, received {}",
            field_type.expected(),
            type_name(value)
        )
    };

    match (field_type, value) {
        (FieldType::String, Value::String(_)) | (FieldType::Number, Value::Number(_)) => {
            Ok(value.clone())
        }
        (FieldType::StringArray, Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(format!(
                        "{path}[{i}]: expected string, received {}",
                        type_name(item)
                    ));
                }
            }
            Ok(value.clone())
        }
        (FieldType::Object(fields), Value::Object(obj)) => {
            validate_object(fields, obj, path).map(Value::Object)
        }
        _ => Err(mismatch()),
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
