//! Serializable tool descriptors used for discovery.

use schemars::schema::{InstanceType, RootSchema, Schema, SchemaObject, SingleOrVec};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use serde_with::skip_serializing_none;

use crate::argument::{Argument, ArgumentSchema, EmptyArgument};
use crate::error::ToolError;

/// Static description of a tool: its name, purpose and expected input.
///
/// Built once per tool type and read-only afterwards.
///
/// # Example
/// ```
/// use toolbelt::{ParameterKind, ToolDefinition};
///
/// let definition = ToolDefinition::new("calculate_square_root", "Calculates the square root of a number")
///     .with_kind("square_root_input")
///     .with_parameter("number", ParameterKind::Number, true);
///
/// assert_eq!(definition.input_schema.parameters.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique identifier within a registry.
    pub name: String,
    /// Human-readable description.
    pub description: String,
    pub input_schema: InputSchema,
}

impl ToolDefinition {
    /// Create a definition with no parameters.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: InputSchema::empty(),
        }
    }

    /// Replace the input schema with the one derived from `T`.
    pub fn with_input<T: ArgumentSchema>(mut self) -> Self {
        self.input_schema = InputSchema::of::<T>();
        self
    }

    /// Set the argument kind expected by the tool.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.input_schema.kind = kind.into();
        self
    }

    /// Append a parameter.
    pub fn with_parameter(
        mut self,
        name: impl Into<String>,
        kind: ParameterKind,
        required: bool,
    ) -> Self {
        self.input_schema.parameters.push(Parameter {
            name: name.into(),
            kind,
            description: None,
            required,
        });
        self
    }

    /// Append a parameter carrying a description.
    pub fn with_described_parameter(
        mut self,
        name: impl Into<String>,
        kind: ParameterKind,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        self.input_schema.parameters.push(Parameter {
            name: name.into(),
            kind,
            description: Some(description.into()),
            required,
        });
        self
    }
}

/// Structural description of the argument a tool expects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSchema {
    /// Kind tag of the expected [`Argument`].
    pub kind: String,
    pub parameters: Vec<Parameter>,
}

/// One field of an input schema.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ParameterKind,
    pub description: Option<String>,
    pub required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

impl ParameterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::String => "string",
            ParameterKind::Number => "number",
            ParameterKind::Integer => "integer",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Array => "array",
            ParameterKind::Object => "object",
        }
    }

    fn from_instance_type(instance_type: &InstanceType) -> Option<Self> {
        match instance_type {
            InstanceType::String => Some(ParameterKind::String),
            InstanceType::Number => Some(ParameterKind::Number),
            InstanceType::Integer => Some(ParameterKind::Integer),
            InstanceType::Boolean => Some(ParameterKind::Boolean),
            InstanceType::Array => Some(ParameterKind::Array),
            InstanceType::Object => Some(ParameterKind::Object),
            InstanceType::Null => None,
        }
    }
}

impl InputSchema {
    /// Schema of a tool that takes no input.
    pub fn empty() -> Self {
        Self {
            kind: EmptyArgument::KIND.to_string(),
            parameters: Vec::new(),
        }
    }

    /// Derive the schema from an argument type's JSON schema.
    ///
    /// Properties are listed in the order `schemars` emits them; nested types
    /// referenced through `definitions` are resolved one level deep.
    pub fn of<T: ArgumentSchema>() -> Self {
        let root = schemars::schema_for!(T);
        Self {
            kind: T::KIND.to_string(),
            parameters: parameters_of(&root),
        }
    }

    /// Whether the tool accepts an empty argument sequence.
    pub fn accepts_empty(&self) -> bool {
        self.parameters.iter().all(|p| !p.required)
    }

    /// Render as a JSON Schema object (`type`, `properties`, `required`).
    pub fn to_json_schema(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for parameter in &self.parameters {
            let mut property = Map::new();
            property.insert("type".to_string(), json!(parameter.kind.as_str()));
            if let Some(description) = &parameter.description {
                property.insert("description".to_string(), json!(description));
            }
            properties.insert(parameter.name.clone(), Value::Object(property));

            if parameter.required {
                required.push(json!(parameter.name));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), Value::Array(required));
        }
        schema
    }

    /// Turn a JSON payload supplied by an external caller into arguments.
    ///
    /// - `null`, or `{}` when no parameter is required: no arguments
    /// - an object: one argument of this schema's kind
    /// - an array: each element is a serialized [`Argument`]
    ///
    /// `null` always means "no arguments", so a tool with required parameters
    /// reports [`ToolError::NoArguments`]. `{}` for such a tool is forwarded as
    /// an argument and fails decoding with [`ToolError::InvalidArgumentType`].
    pub fn arguments_from_json(&self, payload: Value) -> Result<Vec<Argument>, ToolError> {
        match payload {
            Value::Null => Ok(Vec::new()),
            Value::Object(map) if map.is_empty() && self.accepts_empty() => Ok(Vec::new()),
            Value::Object(map) => Ok(vec![Argument::from_parts(
                self.kind.clone(),
                Value::Object(map),
            )]),
            Value::Array(items) => items
                .into_iter()
                .map(|item| serde_json::from_value(item).map_err(ToolError::from))
                .collect(),
            _ => Err(ToolError::invalid_argument_type(self.kind.clone())),
        }
    }
}

fn parameters_of(root: &RootSchema) -> Vec<Parameter> {
    let Some(object) = &root.schema.object else {
        return Vec::new();
    };

    object
        .properties
        .iter()
        .map(|(name, schema)| Parameter {
            name: name.clone(),
            kind: kind_of(root, schema),
            description: description_of(schema),
            required: object.required.contains(name),
        })
        .collect()
}

fn kind_of(root: &RootSchema, schema: &Schema) -> ParameterKind {
    let Schema::Object(object) = schema else {
        return ParameterKind::Object;
    };

    if let Some(kind) = instance_kind(object) {
        return kind;
    }

    // described references are wrapped as `allOf: [$ref]`
    if let Some([inner]) = object
        .subschemas
        .as_ref()
        .and_then(|subschemas| subschemas.all_of.as_deref())
    {
        return kind_of(root, inner);
    }

    // `$ref` to a definition, e.g. a nested struct or an enum
    object
        .reference
        .as_deref()
        .and_then(|reference| reference.strip_prefix("#/definitions/"))
        .and_then(|name| root.definitions.get(name))
        .and_then(|definition| match definition {
            Schema::Object(object) => instance_kind(object),
            Schema::Bool(_) => None,
        })
        .unwrap_or(ParameterKind::Object)
}

fn instance_kind(object: &SchemaObject) -> Option<ParameterKind> {
    match object.instance_type.as_ref()? {
        SingleOrVec::Single(instance_type) => ParameterKind::from_instance_type(instance_type),
        SingleOrVec::Vec(types) => types.iter().find_map(ParameterKind::from_instance_type),
    }
}

fn description_of(schema: &Schema) -> Option<String> {
    match schema {
        Schema::Object(object) => object
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.description.clone()),
        Schema::Bool(_) => None,
    }
}
