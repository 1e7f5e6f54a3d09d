//! Type-erased argument bags and the type-checked decode operation.
//!
//! An [`Argument`] carries one schema-typed value together with the stable
//! kind tag of its type. Decoding matches on that tag first and only then
//! deserializes the payload, so values never coerce between unrelated
//! schema types.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ToolError;

/// A concrete, schema-described argument type.
///
/// `KIND` must be unique among the argument types a tool can receive; it is
/// the identity checked at decode time.
///
/// # Example
/// ```
/// use schemars::JsonSchema;
/// use serde::{Deserialize, Serialize};
/// use toolbelt::ArgumentSchema;
///
/// #[derive(Debug, Serialize, Deserialize, JsonSchema)]
/// struct SquareRootInput {
///     /// The number to take the square root of
///     number: f64,
/// }
///
/// impl ArgumentSchema for SquareRootInput {
///     const KIND: &'static str = "square_root_input";
/// }
/// ```
pub trait ArgumentSchema: Serialize + DeserializeOwned + JsonSchema + Send + Sync + 'static {
    /// Stable type tag.
    const KIND: &'static str;

    /// Value to use when the argument sequence is empty.
    ///
    /// Defaults to deserializing an empty object, so types whose fields are
    /// all optional accept an empty sequence. Returning `None` makes the
    /// argument required.
    fn when_absent() -> Option<Self> {
        Self::deserialize(&Value::Object(Map::new())).ok()
    }

    /// Wrap this value into an [`Argument`].
    fn into_argument(self) -> Result<Argument, ToolError> {
        Argument::new(&self)
    }
}

/// Argument type of tools that take no input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct EmptyArgument {}

impl ArgumentSchema for EmptyArgument {
    const KIND: &'static str = "empty";

    fn when_absent() -> Option<Self> {
        Some(EmptyArgument {})
    }
}

/// One opaque, schema-typed argument value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    kind: String,
    value: Value,
}

impl Argument {
    /// Wrap a concrete argument value.
    pub fn new<T: ArgumentSchema>(value: &T) -> Result<Self, ToolError> {
        Ok(Self {
            kind: T::KIND.to_string(),
            value: serde_json::to_value(value)?,
        })
    }

    /// Build an argument from an already-serialized payload.
    ///
    /// Used at the JSON boundary where the kind comes from the tool's
    /// definition rather than a Rust type.
    pub fn from_parts(kind: impl Into<String>, value: Value) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Whether this argument carries a value of type `T`.
    pub fn is<T: ArgumentSchema>(&self) -> bool {
        self.kind == T::KIND
    }

    fn to_typed<T: ArgumentSchema>(&self) -> Result<T, ToolError> {
        T::deserialize(&self.value).map_err(|_| ToolError::invalid_argument_type(T::KIND))
    }
}

/// Decode operations over a sequence of arguments.
pub trait Arguments {
    /// Extract the single argument of type `T`.
    ///
    /// - empty sequence: `T::when_absent()`, otherwise [`ToolError::NoArguments`]
    /// - no argument of kind `T::KIND`: [`ToolError::InvalidArgumentType`]
    /// - several arguments of kind `T::KIND`: [`ToolError::AmbiguousArgument`]
    fn decode<T: ArgumentSchema>(&self) -> Result<T, ToolError>;

    /// Extract every argument of type `T`, in order.
    fn decode_all<T: ArgumentSchema>(&self) -> Result<Vec<T>, ToolError>;
}

impl Arguments for [Argument] {
    fn decode<T: ArgumentSchema>(&self) -> Result<T, ToolError> {
        if self.is_empty() {
            return T::when_absent().ok_or(ToolError::NoArguments);
        }

        let mut matches = self.iter().filter(|arg| arg.is::<T>());
        let first = matches
            .next()
            .ok_or_else(|| ToolError::invalid_argument_type(T::KIND))?;

        let extra = matches.count();
        if extra > 0 {
            return Err(ToolError::AmbiguousArgument {
                kind: T::KIND.to_string(),
                count: extra + 1,
            });
        }

        first.to_typed()
    }

    fn decode_all<T: ArgumentSchema>(&self) -> Result<Vec<T>, ToolError> {
        self.iter()
            .filter(|arg| arg.is::<T>())
            .map(|arg| arg.to_typed::<T>())
            .collect()
    }
}
