//! Tool contract and adapters for typed and closure-backed tools.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use futures::future::BoxFuture;
use futures::FutureExt;
pub use rmcp::model::Tool as McpTool;
use serde_json::Value;

use crate::argument::{Argument, ArgumentSchema, Arguments};
use crate::definition::ToolDefinition;
use crate::error::ToolError;
use crate::output::ToolOutput;

/// Uniform invocation surface implemented by every tool.
///
/// Each call is independent; a tool must not keep the argument slice
/// beyond the call.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Descriptor used for discovery.
    fn definition(&self) -> ToolDefinition;

    /// Execute the tool.
    async fn call(&self, arguments: &[Argument]) -> Result<ToolOutput, ToolError>;
}

/// Tool with a single, statically typed input.
///
/// Implementing this trait provides [`Tool`] automatically: the definition
/// is derived from `Input` and arguments are decoded before `run` is called.
///
/// # Example
/// ```
/// use async_trait::async_trait;
/// use toolbelt::{EmptyArgument, ToolError, ToolOutput, TypedTool};
///
/// struct Ping;
///
/// #[async_trait]
/// impl TypedTool for Ping {
///     type Input = EmptyArgument;
///     const NAME: &'static str = "ping";
///     const DESCRIPTION: &'static str = "Replies with pong";
///
///     async fn run(&self, _input: EmptyArgument) -> Result<ToolOutput, ToolError> {
///         Ok(ToolOutput::from("pong"))
///     }
/// }
/// ```
#[async_trait]
pub trait TypedTool: Send + Sync {
    type Input: ArgumentSchema;

    const NAME: &'static str;
    const DESCRIPTION: &'static str;

    async fn run(&self, input: Self::Input) -> Result<ToolOutput, ToolError>;
}

#[async_trait]
impl<T: TypedTool> Tool for T {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(T::NAME, T::DESCRIPTION).with_input::<T::Input>()
    }

    async fn call(&self, arguments: &[Argument]) -> Result<ToolOutput, ToolError> {
        let input = arguments.decode::<T::Input>()?;
        self.run(input).await
    }
}

type Handler = dyn Fn(Vec<Argument>) -> BoxFuture<'static, Result<ToolOutput, ToolError>>
    + Send
    + Sync;

/// Tool backed by a closure and an explicit definition.
pub struct FnTool {
    definition: ToolDefinition,
    handler: Box<Handler>,
}

impl FnTool {
    pub fn new<F, Fut>(definition: ToolDefinition, handler: F) -> Self
    where
        F: Fn(Vec<Argument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolOutput, ToolError>> + Send + 'static,
    {
        Self {
            definition,
            handler: Box::new(move |arguments| handler(arguments).boxed()),
        }
    }
}

impl fmt::Debug for FnTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTool")
            .field("definition", &self.definition)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Tool for FnTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn call(&self, arguments: &[Argument]) -> Result<ToolOutput, ToolError> {
        (self.handler)(arguments.to_vec()).await
    }
}

/// JSON boundary for callers that only speak serialized tool calls.
#[async_trait]
pub trait ToolService: Send + Sync {
    /// List available tools.
    async fn list_tools(&self) -> Result<Vec<McpTool>, ToolError>;

    /// Execute a tool and return the serialized [`ToolOutput`].
    async fn call_tool(&self, name: String, args: Value) -> Result<Value, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::argument::EmptyArgument;
    use crate::definition::ParameterKind;
    use schemars::JsonSchema;
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize, JsonSchema)]
    struct Words {
        text: String,
    }

    impl ArgumentSchema for Words {
        const KIND: &'static str = "words";
    }

    struct CountWords;

    #[async_trait]
    impl TypedTool for CountWords {
        type Input = Words;
        const NAME: &'static str = "count_words";
        const DESCRIPTION: &'static str = "Counts whitespace separated words";

        async fn run(&self, input: Words) -> Result<ToolOutput, ToolError> {
            Ok(ToolOutput::Integer(input.text.split_whitespace().count() as i64))
        }
    }

    #[tokio::test]
    async fn test_typed_tool_definition() {
        let definition = CountWords.definition();
        assert_eq!(definition.name, "count_words");
        assert_eq!(definition.input_schema.kind, "words");
        assert_eq!(definition.input_schema.parameters[0].name, "text");
        assert_eq!(
            definition.input_schema.parameters[0].kind,
            ParameterKind::String
        );
    }

    #[tokio::test]
    async fn test_typed_tool_call() {
        let args = vec![Words {
            text: "one two  three".into(),
        }
        .into_argument()
        .unwrap()];
        let output = CountWords.call(&args).await.unwrap();
        assert_eq!(output, ToolOutput::Integer(3));

        assert!(matches!(
            CountWords.call(&[]).await,
            Err(ToolError::NoArguments)
        ));

        let wrong = vec![EmptyArgument {}.into_argument().unwrap()];
        assert!(matches!(
            CountWords.call(&wrong).await,
            Err(ToolError::InvalidArgumentType { .. })
        ));
    }

    #[tokio::test]
    async fn test_fn_tool() {
        let tool = FnTool::new(
            ToolDefinition::new("arg_count", "Counts supplied arguments"),
            |arguments: Vec<Argument>| async move {
                Ok(ToolOutput::Integer(arguments.len() as i64))
            },
        );

        assert_eq!(tool.definition().name, "arg_count");
        assert_eq!(tool.call(&[]).await.unwrap(), ToolOutput::Integer(0));

        let args = vec![
            EmptyArgument {}.into_argument().unwrap(),
            EmptyArgument {}.into_argument().unwrap(),
        ];
        assert_eq!(tool.call(&args).await.unwrap(), ToolOutput::Integer(2));
    }
}
