//! # toolbelt - Typed Tool Runtime
//!
//! A small runtime for registering named, schema-described tools and invoking
//! them through one uniform, asynchronous contract.
//!
//! ## Features
//! - Async-first, tokio compatible
//! - Type-checked extraction of arguments from an opaque argument list
//! - Closed, serializable result type
//! - Serializable tool definitions for discovery, exportable as MCP tools
//!
//! ## Architecture
//!
//! 1. **Argument types** implement [`ArgumentSchema`] and are wrapped into
//!    [`Argument`] bags tagged with their kind.
//! 2. **Tools** implement [`Tool`] (or [`TypedTool`] for a single typed input)
//!    and return a [`ToolOutput`].
//! 3. **Registries** map names to tools, expose their [`ToolDefinition`]s and
//!    route calls.
//!
//! ## Example
//! ```
//! use async_trait::async_trait;
//! use schemars::JsonSchema;
//! use serde::{Deserialize, Serialize};
//! use toolbelt::{ArgumentSchema, ToolError, ToolOutput, ToolRegistry, TypedTool};
//!
//! #[derive(Serialize, Deserialize, JsonSchema)]
//! struct HalveInput {
//!     number: f64,
//! }
//!
//! impl ArgumentSchema for HalveInput {
//!     const KIND: &'static str = "halve_input";
//! }
//!
//! struct Halve;
//!
//! #[async_trait]
//! impl TypedTool for Halve {
//!     type Input = HalveInput;
//!     const NAME: &'static str = "halve";
//!     const DESCRIPTION: &'static str = "Divides a number by two";
//!
//!     async fn run(&self, input: HalveInput) -> Result<ToolOutput, ToolError> {
//!         Ok(ToolOutput::Double(input.number / 2.0))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ToolError> {
//!     let registry = ToolRegistry::builder().register(Halve)?.build();
//!
//!     let args = vec![HalveInput { number: 9.0 }.into_argument()?];
//!     let output = registry.call("halve", &args).await?;
//!     assert_eq!(output, ToolOutput::Double(4.5));
//!     Ok(())
//! }
//! ```

pub mod argument;
pub mod definition;
pub mod error;
pub mod options;
pub mod output;
pub mod registry;
pub mod tools;

pub use argument::{Argument, ArgumentSchema, Arguments, EmptyArgument};
pub use definition::{InputSchema, Parameter, ParameterKind, ToolDefinition};
pub use error::{BoxError, ToolError};
pub use options::RegistryOptions;
pub use output::ToolOutput;
pub use registry::{ToolRegistry, ToolRegistryBuilder};
pub use tools::{FnTool, McpTool, Tool, ToolService, TypedTool};

// Re-export rmcp for convenience
pub use rmcp;
