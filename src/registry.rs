//! Name-keyed registry routing invocations to tools.

use std::collections::BTreeMap;
use std::fmt;
use std::future::Future;
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::argument::Argument;
use crate::definition::ToolDefinition;
use crate::error::ToolError;
use crate::options::RegistryOptions;
use crate::output::ToolOutput;
use crate::tools::{FnTool, McpTool, Tool, ToolService};

static GLOBAL: OnceLock<ToolRegistry> = OnceLock::new();

struct RegisteredTool {
    definition: ToolDefinition,
    tool: Arc<dyn Tool>,
}

/// Immutable set of tools addressable by name.
///
/// Populated once through [`ToolRegistryBuilder`]; there is no removal or
/// late registration. Calls are not serialized: the registry can be shared
/// across tasks and invoked concurrently.
///
/// # Example
/// ```
/// use toolbelt::{FnTool, ToolDefinition, ToolOutput, ToolRegistry};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), toolbelt::ToolError> {
/// let registry = ToolRegistry::builder()
///     .register_fn(ToolDefinition::new("hello", "Greets"), |_args| async {
///         Ok(ToolOutput::from("hello"))
///     })?
///     .build();
///
/// let output = registry.call("hello", &[]).await?;
/// assert_eq!(output.as_str(), Some("hello"));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, RegisteredTool>,
    options: RegistryOptions,
}

impl fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("options", &self.options)
            .finish()
    }
}

impl ToolRegistry {
    pub fn builder() -> ToolRegistryBuilder {
        ToolRegistryBuilder::default()
    }

    /// The process-wide registry, if one has been installed.
    pub fn global() -> Option<&'static ToolRegistry> {
        GLOBAL.get()
    }

    /// Install this registry as the process-wide registry.
    ///
    /// Succeeds only once; later attempts hand the registry back.
    pub fn install_global(self) -> Result<&'static ToolRegistry, ToolRegistry> {
        let mut candidate = Some(self);
        let installed = GLOBAL.get_or_init(|| candidate.take().unwrap_or_default());
        match candidate {
            None => {
                info!("Installed global tool registry with {} tools", installed.len());
                Ok(installed)
            }
            Some(rejected) => {
                warn!("Global tool registry already installed");
                Err(rejected)
            }
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// Tool names in ascending order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// All definitions, ordered by name.
    pub fn definitions(&self) -> impl Iterator<Item = &ToolDefinition> {
        self.tools.values().map(|entry| &entry.definition)
    }

    pub fn definition(&self, name: &str) -> Result<&ToolDefinition, ToolError> {
        self.entry(name).map(|entry| &entry.definition)
    }

    /// Shared handle to the named tool.
    pub fn get(&self, name: &str) -> Result<Arc<dyn Tool>, ToolError> {
        self.entry(name).map(|entry| Arc::clone(&entry.tool))
    }

    /// Invoke the named tool.
    ///
    /// Errors from the tool are returned unchanged. With a configured
    /// [`RegistryOptions::call_timeout`] the call fails with
    /// [`ToolError::Timeout`] once the deadline passes.
    pub async fn call(&self, name: &str, arguments: &[Argument]) -> Result<ToolOutput, ToolError> {
        let entry = self.entry(name)?;

        info!("Tool call requested: {}", name);
        if self.options.log_arguments {
            debug!("Tool arguments: {:?}", arguments);
        }

        let result = match self.options.call_timeout {
            Some(timeout) => tokio::time::timeout(timeout, entry.tool.call(arguments))
                .await
                .unwrap_or_else(|_| {
                    Err(ToolError::Timeout {
                        name: name.to_string(),
                        timeout,
                    })
                }),
            None => entry.tool.call(arguments).await,
        };

        match &result {
            Ok(output) => {
                info!("Tool {} executed successfully", name);
                debug!("Tool result: {:?}", output);
            }
            Err(e) => warn!("Tool {} execution failed: {}", name, e),
        }

        result
    }

    fn entry(&self, name: &str) -> Result<&RegisteredTool, ToolError> {
        self.tools
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))
    }
}

#[async_trait]
impl ToolService for ToolRegistry {
    async fn list_tools(&self) -> Result<Vec<McpTool>, ToolError> {
        Ok(self.definitions().map(McpTool::from).collect())
    }

    async fn call_tool(&self, name: String, args: Value) -> Result<Value, ToolError> {
        let arguments = self.definition(&name)?.input_schema.arguments_from_json(args)?;
        let output = self.call(&name, &arguments).await?;
        if !output.is_representable() {
            warn!("Tool {} returned a non-finite double", name);
            return Err(ToolError::UnrepresentableOutput {
                name,
                output: format!("{:?}", output),
            });
        }
        Ok(serde_json::to_value(output)?)
    }
}

impl From<&ToolDefinition> for McpTool {
    fn from(definition: &ToolDefinition) -> Self {
        McpTool::new(
            definition.name.clone(),
            definition.description.clone(),
            definition.input_schema.to_json_schema(),
        )
    }
}

/// Collects tools before freezing them into a [`ToolRegistry`].
#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: BTreeMap<String, RegisteredTool>,
    options: RegistryOptions,
}

impl ToolRegistryBuilder {
    /// Register a tool under its definition's name.
    pub fn register<T: Tool + 'static>(self, tool: T) -> Result<Self, ToolError> {
        self.register_shared(Arc::new(tool))
    }

    /// Register an already shared tool.
    pub fn register_shared(mut self, tool: Arc<dyn Tool>) -> Result<Self, ToolError> {
        let definition = tool.definition();
        let name = definition.name.clone();
        if self.tools.contains_key(&name) {
            return Err(ToolError::DuplicateTool(name));
        }

        debug!("Registering tool {} ({})", name, definition.input_schema.kind);
        self.tools.insert(name, RegisteredTool { definition, tool });
        Ok(self)
    }

    /// Register a closure as a tool.
    pub fn register_fn<F, Fut>(self, definition: ToolDefinition, handler: F) -> Result<Self, ToolError>
    where
        F: Fn(Vec<Argument>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<ToolOutput, ToolError>> + Send + 'static,
    {
        self.register(FnTool::new(definition, handler))
    }

    pub fn with_options(mut self, options: RegistryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> ToolRegistry {
        info!("Tool registry built with {} tools", self.tools.len());
        ToolRegistry {
            tools: self.tools,
            options: self.options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ParameterKind;
    use serde_json::json;

    fn constant(name: &str, value: &'static str) -> FnTool {
        FnTool::new(ToolDefinition::new(name, "Returns a constant"), move |_| async move {
            Ok(ToolOutput::from(value))
        })
    }

    #[tokio::test]
    async fn test_lookup_and_call() {
        let registry = ToolRegistry::builder()
            .register(constant("b", "bee"))
            .unwrap()
            .register(constant("a", "ay"))
            .unwrap()
            .build();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.definition("b").unwrap().name, "b");
        assert_eq!(
            registry.call("a", &[]).await.unwrap(),
            ToolOutput::from("ay")
        );
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = ToolRegistry::builder().build();
        assert!(registry.is_empty());
        assert!(matches!(
            registry.call("missing", &[]).await,
            Err(ToolError::ToolNotFound(name)) if name == "missing"
        ));
        assert!(matches!(
            registry.definition("missing"),
            Err(ToolError::ToolNotFound(_))
        ));
    }

    #[test]
    fn test_duplicate_registration() {
        let result = ToolRegistry::builder()
            .register(constant("same", "1"))
            .unwrap()
            .register(constant("same", "2"));
        assert!(matches!(result, Err(ToolError::DuplicateTool(name)) if name == "same"));
    }

    #[test]
    fn test_mcp_conversion() {
        let definition = ToolDefinition::new("calculate_square_root", "Square root")
            .with_parameter("number", ParameterKind::Number, true);
        let tool = McpTool::from(&definition);

        assert_eq!(tool.name, "calculate_square_root");
        assert_eq!(
            tool.input_schema.get("required"),
            Some(&json!(["number"]))
        );
    }
}
