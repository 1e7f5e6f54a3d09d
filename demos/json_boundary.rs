use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use toolbelt::{
    EmptyArgument, RegistryOptions, ToolError, ToolOutput, ToolRegistry, ToolService, TypedTool,
};
use tracing_subscriber::EnvFilter;

pub struct Clock;

#[async_trait]
impl TypedTool for Clock {
    type Input = EmptyArgument;
    const NAME: &'static str = "slow_clock";
    const DESCRIPTION: &'static str = "Waits briefly, then reports that it ticked";

    async fn run(&self, _input: EmptyArgument) -> Result<ToolOutput, ToolError> {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Ok(ToolOutput::from("tick"))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let options = RegistryOptions::new()
        .with_call_timeout(Duration::from_secs(1))
        .with_log_arguments(true);

    let registry = ToolRegistry::builder()
        .register(Clock)?
        .with_options(options)
        .build()
        .install_global()
        .map_err(|_| "global registry already installed")?;

    // Discovery: definitions as JSON and as MCP tools.
    for definition in registry.definitions() {
        println!("{}", serde_json::to_string_pretty(definition)?);
    }
    for tool in registry.list_tools().await? {
        println!("mcp tool: {} {:?}", tool.name, tool.input_schema);
    }

    // Invocation: JSON in, tagged JSON out.
    let output = registry.call_tool("slow_clock".to_string(), json!({})).await?;
    println!("slow_clock -> {}", output);

    match registry.call_tool("fast_clock".to_string(), json!({})).await {
        Err(e) => println!("fast_clock -> {}", e),
        Ok(output) => println!("fast_clock -> {}", output),
    }

    Ok(())
}
