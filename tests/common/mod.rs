#![allow(dead_code)]

use std::time::Duration;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use toolbelt::{
    Argument, ArgumentSchema, EmptyArgument, Tool, ToolDefinition, ToolError, ToolOutput,
    TypedTool,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SquareRootInput {
    /// The number to take the square root of
    pub number: f64,
}

impl ArgumentSchema for SquareRootInput {
    const KIND: &'static str = "calculate_square_root.input";
}

#[derive(Debug, Error, PartialEq)]
pub enum SquareRootError {
    #[error("cannot take the square root of negative number {0}")]
    Negative(f64),
}

pub struct CalcSquareRoot;

#[async_trait]
impl TypedTool for CalcSquareRoot {
    type Input = SquareRootInput;
    const NAME: &'static str = "calculate_square_root";
    const DESCRIPTION: &'static str = "Calculates the square root of a number";

    async fn run(&self, input: SquareRootInput) -> Result<ToolOutput, ToolError> {
        if input.number < 0.0 {
            return Err(ToolError::execution(SquareRootError::Negative(input.number)));
        }
        Ok(ToolOutput::Double(input.number.sqrt()))
    }
}

pub struct TestTool;

#[async_trait]
impl TypedTool for TestTool {
    type Input = EmptyArgument;
    const NAME: &'static str = "test_tool";
    const DESCRIPTION: &'static str = "A test tool";

    async fn run(&self, _input: EmptyArgument) -> Result<ToolOutput, ToolError> {
        Ok(ToolOutput::from("test result"))
    }
}

pub const ASYNC_DELAY: Duration = Duration::from_millis(100);

/// Implements the contract directly instead of going through `TypedTool`.
pub struct AsyncDelayTool;

#[async_trait]
impl Tool for AsyncDelayTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(
            "async_delay_tool",
            "A tool that simulates async work with delay",
        )
    }

    async fn call(&self, _arguments: &[Argument]) -> Result<ToolOutput, ToolError> {
        tokio::time::sleep(ASYNC_DELAY).await;
        Ok(ToolOutput::from("async completed"))
    }
}

pub fn square_root_args(number: f64) -> Vec<Argument> {
    vec![SquareRootInput { number }.into_argument().unwrap()]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GreetInput {
    /// Who to greet
    pub name: Option<String>,
}

impl ArgumentSchema for GreetInput {
    const KIND: &'static str = "greet.input";
}

/// Every input field is optional, so no argument is required.
pub struct Greet;

#[async_trait]
impl TypedTool for Greet {
    type Input = GreetInput;
    const NAME: &'static str = "greet";
    const DESCRIPTION: &'static str = "Greets someone, or the world";

    async fn run(&self, input: GreetInput) -> Result<ToolOutput, ToolError> {
        let name = input.name.unwrap_or_else(|| "world".to_string());
        Ok(ToolOutput::String(format!("hello, {}", name)))
    }
}
