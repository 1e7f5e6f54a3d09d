use async_trait::async_trait;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use toolbelt::{
    Argument, ArgumentSchema, Arguments, ParameterKind, ToolDefinition, ToolError, ToolOutput,
    ToolRegistry, TypedTool,
};
use tracing_subscriber::EnvFilter;

// ============================================================================================
// Step 1: Define Tool Arguments
// ============================================================================================
// Argument types derive `serde` and `schemars`; the schema becomes the tool's definition.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SquareRootInput {
    /// The number to take the square root of
    pub number: f64,
}

impl ArgumentSchema for SquareRootInput {
    const KIND: &'static str = "calculate_square_root.input";
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct Operand {
    pub value: f64,
}

impl ArgumentSchema for Operand {
    const KIND: &'static str = "sum.operand";
}

// ============================================================================================
// Step 2: Define the Tools
// ============================================================================================
pub struct CalcSquareRoot;

#[async_trait]
impl TypedTool for CalcSquareRoot {
    type Input = SquareRootInput;
    const NAME: &'static str = "calculate_square_root";
    const DESCRIPTION: &'static str = "Calculates the square root of a number";

    async fn run(&self, input: SquareRootInput) -> Result<ToolOutput, ToolError> {
        if input.number < 0.0 {
            return Err(ToolError::execution(format!(
                "cannot take the square root of {}",
                input.number
            )));
        }
        Ok(ToolOutput::Double(input.number.sqrt()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ============================================================================================
    // Step 3: Register
    // ============================================================================================
    // `sum` takes any number of operands, so it uses `decode_all` instead of `decode`.
    let sum = ToolDefinition::new("sum", "Adds all operands")
        .with_kind(Operand::KIND)
        .with_parameter("value", ParameterKind::Number, true);

    let registry = ToolRegistry::builder()
        .register(CalcSquareRoot)?
        .register_fn(sum, |arguments: Vec<Argument>| async move {
            let operands = arguments.decode_all::<Operand>()?;
            Ok::<_, ToolError>(ToolOutput::Double(operands.iter().map(|o| o.value).sum()))
        })?
        .build();

    // ============================================================================================
    // Step 4: Call
    // ============================================================================================
    for number in [9.0, 2.0, -1.0] {
        let args = vec![SquareRootInput { number }.into_argument()?];
        match registry.call("calculate_square_root", &args).await {
            Ok(output) => println!("sqrt({}) = {:?}", number, output),
            Err(e) => println!("sqrt({}) failed: {}", number, e),
        }
    }

    let operands = [1.5, 2.5, 6.0]
        .into_iter()
        .map(|value| Operand { value }.into_argument())
        .collect::<Result<Vec<_>, _>>()?;
    println!("sum = {:?}", registry.call("sum", &operands).await?);

    Ok(())
}
