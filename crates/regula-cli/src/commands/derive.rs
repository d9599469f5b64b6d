//! Derive command implementation.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use regula_math::RootError;

use crate::cli::OutputFormat;
use crate::commands::parse_equation;
use crate::error::CliError;
use crate::output::{print_header, print_output, KeyValue};

/// Arguments for the derive command.
#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// Equation in x
    #[arg(short, long)]
    pub equation: String,

    /// Also evaluate the derivative at this point
    #[arg(long, allow_negative_numbers = true)]
    pub at: Option<f64>,
}

#[derive(Debug, Serialize)]
struct DeriveResult {
    equation: String,
    derivative: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<f64>,
}

/// Execute the derive command.
pub fn execute(args: DeriveArgs, format: OutputFormat) -> Result<()> {
    let equation = parse_equation(&args.equation)?;
    let derivative = equation
        .derivative()
        .map_err(|e| CliError::Solve(RootError::from(e)))?;

    let value = match args.at {
        Some(x) => Some(
            derivative
                .evaluate(x)
                .map_err(|e| CliError::Solve(RootError::from(e)))?,
        ),
        None => None,
    };

    let result = DeriveResult {
        equation: equation.to_string(),
        derivative: derivative.to_string(),
        x: args.at,
        value,
    };

    match format {
        OutputFormat::Table => {
            print_header("Derivative");
            let mut rows = vec![
                KeyValue::new("f(x)", &result.equation),
                KeyValue::new("f'(x)", &result.derivative),
            ];
            if let (Some(x), Some(v)) = (result.x, result.value) {
                rows.push(KeyValue::new(format!("f'({})", x), v.to_string()));
            }
            print_output(&rows, format)?;
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            wtr.serialize(&result)?;
            wtr.flush()?;
        }
        OutputFormat::Minimal => match result.value {
            Some(v) => println!("{}", v),
            None => println!("{}", result.derivative),
        },
    }

    Ok(())
}
