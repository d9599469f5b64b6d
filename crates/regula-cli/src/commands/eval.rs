//! Eval command implementation.
//!
//! Evaluates an equation at one or more points.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::parse_equation;
use crate::output::{print_header, print_output};

/// Arguments for the eval command.
#[derive(Args, Debug)]
pub struct EvalArgs {
    /// Equation in x
    #[arg(short, long)]
    pub equation: String,

    /// Points to evaluate at
    #[arg(short = 'x', long = "x", required = true, num_args = 1.., allow_negative_numbers = true)]
    pub points: Vec<f64>,
}

/// One evaluated point.
#[derive(Debug, Serialize, Tabled)]
pub struct EvalResult {
    #[tabled(rename = "x")]
    pub x: f64,
    #[tabled(rename = "f(x)", display_with = "display_value")]
    pub value: Option<f64>,
    #[tabled(rename = "Error", display_with = "display_error")]
    pub error: Option<String>,
}

fn display_value(value: &Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn display_error(error: &Option<String>) -> String {
    error.clone().unwrap_or_default()
}

/// Execute the eval command.
pub fn execute(args: EvalArgs, format: OutputFormat) -> Result<()> {
    let equation = parse_equation(&args.equation)?;

    let results: Vec<EvalResult> = args
        .points
        .iter()
        .map(|&x| match equation.evaluate(x) {
            Ok(value) => EvalResult {
                x,
                value: Some(value),
                error: None,
            },
            Err(e) => EvalResult {
                x,
                value: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    match format {
        OutputFormat::Table => {
            print_header(&format!("f(x) = {}", equation));
            print_output(&results, format)?;
        }
        OutputFormat::Minimal => {
            for result in &results {
                match (result.value, &result.error) {
                    (Some(v), _) => println!("{}", v),
                    (None, Some(e)) => println!("error: {}", e),
                    (None, None) => {}
                }
            }
        }
        OutputFormat::Json | OutputFormat::Csv => print_output(&results, format)?,
    }

    Ok(())
}
