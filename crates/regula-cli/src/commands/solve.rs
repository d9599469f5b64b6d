//! Solve command implementation.
//!
//! Runs one of the four root finders and prints its trace.

use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use tabled::Tabled;

use regula_math::controller::{Iterations, Strategy};
use regula_math::solvers::{BracketingStrategy, NewtonStrategy, Rule, SecantStrategy};
use regula_math::{
    derivation_steps, solve, BracketRecord, DerivationStep, Method, MethodParams, NewtonRecord,
    RootError, Rounding, SecantRecord, Solution, SolveRequest, SolverConfig, Trace,
};

use crate::cli::{Context, OutputFormat};
use crate::commands::parse_equation;
use crate::commands::config::Settings;
use crate::error::CliError;
use crate::output::{
    format_percent, format_value, print_csv, print_divider, print_header, print_json,
    print_success, print_table,
};

/// Arguments for the solve command.
#[derive(Args, Debug)]
pub struct SolveArgs {
    #[command(subcommand)]
    pub method: SolveMethod,
}

/// Root-finding methods.
#[derive(Subcommand, Debug)]
pub enum SolveMethod {
    /// Halve a sign-changing bracket
    Bisection(BracketArgs),

    /// Narrow a bracket at the chord's zero (regula falsi)
    #[command(alias = "falsi")]
    FalsePosition(BracketArgs),

    /// Newton-Raphson from one initial guess
    #[command(alias = "newton-raphson")]
    Newton(NewtonArgs),

    /// Secant from two initial points
    Secant(SecantArgs),
}

/// Options shared by every method.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Equation in x, e.g. "x^3 - x - 2" or "2(x + 1)^2 - 3"
    #[arg(short, long)]
    pub equation: String,

    /// Stop once the successive error falls below this value
    #[arg(short, long)]
    pub precision: Option<f64>,

    /// Decimal digits for every recorded value (0-6 or "none")
    #[arg(short, long)]
    pub round: Option<Rounding>,

    /// Hard cap on the number of rows
    #[arg(short, long)]
    pub max_iterations: Option<u32>,

    /// Reveal table rows one at a time with this delay (milliseconds)
    #[arg(long)]
    pub reveal_ms: Option<u64>,
}

impl CommonArgs {
    /// Command-line values over persisted defaults.
    fn solver_config(&self, settings: &Settings) -> SolverConfig {
        let defaults = settings.solver;
        SolverConfig::new(
            self.precision.unwrap_or(defaults.precision),
            self.round.unwrap_or(defaults.rounding),
            self.max_iterations.unwrap_or(defaults.max_iterations),
        )
    }
}

/// Arguments for bisection and false position.
#[derive(Args, Debug)]
pub struct BracketArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Lower bound of the bracket
    #[arg(long, allow_negative_numbers = true)]
    pub low: f64,

    /// Upper bound of the bracket
    #[arg(long, allow_negative_numbers = true)]
    pub high: f64,
}

/// Arguments for Newton-Raphson.
#[derive(Args, Debug)]
pub struct NewtonArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Initial guess
    #[arg(long, allow_negative_numbers = true)]
    pub x0: f64,

    /// Print the worked arithmetic for every step
    #[arg(long)]
    pub steps: bool,
}

/// Arguments for secant.
#[derive(Args, Debug)]
pub struct SecantArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// First starting point
    #[arg(long, allow_negative_numbers = true)]
    pub xa: f64,

    /// Second starting point
    #[arg(long, allow_negative_numbers = true)]
    pub xb: f64,
}

impl SolveMethod {
    fn into_parts(self) -> (SolveRequest, CommonArgs, bool) {
        match self {
            Self::Bisection(args) => (
                SolveRequest::bisection(&args.common.equation, args.low, args.high),
                args.common,
                false,
            ),
            Self::FalsePosition(args) => (
                SolveRequest::false_position(&args.common.equation, args.low, args.high),
                args.common,
                false,
            ),
            Self::Newton(args) => (
                SolveRequest::newton_raphson(&args.common.equation, args.x0),
                args.common,
                args.steps,
            ),
            Self::Secant(args) => (
                SolveRequest::secant(&args.common.equation, args.xa, args.xb),
                args.common,
                false,
            ),
        }
    }
}

/// Execute the solve command.
pub fn execute(args: SolveArgs, ctx: &Context) -> Result<()> {
    let (request, common, show_steps) = args.method.into_parts();
    let request = request.with_config(common.solver_config(&ctx.settings));
    tracing::debug!(method = %request.method, equation = %request.equation, "solving");

    let delay = common.reveal_ms.unwrap_or(ctx.settings.reveal_delay_ms);
    if delay > 0 && ctx.format == OutputFormat::Table {
        return reveal_request(&request, Duration::from_millis(delay), show_steps, ctx);
    }

    let solution = solve(&request);
    print_solution(&solution, request.config.rounding, show_steps, ctx)
}

/// Prints a finished run in the requested format.
///
/// Returns an error carrying the failure tag when the run did not converge,
/// after the trace has been printed.
pub fn print_solution(
    solution: &Solution,
    rounding: Rounding,
    show_steps: bool,
    ctx: &Context,
) -> Result<()> {
    match ctx.format {
        OutputFormat::Json => print_json(solution)?,
        OutputFormat::Csv => match &solution.trace {
            Trace::Bracket(rows) => print_csv(rows)?,
            Trace::Newton(rows) => print_csv(rows)?,
            Trace::Secant(rows) => print_csv(rows)?,
        },
        OutputFormat::Minimal => {
            if let Some(root) = solution.root {
                println!("{}", format_value(root, rounding));
            }
        }
        OutputFormat::Table => {
            if !ctx.quiet {
                print_header(&format!("{} Method", solution.method.label()));
                println!("f(x)  = {}", solution.equation);
                if let Some(derivative) = &solution.derivative {
                    println!("f'(x) = {}", derivative);
                }
                println!();
            }
            match &solution.trace {
                Trace::Bracket(rows) => print_table(&bracket_rows(rows, rounding))?,
                Trace::Newton(rows) => print_table(&newton_rows(rows, rounding))?,
                Trace::Secant(rows) => print_table(&secant_rows(rows, rounding))?,
            }
            if show_steps {
                print_steps(&solution.steps);
            }
        }
    }

    conclude(solution.root, solution.trace.len(), solution.failure.clone(), rounding, ctx)
}

/// Prints the worked steps grouped by the iteration they produce.
fn print_steps(steps: &[DerivationStep]) {
    if steps.is_empty() {
        return;
    }
    print_header("Steps");
    let mut current = 0;
    for step in steps {
        if step.iteration != current {
            current = step.iteration;
            print_divider();
            println!("{}", format!("Iteration {current}").bold());
        }
        println!("{}", step.title.cyan());
        println!("  {}", step.rendered);
    }
    print_divider();
}

/// Prints the success line, or turns the failure into the command's error.
fn conclude(
    root: Option<f64>,
    rows: usize,
    failure: Option<RootError>,
    rounding: Rounding,
    ctx: &Context,
) -> Result<()> {
    if let Some(err) = failure {
        return Err(CliError::Solve(err).into());
    }
    if ctx.format == OutputFormat::Table {
        if let Some(root) = root {
            print_success(&format!(
                "Root ≈ {} after {} iterations",
                format_value(root, rounding),
                rows
            ));
        }
    }
    Ok(())
}

/// Runs the request through the lazy iterator, printing each row as it is produced.
fn reveal_request(
    request: &SolveRequest,
    delay: Duration,
    show_steps: bool,
    ctx: &Context,
) -> Result<()> {
    request.validate().map_err(CliError::from)?;
    let equation = parse_equation(&request.equation)?;
    let config = &request.config;
    let rounding = config.rounding;

    if !ctx.quiet {
        print_header(&format!("{} Method", request.method.label()));
        println!("f(x)  = {}\n", request.equation);
    }

    let (root, rows, failure) = match request.params {
        MethodParams::Bracket { x_low, x_high } => {
            let rule = if request.method == Method::FalsePosition {
                Rule::FalsePosition
            } else {
                Rule::Bisection
            };
            let strategy = BracketingStrategy::new(&equation, rule, x_low, x_high, config)
                .map_err(CliError::from)?;
            let (root, rows, failure) = reveal(Iterations::new(strategy, config), delay, |r| {
                BracketRow::new(r, rounding)
            });
            (root, rows.len(), failure)
        }
        MethodParams::Newton { x0 } => {
            let strategy = NewtonStrategy::new(&equation, x0, config).map_err(CliError::from)?;
            let derivative = strategy.derivative().clone();
            if !ctx.quiet {
                println!("f'(x) = {}\n", derivative);
            }
            let (root, rows, failure) = reveal(Iterations::new(strategy, config), delay, |r| {
                NewtonRow::new(r, rounding)
            });
            if show_steps {
                print_steps(&derivation_steps(&equation, &derivative, &rows));
            }
            (root, rows.len(), failure)
        }
        MethodParams::Secant { xa, xb } => {
            let strategy = SecantStrategy::new(&equation, xa, xb, config).map_err(CliError::from)?;
            let (root, rows, failure) = reveal(Iterations::new(strategy, config), delay, |r| {
                SecantRow::new(r, rounding)
            });
            (root, rows.len(), failure)
        }
    };

    conclude(root, rows, failure, rounding, ctx)
}

/// Pulls records one at a time, sleeping between rows.
///
/// Returns the root (on convergence), the records and the failure, if any.
fn reveal<S, T>(
    mut iterations: Iterations<S>,
    delay: Duration,
    to_row: impl Fn(&S::Record) -> T,
) -> (Option<f64>, Vec<S::Record>, Option<RootError>)
where
    S: Strategy,
    T: Tabled,
{
    let line = |cells: Vec<String>| {
        cells
            .iter()
            .map(|c| format!("{c:>12}"))
            .collect::<Vec<_>>()
            .join(" │ ")
    };
    let headers = T::headers().into_iter().map(|h| h.to_string()).collect();
    println!("{}", line(headers).bold());

    let mut records = Vec::new();
    let mut failure = None;
    while let Some(item) = iterations.next() {
        match item {
            Ok(record) => {
                if iterations.emitted() > 1 {
                    thread::sleep(delay);
                }
                let cells = to_row(&record)
                    .fields()
                    .into_iter()
                    .map(|c| c.to_string())
                    .collect();
                println!("{}", line(cells));
                records.push(record);
            }
            Err(err) => failure = Some(err),
        }
    }

    let root = if iterations.is_converged() {
        iterations.last_estimate()
    } else {
        None
    };
    (root, records, failure)
}

// =============================================================================
// TABLE ROWS
// =============================================================================

/// Display row for bisection and false position.
#[derive(Debug, Tabled)]
pub struct BracketRow {
    #[tabled(rename = "#")]
    pub index: u32,
    #[tabled(rename = "xl")]
    pub x_low: String,
    #[tabled(rename = "xm")]
    pub x_mid: String,
    #[tabled(rename = "xr")]
    pub x_high: String,
    #[tabled(rename = "f(xl)")]
    pub f_low: String,
    #[tabled(rename = "f(xm)")]
    pub f_mid: String,
    #[tabled(rename = "f(xr)")]
    pub f_high: String,
}

impl BracketRow {
    fn new(r: &BracketRecord, rounding: Rounding) -> Self {
        Self {
            index: r.index,
            x_low: format_value(r.x_low, rounding),
            x_mid: format_value(r.x_mid, rounding),
            x_high: format_value(r.x_high, rounding),
            f_low: format_value(r.f_low, rounding),
            f_mid: format_value(r.f_mid, rounding),
            f_high: format_value(r.f_high, rounding),
        }
    }
}

/// Display row for Newton-Raphson.
#[derive(Debug, Tabled)]
pub struct NewtonRow {
    #[tabled(rename = "#")]
    pub index: u32,
    #[tabled(rename = "x")]
    pub x: String,
    #[tabled(rename = "f(x)")]
    pub fx: String,
    #[tabled(rename = "f'(x)")]
    pub dfx: String,
    #[tabled(rename = "Relative Error")]
    pub relative_error: String,
}

impl NewtonRow {
    fn new(r: &NewtonRecord, rounding: Rounding) -> Self {
        Self {
            index: r.index,
            x: format_value(r.x, rounding),
            fx: format_value(r.fx, rounding),
            dfx: format_value(r.dfx, rounding),
            relative_error: format_percent(r.relative_error, rounding),
        }
    }
}

/// Display row for secant.
#[derive(Debug, Tabled)]
pub struct SecantRow {
    #[tabled(rename = "#")]
    pub index: u32,
    #[tabled(rename = "xa")]
    pub xa: String,
    #[tabled(rename = "xb")]
    pub xb: String,
    #[tabled(rename = "f(xa)")]
    pub fxa: String,
    #[tabled(rename = "f(xb)")]
    pub fxb: String,
    #[tabled(rename = "Relative Error")]
    pub relative_error: String,
}

impl SecantRow {
    fn new(r: &SecantRecord, rounding: Rounding) -> Self {
        Self {
            index: r.index,
            xa: format_value(r.xa, rounding),
            xb: format_value(r.xb, rounding),
            fxa: format_value(r.fxa, rounding),
            fxb: format_value(r.fxb, rounding),
            relative_error: format_percent(r.relative_error, rounding),
        }
    }
}

fn bracket_rows(rows: &[BracketRecord], rounding: Rounding) -> Vec<BracketRow> {
    rows.iter().map(|r| BracketRow::new(r, rounding)).collect()
}

fn newton_rows(rows: &[NewtonRecord], rounding: Rounding) -> Vec<NewtonRow> {
    rows.iter().map(|r| NewtonRow::new(r, rounding)).collect()
}

fn secant_rows(rows: &[SecantRecord], rounding: Rounding) -> Vec<SecantRow> {
    rows.iter().map(|r| SecantRow::new(r, rounding)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let common = CommonArgs {
            equation: "x".into(),
            precision: Some(0.5),
            round: None,
            max_iterations: Some(7),
            reveal_ms: None,
        };
        let mut settings = Settings::default();
        settings.solver = settings.solver.with_rounding(Rounding::Digits(2));

        let config = common.solver_config(&settings);

        assert!((config.precision - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.rounding, Rounding::Digits(2));
        assert_eq!(config.max_iterations, 7);
    }

    #[test]
    fn test_newton_row_marks_first_error_na() {
        let record = NewtonRecord {
            index: 1,
            x: 1.5,
            fx: -0.125,
            dfx: 5.75,
            relative_error: None,
        };
        let row = NewtonRow::new(&record, Rounding::Digits(4));
        assert_eq!(row.x, "1.5000");
        assert_eq!(row.fx, "-0.1250");
        assert_eq!(row.relative_error, "N/A");
    }
}
