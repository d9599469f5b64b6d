//! Single entry point from raw input to a finished run.
//!
//! A [`SolveRequest`] carries the equation text, the method-specific starting
//! values and the configuration. [`solve`] parses the text, dispatches to the
//! matching root finder and packages the result as a [`Solution`]. Both types
//! are serde types so requests can be read from TOML or JSON files.

use regula_expr::Equation;
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::derivation::derivation_steps;
use crate::error::{RootError, RootResult};
use crate::solvers::{bisection, false_position, newton_raphson, secant, Method};
use crate::trace::{BracketRecord, ConvergenceResult, DerivationStep, NewtonRecord, SecantRecord};

/// Starting values for a run; the variant picks the family of methods.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MethodParams {
    /// Bracketing methods: an interval with a sign change.
    Bracket {
        /// Lower bound.
        x_low: f64,
        /// Upper bound.
        x_high: f64,
    },
    /// Newton-Raphson: one initial guess.
    Newton {
        /// Initial guess.
        x0: f64,
    },
    /// Secant: two initial points.
    Secant {
        /// First point.
        xa: f64,
        /// Second point.
        xb: f64,
    },
}

/// A complete root-finding request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Equation text in the variable `x`.
    pub equation: String,
    /// Which method to run. Bracketing parameters work with bisection and
    /// false position; the others imply their method.
    pub method: Method,
    /// Method-specific starting values.
    pub params: MethodParams,
    /// Precision, rounding and iteration cap.
    #[serde(default)]
    pub config: SolverConfig,
}

impl SolveRequest {
    /// A bisection request.
    pub fn bisection(equation: impl Into<String>, x_low: f64, x_high: f64) -> Self {
        Self::new(
            equation,
            Method::Bisection,
            MethodParams::Bracket { x_low, x_high },
        )
    }

    /// A false position request.
    pub fn false_position(equation: impl Into<String>, x_low: f64, x_high: f64) -> Self {
        Self::new(
            equation,
            Method::FalsePosition,
            MethodParams::Bracket { x_low, x_high },
        )
    }

    /// A Newton-Raphson request.
    pub fn newton_raphson(equation: impl Into<String>, x0: f64) -> Self {
        Self::new(equation, Method::NewtonRaphson, MethodParams::Newton { x0 })
    }

    /// A secant request.
    pub fn secant(equation: impl Into<String>, xa: f64, xb: f64) -> Self {
        Self::new(equation, Method::Secant, MethodParams::Secant { xa, xb })
    }

    fn new(equation: impl Into<String>, method: Method, params: MethodParams) -> Self {
        Self {
            equation: equation.into(),
            method,
            params,
            config: SolverConfig::default(),
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Checks that the parameters fit the method.
    pub fn validate(&self) -> RootResult<()> {
        self.config.validate()?;
        let fits = match self.params {
            MethodParams::Bracket { .. } => self.method.is_bracketing(),
            MethodParams::Newton { .. } => self.method == Method::NewtonRaphson,
            MethodParams::Secant { .. } => self.method == Method::Secant,
        };
        if fits {
            Ok(())
        } else {
            Err(RootError::invalid_input(format!(
                "parameters do not match method {}",
                self.method
            )))
        }
    }
}

/// Method-specific trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum Trace {
    /// Bisection or false position rows.
    Bracket(Vec<BracketRecord>),
    /// Newton-Raphson rows.
    Newton(Vec<NewtonRecord>),
    /// Secant rows.
    Secant(Vec<SecantRecord>),
}

impl Trace {
    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Bracket(rows) => rows.len(),
            Self::Newton(rows) => rows.len(),
            Self::Secant(rows) => rows.len(),
        }
    }

    /// Returns true if no row was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn empty_for(method: Method) -> Self {
        match method {
            Method::Bisection | Method::FalsePosition => Self::Bracket(Vec::new()),
            Method::NewtonRaphson => Self::Newton(Vec::new()),
            Method::Secant => Self::Secant(Vec::new()),
        }
    }
}

/// Everything a presentation layer needs from one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Solution {
    /// Method that ran.
    pub method: Method,
    /// The equation as entered.
    pub equation: String,
    /// Rendered derivative, Newton-Raphson only.
    pub derivative: Option<String>,
    /// Rows in order.
    pub trace: Trace,
    /// Worked steps, Newton-Raphson only.
    pub steps: Vec<DerivationStep>,
    /// Root on convergence.
    pub root: Option<f64>,
    /// Failure, if the run did not converge.
    #[serde(serialize_with = "serialize_failure")]
    pub failure: Option<RootError>,
}

impl Solution {
    fn failed(request: &SolveRequest, error: RootError) -> Self {
        Self {
            method: request.method,
            equation: request.equation.clone(),
            derivative: None,
            trace: Trace::empty_for(request.method),
            steps: Vec::new(),
            root: None,
            failure: Some(error),
        }
    }

    /// Returns true if the run converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.root.is_some() && self.failure.is_none()
    }
}

#[derive(Serialize)]
struct FailureView {
    kind: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    x: Option<f64>,
}

fn serialize_failure<S>(failure: &Option<RootError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let view = failure.as_ref().map(|err| FailureView {
        kind: err.tag(),
        message: err.to_string(),
        x: match err {
            RootError::Evaluation { x, .. } | RootError::DivisionByZero { x, .. } => Some(*x),
            _ => None,
        },
    });
    view.serialize(serializer)
}

/// Runs a request to completion.
///
/// Never panics: parse errors, invalid parameters and run failures all land in
/// [`Solution::failure`], with whatever trace was produced before the failure.
pub fn solve(request: &SolveRequest) -> Solution {
    if let Err(err) = request.validate() {
        return Solution::failed(request, err);
    }
    let equation = match Equation::parse(&request.equation) {
        Ok(equation) => equation,
        Err(err) => return Solution::failed(request, err.into()),
    };

    let config = &request.config;
    let mut derivative = None;
    let mut steps = Vec::new();

    let (trace, root, failure) = match request.params {
        MethodParams::Bracket { x_low, x_high } => {
            let result = if request.method == Method::FalsePosition {
                false_position(&equation, x_low, x_high, config)
            } else {
                bisection(&equation, x_low, x_high, config)
            };
            unpack(result, Trace::Bracket)
        }
        MethodParams::Newton { x0 } => {
            let result = newton_raphson(&equation, x0, config);
            if let Ok(df) = equation.derivative() {
                steps = derivation_steps(&equation, &df, &result.trace);
                derivative = Some(df.to_string());
            }
            unpack(result, Trace::Newton)
        }
        MethodParams::Secant { xa, xb } => unpack(secant(&equation, xa, xb, config), Trace::Secant),
    };

    Solution {
        method: request.method,
        equation: request.equation.clone(),
        derivative,
        trace,
        steps,
        root,
        failure,
    }
}

fn unpack<R>(
    result: ConvergenceResult<R>,
    wrap: impl FnOnce(Vec<R>) -> Trace,
) -> (Trace, Option<f64>, Option<RootError>) {
    (wrap(result.trace), result.root, result.failure)
}
