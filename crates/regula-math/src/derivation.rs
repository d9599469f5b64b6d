//! Worked explanations of Newton-Raphson steps.

use regula_expr::Equation;

use crate::trace::{DerivationStep, NewtonRecord};

/// Title of the next-estimate step.
pub const NEXT_X: &str = "To solve for next x";
/// Title of the function-value step.
pub const NEXT_FX: &str = "For the next f(x)";
/// Title of the derivative-value step.
pub const NEXT_DFX: &str = "For the next f'(x)";
/// Title of the relative-error step.
pub const NEXT_ERROR: &str = "For the next relative error";

/// Explains every update in a Newton-Raphson trace.
///
/// Emits four steps for each record after the first, all tagged with that
/// record's index. The numbers are the recorded (rounded) values, so the
/// text always agrees with the trace.
pub fn derivation_steps(
    equation: &Equation,
    derivative: &Equation,
    trace: &[NewtonRecord],
) -> Vec<DerivationStep> {
    let mut steps = Vec::with_capacity(trace.len().saturating_sub(1) * 4);

    for pair in trace.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        let iteration = next.index;
        let mut push = |title: &str, rendered: String| {
            steps.push(DerivationStep {
                title: title.to_string(),
                rendered,
                iteration,
            });
        };

        push(
            NEXT_X,
            format!(
                "x = x - f(x) / f'(x) = {} - ({}) / ({}) = {}",
                prev.x, prev.fx, prev.dfx, next.x
            ),
        );
        push(
            NEXT_FX,
            format!("f(x) = {} = {}", equation.render_at(next.x), next.fx),
        );
        push(
            NEXT_DFX,
            format!("f'(x) = {} = {}", derivative.render_at(next.x), next.dfx),
        );
        if let Some(error) = next.relative_error {
            push(
                NEXT_ERROR,
                format!(
                    "relative error = |(next x - x) / next x| * 100 = |({} - {}) / {}| * 100 = {}%",
                    next.x, prev.x, next.x, error
                ),
            );
        }
    }

    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use crate::solvers::newton_raphson;

    #[test]
    fn test_four_steps_per_update() {
        let f = Equation::parse("x^3 - x - 2").unwrap();
        let df = f.derivative().unwrap();
        let result = newton_raphson(&f, 1.5, &SolverConfig::default().with_precision(0.0001));

        let steps = derivation_steps(&f, &df, &result.trace);

        assert_eq!(steps.len(), (result.trace.len() - 1) * 4);
        assert_eq!(steps[0].title, NEXT_X);
        assert_eq!(steps[0].iteration, 2);
        assert_eq!(
            steps[0].rendered,
            "x = x - f(x) / f'(x) = 1.5 - (-0.125) / (5.75) = 1.5217"
        );
        assert_eq!(steps[1].title, NEXT_FX);
        assert_eq!(steps[1].rendered, "f(x) = (1.5217)^3 - (1.5217) - 2 = 0.0019");
        assert_eq!(steps[2].title, NEXT_DFX);
        assert!(steps[2].rendered.ends_with("= 5.9467"));
        assert_eq!(steps[3].title, NEXT_ERROR);
        assert!(steps[3].rendered.ends_with("= 1.426%"));
        assert_eq!(steps[4].iteration, 3);
    }

    #[test]
    fn test_single_row_has_no_steps() {
        let f = Equation::parse("x^2 + 1").unwrap();
        let df = f.derivative().unwrap();
        let result = newton_raphson(&f, 0.0, &SolverConfig::default());

        assert_eq!(result.trace.len(), 1);
        assert!(derivation_steps(&f, &df, &result.trace).is_empty());
    }
}
