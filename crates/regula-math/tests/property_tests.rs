//! Property-based tests for solver invariants.
//!
//! - Bracketing rows always straddle a sign change
//! - Bisection either reaches |f(r)| <= precision or reports the cap
//! - Rounded runs never report a root after a failure

use proptest::prelude::*;
use regula_expr::Equation;
use regula_math::prelude::*;

/// Cubic `(x - r)(x^2 + 1)` with a single real root at `r`.
fn cubic_with_root(r: f64) -> Equation {
    Equation::parse(&format!("(x - ({r}))(x^2 + 1)")).unwrap()
}

proptest! {
    #[test]
    fn bracket_rows_keep_opposite_signs(
        root in -5.0f64..5.0,
        below in 0.1f64..4.0,
        above in 0.1f64..4.0,
        digits in 0u8..=6,
        false_pos in any::<bool>(),
    ) {
        let f = cubic_with_root(root);
        let config = SolverConfig::default()
            .with_precision(1e-3)
            .with_rounding(Rounding::Digits(digits));
        let (lo, hi) = (root - below, root + above);

        let result = if false_pos {
            false_position(&f, lo, hi, &config)
        } else {
            bisection(&f, lo, hi, &config)
        };

        for row in &result.trace {
            prop_assert!(row.f_low * row.f_high < 0.0, "row {:?}", row);
        }
        if result.failure.is_some() {
            prop_assert!(result.root.is_none());
        }
    }

    #[test]
    fn bisection_residual_within_precision(
        // |r| <= 1.5 keeps the cubic strictly increasing
        root in -1.5f64..1.5,
        below in 0.5f64..4.0,
        above in 0.5f64..4.0,
    ) {
        let f = cubic_with_root(root);
        let precision = 1e-5;
        // Unrounded, so the last midpoint is within a quarter bracket of the
        // root and |f(r)| is bounded by the final |f(xMid) - previous f(xMid)|.
        let config = SolverConfig::default()
            .with_precision(precision)
            .with_rounding(Rounding::None);

        let result = bisection(&f, root - below, root + above, &config);

        match result.root {
            Some(r) => {
                let fr = f.evaluate(r).unwrap();
                prop_assert!(fr.abs() <= precision, "f({}) = {}", r, fr);
            }
            None => prop_assert!(matches!(
                result.failure,
                Some(RootError::MaxIterations { .. } | RootError::InvalidBracket { .. })
                ),
                "unexpected failure: {:?}",
                result.failure
            ),
        }
    }

    #[test]
    fn open_methods_never_fabricate_roots(
        x0 in -10.0f64..10.0,
        digits in 0u8..=6,
    ) {
        let f = Equation::parse("x^3 - 2x + 2").unwrap();
        let config = SolverConfig::default()
            .with_rounding(Rounding::Digits(digits))
            .with_max_iterations(25);

        let newton = newton_raphson(&f, x0, &config);
        prop_assert!(newton.root.is_some() != newton.failure.is_some());
        prop_assert!(newton.trace.len() <= 25);

        let secant = secant(&f, x0, x0 + 1.0, &config);
        prop_assert!(secant.root.is_some() != secant.failure.is_some());
    }
}
