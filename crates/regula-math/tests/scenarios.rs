//! End-to-end root-finding scenarios through the request boundary.

use approx::assert_relative_eq;
use regula_math::prelude::*;

// =============================================================================
// BRACKETING
// =============================================================================

#[test]
fn bisection_finds_two_for_x_squared_minus_four() {
    let request = SolveRequest::bisection("x^2 - 4", 0.0, 3.0)
        .with_config(SolverConfig::default().with_precision(0.01));

    let solution = solve(&request);

    assert!(solution.is_converged());
    assert_relative_eq!(solution.root.unwrap(), 2.0, epsilon = 0.01);
    assert!(solution.trace.len() <= 20);

    let Trace::Bracket(rows) = &solution.trace else {
        panic!("expected bracket rows");
    };
    assert_eq!(rows.len(), 11);
    assert_relative_eq!(rows.last().unwrap().x_mid, 1.9997);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.index as usize, i + 1);
        assert!(row.x_low < row.x_high);
    }
}

#[test]
fn same_sign_bracket_is_rejected_before_iterating() {
    for method in [Method::Bisection, Method::FalsePosition] {
        let mut request = SolveRequest::bisection("x^2 + 1", 0.0, 1.0);
        request.method = method;

        let solution = solve(&request);

        assert!(solution.trace.is_empty());
        assert!(solution.root.is_none());
        assert_eq!(solution.failure.unwrap().tag(), "InvalidBracketError");
    }
}

#[test]
fn rounding_changes_the_number_of_steps() {
    let coarse = bisection_rows("x^3 - 2", Rounding::Digits(2));
    let fine = bisection_rows("x^3 - 2", Rounding::Digits(6));
    assert_ne!(coarse, fine);
}

fn bisection_rows(equation: &str, rounding: Rounding) -> usize {
    let config = SolverConfig::default()
        .with_precision(0.001)
        .with_rounding(rounding);
    solve(&SolveRequest::bisection(equation, 0.0, 2.0).with_config(config))
        .trace
        .len()
}

// =============================================================================
// OPEN METHODS
// =============================================================================

#[test]
fn newton_finds_cubic_root() {
    let request = SolveRequest::newton_raphson("x^3 - x - 2", 1.5)
        .with_config(SolverConfig::default().with_precision(0.0001));

    let solution = solve(&request);

    assert!(solution.is_converged());
    assert_relative_eq!(solution.root.unwrap(), 1.5214, epsilon = 1e-4);
    assert_eq!(solution.derivative.as_deref(), Some("3 * x^2 - 1"));

    let Trace::Newton(rows) = &solution.trace else {
        panic!("expected newton rows");
    };
    assert_eq!(rows.len(), 4);
    assert!(rows[0].relative_error.is_none());
    assert!(rows[1..].iter().all(|r| r.relative_error.is_some()));
    assert_eq!(solution.steps.len(), 12);
}

#[test]
fn newton_without_rounding_follows_update_rule_exactly() {
    let config = SolverConfig::default()
        .with_rounding(Rounding::None)
        .with_precision(1e-10);

    let solution = solve(&SolveRequest::newton_raphson("x^3 - x - 2", 1.5).with_config(config));

    let Trace::Newton(rows) = &solution.trace else {
        panic!("expected newton rows");
    };
    assert!(rows.len() > 2);
    for pair in rows.windows(2) {
        assert_eq!(pair[1].x, pair[0].x - pair[0].fx / pair[0].dfx);
    }
}

#[test]
fn newton_rejects_variable_exponent_of_variable() {
    let solution = solve(&SolveRequest::newton_raphson("x^x - 2", 1.0));

    assert!(solution.trace.is_empty());
    assert_eq!(solution.failure.unwrap().tag(), "DerivativeError");
}

#[test]
fn secant_flat_window_is_division_by_zero() {
    let solution = solve(&SolveRequest::secant("x^2 - 4", -1.0, 1.0));

    assert_eq!(solution.trace.len(), 1);
    assert!(solution.root.is_none());
    assert!(matches!(
        solution.failure,
        Some(RootError::DivisionByZero { .. })
    ));
}

#[test]
fn secant_finds_positive_root() {
    let request = SolveRequest::secant("x^2 - 4", 1.0, 3.0)
        .with_config(SolverConfig::default().with_precision(0.001));

    let solution = solve(&request);

    assert!(solution.is_converged());
    assert_relative_eq!(solution.root.unwrap(), 2.0, epsilon = 1e-3);
}

// =============================================================================
// FAILURE HANDLING
// =============================================================================

#[test]
fn cap_returns_trace_without_root() {
    let config = SolverConfig::default()
        .with_precision(1e-12)
        .with_rounding(Rounding::None)
        .with_max_iterations(3);

    let solution = solve(&SolveRequest::bisection("x^2 - 2", 0.0, 2.0).with_config(config));

    assert_eq!(solution.trace.len(), 3);
    assert!(solution.root.is_none());
    assert_eq!(solution.failure.unwrap().tag(), "MaxIterationsError");
}

#[test]
fn evaluation_error_records_the_point() {
    // 1/x crosses from -inf to +inf at 0, and the first midpoint lands on it
    let solution = solve(&SolveRequest::bisection("1 / x", -1.0, 1.0));

    assert!(solution.trace.is_empty());
    assert!(matches!(
        solution.failure,
        Some(RootError::Evaluation { x, .. }) if x == 0.0
    ));
}

#[test]
fn parse_error_has_no_trace() {
    let solution = solve(&SolveRequest::newton_raphson("x^2 +", 1.0));

    assert!(solution.trace.is_empty());
    assert!(solution.steps.is_empty());
    assert_eq!(solution.failure.unwrap().tag(), "ParseError");
}

#[test]
fn lazy_iteration_matches_eager_run() {
    let equation = regula_expr::Equation::parse("x^3 - x - 2").unwrap();
    let config = SolverConfig::default().with_precision(0.0001);

    let strategy = regula_math::solvers::NewtonStrategy::new(&equation, 1.5, &config).unwrap();
    let lazy: Vec<NewtonRecord> = Iterations::new(strategy, &config)
        .collect::<RootResult<_>>()
        .unwrap();

    let eager = newton_raphson(&equation, 1.5, &config);
    assert_eq!(lazy, eager.trace);
}
