//! Property-based tests for the linear solver and the expression evaluator.

use algeqs::linear::verify_linear_solution;
use algeqs::solve_linear_equation;
use algeqs::terms::parse_linear_expression;
use proptest::prelude::*;

// Strategy for generating small integers
fn small_int() -> impl Strategy<Value = i64> {
    -100i64..100i64
}

// Strategy for generating non-zero integers
fn non_zero_int() -> impl Strategy<Value = i64> {
    prop_oneof![(-100i64..=-1i64), (1i64..=100i64)]
}

/// Writes `coeff*x + constant` the way a learner would, e.g. `-3x - 4`.
fn render_side(coeff: i64, constant: i64) -> String {
    let sign = if constant < 0 { "-" } else { "+" };
    format!("{}x {} {}", coeff, sign, constant.abs())
}

proptest! {
    #[test]
    fn solve_recovers_integer_root(
        left_coeff in non_zero_int(),
        right_coeff in small_int(),
        left_const in small_int(),
        root in small_int()
    ) {
        prop_assume!(left_coeff != right_coeff);

        // Pick the right constant so that `root` balances both sides
        let right_const = (left_coeff - right_coeff) * root + left_const;
        let equation = format!(
            "{} = {}",
            render_side(left_coeff, left_const),
            render_side(right_coeff, right_const),
        );

        let soln = solve_linear_equation(&equation).unwrap();
        prop_assert!((soln - root as f64).abs() < 1e-6, "{} gave {}", equation, soln);
    }

    #[test]
    fn solution_satisfies_both_sides(
        left_coeff in non_zero_int(),
        left_const in small_int(),
        right_const in small_int()
    ) {
        let equation = format!("{} = {}", render_side(left_coeff, left_const), right_const);

        let soln = solve_linear_equation(&equation).unwrap();
        prop_assert!(verify_linear_solution(&equation, 'x', soln).unwrap());
    }

    #[test]
    fn parsed_parts_match_rendered_side(coeff in small_int(), constant in small_int()) {
        let parts = parse_linear_expression(&render_side(coeff, constant), 'x').unwrap();

        prop_assert_eq!(parts.coefficient, coeff as f64);
        prop_assert_eq!(parts.constant, constant as f64);
    }
}
