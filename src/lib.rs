/// Contains the attempt log for grading answers and summarising learner performance.
pub mod attempts;
/// Contains the `VariableBinding` type for values substituted into expressions.
pub mod bindings;
/// Contains the `AlgebraEngine` type, which pairs a variable symbol with its bindings.
pub mod engine;
/// Contains error types for different errors that this crate may throw.
pub mod errors;
/// Contains `extern "C"` function definitions for linking this library
/// against projects in different languages. Not intended for use in
/// other Rust projects.
mod ffi;
/// Contains the solver for linear equations in a single variable.
pub mod linear;
/// Contains the fixed sets of practice problems.
pub mod practice;
/// Contains the solver for quadratic equations given their coefficients.
pub mod quadratic;
/// Contains a basic shunting yard algorithm for evaluating strings as mathematical expressions.
pub mod shunting;
/// Contains the parser that splits a linear expression into coefficient and constant.
pub mod terms;

use bindings::DEFAULT_SYMBOL;
use linear::solve_linear_equation_for;

pub use quadratic::{solve_quadratic_equation, SolutionPair};
pub use shunting::evaluate_expression;

/// Solves a linear equation given as a string for `x`.
///
/// # Example
/// ```
/// use algeqs::solve_linear_equation;
///
/// let soln = solve_linear_equation("2x + 9 = 3x - 1").unwrap();
///
/// assert_eq!(soln, 10.0);
/// ```
pub fn solve_linear_equation(equation: &str) -> anyhow::Result<f64>
{
    solve_linear_equation_for(equation, DEFAULT_SYMBOL)
}
