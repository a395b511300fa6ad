use crate::bindings::VariableBinding;
use crate::errors::{DegenerateEquationKind, ParseError};
use crate::shunting::evaluate_expression;
use crate::terms::{parse_linear_expression, LinearExpressionParts};

/// Reduced coefficients smaller than this are treated as zero.
pub const DEGENERACY_TOLERANCE: f64 = 1e-10;

/// Both sides of an equation must agree to within this margin for a solution
/// to be considered verified.
pub const VERIFICATION_TOLERANCE: f64 = 1e-6;

/// An equation split at its `=` sign.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearEquation
{
    pub left: String,
    pub right: String,
}

impl LinearEquation
{
    /// Splits an equation into its two sides, trimming each.
    /// The equation must contain exactly one `=`.
    ///
    /// # Example
    /// ```
    /// use algeqs::linear::LinearEquation;
    ///
    /// let eq = LinearEquation::split("2x + 9 = 3x - 1").unwrap();
    ///
    /// assert_eq!(eq.left, "2x + 9");
    /// assert_eq!(eq.right, "3x - 1");
    /// assert!(LinearEquation::split("2x + 9").is_err());
    /// ```
    pub fn split(equation: &str) -> anyhow::Result<LinearEquation>
    {
        let sides: Vec<&str> = equation.split('=').collect();
        match sides.len()
        {
            1 => Err(ParseError::MissingEquals.into()),
            2 => Ok(LinearEquation
            {
                left: sides[0].trim().to_owned(),
                right: sides[1].trim().to_owned(),
            }),
            _ => Err(ParseError::MultipleEquals.into()),
        }
    }

    /// Moves every variable term to the left and every constant to the right,
    /// returning `(coefficient, constant)` of `coefficient * x = constant`.
    pub fn reduce(&self, symbol: char) -> anyhow::Result<(f64, f64)>
    {
        let left: LinearExpressionParts = parse_linear_expression(&self.left, symbol)?;
        let right: LinearExpressionParts = parse_linear_expression(&self.right, symbol)?;

        Ok((
            left.coefficient - right.coefficient,
            right.constant - left.constant,
        ))
    }

    /// Solves the equation for `symbol`, failing with a `DegenerateEquationKind`
    /// when the variable cancels out.
    pub fn solve(&self, symbol: char) -> anyhow::Result<f64>
    {
        let (coefficient, constant) = self.reduce(symbol)?;

        if coefficient.abs() < DEGENERACY_TOLERANCE
        {
            let kind = if constant.abs() < DEGENERACY_TOLERANCE
            {
                DegenerateEquationKind::Identity
            }
            else
            {
                DegenerateEquationKind::Inconsistent
            };
            return Err(kind.into());
        }

        Ok(constant / coefficient)
    }
}

/// Solves a linear equation such as `"2x + 9 = 3x - 1"` for `symbol`.
///
/// # Example
/// ```
/// use algeqs::linear::solve_linear_equation_for;
///
/// let soln = solve_linear_equation_for("4t - 5 = 2t + 3", 't').unwrap();
///
/// assert_eq!(soln, 4.0);
/// ```
pub fn solve_linear_equation_for(equation: &str, symbol: char) -> anyhow::Result<f64>
{
    LinearEquation::split(equation)?.solve(symbol)
}

/// Checks a candidate solution by evaluating both sides of the equation with
/// `symbol` bound to `value`.
///
/// # Example
/// ```
/// use algeqs::linear::verify_linear_solution;
///
/// assert!(verify_linear_solution("x + 5 = 12", 'x', 7.0).unwrap());
/// assert!(!verify_linear_solution("x + 5 = 12", 'x', 6.0).unwrap());
/// ```
pub fn verify_linear_solution(equation: &str, symbol: char, value: f64) -> anyhow::Result<bool>
{
    let eq = LinearEquation::split(equation)?;
    let bindings = VariableBinding::with_value(symbol, value);

    let left = evaluate_expression(&eq.left, symbol, &bindings)?;
    let right = evaluate_expression(&eq.right, symbol, &bindings)?;

    Ok((left - right).abs() < VERIFICATION_TOLERANCE)
}

#[cfg(test)]
fn degenerate_kind(equation: &str) -> Option<DegenerateEquationKind>
{
    solve_linear_equation_for(equation, 'x')
        .unwrap_err()
        .downcast_ref::<DegenerateEquationKind>()
        .copied()
}

#[test]
fn test_solve_simple_equations()
{
    assert_eq!(solve_linear_equation_for("2x + 9 = 3x - 1", 'x').unwrap(), 10.0);
    assert_eq!(solve_linear_equation_for("x + 5 = 12", 'x').unwrap(), 7.0);
    assert_eq!(solve_linear_equation_for("3x - 7 = 14", 'x').unwrap(), 7.0);
    assert_eq!(solve_linear_equation_for("-x = 4", 'x').unwrap(), -4.0);
}

#[test]
fn test_degenerate_equations()
{
    assert_eq!(degenerate_kind("5 = 5"), Some(DegenerateEquationKind::Identity));
    assert_eq!(degenerate_kind("5 = 3"), Some(DegenerateEquationKind::Inconsistent));
    assert_eq!(degenerate_kind("2x + 1 = 2x + 1"), Some(DegenerateEquationKind::Identity));
    assert_eq!(degenerate_kind("x + 1 = x"), Some(DegenerateEquationKind::Inconsistent));
}

#[test]
fn test_equals_sign_count()
{
    let err = solve_linear_equation_for("2x + 3", 'x').unwrap_err();
    assert_eq!(err.downcast_ref::<ParseError>(), Some(&ParseError::MissingEquals));

    let err = solve_linear_equation_for("x = 1 = 2", 'x').unwrap_err();
    assert_eq!(err.downcast_ref::<ParseError>(), Some(&ParseError::MultipleEquals));
}

#[test]
fn test_side_parse_failure()
{
    let err = solve_linear_equation_for("2x + = 3", 'x').unwrap_err();
    assert_eq!(err.downcast_ref::<ParseError>(), Some(&ParseError::DanglingSign));
}

#[test]
fn test_degeneracy_tolerance_is_strict()
{
    assert_eq!(
        degenerate_kind("0.00000000001x + 0.00000000001 = 0"),
        Some(DegenerateEquationKind::Identity)
    );
    assert_eq!(
        degenerate_kind("0.00000000001x = 1"),
        Some(DegenerateEquationKind::Inconsistent)
    );

    let soln = solve_linear_equation_for("0.000000001x = 1", 'x').unwrap();
    assert!((soln - 1e9).abs() < 1e-3);
}

#[test]
fn test_verify_solution()
{
    let soln = solve_linear_equation_for("7x - 5 = 2x + 15", 'x').unwrap();
    assert!(verify_linear_solution("7x - 5 = 2x + 15", 'x', soln).unwrap());
}
