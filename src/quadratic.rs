use crate::errors::QuadraticSolverError;

/// The coefficients of `a*x^2 + b*x + c = 0`, with `a` guaranteed non-zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadraticCoefficients
{
    a: f64,
    b: f64,
    c: f64,
}

/// The two roots of a quadratic equation.
///
/// Both are `None` when the roots are complex, and both hold the same value
/// for a repeated root.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolutionPair
{
    pub first: Option<f64>,
    pub second: Option<f64>,
}

impl SolutionPair
{
    pub fn has_real_roots(&self) -> bool
    {
        self.first.is_some() && self.second.is_some()
    }

    pub fn is_repeated(&self) -> bool
    {
        self.has_real_roots() && self.first == self.second
    }

    /// The real roots in solver order, or an empty vector for complex roots.
    pub fn roots(&self) -> Vec<f64>
    {
        self.first.into_iter()
            .chain(self.second)
            .collect()
    }
}

impl QuadraticCoefficients
{
    pub fn new<T>(a: T, b: T, c: T) -> anyhow::Result<QuadraticCoefficients>
    where T: Into<f64>
    {
        let a = a.into();
        if a == 0.0
        {
            return Err(QuadraticSolverError::InvalidCoefficient.into());
        }

        Ok(QuadraticCoefficients { a, b: b.into(), c: c.into() })
    }

    pub fn a(&self) -> f64
    {
        self.a
    }

    pub fn b(&self) -> f64
    {
        self.b
    }

    pub fn c(&self) -> f64
    {
        self.c
    }

    pub fn discriminant(&self) -> f64
    {
        self.b * self.b - 4.0 * self.a * self.c
    }

    /// Applies the quadratic formula. The root using `+sqrt(d)` always comes first.
    ///
    /// The discriminant is compared against zero exactly, so two roots that
    /// differ only by rounding error are reported as distinct.
    pub fn solve(&self) -> SolutionPair
    {
        let discriminant = self.discriminant();
        let denominator = 2.0 * self.a;

        if discriminant < 0.0
        {
            SolutionPair { first: None, second: None }
        }
        else if discriminant == 0.0
        {
            let root = -self.b / denominator;
            SolutionPair { first: Some(root), second: Some(root) }
        }
        else
        {
            let sqrt_discriminant = discriminant.sqrt();
            SolutionPair
            {
                first: Some((-self.b + sqrt_discriminant) / denominator),
                second: Some((-self.b - sqrt_discriminant) / denominator),
            }
        }
    }
}

/// Solves `a*x^2 + b*x + c = 0` for its real roots.
///
/// # Example
/// ```
/// use algeqs::quadratic::solve_quadratic_equation;
///
/// let soln = solve_quadratic_equation(1.0, -5.0, 6.0).unwrap();
///
/// assert_eq!(soln.first, Some(3.0));
/// assert_eq!(soln.second, Some(2.0));
/// assert!(solve_quadratic_equation(0.0, 1.0, 1.0).is_err());
/// ```
pub fn solve_quadratic_equation(a: f64, b: f64, c: f64) -> anyhow::Result<SolutionPair>
{
    Ok(QuadraticCoefficients::new(a, b, c)?.solve())
}

#[test]
fn test_two_real_roots()
{
    let soln = solve_quadratic_equation(1.0, 0.0, -4.0).unwrap();
    assert_eq!(soln, SolutionPair { first: Some(2.0), second: Some(-2.0) });
    assert!(!soln.is_repeated());

    let soln = solve_quadratic_equation(2.0, 3.0, -2.0).unwrap();
    assert_eq!(soln.roots(), vec![0.5, -2.0]);
}

#[test]
fn test_discriminant_compared_exactly()
{
    // b^2 - 4ac is a few ulps above zero: two close but distinct roots
    let soln = solve_quadratic_equation(1.0, 2.0, 1.0 - 1e-15).unwrap();
    assert!(soln.has_real_roots());
    assert!(!soln.is_repeated());
    assert_ne!(soln.first, soln.second);

    // ...and a few ulps below zero: no real roots
    let soln = solve_quadratic_equation(1.0, 2.0, 1.0 + 1e-15).unwrap();
    assert_eq!(soln, SolutionPair { first: None, second: None });
}

#[test]
fn test_repeated_root()
{
    let soln = solve_quadratic_equation(1.0, -6.0, 9.0).unwrap();
    assert_eq!(soln, SolutionPair { first: Some(3.0), second: Some(3.0) });
    assert!(soln.is_repeated());
}

#[test]
fn test_complex_roots()
{
    let soln = solve_quadratic_equation(1.0, 2.0, 5.0).unwrap();
    assert_eq!(soln, SolutionPair { first: None, second: None });
    assert!(!soln.has_real_roots());
    assert!(soln.roots().is_empty());
}

#[test]
fn test_zero_leading_coefficient()
{
    let err = QuadraticCoefficients::new(0, 2, 1).unwrap_err();
    assert_eq!(
        err.downcast_ref::<QuadraticSolverError>(),
        Some(&QuadraticSolverError::InvalidCoefficient)
    );
}

#[test]
fn test_negative_leading_coefficient_keeps_order()
{
    // -x^2 + 4 = 0: the "+sqrt" root is -2 because 2a is negative
    let soln = solve_quadratic_equation(-1.0, 0.0, 4.0).unwrap();
    assert_eq!(soln, SolutionPair { first: Some(-2.0), second: Some(2.0) });
}
