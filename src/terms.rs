use std::str::FromStr;

use lazy_static::lazy_static;
use regex::Regex;

use crate::bindings::DEFAULT_SYMBOL;
use crate::errors::ParseError;

/// The decomposition of a one-variable linear expression into
/// `coefficient * x + constant`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LinearExpressionParts
{
    pub coefficient: f64,
    pub constant: f64,
}

impl LinearExpressionParts
{
    /// Evaluates `coefficient * x + constant` at the given value.
    pub fn evaluate_at(&self, x: f64) -> f64
    {
        self.coefficient * x + self.constant
    }
}

impl FromStr for LinearExpressionParts
{
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        parse_linear_expression(s, DEFAULT_SYMBOL)
    }
}

/// Splits an expression with its whitespace removed into `(sign, term)` pairs.
/// A leading sign applies to the first term; otherwise the first term is positive.
fn signed_terms(expr: &str) -> anyhow::Result<Vec<(f64, &str)>>
{
    lazy_static!
    {
        static ref SIGN: Regex = Regex::new(r"[+-]").unwrap();
    }

    let mut terms = Vec::new();
    let mut sign = 1.0;
    let mut start = 0;

    for op in SIGN.find_iter(expr)
    {
        let term = &expr[start..op.start()];

        // A sign at the very start has no term in front of it
        if op.start() != 0
        {
            if term.is_empty()
            {
                return Err(ParseError::EmptyTerm.into());
            }
            terms.push((sign, term));
        }

        sign = if op.as_str() == "-" { -1.0 } else { 1.0 };
        start = op.end();
    }

    let last = &expr[start..];
    if last.is_empty()
    {
        return Err(ParseError::DanglingSign.into());
    }
    terms.push((sign, last));

    Ok(terms)
}

/// Reads the coefficient left over after removing the variable symbol from a term.
/// A bare sign stands for a unit coefficient with that sign.
fn coefficient_of(remainder: &str) -> anyhow::Result<f64>
{
    match remainder
    {
        "" | "+" => Ok(1.0),
        "-" => Ok(-1.0),
        other => other.parse::<f64>().map_err(|_| ParseError::InvalidCoefficient.into()),
    }
}

/// Parses a one-sided linear expression in `symbol` into its coefficient and
/// constant. Terms are separated by `+` and `-`; a term is either a number or
/// a number directly followed by the symbol (`3x`, `x`, `0.5x`). Terms that
/// repeat the symbol or carry anything after it (`xx`, `2x3`) are rejected.
///
/// Expressions that don't mention `symbol` at all must be a single number.
///
/// # Example
/// ```
/// use algeqs::terms::parse_linear_expression;
///
/// let parts = parse_linear_expression("2x + 3 - 5x", 'x').unwrap();
///
/// assert_eq!(parts.coefficient, -3.0);
/// assert_eq!(parts.constant, 3.0);
/// ```
pub fn parse_linear_expression(expr: &str, symbol: char) -> anyhow::Result<LinearExpressionParts>
{
    let expr: String = expr.chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if !expr.contains(symbol)
    {
        if expr.is_empty()
        {
            return Err(ParseError::EmptyExpression.into());
        }
        let constant = expr.parse::<f64>()
            .map_err(|_| ParseError::InvalidConstant)?;

        return Ok(LinearExpressionParts { coefficient: 0.0, constant });
    }

    let mut parts = LinearExpressionParts::default();
    for (sign, term) in signed_terms(&expr)?
    {
        if let Some(remainder) = term.strip_suffix(symbol)
        {
            // The symbol may appear once, at the end of the term
            if remainder.contains(symbol)
            {
                return Err(ParseError::InvalidCoefficient.into());
            }
            parts.coefficient += sign * coefficient_of(remainder)?;
        }
        else if term.contains(symbol)
        {
            return Err(ParseError::InvalidCoefficient.into());
        }
        else
        {
            let constant = term.parse::<f64>()
                .map_err(|_| ParseError::InvalidConstant)?;
            parts.constant += sign * constant;
        }
    }

    Ok(parts)
}

#[cfg(test)]
fn parse_err(expr: &str) -> ParseError
{
    *parse_linear_expression(expr, 'x')
        .unwrap_err()
        .downcast_ref::<ParseError>()
        .unwrap()
}

#[test]
fn test_signed_terms()
{
    let terms = signed_terms("-2x+3-x").unwrap();
    assert_eq!(terms, vec![(-1.0, "2x"), (1.0, "3"), (-1.0, "x")]);

    let terms = signed_terms("+4").unwrap();
    assert_eq!(terms, vec![(1.0, "4")]);
}

#[test]
fn test_parse_basic_forms()
{
    let parts: LinearExpressionParts = "2x + 3".parse().unwrap();
    assert_eq!(parts, LinearExpressionParts { coefficient: 2.0, constant: 3.0 });

    let parts: LinearExpressionParts = "-x".parse().unwrap();
    assert_eq!(parts, LinearExpressionParts { coefficient: -1.0, constant: 0.0 });

    let parts: LinearExpressionParts = "7".parse().unwrap();
    assert_eq!(parts, LinearExpressionParts { coefficient: 0.0, constant: 7.0 });
}

#[test]
fn test_parse_accumulates_terms()
{
    let parts = parse_linear_expression("x + x - 0.5x + 1 - 4", 'x').unwrap();
    assert_eq!(parts.coefficient, 1.5);
    assert_eq!(parts.constant, -3.0);
}

#[test]
fn test_parse_other_symbol()
{
    let parts = parse_linear_expression("3t - 2", 't').unwrap();
    assert_eq!(parts, LinearExpressionParts { coefficient: 3.0, constant: -2.0 });
}

#[test]
fn test_bare_sign_coefficients()
{
    assert_eq!(coefficient_of("").unwrap(), 1.0);
    assert_eq!(coefficient_of("+").unwrap(), 1.0);
    assert_eq!(coefficient_of("-").unwrap(), -1.0);
    assert_eq!(coefficient_of("2.5").unwrap(), 2.5);
    assert!(coefficient_of("2*").is_err());
}

#[test]
fn test_malformed_terms()
{
    assert_eq!(parse_err("2x++3"), ParseError::EmptyTerm);
    assert_eq!(parse_err("+-x"), ParseError::EmptyTerm);
    assert_eq!(parse_err("2x+"), ParseError::DanglingSign);
    assert_eq!(parse_err("2*x"), ParseError::InvalidCoefficient);
    assert_eq!(parse_err("2x+y"), ParseError::InvalidConstant);
    assert_eq!(parse_err("3+4"), ParseError::InvalidConstant);
    assert_eq!(parse_err("   "), ParseError::EmptyExpression);
}

#[test]
fn test_symbol_must_end_the_term()
{
    assert_eq!(parse_err("2x3"), ParseError::InvalidCoefficient);
    assert_eq!(parse_err("xx"), ParseError::InvalidCoefficient);
    assert_eq!(parse_err("1 + x2x"), ParseError::InvalidCoefficient);
}

#[test]
fn test_evaluate_at()
{
    let parts = LinearExpressionParts { coefficient: 2.0, constant: 3.0 };
    assert_eq!(parts.evaluate_at(4.0), 11.0);
}
