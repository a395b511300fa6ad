use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// More concise syntax for implementing `Error` and `Display` for both structs and enums
macro_rules! impl_err {
    ($s:ty, $e:expr) => {
        impl Error for $s {}
        impl Display for $s {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, $e)
            }
        }
    };
    ($s:ty, $($p:path, $e:expr),*) => {
        impl Error for $s {}
        impl Display for $s {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match self {
                    $($p => write!(f, $e),)*
                }
            }
        }
    };
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParseError {
    MissingEquals,
    MultipleEquals,
    EmptyExpression,
    EmptyTerm,
    DanglingSign,
    InvalidConstant,
    InvalidCoefficient,
}
impl_err! {
    ParseError,
    ParseError::MissingEquals, "equation must contain an '=' sign",
    ParseError::MultipleEquals, "found more than one '=' sign in equation",
    ParseError::EmptyExpression, "found an empty side while parsing a linear expression",
    ParseError::EmptyTerm, "found two consecutive operators with no term between them",
    ParseError::DanglingSign, "found a trailing sign with no term after it",
    ParseError::InvalidConstant, "failed to read a constant term as a number",
    ParseError::InvalidCoefficient, "failed to read the coefficient of a variable term as a number"
}

/// The two ways a linear equation can reduce to `0x = k`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DegenerateEquationKind {
    /// `0 = 0`: every value is a solution.
    Identity,
    /// `0 = k` with `k != 0`: no value is a solution.
    Inconsistent,
}
impl_err! {
    DegenerateEquationKind,
    DegenerateEquationKind::Identity, "infinite solutions - equation is an identity",
    DegenerateEquationKind::Inconsistent, "no solution - equation is inconsistent"
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum QuadraticSolverError {
    InvalidCoefficient,
}
impl_err! {
    QuadraticSolverError,
    QuadraticSolverError::InvalidCoefficient, "coefficient 'a' cannot be zero for a quadratic equation"
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InvalidExpression {
    InvalidCharacter,
    UnboundVariable,
    UnclosedParenthesis,
    LeftoverToken,
    UnknownToken,
    ExpectedArg,
    DivisionByZero,
    NoTokens,
    NonFiniteResult,
}
impl_err! {
    InvalidExpression,
    InvalidExpression::InvalidCharacter, "found a character outside of digits, operators, parentheses and the variable symbol",
    InvalidExpression::UnboundVariable, "found the variable symbol in the expression but no value is bound to it",
    InvalidExpression::UnclosedParenthesis, "found an unbalanced parenthesis while converting expression to reverse polish notation",
    InvalidExpression::LeftoverToken, "found a token when none were expected",
    InvalidExpression::UnknownToken, "found an unexpected token while converting expression to reverse polish notation",
    InvalidExpression::ExpectedArg, "expected to find an operand, but none was present on the stack",
    InvalidExpression::DivisionByZero, "tried to divide by zero during postfix evaluation",
    InvalidExpression::NoTokens, "expected to find one token in postfix evaluation stack but found none",
    InvalidExpression::NonFiniteResult, "expression did not evaluate to a finite real number"
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EngineError {
    InvalidVariableSymbol,
}
impl_err! {
    EngineError,
    EngineError::InvalidVariableSymbol, "variable symbol must be a single ASCII letter"
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttemptLogError {
    NoAttemptsForStudent,
    NoAttemptsRecorded,
}
impl_err! {
    AttemptLogError,
    AttemptLogError::NoAttemptsForStudent, "no attempts found for student",
    AttemptLogError::NoAttemptsRecorded, "no attempts recorded"
}

#[derive(Debug)]
pub struct UnknownDifficultyError;
impl_err!(UnknownDifficultyError, "difficulty must be one of 'easy', 'medium' or 'hard'");

#[test]
fn test_error_messages()
{
    assert_eq!(
        DegenerateEquationKind::Identity.to_string(),
        "infinite solutions - equation is an identity"
    );
    assert_eq!(
        UnknownDifficultyError.to_string(),
        "difficulty must be one of 'easy', 'medium' or 'hard'"
    );
}

#[test]
fn test_errors_survive_anyhow_round_trip()
{
    let err: anyhow::Error = ParseError::DanglingSign.into();
    assert_eq!(err.downcast_ref::<ParseError>(), Some(&ParseError::DanglingSign));
}
