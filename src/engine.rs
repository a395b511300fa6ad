use crate::bindings::{VariableBinding, DEFAULT_SYMBOL};
use crate::errors::EngineError;
use crate::linear::{solve_linear_equation_for, verify_linear_solution};
use crate::quadratic::{solve_quadratic_equation, SolutionPair};
use crate::shunting::evaluate_expression;

/// Ties a variable symbol to the values bound to it, so that a caller can set
/// `x` once and evaluate several expressions against it.
///
/// Each session should own its own engine. Nothing here is shared.
#[derive(Clone, Debug, PartialEq)]
pub struct AlgebraEngine
{
    symbol: char,
    bindings: VariableBinding,
}

impl Default for AlgebraEngine
{
    fn default() -> Self
    {
        AlgebraEngine::new()
    }
}

impl AlgebraEngine
{
    /// Creates an engine that solves for `x`.
    pub fn new() -> AlgebraEngine
    {
        AlgebraEngine
        {
            symbol: DEFAULT_SYMBOL,
            bindings: VariableBinding::new(),
        }
    }

    /// Creates an engine that solves for the given symbol, which must be an
    /// ASCII letter.
    ///
    /// # Example
    /// ```
    /// use algeqs::engine::AlgebraEngine;
    ///
    /// let engine = AlgebraEngine::with_symbol('n').unwrap();
    ///
    /// assert_eq!(engine.solve_linear_equation("3n = 12").unwrap(), 4.0);
    /// assert!(AlgebraEngine::with_symbol('*').is_err());
    /// ```
    pub fn with_symbol(symbol: char) -> anyhow::Result<AlgebraEngine>
    {
        if !symbol.is_ascii_alphabetic()
        {
            return Err(EngineError::InvalidVariableSymbol.into());
        }

        Ok(AlgebraEngine
        {
            symbol,
            bindings: VariableBinding::new(),
        })
    }

    pub fn symbol(&self) -> char
    {
        self.symbol
    }

    pub fn bindings(&self) -> &VariableBinding
    {
        &self.bindings
    }

    /// Binds a value to the engine's variable for later evaluations.
    pub fn set_variable<T>(&mut self, value: T)
    where T: Into<f64>
    {
        self.bindings.set(self.symbol, value);
    }

    pub fn get_variable(&self) -> Option<f64>
    {
        self.bindings.get(self.symbol)
    }

    pub fn clear_variable(&mut self) -> Option<f64>
    {
        self.bindings.unset(self.symbol)
    }

    /// Evaluates an expression using the currently bound value of the variable.
    ///
    /// # Example
    /// ```
    /// use algeqs::engine::AlgebraEngine;
    ///
    /// let mut engine = AlgebraEngine::new();
    /// engine.set_variable(4);
    ///
    /// assert_eq!(engine.evaluate_expression("2x + 5").unwrap(), 13.0);
    /// ```
    pub fn evaluate_expression(&self, expression: &str) -> anyhow::Result<f64>
    {
        evaluate_expression(expression, self.symbol, &self.bindings)
    }

    pub fn solve_linear_equation(&self, equation: &str) -> anyhow::Result<f64>
    {
        solve_linear_equation_for(equation, self.symbol)
    }

    pub fn solve_quadratic_equation(&self, a: f64, b: f64, c: f64) -> anyhow::Result<SolutionPair>
    {
        solve_quadratic_equation(a, b, c)
    }

    /// Substitutes `value` into both sides of `equation`. The engine's own
    /// binding is left untouched.
    pub fn verify_linear_solution(&self, equation: &str, value: f64) -> anyhow::Result<bool>
    {
        verify_linear_solution(equation, self.symbol, value)
    }
}

#[test]
fn test_binding_persists_between_calls()
{
    let mut engine = AlgebraEngine::new();
    engine.set_variable(4);

    assert_eq!(engine.evaluate_expression("2*x+5").unwrap(), 13.0);
    assert_eq!(engine.evaluate_expression("x^2").unwrap(), 16.0);

    engine.set_variable(-1);
    assert_eq!(engine.get_variable(), Some(-1.0));
    assert_eq!(engine.evaluate_expression("2*x+5").unwrap(), 3.0);
}

#[test]
fn test_failed_call_keeps_binding()
{
    let mut engine = AlgebraEngine::new();
    engine.set_variable(2);

    assert!(engine.evaluate_expression("1/(x-2)").is_err());
    assert_eq!(engine.get_variable(), Some(2.0));
}

#[test]
fn test_clear_variable()
{
    let mut engine = AlgebraEngine::new();
    engine.set_variable(2);

    assert_eq!(engine.clear_variable(), Some(2.0));
    assert!(engine.evaluate_expression("x + 1").is_err());
}

#[test]
fn test_solve_then_verify()
{
    let engine = AlgebraEngine::with_symbol('y').unwrap();
    let soln = engine.solve_linear_equation("5y - 12 = 18").unwrap();

    assert_eq!(soln, 6.0);
    assert!(engine.verify_linear_solution("5y - 12 = 18", soln).unwrap());
    assert_eq!(engine.bindings().get('y'), None);
}
