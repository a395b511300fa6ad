use std::collections::HashMap;

/// The variable symbol used when none is specified.
pub const DEFAULT_SYMBOL: char = 'x';

/// Values bound to variable symbols for use during expression evaluation.
///
/// A binding only changes through explicit calls to `set` or `unset`, and is
/// handed to the evaluator by reference on every call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariableBinding
{
    values: HashMap<char, f64>,
}

impl VariableBinding
{
    pub fn new() -> VariableBinding
    {
        VariableBinding { values: HashMap::new() }
    }

    /// Creates a binding with a single symbol already set.
    ///
    /// # Example
    /// ```
    /// use algeqs::bindings::VariableBinding;
    ///
    /// let bindings = VariableBinding::with_value('x', 4);
    ///
    /// assert_eq!(bindings.get('x'), Some(4.0));
    /// assert_eq!(bindings.get('y'), None);
    /// ```
    pub fn with_value<T>(symbol: char, value: T) -> VariableBinding
    where T: Into<f64>
    {
        let mut bindings = VariableBinding::new();
        bindings.set(symbol, value);
        bindings
    }

    /// Binds `value` to `symbol`, overwriting any previous value.
    pub fn set<T>(&mut self, symbol: char, value: T)
    where T: Into<f64>
    {
        self.values.insert(symbol, value.into());
    }

    pub fn get(&self, symbol: char) -> Option<f64>
    {
        self.values.get(&symbol).copied()
    }

    /// Removes the value bound to `symbol`, returning it if there was one.
    pub fn unset(&mut self, symbol: char) -> Option<f64>
    {
        self.values.remove(&symbol)
    }

    pub fn is_bound(&self, symbol: char) -> bool
    {
        self.values.contains_key(&symbol)
    }
}

#[test]
fn test_set_overwrites()
{
    let mut bindings = VariableBinding::new();
    bindings.set('x', 1);
    bindings.set('x', 2.5);

    assert_eq!(bindings.get('x'), Some(2.5));
}

#[test]
fn test_unset()
{
    let mut bindings = VariableBinding::with_value('t', -3);

    assert!(bindings.is_bound('t'));
    assert_eq!(bindings.unset('t'), Some(-3.0));
    assert!(!bindings.is_bound('t'));
    assert_eq!(bindings.unset('t'), None);
}
