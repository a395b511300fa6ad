use crate::bindings::{VariableBinding, DEFAULT_SYMBOL};
use crate::errors::InvalidExpression;

const _OPERATORS_: &str = "()^*/+-";

#[derive(Clone, Copy, Debug, PartialEq)]
enum Token
{
    LeftParenthesis,
    Exp,
    Mul,
    Div,
    Plus,
    Minus,
    Num(f64),
}

fn precedence(op: &str) -> i32
{
    match op
    {
        "^" => 4,
        "/" => 3,
        "*" => 3,
        "-" => 2,
        "+" => 2,
         _  => 1,
    }
}

fn prec_check(o1: &str, o2: &str) -> bool
{
    let check1 = o2 != "(";
    let check2 = precedence(o2) > precedence(o1);
    let check3 = precedence(o2) == precedence(o1) && o1 != "^";
    check1 && (check2 || check3)
}

fn is_allowed(c: char, symbol: char) -> bool
{
    c.is_ascii_digit() || c == '.' || c == symbol || _OPERATORS_.contains(c)
}

/// Rejects any expression containing something other than digits, `.`,
/// operators, parentheses and the variable symbol.
pub fn validate_characters(expr: &str, symbol: char) -> anyhow::Result<()>
{
    if expr.chars().all(|c| is_allowed(c, symbol))
    {
        Ok(())
    }
    else
    {
        Err(InvalidExpression::InvalidCharacter.into())
    }
}

/// Spaces out operators and the variable symbol so that the expression can be
/// split into words. A digit directly followed by the symbol gets an explicit `*`.
fn punctuate(expr: &str, symbol: char) -> String
{
    let mut output = String::new();
    let mut prev: Option<char> = None;
    for c in expr.chars()
    {
        if c == symbol
        {
            if prev.map_or(false, |p| p.is_ascii_digit())
            {
                output += " * ";
            }
            output += &format!(" {c} ");
        }
        else if _OPERATORS_.contains(c)
        {
            output += &format!(" {c} ");
        }
        else
        {
            output.push(c);
        }
        prev = Some(c);
    }
    output.trim().to_string()
}

fn tokenize(tok: &str) -> anyhow::Result<Token>
{
    let token = match tok
    {
        "^" => Token::Exp,
        "/" => Token::Div,
        "*" => Token::Mul,
        "-" => Token::Minus,
        "+" => Token::Plus,
        "(" => Token::LeftParenthesis,
        _ => return Err(InvalidExpression::UnknownToken.into()),
    };
    Ok(token)
}

/// Reads a numeric literal. Only digits and `.` may appear, which keeps
/// `f64::from_str` from accepting words like `inf` or `NaN`.
fn parse_literal(word: &str) -> Option<f64>
{
    if word.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        word.parse::<f64>().ok()
    }
    else
    {
        None
    }
}

/// See shunting yard implementation details at:
/// https://en.wikipedia.org/wiki/Shunting_yard_algorithm
fn rpnify(expr: &str, symbol: char, bindings: &VariableBinding) -> anyhow::Result<Vec<Token>>
{
    let punctuated = punctuate(expr, symbol);
    let words = punctuated.split(' ').filter(|c| !c.is_empty());

    let mut stack: Vec<&str> = Vec::new();
    let mut queue: Vec<Token> = Vec::new();
    let mut unary = true; // Indicator for whether the next '-' or '+' token is a unary operator

    for word in words
    {
        match word
        {
            "(" => {
                stack.push(word);
                unary = true;
            },

            ")" => {
                let mut closed = false;
                while let Some(op) = stack.pop()
                {
                    if op == "("
                    {
                        closed = true;
                        break;
                    }
                    queue.push(tokenize(op)?);
                }
                if !closed
                {
                    return Err(InvalidExpression::UnclosedParenthesis.into());
                }
                unary = false;
            },

            "^" | "/" | "*" | "+" | "-" => {
                let o1 = word;

                if unary && o1 == "+"
                {
                    continue; // unary plus changes nothing
                }

                // if we find a minus and we're expecting a unary operator...
                if unary && o1 == "-"
                {
                    queue.push(Token::Num(-1.0));
                    stack.push("*");
                }
                else
                {
                    while let Some(o2) = stack.pop()
                    {
                        if prec_check(o1, o2)
                        {
                            queue.push(tokenize(o2)?);
                        }
                        else
                        {
                            stack.push(o2); // put the prec-check-denied element back on the stack
                            break;
                        }
                    }
                    stack.push(word);
                }
                unary = true;
            },

            other => {
                if let Some(num) = parse_literal(other)
                {
                    queue.push(Token::Num(num));
                }
                else if other.chars().eq(std::iter::once(symbol))
                {
                    match bindings.get(symbol)
                    {
                        Some(val) => queue.push(Token::Num(val)),
                        None => return Err(InvalidExpression::UnboundVariable.into()),
                    }
                }
                else
                {
                    return Err(InvalidExpression::UnknownToken.into());
                }
                unary = false;
            },
        }
    }

    while let Some(tok) = stack.pop()
    {
        if tok == "("
        {
            return Err(InvalidExpression::UnclosedParenthesis.into());
        }
        queue.push(tokenize(tok)?);
    }

    Ok(queue)
}

fn pop_operands(stack: &mut Vec<f64>) -> anyhow::Result<(f64, f64)>
{
    if let (Some(arg2), Some(arg1)) = (stack.pop(), stack.pop())
    {
        Ok((arg1, arg2))
    }
    else
    {
        Err(InvalidExpression::ExpectedArg.into())
    }
}

fn eval_rpn_expression(expr: &[Token]) -> anyhow::Result<f64>
{
    let mut stack: Vec<f64> = Vec::new();

    for token in expr
    {
        let value = match token
        {
            Token::Num(num) => *num,

            Token::Exp => {
                let (base, exponent) = pop_operands(&mut stack)?;
                base.powf(exponent)
            },

            Token::Div => {
                let (arg1, arg2) = pop_operands(&mut stack)?;
                if arg2 == 0.0
                {
                    return Err(InvalidExpression::DivisionByZero.into())
                }
                arg1 / arg2
            },

            Token::Mul => {
                let (arg1, arg2) = pop_operands(&mut stack)?;
                arg1 * arg2
            },

            Token::Minus => {
                let (arg1, arg2) = pop_operands(&mut stack)?;
                arg1 - arg2
            },

            Token::Plus => {
                let (arg1, arg2) = pop_operands(&mut stack)?;
                arg1 + arg2
            },

            Token::LeftParenthesis => {
                return Err(InvalidExpression::LeftoverToken.into())
            },
        };
        stack.push(value);
    }

    match stack.len() {
        1 if stack[0].is_finite() => Ok(stack[0]),
        1 => Err(InvalidExpression::NonFiniteResult.into()),
        0 => Err(InvalidExpression::NoTokens.into()),
        _ => Err(InvalidExpression::LeftoverToken.into()),
    }
}

/// Evaluates an arithmetic expression in a single variable `symbol`, taking the
/// variable's value from `bindings`.
///
/// Only numbers, `+ - * / ^`, parentheses and `symbol` are understood. A digit
/// written directly before the symbol multiplies it, so `2x` means `2*x`.
///
/// # Example
/// ```
/// use algeqs::bindings::VariableBinding;
/// use algeqs::shunting::evaluate_expression;
///
/// let bindings = VariableBinding::with_value('x', 4);
///
/// assert_eq!(evaluate_expression("2x + 5", 'x', &bindings).unwrap(), 13.0);
/// assert_eq!(evaluate_expression("(x - 1)^2 / 3", 'x', &bindings).unwrap(), 3.0);
/// ```
pub fn evaluate_expression(expr: &str, symbol: char, bindings: &VariableBinding) -> anyhow::Result<f64>
{
    let expr: String = expr.chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    validate_characters(&expr, symbol)?;
    eval_rpn_expression(&rpnify(&expr, symbol, bindings)?)
}

/// Evaluates a string as a mathematical expression with no variable bound.
///
/// # Example
/// ```
/// use algeqs::shunting::eval_str;
///
/// assert_eq!(eval_str("2 * 4 + 5").unwrap(), 13.0);
/// assert!(eval_str("import os").is_err());
/// ```
pub fn eval_str(expr: &str) -> anyhow::Result<f64>
{
    evaluate_expression(expr, DEFAULT_SYMBOL, &VariableBinding::new())
}

/// Evaluates a string as a mathematical expression in `x`, using the value
/// bound to `x` in `bindings`.
///
/// # Example
/// ```
/// use algeqs::bindings::VariableBinding;
/// use algeqs::shunting::eval_str_with_bindings;
///
/// let bindings = VariableBinding::with_value('x', 4);
///
/// assert_eq!(eval_str_with_bindings("2*x+5", &bindings).unwrap(), 13.0);
/// ```
pub fn eval_str_with_bindings(expr: &str, bindings: &VariableBinding) -> anyhow::Result<f64>
{
    evaluate_expression(expr, DEFAULT_SYMBOL, bindings)
}

#[cfg(test)]
fn eval_err(expr: &str) -> InvalidExpression
{
    *eval_str_with_bindings(expr, &VariableBinding::with_value('x', 2))
        .unwrap_err()
        .downcast_ref::<InvalidExpression>()
        .unwrap()
}

#[test]
fn test_punctuate()
{
    let punctuated = punctuate("3+4", 'x');
    assert_eq!(punctuated, "3 + 4");

    let tokens = Vec::from_iter(punctuated.split(' '));
    assert_eq!(
        tokens,
        vec!["3", "+", "4"]
    )
}

#[test]
fn test_punctuate_implicit_multiplication()
{
    let words: Vec<String> = punctuate("12x-x", 'x')
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(|w| w.to_owned())
        .collect();
    assert_eq!(words, vec!["12", "*", "x", "-", "x"]);
}

#[test]
fn test_tokenize_operators_only()
{
    assert_eq!(tokenize("^").unwrap(), Token::Exp);
    assert_eq!(tokenize("(").unwrap(), Token::LeftParenthesis);

    let err = tokenize("4").unwrap_err();
    assert_eq!(err.downcast_ref::<InvalidExpression>(), Some(&InvalidExpression::UnknownToken));
}

#[test]
fn test_rpnify()
{
    let rpn = rpnify("3+4", 'x', &VariableBinding::new()).unwrap();
    assert_eq!(rpn, vec![Token::Num(3.0), Token::Num(4.0), Token::Plus])
}

#[test]
fn test_unary_minus()
{
    let rpn = rpnify("(-1+2)", 'x', &VariableBinding::new()).unwrap();

    assert_eq!(rpn[0], Token::Num(-1.0));
}

#[test]
fn test_precedence_and_associativity()
{
    assert_eq!(eval_str("2+3*4").unwrap(), 14.0);
    assert_eq!(eval_str("(2+3)*4").unwrap(), 20.0);
    assert_eq!(eval_str("8/4/2").unwrap(), 1.0);
    assert_eq!(eval_str("10-4-3").unwrap(), 3.0);
    assert_eq!(eval_str("2^3^2").unwrap(), 512.0);
    assert_eq!(eval_str("-2^2").unwrap(), -4.0);
    assert_eq!(eval_str("2^-1").unwrap(), 0.5);
    assert_eq!(eval_str("6/-2*3").unwrap(), -9.0);
    assert_eq!(eval_str("2--3").unwrap(), 5.0);
    assert_eq!(eval_str("+3").unwrap(), 3.0);
}

#[test]
fn test_variable_substitution()
{
    let bindings = VariableBinding::with_value('x', 4);
    assert_eq!(eval_str_with_bindings("2*x+5", &bindings).unwrap(), 13.0);
    assert_eq!(eval_str_with_bindings("2x+5", &bindings).unwrap(), 13.0);
    assert_eq!(eval_str_with_bindings("x^2 - x", &bindings).unwrap(), 12.0);

    let negative = VariableBinding::with_value('x', -3);
    assert_eq!(eval_str_with_bindings("x^2", &negative).unwrap(), 9.0);
    assert_eq!(eval_str_with_bindings("2x", &negative).unwrap(), -6.0);
}

#[test]
fn test_invalid_expressions()
{
    assert_eq!(eval_err("import os"), InvalidExpression::InvalidCharacter);
    assert_eq!(eval_err("2*y"), InvalidExpression::InvalidCharacter);
    assert_eq!(eval_err("(2+3"), InvalidExpression::UnclosedParenthesis);
    assert_eq!(eval_err("2+3)"), InvalidExpression::UnclosedParenthesis);
    assert_eq!(eval_err("4/0"), InvalidExpression::DivisionByZero);
    assert_eq!(eval_err("4/(x-2)"), InvalidExpression::DivisionByZero);
    assert_eq!(eval_err("2+"), InvalidExpression::ExpectedArg);
    assert_eq!(eval_err("2(3)"), InvalidExpression::LeftoverToken);
    assert_eq!(eval_err("1.2.3"), InvalidExpression::UnknownToken);
    assert_eq!(eval_err(""), InvalidExpression::NoTokens);
    assert_eq!(eval_err("()"), InvalidExpression::NoTokens);
    assert_eq!(eval_err("(-8)^0.5"), InvalidExpression::NonFiniteResult);
}

#[test]
fn test_unbound_variable()
{
    let err = eval_str("2x + 1").unwrap_err();
    assert_eq!(
        err.downcast_ref::<InvalidExpression>(),
        Some(&InvalidExpression::UnboundVariable)
    );
}
