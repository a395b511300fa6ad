use std::ffi::{c_char, c_double, c_int, c_void, CStr};
use std::panic::catch_unwind;
use std::ptr::null_mut;

use crate::engine::AlgebraEngine;

/// Shorthand for creating an owned string from a C `char *`
unsafe fn new_owned_string(s: *const c_char) -> String
{
    let c_str = CStr::from_ptr(s);
    String::from_utf8_lossy(c_str.to_bytes()).to_string()
}

/// Allocates a new `AlgebraEngine` solving for the ASCII letter `symbol` and
/// returns a raw pointer to it, or `NULL` if the symbol is not a letter.
#[no_mangle]
pub extern "C" fn new_algebra_engine(symbol: c_char) -> *mut c_void
{
    let res = catch_unwind(|| {
        match AlgebraEngine::with_symbol(symbol as u8 as char)
        {
            Ok(engine) => Box::into_raw(Box::new(engine)) as *mut c_void,
            Err(_) => null_mut(),
        }
    });

    res.unwrap_or(null_mut())
}

/// Binds `value` to the engine's variable.
///
/// The returned C `int` value indicates the following:
/// - `1`: The value was bound successfully
/// - `-1`: An error occurred while binding the value
#[no_mangle]
pub extern "C" fn set_engine_variable(p_engine: *mut c_void, value: c_double) -> c_int
{
    if p_engine.is_null()
    {
        return -1;
    }

    let res = catch_unwind(|| {
        unsafe { (*(p_engine as *mut AlgebraEngine)).set_variable(value) };
    });

    match res
    {
        Ok(_) => 1,
        Err(_) => -1,
    }
}

/// Evaluates a nul-terminated expression, writing the result to `out`.
///
/// The returned C `int` value indicates the following:
/// - `1`: The expression was evaluated and `out` holds the result
/// - `-1`: The expression was invalid and `out` was not written
#[no_mangle]
pub extern "C" fn evaluate_engine_expression(p_engine: *const c_void, expression: *const c_char, out: *mut c_double) -> c_int
{
    if p_engine.is_null() || expression.is_null() || out.is_null()
    {
        return -1;
    }

    let res = catch_unwind(|| {
        let engine = unsafe { &*(p_engine as *const AlgebraEngine) };
        let expression_str = unsafe { new_owned_string(expression) };

        match engine.evaluate_expression(&expression_str)
        {
            Ok(x) => {
                unsafe { *out = x };
                1
            },
            Err(_) => -1,
        }
    });

    res.unwrap_or(-1)
}

/// Solves a nul-terminated linear equation, writing the solution to `out`.
///
/// The returned C `int` value indicates the following:
/// - `1`: The equation was solved and `out` holds the solution
/// - `-1`: The equation was malformed, an identity or inconsistent
#[no_mangle]
pub extern "C" fn solve_engine_linear_equation(p_engine: *const c_void, equation: *const c_char, out: *mut c_double) -> c_int
{
    if p_engine.is_null() || equation.is_null() || out.is_null()
    {
        return -1;
    }

    let res = catch_unwind(|| {
        let engine = unsafe { &*(p_engine as *const AlgebraEngine) };
        let equation_str = unsafe { new_owned_string(equation) };

        match engine.solve_linear_equation(&equation_str)
        {
            Ok(x) => {
                unsafe { *out = x };
                1
            },
            Err(_) => -1,
        }
    });

    res.unwrap_or(-1)
}

/// Solves `a*x^2 + b*x + c = 0`, writing the roots to `out_first` and `out_second`.
///
/// The returned C `int` value indicates the following:
/// - `1`: The equation has real roots, which were written to the out-parameters
/// - `0`: The equation has no real roots and nothing was written
/// - `-1`: `a` was zero or an error occurred
#[no_mangle]
pub extern "C" fn solve_engine_quadratic_equation(
    p_engine: *const c_void,
    a: c_double,
    b: c_double,
    c: c_double,
    out_first: *mut c_double,
    out_second: *mut c_double
) -> c_int
{
    if p_engine.is_null() || out_first.is_null() || out_second.is_null()
    {
        return -1;
    }

    let res = catch_unwind(|| {
        let engine = unsafe { &*(p_engine as *const AlgebraEngine) };

        match engine.solve_quadratic_equation(a, b, c)
        {
            Ok(pair) => match (pair.first, pair.second)
            {
                (Some(first), Some(second)) => {
                    unsafe
                    {
                        *out_first = first;
                        *out_second = second;
                    }
                    1
                },
                _ => 0,
            },
            Err(_) => -1,
        }
    });

    res.unwrap_or(-1)
}

/// Frees an `AlgebraEngine` object at the given pointer
#[no_mangle]
pub unsafe extern "C" fn free_algebra_engine(p_engine: *mut c_void)
{
    if !p_engine.is_null()
    {
        drop(Box::from_raw(p_engine as *mut AlgebraEngine));
    }
}

#[test]
fn test_engine_round_trip_through_c_interface()
{
    let engine = new_algebra_engine(b'x' as c_char);
    assert!(!engine.is_null());

    assert_eq!(set_engine_variable(engine, 4.0), 1);

    let expression = std::ffi::CString::new("2x + 5").unwrap();
    let mut out = 0.0;
    assert_eq!(evaluate_engine_expression(engine, expression.as_ptr(), &mut out), 1);
    assert_eq!(out, 13.0);

    let equation = std::ffi::CString::new("5 = 3").unwrap();
    assert_eq!(solve_engine_linear_equation(engine, equation.as_ptr(), &mut out), -1);

    let (mut first, mut second) = (0.0, 0.0);
    assert_eq!(solve_engine_quadratic_equation(engine, 1.0, -5.0, 6.0, &mut first, &mut second), 1);
    assert_eq!((first, second), (3.0, 2.0));
    assert_eq!(solve_engine_quadratic_equation(engine, 1.0, 2.0, 5.0, &mut first, &mut second), 0);

    unsafe { free_algebra_engine(engine) };
}

#[test]
fn test_bad_symbol_gives_null()
{
    assert!(new_algebra_engine(b'+' as c_char).is_null());
}
