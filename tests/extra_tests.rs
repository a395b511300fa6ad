use std::time::Duration;

use algeqs::attempts::{Answer, AttemptLog, SessionSummary};
use algeqs::bindings::VariableBinding;
use algeqs::engine::AlgebraEngine;
use algeqs::errors::{DegenerateEquationKind, InvalidExpression, ParseError};
use algeqs::practice::{generate_practice_problems, Difficulty, ProblemKind};
use algeqs::shunting::eval_str_with_bindings;
use algeqs::terms::LinearExpressionParts;
use algeqs::{evaluate_expression, solve_linear_equation, solve_quadratic_equation};
use approx::assert_relative_eq;

#[test]
fn test_parse_linear_expressions()
{
    let parts: LinearExpressionParts = "2x + 3".parse().unwrap();
    assert_eq!((parts.coefficient, parts.constant), (2.0, 3.0));

    let parts: LinearExpressionParts = "-x".parse().unwrap();
    assert_eq!((parts.coefficient, parts.constant), (-1.0, 0.0));

    let parts: LinearExpressionParts = "7".parse().unwrap();
    assert_eq!((parts.coefficient, parts.constant), (0.0, 7.0));
}

#[test]
fn test_solve_linear()
{
    assert_eq!(solve_linear_equation("2x + 9 = 3x - 1").unwrap(), 10.0);
    assert_eq!(solve_linear_equation("x + 5 = 12").unwrap(), 7.0);
    assert_relative_eq!(solve_linear_equation("3x = 1").unwrap(), 1.0 / 3.0);
}

#[test]
fn test_degenerate_linear()
{
    let err = solve_linear_equation("5 = 5").unwrap_err();
    assert_eq!(err.downcast_ref::<DegenerateEquationKind>(), Some(&DegenerateEquationKind::Identity));

    let err = solve_linear_equation("5 = 3").unwrap_err();
    assert_eq!(err.downcast_ref::<DegenerateEquationKind>(), Some(&DegenerateEquationKind::Inconsistent));
}

#[test]
fn test_solve_quadratic()
{
    let soln = solve_quadratic_equation(1.0, -5.0, 6.0).unwrap();
    assert_eq!((soln.first, soln.second), (Some(3.0), Some(2.0)));

    let soln = solve_quadratic_equation(1.0, 0.0, -4.0).unwrap();
    assert_eq!((soln.first, soln.second), (Some(2.0), Some(-2.0)));

    let soln = solve_quadratic_equation(1.0, 2.0, 5.0).unwrap();
    assert_eq!((soln.first, soln.second), (None, None));
}

#[test]
fn test_evaluate_with_binding()
{
    let bindings = VariableBinding::with_value('x', 4);

    assert_eq!(eval_str_with_bindings("2*x+5", &bindings).unwrap(), 13.0);
    assert_eq!(eval_str_with_bindings("2x+5", &bindings).unwrap(), 13.0);
    assert_eq!(evaluate_expression("2 * 4 + 5", 'x', &VariableBinding::new()).unwrap(), 13.0);
}

#[test]
fn test_evaluator_never_runs_names()
{
    let bindings = VariableBinding::with_value('x', 1);

    for expr in ["import os", "__import__('os')", "exit()", "x.real", "abs(x)", "1e5"]
    {
        let err = eval_str_with_bindings(expr, &bindings).unwrap_err();
        assert_eq!(err.downcast_ref::<InvalidExpression>(), Some(&InvalidExpression::InvalidCharacter));
    }
}

#[test]
fn test_alphabetic_content_in_equations_is_rejected()
{
    let err = solve_linear_equation("import os = 1").unwrap_err();
    assert_eq!(err.downcast_ref::<ParseError>(), Some(&ParseError::InvalidConstant));
}

#[test]
fn test_practice_answers_agree_with_solvers()
{
    let engine = AlgebraEngine::new();

    for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    {
        for problem in generate_practice_problems(difficulty)
        {
            let solved: Answer = match problem.kind
            {
                ProblemKind::Linear => engine.solve_linear_equation(problem.problem).unwrap().into(),
                ProblemKind::Quadratic { a, b, c } => engine.solve_quadratic_equation(a, b, c).unwrap().into(),
            };
            assert!(
                algeqs::attempts::answers_match(&solved, &problem.answer),
                "{} solved as {} but expected {}", problem.problem, solved, problem.answer
            );
        }
    }
}

#[test]
fn test_practice_session_flow()
{
    let engine = AlgebraEngine::new();
    let mut log = AttemptLog::new();

    let submissions = ["7", "4", "4", "10"];
    for (problem, typed) in generate_practice_problems(Difficulty::Easy).iter().zip(submissions)
    {
        let reference = engine.solve_linear_equation(problem.problem).unwrap();
        log.add_attempt("dana", problem.problem, Answer::parse_submission(typed), reference, Duration::from_secs(2));
    }
    log.add_attempt("dana", "x^2 - 4 = 0", Answer::parse_submission("-2, 2"), vec![2.0, -2.0], Duration::from_secs(6));

    let summary = SessionSummary::from_attempts(log.attempts());
    assert_eq!(summary.completed, 5);
    assert_eq!(summary.correct, 4);
    assert_eq!(summary.average_time, Duration::from_millis(2800));

    let perf = log.student_performance("dana").unwrap();
    assert_relative_eq!(perf.accuracy, 0.8);
}
