use std::fmt;
use std::str::FromStr;

use crate::attempts::Answer;
use crate::errors::UnknownDifficultyError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Difficulty
{
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty
{
    type Err = UnknownDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        match s.trim().to_ascii_lowercase().as_str()
        {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficultyError),
        }
    }
}

impl fmt::Display for Difficulty
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ProblemKind
{
    Linear,
    /// `a*x^2 + b*x + c = 0`
    Quadratic { a: f64, b: f64, c: f64 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PracticeProblem
{
    pub problem: &'static str,
    pub answer: Answer,
    pub kind: ProblemKind,
}

fn linear(problem: &'static str, answer: f64) -> PracticeProblem
{
    PracticeProblem { problem, answer: Answer::Number(answer), kind: ProblemKind::Linear }
}

fn quadratic(problem: &'static str, roots: [f64; 2], a: f64, b: f64, c: f64) -> PracticeProblem
{
    PracticeProblem
    {
        problem,
        answer: Answer::Numbers(roots.to_vec()),
        kind: ProblemKind::Quadratic { a, b, c },
    }
}

/// Returns the fixed set of practice problems for a difficulty level.
/// Easy and medium problems are linear; hard problems are quadratic.
///
/// # Example
/// ```
/// use algeqs::practice::{generate_practice_problems, Difficulty};
///
/// let problems = generate_practice_problems(Difficulty::Easy);
///
/// assert_eq!(problems[0].problem, "x + 5 = 12");
/// ```
pub fn generate_practice_problems(difficulty: Difficulty) -> Vec<PracticeProblem>
{
    match difficulty
    {
        Difficulty::Easy => vec![
            linear("x + 5 = 12", 7.0),
            linear("2x = 10", 5.0),
            linear("3x - 4 = 8", 4.0),
            linear("x - 7 = 3", 10.0),
        ],
        Difficulty::Medium => vec![
            linear("4x + 7 = 23", 4.0),
            linear("5x - 12 = 18", 6.0),
            linear("2x + 9 = 3x - 1", 10.0),
            linear("7x - 5 = 2x + 15", 4.0),
        ],
        Difficulty::Hard => vec![
            quadratic("x^2 - 5x + 6 = 0", [2.0, 3.0], 1.0, -5.0, 6.0),
            quadratic("2x^2 + 3x - 2 = 0", [0.5, -2.0], 2.0, 3.0, -2.0),
            quadratic("x^2 - 4 = 0", [2.0, -2.0], 1.0, 0.0, -4.0),
        ],
    }
}

#[test]
fn test_difficulty_from_str()
{
    assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
    assert_eq!(" Hard ".parse::<Difficulty>().unwrap(), Difficulty::Hard);
    assert!("expert".parse::<Difficulty>().is_err());
    assert_eq!(Difficulty::Medium.to_string(), "medium");
}

#[test]
fn test_problem_sets()
{
    assert_eq!(generate_practice_problems(Difficulty::Easy).len(), 4);
    assert_eq!(generate_practice_problems(Difficulty::Medium).len(), 4);

    let hard = generate_practice_problems(Difficulty::Hard);
    assert_eq!(hard.len(), 3);
    assert!(hard.iter().all(|p| matches!(p.kind, ProblemKind::Quadratic { .. })));
}
