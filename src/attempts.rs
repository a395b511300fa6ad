use std::collections::BTreeSet;
use std::fmt;
use std::time::{Duration, SystemTime};

use crate::errors::AttemptLogError;
use crate::quadratic::SolutionPair;

/// Numeric answers within this distance of the reference are accepted.
pub const ANSWER_TOLERANCE: f64 = 1e-6;

/// An answer submitted for, or expected from, a practice problem.
#[derive(Clone, Debug, PartialEq)]
pub enum Answer
{
    Number(f64),
    /// The roots of a quadratic problem, in any order.
    Numbers(Vec<f64>),
    /// Input that could not be read as numbers.
    Text(String),
}

impl Answer
{
    /// Reads typed input: comma separated numbers become `Numbers`, a single
    /// number becomes `Number`, and anything else is kept as `Text`.
    ///
    /// # Example
    /// ```
    /// use algeqs::attempts::Answer;
    ///
    /// assert_eq!(Answer::parse_submission(" 7 "), Answer::Number(7.0));
    /// assert_eq!(Answer::parse_submission("3, 2"), Answer::Numbers(vec![3.0, 2.0]));
    /// assert_eq!(Answer::parse_submission("seven"), Answer::Text("seven".to_owned()));
    /// ```
    pub fn parse_submission(text: &str) -> Answer
    {
        let text = text.trim();
        if text.contains(',')
        {
            let numbers: Result<Vec<f64>, _> = text.split(',')
                .map(|part| part.trim().parse::<f64>())
                .collect();
            if let Ok(numbers) = numbers
            {
                return Answer::Numbers(numbers);
            }
        }
        else if let Ok(num) = text.parse::<f64>()
        {
            return Answer::Number(num);
        }
        Answer::Text(text.to_owned())
    }

    fn as_number(&self) -> Option<f64>
    {
        match self
        {
            Answer::Number(num) => Some(*num),
            Answer::Text(text) => text.trim().parse::<f64>().ok(),
            Answer::Numbers(_) => None,
        }
    }
}

impl From<f64> for Answer
{
    fn from(value: f64) -> Self
    {
        Answer::Number(value)
    }
}

impl From<Vec<f64>> for Answer
{
    fn from(value: Vec<f64>) -> Self
    {
        Answer::Numbers(value)
    }
}

impl From<&str> for Answer
{
    fn from(value: &str) -> Self
    {
        Answer::Text(value.to_owned())
    }
}

impl From<SolutionPair> for Answer
{
    fn from(value: SolutionPair) -> Self
    {
        Answer::Numbers(value.roots())
    }
}

impl fmt::Display for Answer
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result
    {
        match self
        {
            Answer::Number(num) => write!(f, "{num}"),
            Answer::Numbers(nums) => {
                let joined: Vec<String> = nums.iter().map(|n| n.to_string()).collect();
                write!(f, "{}", joined.join(", "))
            },
            Answer::Text(text) => write!(f, "{text}"),
        }
    }
}

fn sorted(values: &[f64]) -> Vec<f64>
{
    let mut values = values.to_vec();
    values.sort_by(|a, b| a.total_cmp(b));
    values
}

/// Compares a submitted answer with the reference answer.
///
/// Numbers match within `ANSWER_TOLERANCE`. Root lists match when they have
/// the same length and agree element-wise after sorting. Anything else falls
/// back to comparing the trimmed text of both answers.
///
/// # Example
/// ```
/// use algeqs::attempts::{answers_match, Answer};
///
/// assert!(answers_match(&Answer::Number(7.0000001), &Answer::Number(7.0)));
/// assert!(answers_match(&Answer::from("7"), &Answer::Number(7.0)));
/// assert!(answers_match(&Answer::Numbers(vec![2.0, 3.0]), &Answer::Numbers(vec![3.0, 2.0])));
/// assert!(!answers_match(&Answer::Number(4.5), &Answer::Number(4.0)));
/// ```
pub fn answers_match(submitted: &Answer, reference: &Answer) -> bool
{
    if let (Some(a), Some(b)) = (submitted.as_number(), reference.as_number())
    {
        return (a - b).abs() < ANSWER_TOLERANCE;
    }

    if let (Answer::Numbers(a), Answer::Numbers(b)) = (submitted, reference)
    {
        return a.len() == b.len()
            && sorted(a).iter()
                .zip(sorted(b).iter())
                .all(|(x, y)| (x - y).abs() < ANSWER_TOLERANCE);
    }

    submitted.to_string().trim() == reference.to_string().trim()
}

/// A single recorded attempt at a problem.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentAttempt
{
    pub student_id: String,
    pub problem: String,
    pub answer: Answer,
    pub correct_answer: Answer,
    pub is_correct: bool,
    pub timestamp: SystemTime,
    pub time_taken: Duration,
}

/// Aggregate figures for one student.
#[derive(Clone, Debug, PartialEq)]
pub struct StudentPerformance
{
    pub student_id: String,
    pub total_attempts: usize,
    pub correct_attempts: usize,
    pub accuracy: f64,
    pub average_time: Duration,
    pub latest_attempt: SystemTime,
}

/// Aggregate figures across every student in the log.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassPerformance
{
    pub total_students: usize,
    pub total_attempts: usize,
    pub overall_accuracy: f64,
    /// Mean of the per-student accuracies, so every student weighs the same.
    pub average_class_accuracy: f64,
    pub average_class_time: Duration,
    /// Sorted by student id.
    pub student_performances: Vec<StudentPerformance>,
}

/// Totals for a run of attempts, such as one practice session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSummary
{
    pub completed: usize,
    pub correct: usize,
    pub accuracy: f64,
    pub average_time: Duration,
}

fn average_time<'a>(attempts: impl Iterator<Item = &'a StudentAttempt>) -> (usize, Duration)
{
    let (count, total) = attempts.fold((0usize, Duration::ZERO), |(n, sum), a| (n + 1, sum.saturating_add(a.time_taken)));
    (count, mean_duration(total, count))
}

/// Divides a saturated total by a count of any size; zero for an empty count.
fn mean_duration(total: Duration, count: usize) -> Duration
{
    match u32::try_from(count)
    {
        Ok(0) => Duration::ZERO,
        Ok(n) => total / n,
        Err(_) => total.div_f64(count as f64),
    }
}

impl SessionSummary
{
    /// Summarises a slice of attempts. An empty slice yields all zeros.
    pub fn from_attempts(attempts: &[StudentAttempt]) -> SessionSummary
    {
        let correct = attempts.iter().filter(|a| a.is_correct).count();
        let (completed, average_time) = average_time(attempts.iter());
        let accuracy = if completed == 0 { 0.0 } else { correct as f64 / completed as f64 };

        SessionSummary { completed, correct, accuracy, average_time }
    }
}

/// Every attempt recorded so far, in the order they were made.
#[derive(Clone, Debug, Default)]
pub struct AttemptLog
{
    attempts: Vec<StudentAttempt>,
}

impl AttemptLog
{
    pub fn new() -> AttemptLog
    {
        AttemptLog { attempts: Vec::new() }
    }

    pub fn attempts(&self) -> &[StudentAttempt]
    {
        &self.attempts
    }

    /// Records an attempt, grading it against the reference answer.
    ///
    /// # Example
    /// ```
    /// use std::time::Duration;
    /// use algeqs::attempts::AttemptLog;
    ///
    /// let mut log = AttemptLog::new();
    /// let attempt = log.add_attempt("alice", "x + 5 = 12", 7.0, 7.0, Duration::from_secs(3));
    ///
    /// assert!(attempt.is_correct);
    /// ```
    pub fn add_attempt<A, R>(&mut self, student_id: &str, problem: &str, answer: A, correct_answer: R, time_taken: Duration) -> &StudentAttempt
    where A: Into<Answer>, R: Into<Answer>
    {
        let answer = answer.into();
        let correct_answer = correct_answer.into();
        let is_correct = answers_match(&answer, &correct_answer);

        self.attempts.push(StudentAttempt
        {
            student_id: student_id.to_owned(),
            problem: problem.to_owned(),
            answer,
            correct_answer,
            is_correct,
            timestamp: SystemTime::now(),
            time_taken,
        });

        &self.attempts[self.attempts.len() - 1]
    }

    pub fn student_performance(&self, student_id: &str) -> anyhow::Result<StudentPerformance>
    {
        let attempts: Vec<&StudentAttempt> = self.attempts.iter()
            .filter(|a| a.student_id == student_id)
            .collect();

        let latest = match attempts.last()
        {
            Some(a) => a.timestamp,
            None => return Err(AttemptLogError::NoAttemptsForStudent.into()),
        };

        let correct_attempts = attempts.iter().filter(|a| a.is_correct).count();
        let (total_attempts, average_time) = average_time(attempts.iter().copied());

        Ok(StudentPerformance
        {
            student_id: student_id.to_owned(),
            total_attempts,
            correct_attempts,
            accuracy: correct_attempts as f64 / total_attempts as f64,
            average_time,
            latest_attempt: latest,
        })
    }

    pub fn class_performance(&self) -> anyhow::Result<ClassPerformance>
    {
        if self.attempts.is_empty()
        {
            return Err(AttemptLogError::NoAttemptsRecorded.into());
        }

        let students: BTreeSet<&str> = self.attempts.iter()
            .map(|a| a.student_id.as_str())
            .collect();

        let student_performances = students.iter()
            .map(|id| self.student_performance(id))
            .collect::<anyhow::Result<Vec<StudentPerformance>>>()?;

        let n = student_performances.len();
        let total_time = student_performances.iter()
            .fold(Duration::ZERO, |sum, p| sum.saturating_add(p.average_time));
        let correct = self.attempts.iter().filter(|a| a.is_correct).count();

        Ok(ClassPerformance
        {
            total_students: student_performances.len(),
            total_attempts: self.attempts.len(),
            overall_accuracy: correct as f64 / self.attempts.len() as f64,
            average_class_accuracy: student_performances.iter().map(|p| p.accuracy).sum::<f64>() / n as f64,
            average_class_time: mean_duration(total_time, n),
            student_performances,
        })
    }
}

#[cfg(test)]
fn sample_log() -> AttemptLog
{
    let mut log = AttemptLog::new();
    log.add_attempt("alice", "x + 5 = 12", 7.0, 7.0, Duration::from_millis(2500));
    log.add_attempt("alice", "2x = 10", 5.0, 5.0, Duration::from_millis(3000));
    log.add_attempt("alice", "3x - 4 = 8", 4.5, 4.0, Duration::from_millis(2800));
    log.add_attempt("bob", "x + 5 = 12", 7.0, 7.0, Duration::from_millis(1800));
    log.add_attempt("bob", "2x = 10", 4.0, 5.0, Duration::from_millis(2200));
    log
}

#[test]
fn test_answers_match_falls_back_to_text()
{
    assert!(answers_match(&Answer::from(" no solution "), &Answer::from("no solution")));
    assert!(!answers_match(&Answer::from("no solution"), &Answer::Number(1.0)));
    assert!(!answers_match(&Answer::Numbers(vec![2.0]), &Answer::Numbers(vec![2.0, 3.0])));
}

#[test]
fn test_student_performance()
{
    let log = sample_log();
    let perf = log.student_performance("alice").unwrap();

    assert_eq!(perf.total_attempts, 3);
    assert_eq!(perf.correct_attempts, 2);
    assert!((perf.accuracy - 2.0 / 3.0).abs() < 1e-12);
    assert_eq!(perf.average_time, Duration::from_nanos(2_766_666_666));
    assert_eq!(perf.latest_attempt, log.attempts()[2].timestamp);
}

#[test]
fn test_missing_student()
{
    let err = sample_log().student_performance("carol").unwrap_err();
    assert_eq!(
        err.downcast_ref::<AttemptLogError>(),
        Some(&AttemptLogError::NoAttemptsForStudent)
    );
}

#[test]
fn test_class_performance()
{
    let perf = sample_log().class_performance().unwrap();

    assert_eq!(perf.total_students, 2);
    assert_eq!(perf.total_attempts, 5);
    assert!((perf.overall_accuracy - 0.6).abs() < 1e-12);
    assert!((perf.average_class_accuracy - (2.0 / 3.0 + 0.5) / 2.0).abs() < 1e-12);
    assert_eq!(perf.student_performances[0].student_id, "alice");
    assert_eq!(perf.student_performances[1].student_id, "bob");

    let err = AttemptLog::new().class_performance().unwrap_err();
    assert_eq!(
        err.downcast_ref::<AttemptLogError>(),
        Some(&AttemptLogError::NoAttemptsRecorded)
    );
}

#[test]
fn test_session_summary()
{
    let log = sample_log();
    let summary = SessionSummary::from_attempts(&log.attempts()[3..]);

    assert_eq!(summary.completed, 2);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.accuracy, 0.5);
    assert_eq!(summary.average_time, Duration::from_secs(2));

    let empty = SessionSummary::from_attempts(&[]);
    assert_eq!(empty.completed, 0);
    assert_eq!(empty.accuracy, 0.0);
}

#[test]
fn test_average_time_saturates()
{
    let mut log = AttemptLog::new();
    log.add_attempt("erin", "2x = 10", 5.0, 5.0, Duration::MAX);
    log.add_attempt("erin", "x + 5 = 12", 7.0, 7.0, Duration::MAX);

    let summary = SessionSummary::from_attempts(log.attempts());
    assert_eq!(summary.completed, 2);
    assert_eq!(summary.average_time, Duration::MAX / 2);

    let perf = log.class_performance().unwrap();
    assert_eq!(perf.average_class_time, Duration::MAX / 2);
}
