use anyhow::{ensure, Context};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{AnalyzerError, Result};
use crate::models::{ProblemStudent, ProcessingResult, StudentRecord, NO_VALID_GRADES};

pub const DEFAULT_THRESHOLD: f64 = 70.0;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Validates raw student records and aggregates class-wide grade statistics.
///
/// Each call to [`GradeAnalyzer::process`] owns its accumulators, so one analyzer
/// can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeAnalyzer {
    /// Minimum student average that counts as passing.
    pub threshold: f64,
    /// Failing students with more valid grades than this get an intervention note.
    pub max_attempts: usize,
}

impl Default for GradeAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD, DEFAULT_MAX_ATTEMPTS)
    }
}

impl GradeAnalyzer {
    pub fn new(threshold: f64, max_attempts: usize) -> Self {
        Self {
            threshold,
            max_attempts,
        }
    }

    /// Runs one pass over `students`, preserving input order in every list of the
    /// result.
    ///
    /// Fails with [`AnalyzerError::InvalidArgument`] for an empty slice or a
    /// threshold outside `[0, 100]`; anything going wrong inside the pass comes
    /// back as [`AnalyzerError::ProcessingFailure`].
    pub fn process(&self, students: &[Value]) -> Result<ProcessingResult> {
        if students.is_empty() {
            return Err(AnalyzerError::InvalidArgument(
                "student data cannot be empty".to_string(),
            ));
        }

        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(AnalyzerError::InvalidArgument(format!(
                "grade threshold must be between 0 and 100, got {}",
                self.threshold
            )));
        }

        let result = self
            .aggregate(students)
            .map_err(AnalyzerError::ProcessingFailure)?;

        info!(
            total = result.total_students,
            passing = result.passing_students,
            failing = result.failing_students,
            problems = result.problem_students.len(),
            average = result.average_grade,
            "Grade analysis complete"
        );

        Ok(result)
    }

    fn aggregate(&self, students: &[Value]) -> anyhow::Result<ProcessingResult> {
        let mut result = ProcessingResult::default();
        let mut average_sum = 0.0;
        let mut valid_students = 0usize;

        for (index, student) in students.iter().enumerate() {
            let (name, grades) = match StudentRecord::parse(student) {
                StudentRecord::Valid { name, grades } => (name, grades),
                StudentRecord::InvalidGrades { name } => {
                    warn!(index, student = %name, issue = NO_VALID_GRADES, "Problem student");
                    result.problem_students.push(ProblemStudent {
                        name,
                        issue: NO_VALID_GRADES.to_string(),
                    });
                    continue;
                }
                StudentRecord::MalformedShape => {
                    debug!(index, "Skipping malformed student record");
                    continue;
                }
            };

            let average = mean(&grades);
            let bucket = bucket_label(average)
                .with_context(|| format!("student {name} at index {index}"))?;

            average_sum += average;
            valid_students += 1;
            *result.grade_distribution.entry(bucket.clone()).or_insert(0) += 1;

            let passing = average >= self.threshold;
            debug!(
                index,
                student = %name,
                average,
                bucket = %bucket,
                attempts = grades.len(),
                passing,
                "Student evaluated"
            );

            if passing {
                result.passing_students += 1;
                continue;
            }

            result.failing_students += 1;
            if grades.len() > self.max_attempts {
                result.recommendations.push(format!(
                    "Student {} has {} attempts. Consider academic intervention.",
                    name,
                    grades.len()
                ));
            }
        }

        result.total_students = valid_students;
        result.average_grade = if valid_students > 0 {
            round_to_cents(average_sum / valid_students as f64)?
        } else {
            0.0
        };

        // Ties and problem students never count toward the majority.
        if result.failing_students > result.passing_students {
            result.recommendations.push(
                "More than 50% of students are failing. Consider curriculum review.".to_string(),
            );
        }

        if result.average_grade < self.threshold {
            // Debug keeps the trailing `.0` on whole averages.
            result.recommendations.push(format!(
                "Class average ({:?}) is below threshold ({}). Consider additional support.",
                result.average_grade, self.threshold
            ));
        }

        Ok(result)
    }
}

/// Shorthand for `GradeAnalyzer::new(threshold, max_attempts).process(students)`.
pub fn process_student_grades(
    students: &[Value],
    threshold: f64,
    max_attempts: usize,
) -> Result<ProcessingResult> {
    GradeAnalyzer::new(threshold, max_attempts).process(students)
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Decade bucket for a student average, e.g. `"80-89"`.
///
/// A perfect 100 lands in `"100-109"`.
pub fn bucket_label(average: f64) -> anyhow::Result<String> {
    ensure!(
        average.is_finite() && (0.0..=100.0).contains(&average),
        "student average {average} is outside the grade scale"
    );
    let low = (average / 10.0).floor() as u32 * 10;
    Ok(format!("{}-{}", low, low + 9))
}

/// Rounds the exact binary value to two decimals, ties to even.
fn round_to_cents(value: f64) -> anyhow::Result<f64> {
    format!("{value:.2}")
        .parse()
        .with_context(|| format!("class average {value} cannot be rounded"))
}
