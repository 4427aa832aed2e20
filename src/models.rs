use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

pub const NO_VALID_GRADES: &str = "No valid grades found";

/// One raw input element after shape validation.
#[derive(Debug, Clone, PartialEq)]
pub enum StudentRecord {
    /// A named student with at least one grade in `[0, 100]`.
    Valid { name: String, grades: Vec<f64> },
    /// `name` and `grades` are present, but no usable grade survived filtering.
    InvalidGrades { name: String },
    /// Not a mapping, or missing `name` / `grades`. Dropped without a diagnostic.
    MalformedShape,
}

impl StudentRecord {
    pub fn parse(value: &Value) -> Self {
        let Some(fields) = value.as_object() else {
            return StudentRecord::MalformedShape;
        };
        let (Some(name), Some(grades)) = (fields.get("name"), fields.get("grades")) else {
            return StudentRecord::MalformedShape;
        };
        let name = display_name(name);

        let Some(raw) = grades.as_array() else {
            return StudentRecord::InvalidGrades { name };
        };

        let grades: Vec<f64> = raw.iter().filter_map(valid_grade).collect();
        if grades.is_empty() {
            StudentRecord::InvalidGrades { name }
        } else {
            StudentRecord::Valid { name, grades }
        }
    }
}

fn display_name(value: &Value) -> String {
    match value {
        Value::String(name) => name.clone(),
        other => other.to_string(),
    }
}

fn valid_grade(value: &Value) -> Option<f64> {
    value
        .as_f64()
        .filter(|grade| (0.0..=100.0).contains(grade))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProblemStudent {
    pub name: String,
    pub issue: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProcessingResult {
    pub total_students: usize,
    pub passing_students: usize,
    pub failing_students: usize,
    pub average_grade: f64,
    pub grade_distribution: BTreeMap<String, usize>,
    pub recommendations: Vec<String>,
    pub problem_students: Vec<ProblemStudent>,
}
