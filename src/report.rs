use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::models::ProcessingResult;

/// Distribution buckets ordered from the highest decade down.
pub fn sorted_distribution(result: &ProcessingResult) -> Vec<(&str, usize)> {
    let mut buckets: Vec<(&str, usize)> = result
        .grade_distribution
        .iter()
        .map(|(label, count)| (label.as_str(), *count))
        .collect();

    buckets.sort_by_key(|(label, _)| std::cmp::Reverse(bucket_floor(label)));
    buckets
}

fn bucket_floor(label: &str) -> u32 {
    label
        .split('-')
        .next()
        .and_then(|low| low.parse().ok())
        .unwrap_or(0)
}

pub fn build_report(
    source: &str,
    threshold: f64,
    result: &ProcessingResult,
    generated_at: DateTime<Utc>,
) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Grade Analysis Report");
    let _ = writeln!(
        output,
        "Generated for {} at {} (passing threshold {})",
        source,
        generated_at.format("%Y-%m-%d %H:%M UTC"),
        threshold
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Summary");
    let _ = writeln!(output, "- Students analyzed: {}", result.total_students);
    let _ = writeln!(output, "- Passing: {}", result.passing_students);
    let _ = writeln!(output, "- Failing: {}", result.failing_students);
    let _ = writeln!(output, "- Class average: {:.2}", result.average_grade);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Grade Distribution");

    let buckets = sorted_distribution(result);
    if buckets.is_empty() {
        let _ = writeln!(output, "No graded students.");
    } else {
        for (label, count) in buckets {
            let _ = writeln!(output, "- {}: {} students", label, count);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Recommendations");

    if result.recommendations.is_empty() {
        let _ = writeln!(output, "No recommendations.");
    } else {
        for recommendation in &result.recommendations {
            let _ = writeln!(output, "- {}", recommendation);
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Problem Students");

    if result.problem_students.is_empty() {
        let _ = writeln!(output, "No problem records.");
    } else {
        for problem in &result.problem_students {
            let _ = writeln!(output, "- {}: {}", problem.name, problem.issue);
        }
    }

    output
}
