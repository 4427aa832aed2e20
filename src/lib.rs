pub mod analyzer;
pub mod error;
pub mod loader;
pub mod models;
pub mod report;
pub mod sample;

pub use analyzer::{process_student_grades, GradeAnalyzer};
pub use error::AnalyzerError;
pub use models::{ProblemStudent, ProcessingResult, StudentRecord};
