use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use groupscholar_grade_analyzer::analyzer::{DEFAULT_MAX_ATTEMPTS, DEFAULT_THRESHOLD};
use groupscholar_grade_analyzer::{loader, report, sample, GradeAnalyzer, ProcessingResult};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "grade-analyzer")]
#[command(about = "Class grade statistics and early intervention hints for Group Scholar", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze the built-in sample class
    Sample {
        #[command(flatten)]
        analysis: AnalysisArgs,
    },
    /// Analyze student records from a JSON or CSV file
    Analyze {
        #[arg(long)]
        input: PathBuf,
        #[command(flatten)]
        analysis: AnalysisArgs,
    },
    /// Generate a markdown report
    Report {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
        #[command(flatten)]
        analysis: AnalysisArgs,
    },
}

#[derive(Args)]
struct AnalysisArgs {
    /// Minimum student average that counts as passing (0-100)
    #[arg(long, env = "GRADE_THRESHOLD", default_value_t = DEFAULT_THRESHOLD)]
    threshold: f64,
    /// Valid grades a failing student may have before an intervention note
    #[arg(long, env = "GRADE_MAX_ATTEMPTS", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    max_attempts: usize,
}

impl AnalysisArgs {
    fn analyzer(&self) -> GradeAnalyzer {
        GradeAnalyzer::new(self.threshold, self.max_attempts)
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Sample { analysis } => {
            let result = analysis.analyzer().process(&sample::sample_students())?;
            print_result(&result);
        }
        Commands::Analyze { input, analysis } => {
            let students = load(&input)?;
            let result = analysis.analyzer().process(&students)?;
            print_result(&result);
        }
        Commands::Report {
            input,
            out,
            analysis,
        } => {
            let students = load(&input)?;
            let result = analysis.analyzer().process(&students)?;
            let report = report::build_report(
                &input.display().to_string(),
                analysis.threshold,
                &result,
                chrono::Utc::now(),
            );
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            info!(path = %out.display(), "Report written");
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}

fn load(input: &Path) -> anyhow::Result<Vec<serde_json::Value>> {
    let students = loader::load_records(input)?;
    info!(path = %input.display(), records = students.len(), "Loaded student records");
    Ok(students)
}

fn print_result(result: &ProcessingResult) {
    println!("Processing Results:");
    println!("Total Students: {}", result.total_students);
    println!("Passing Students: {}", result.passing_students);
    println!("Failing Students: {}", result.failing_students);
    println!("Average Grade: {:.2}", result.average_grade);

    println!("Grade Distribution:");
    for (label, count) in report::sorted_distribution(result) {
        println!("- {}: {}", label, count);
    }

    println!("Recommendations:");
    if result.recommendations.is_empty() {
        println!("- none");
    }
    for recommendation in &result.recommendations {
        println!("- {}", recommendation);
    }

    println!("Problem Students:");
    if result.problem_students.is_empty() {
        println!("- none");
    }
    for problem in &result.problem_students {
        println!("- {} ({})", problem.name, problem.issue);
    }
}
