//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};
use internship_core::AssignmentVariant;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "internship",
    version,
    about = "Assign internship mentors and evaluators to students"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// SQLite database file (created and migrated when missing).
    #[arg(long = "db", value_name = "PATH", global = true, default_value = "internship.sqlite3")]
    pub db: PathBuf,

    /// Absolute directory for rolling log files. Logging is off when unset.
    #[arg(long = "log-dir", value_name = "DIR", global = true)]
    pub log_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load students and faculty from a JSON directory export.
    Seed {
        /// JSON file with `students` and `faculty` arrays.
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Assign every unassigned student across all departments.
    Assign {
        #[arg(value_enum)]
        variant: VariantArg,
    },

    /// Assign the students of one department (coordinator scope).
    AssignDepartment {
        #[arg(value_enum)]
        variant: VariantArg,

        /// Department name; omit for students without a department.
        #[arg(long = "department")]
        department: Option<String>,
    },

    /// Delete every assignment of one variant.
    Reset {
        #[arg(value_enum)]
        variant: VariantArg,
    },

    /// Show unassigned counts and per-faculty load.
    Status {
        /// Limit to one variant; both when omitted.
        #[arg(value_enum)]
        variant: Option<VariantArg>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum VariantArg {
    Mentor,
    Evaluator,
}

impl From<VariantArg> for AssignmentVariant {
    fn from(value: VariantArg) -> Self {
        match value {
            VariantArg::Mentor => AssignmentVariant::Mentor,
            VariantArg::Evaluator => AssignmentVariant::Evaluator,
        }
    }
}
