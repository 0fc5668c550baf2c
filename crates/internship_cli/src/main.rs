//! Operator CLI for mentor/evaluator assignment.
//!
//! # Responsibility
//! - Open (and migrate) the portal database named by `--db`.
//! - Dispatch one subcommand and print its JSON result.
//! - Exit non-zero on store failures or unsuccessful outcomes.

mod cli;
mod commands;

use clap::Parser;
use internship_core::db::open_db;
use internship_core::{default_log_level, init_logging};
use log::{error, info};
use serde_json::Value;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("error: failed to initialize logging: {err}");
            std::process::exit(2);
        }
    }

    let exit_code = match run(&cli) {
        Ok(value) => {
            let succeeded = value
                .get("success")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{text}"),
                Err(err) => eprintln!("error: failed to render result: {err}"),
            }
            if succeeded {
                0
            } else {
                1
            }
        }
        Err(err) => {
            error!("event=cli_command module=cli status=error error={err:#}");
            eprintln!("error: {err:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<Value> {
    let conn = open_db(&cli.db)?;
    info!(
        "event=cli_command module=cli status=start db={}",
        cli.db.display()
    );

    match &cli.command {
        Command::Seed { file } => commands::run_seed(&conn, file),
        Command::Assign { variant } => commands::run_assign(&conn, (*variant).into()),
        Command::AssignDepartment {
            variant,
            department,
        } => commands::run_assign_department(&conn, (*variant).into(), department.as_deref()),
        Command::Reset { variant } => commands::run_reset(&conn, (*variant).into()),
        Command::Status { variant } => commands::run_status(&conn, variant.map(Into::into)),
    }
}
