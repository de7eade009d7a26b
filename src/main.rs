use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{info, warn};
use u_tasking::config::TaskingConfig;
use u_tasking::demo::demo_snapshot;
use u_tasking::error::AppError;
use u_tasking::models::ScheduleResult;
use u_tasking::payload::Snapshot;
use u_tasking::roster::SharedRoster;
use u_tasking::telemetry;
use u_tasking::TaskingEngine;

#[derive(Parser, Debug)]
#[command(
    name = "u-tasking",
    about = "Allocate field responders to task orders",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the built-in field scenario and print a summary (default command)
    Demo,
    /// Schedule a JSON snapshot and print the result as JSON
    Schedule {
        /// Snapshot file with `tasks` and `responders`
        input: PathBuf,
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
        /// Apply the assignments to an in-memory roster and print its state
        #[arg(long)]
        commit: bool,
    },
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = TaskingConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let engine = TaskingEngine::with_config(config.engine);

    match cli.command.unwrap_or(Command::Demo) {
        Command::Demo => {
            let result = demo_snapshot().schedule(&engine)?;
            print_summary(&result);
        }
        Command::Schedule {
            input,
            pretty,
            commit,
        } => {
            let snapshot = Snapshot::from_path(&input)?;
            info!(
                path = %input.display(),
                tasks = snapshot.tasks.len(),
                responders = snapshot.responders.len(),
                "snapshot loaded"
            );
            let result = snapshot.schedule(&engine)?;
            if !result.escalated.is_empty() {
                warn!(escalated = ?result.escalated, "tasks need supervisory action");
            }

            let output = if commit {
                // `schedule` already rejected duplicate unit IDs.
                let roster = SharedRoster::new(snapshot.responders);
                roster.commit(&result)?;
                serde_json::json!({ "result": result, "roster": roster.snapshot() })
            } else {
                serde_json::to_value(&result)?
            };

            let text = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{text}");
        }
    }

    Ok(())
}

fn print_summary(result: &ScheduleResult) {
    println!("Field Tasking Engine Demo");
    println!("=========================");
    println!("Assignments:");
    for a in &result.assignments {
        println!(
            "  - Task {} -> Unit {} (score {:.1})",
            a.task_id, a.unit_id, a.score
        );
    }

    if !result.deferred.is_empty() {
        println!("Deferred tasks:");
        for task_id in &result.deferred {
            println!("  - {task_id}");
        }
    }

    if !result.escalated.is_empty() {
        println!("Escalated tasks:");
        for task_id in &result.escalated {
            println!("  - {task_id}");
        }
    }

    let audit = &result.audit;
    println!();
    println!("Audit ({}):", audit.generated_at.to_rfc3339());
    println!("  tasks processed:  {}", audit.tasks_processed);
    println!("  units considered: {}", audit.units_considered);
    println!("  assignments made: {}", audit.assignments_made);
    println!("  deferred tasks:   {}", audit.deferred_tasks);
    println!("  escalated tasks:  {}", audit.escalated_tasks);
}
