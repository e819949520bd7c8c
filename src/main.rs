//! stepcheck - remote step validation runner
//!
//! Command-line entry point: exactly three positional arguments name the
//! validator file, the target instance, and the executing user. The process
//! exits 1 on an argument or fatal error and 0 after a completed run,
//! however many checks failed.

use std::env;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info};

use stepcheck::remote::LocalProcessExec;
use stepcheck::report::{self, ReportMeta};
use stepcheck::{ValidationRunner, DESCRIPTION, NAME, VERSION};

/// Parsed command-line arguments
#[derive(Debug)]
struct CliArgs {
    /// Validator file path
    validator_file: PathBuf,
    /// Remote target identifier
    instance_id: String,
    /// User the commands run as
    user: String,
}

impl CliArgs {
    /// Parse the positional arguments, rejecting any other shape
    fn parse(args: &[String]) -> Result<Self, String> {
        if let [file, instance, user] = args {
            Ok(CliArgs {
                validator_file: PathBuf::from(file),
                instance_id: instance.clone(),
                user: user.clone(),
            })
        } else {
            Err(format!("expected 3 arguments, got {}", args.len()))
        }
    }
}

/// Print usage information
fn print_usage() {
    println!("Usage: {} <validator_file> <instance_id> <user>", NAME);
}

/// Print help information
fn print_help() {
    println!("{} - {}", NAME, DESCRIPTION);
    println!();
    print_usage();
    println!();
    println!("ARGUMENTS:");
    println!("    <validator_file>   Declarative validator file (.yml, .json or .toml)");
    println!("    <instance_id>      Remote target the commands execute on");
    println!("    <user>             Local user the commands run as");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG           Set logging level (error, warn, info, debug, trace)");
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("--help") | Some("-h") => {
            print_help();
            return;
        }
        Some("--version") | Some("-V") => {
            println!("{} v{}", NAME, VERSION);
            return;
        }
        _ => {}
    }

    let args = match CliArgs::parse(&args) {
        Ok(args) => args,
        Err(_) => {
            print_usage();
            process::exit(1);
        }
    };

    let env_filter = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from(env_filter))
        .with_target(false)
        .compact()
        .init();

    debug!(
        "Validating {} on {} as {}",
        args.validator_file.display(),
        args.instance_id,
        args.user
    );

    let runner = ValidationRunner::new(Arc::new(LocalProcessExec::new()));
    let meta = ReportMeta::begin(&args.instance_id, &args.user);
    let started = Instant::now();

    let results = match runner
        .run_file(&args.validator_file, &args.instance_id, &args.user)
        .await
    {
        Ok(results) => results,
        Err(e) => {
            error!("Validation aborted: {}", e);
            eprintln!("{}: {}", NAME, e);
            process::exit(1);
        }
    };

    print!("{}", report::render_report(&meta, &results, started.elapsed()));
    info!("Validation run complete");
}
