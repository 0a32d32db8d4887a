use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, Subcommand};
use neighborly::{
    auth::Identity,
    authz::{Action, AuthzEngine, RecordScope, ResourceKind},
    config::NeighborlyConfig,
    observability::init_tracing,
};

#[derive(Parser, Debug)]
#[command(version, about = "Neighborly authorization tool", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Path to config file (standard policy if omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the effective permission matrix
    Matrix,
    /// Evaluate one authorization decision and print it as JSON
    Check {
        /// Verified token claims as a JSON object
        #[arg(long)]
        claims: String,
        /// Resource kind (e.g. news, event, contact)
        #[arg(long)]
        kind: ResourceKind,
        /// Action (create, read, update, delete, or an HTTP method)
        #[arg(long)]
        action: Action,
        /// Target record scope, e.g. '{"neighborhood_id": 2, "owner_id": 5}'
        #[arg(long)]
        record: Option<String>,
        /// Print how the decision was reached
        #[arg(long)]
        explain: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<NeighborlyConfig, String> {
    match path {
        Some(path) => NeighborlyConfig::from_file(path).map_err(|e| e.to_string()),
        None => Ok(NeighborlyConfig::default()),
    }
}

fn run_check(
    engine: &AuthzEngine,
    config: &NeighborlyConfig,
    claims: &str,
    kind: ResourceKind,
    action: Action,
    record: Option<&str>,
    explain: bool,
) -> Result<bool, String> {
    let claims: serde_json::Value =
        serde_json::from_str(claims).map_err(|e| format!("Invalid --claims JSON: {e}"))?;
    let identity = Identity::from_claims(&claims, &config.auth).map_err(|e| e.to_string())?;
    let record: Option<RecordScope> = record
        .map(serde_json::from_str)
        .transpose()
        .map_err(|e| format!("Invalid --record JSON: {e}"))?;
    let target = record.as_ref().map(|r| r as &dyn neighborly::authz::ScopedRecord);

    let (allowed, output) = if explain {
        let trace = engine
            .explain(&identity, kind, action, target)
            .map_err(|e| e.to_string())?;
        (
            trace.decision.is_allowed(),
            serde_json::to_string_pretty(&trace),
        )
    } else {
        let decision = engine
            .try_authorize(&identity, kind, action, target)
            .map_err(|e| e.to_string())?;
        (decision.is_allowed(), serde_json::to_string_pretty(&decision))
    };
    println!("{}", output.map_err(|e| e.to_string())?);
    Ok(allowed)
}

fn main() -> ExitCode {
    let args = Args::parse();

    let config = match load_config(args.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::from(2);
        }
    };

    if let Err(e) = init_tracing(&config.observability) {
        eprintln!("Warning: {e}");
    }

    let engine = AuthzEngine::new(&config.auth);

    match args.command {
        Command::Matrix => {
            print!("{}", engine.matrix());
            ExitCode::SUCCESS
        }
        Command::Check {
            claims,
            kind,
            action,
            record,
            explain,
        } => match run_check(
            &engine,
            &config,
            &claims,
            kind,
            action,
            record.as_deref(),
            explain,
        ) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::from(1),
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::from(2)
            }
        },
    }
}
