//! vmgate demo CLI
//!
//! Runs one or all of the admission scenarios. Each scenario uses real
//! vmgate components (grant table, checker list, pipeline) against
//! hand-built machine snapshots.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- full-admin
//!   cargo run -p demo -- legacy-user
//!   cargo run -p demo -- cdrom-swap
//!   cargo run -p demo -- unauthorized-compute

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod scenarios;

// ── CLI definition ────────────────────────────────────────────────────────────

/// vmgate — granular update authorization for virtual machine resources.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "vmgate admission engine demo",
    long_about = "Runs vmgate admission scenarios showing the full-admin bypass,\n\
                  the opt-in restriction model, and hierarchical grant handling."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run all four scenarios in sequence.
    RunAll,
    /// Scenario 1: a cluster admin bypasses every granular check.
    FullAdmin,
    /// Scenario 2: a user with no grants keeps legacy behavior.
    LegacyUser,
    /// Scenario 3: media swap allowed, drive attach denied.
    CdromSwap,
    /// Scenario 4: storage grant does not cover a CPU change.
    UnauthorizedCompute,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging. Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    print_banner();

    let result = match cli.command {
        Command::RunAll => run_all(),
        Command::FullAdmin => scenarios::full_admin(),
        Command::LegacyUser => scenarios::legacy_user(),
        Command::CdromSwap => scenarios::cdrom_swap(),
        Command::UnauthorizedCompute => scenarios::unauthorized_compute(),
    };

    match result {
        Ok(()) => {
            println!("All selected scenarios completed.");
        }
        Err(e) => {
            eprintln!("Demo error: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_all() -> vmgate_contracts::error::GateResult<()> {
    scenarios::full_admin()?;
    scenarios::legacy_user()?;
    scenarios::cdrom_swap()?;
    scenarios::unauthorized_compute()?;
    Ok(())
}

// ── Banner ────────────────────────────────────────────────────────────────────

fn print_banner() {
    println!();
    println!("vmgate — granular VM update authorization");
    println!("=========================================");
    println!();
    println!("Evaluation per update request:");
    println!("  [1] full-admin grant → allow unconditionally");
    println!("  [2] no granular grant → allow (legacy authorization applies)");
    println!("  [3] checkers neutralize each authorized field category in order");
    println!("  [4] system metadata normalized on both working copies");
    println!("  [5] any residual diff denies (metadata before spec)");
    println!();
}
