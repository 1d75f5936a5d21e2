//! Robotaxi Investment CLI
//!
//! Command-line front end for running projections, sweeps, and snapshot
//! comparisons

mod cli;

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use log::info;

use robotaxi_investment::assumptions::{load_assumptions, Assumptions, DEFAULT_ASSUMPTIONS_PATH};
use robotaxi_investment::report;
use robotaxi_investment::{ScenarioRunner, Session};

use cli::{Args, Command};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let assumptions = resolve_assumptions(&args)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Project { csv, json } => {
            let evaluation = ScenarioRunner::new(assumptions).with_solver(args.solver).run()?;

            if json {
                report::write_json(&mut out, &evaluation)?;
                writeln!(out)?;
            } else {
                report::write_evaluation(&mut out, &evaluation)?;
            }

            if let Some(path) = csv {
                let file = File::create(&path)
                    .with_context(|| format!("unable to create {}", path.display()))?;
                report::write_csv(file, &evaluation)?;
                info!("yearly records written to {}", path.display());
            }
        }
        Command::Sweep { parameter, values } => {
            let runner = ScenarioRunner::new(assumptions).with_solver(args.solver);
            let points = runner.sweep(&parameter, &values)?;
            report::write_sweep(&mut out, &parameter, &points)?;
        }
        Command::Compare { steps } => {
            let mut session = Session::new(assumptions, args.solver)?;
            session.capture(Some("baseline".to_string()));

            for (name, value) in steps {
                session
                    .set(&name, value)
                    .with_context(|| format!("step {}={} failed", name, value))?;
                session.capture(Some(format!("{}={}", name, value)));
            }

            report::write_snapshots(&mut out, session.snapshots().iter())?;
        }
        Command::Defaults => {
            serde_json::to_writer_pretty(&mut out, &Assumptions::default_robotaxi())?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// `--assumptions`, else `data/assumptions.csv` if present, else built-in
/// defaults; then `--set` overrides in order
fn resolve_assumptions(args: &Args) -> anyhow::Result<Assumptions> {
    let default_path = Path::new(DEFAULT_ASSUMPTIONS_PATH);
    let path = match &args.assumptions {
        Some(path) => Some(path.as_path()),
        None if default_path.is_file() => Some(default_path),
        None => None,
    };

    let mut assumptions = match path {
        Some(path) => {
            info!("loading assumptions from {}", path.display());
            load_assumptions(path)
                .with_context(|| format!("failed to load assumptions from {}", path.display()))?
        }
        None => Assumptions::default_robotaxi(),
    };

    for (name, value) in &args.overrides {
        assumptions
            .set(name, *value)
            .with_context(|| format!("invalid override {}={}", name, value))?;
    }

    Ok(assumptions)
}
