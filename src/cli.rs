use std::path::PathBuf;

use clap::{Parser, Subcommand};
use robotaxi_investment::IrrSolver;

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
pub struct Args {
    /// Assumptions file: `parameter,value` CSV or JSON. Defaults to
    /// `data/assumptions.csv` when that file exists.
    #[clap(long, short = 'a', global = true)]
    pub assumptions: Option<PathBuf>,

    /// Override one assumption, for example `--set fare_per_mile=9.5`.
    #[clap(long = "set", value_name = "NAME=VALUE", value_parser = parse_override, global = true)]
    pub overrides: Vec<(String, f64)>,

    /// IRR root finder.
    #[clap(long, default_value = "fixed-step", global = true)]
    pub solver: IrrSolver,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Project the vehicle and its competitor and print the tables.
    Project {
        /// Also write the yearly records to this CSV file.
        #[clap(long)]
        csv: Option<PathBuf>,

        /// Print the evaluation as JSON instead of tables.
        #[clap(long)]
        json: bool,
    },

    /// Evaluate the assumptions once per value of one parameter.
    Sweep {
        #[clap(long)]
        parameter: String,

        #[clap(long, value_delimiter = ',', num_args = 1.., required = true)]
        values: Vec<f64>,
    },

    /// Apply edits one after another and snapshot the valuation after each.
    Compare {
        #[clap(long = "step", value_name = "NAME=VALUE", value_parser = parse_override, required = true)]
        steps: Vec<(String, f64)>,
    },

    /// Print the default assumptions as JSON.
    Defaults,
}

fn parse_override(raw: &str) -> Result<(String, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got `{raw}`"))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number", value.trim()))?;
    Ok((name.trim().to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_override() {
        assert_eq!(parse_override("fare_per_mile=9.5"), Ok(("fare_per_mile".to_string(), 9.5)));
        assert_eq!(parse_override(" years = 10 "), Ok(("years".to_string(), 10.0)));
        assert!(parse_override("fare_per_mile").is_err());
        assert!(parse_override("fare_per_mile=cheap").is_err());
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from([
            "robotaxi",
            "sweep",
            "--parameter",
            "fare_per_mile",
            "--values",
            "6,8,10",
            "--set",
            "years=3",
            "--solver",
            "newton",
        ])
        .unwrap();

        assert_eq!(args.overrides, vec![("years".to_string(), 3.0)]);
        assert_eq!(args.solver, IrrSolver::Newton);
        match args.command {
            Command::Sweep { parameter, values } => {
                assert_eq!(parameter, "fare_per_mile");
                assert_eq!(values, vec![6.0, 8.0, 10.0]);
            }
            _ => panic!("expected sweep"),
        }
    }
}
