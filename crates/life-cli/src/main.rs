//! Multi-species Game of Life: reads a world file, evolves it and writes the final world.

mod runner;
mod telemetry;

use clap::{Args, Parser, Subcommand};
use life_core::{OutputConfig, RunConfig};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "life", version, about = "Multi-species Game of Life simulator")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Use input file [-i] and produce output file [-o]
    #[command(visible_alias = "game:run")]
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Input file
    #[arg(short, long, default_value = "input.xml")]
    input: PathBuf,
    /// Output file
    #[arg(short, long, default_value = "output.xml")]
    output: PathBuf,
    /// Seed for random tie-breaks (OS entropy when omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Directory containing the output template
    #[arg(long)]
    templates: Option<PathBuf>,
}

impl From<RunArgs> for RunConfig {
    fn from(args: RunArgs) -> Self {
        let mut output_config = OutputConfig::from_env();
        if let Some(templates) = args.templates {
            output_config.templates_path = templates;
        }

        RunConfig {
            input: args.input,
            output: args.output,
            seed: args.seed,
            output_config,
        }
    }
}

fn main() -> ExitCode {
    telemetry::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Run(args) => {
            let config = RunConfig::from(args);
            match runner::run(&config) {
                Ok(()) => {
                    println!("File {} was saved.", config.output.display());
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("Error: {:#}", e);
                    ExitCode::FAILURE
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["life", "run"]).unwrap();
        let Command::Run(args) = cli.command;
        assert_eq!(args.input, PathBuf::from("input.xml"));
        assert_eq!(args.output, PathBuf::from("output.xml"));
        assert_eq!(args.seed, None);
    }

    #[test]
    fn test_alias_and_short_flags() {
        let cli = Cli::try_parse_from(["life", "game:run", "-i", "in.xml", "-o", "out.xml", "--seed", "3"])
            .unwrap();
        let Command::Run(args) = cli.command;
        let config = RunConfig::from(args);
        assert_eq!(config.input, PathBuf::from("in.xml"));
        assert_eq!(config.output, PathBuf::from("out.xml"));
        assert_eq!(config.seed, Some(3));
    }

    #[test]
    fn test_templates_override() {
        let cli = Cli::try_parse_from(["life", "run", "--templates", "/tmp/tpl"]).unwrap();
        let Command::Run(args) = cli.command;
        let config = RunConfig::from(args);
        assert_eq!(config.output_config.templates_path, PathBuf::from("/tmp/tpl"));
    }
}
