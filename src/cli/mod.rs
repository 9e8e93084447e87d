//! CLI command definitions and handlers

mod init;
mod result;
mod run;
mod signals;
mod sweep;

use anyhow::Result;
use celloapi::config::{self, CelloConfig, QuerySection};
use celloapi::query::CUSTOM_SENSORS_FILE;
use celloapi::ScanDirection;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

/// celloapi - drive the Cello genetic-circuit compiler
#[derive(Parser, Debug)]
#[command(name = "celloapi")]
#[command(
    version,
    about = "Run the Cello v2 genetic-circuit compiler and score what it produces",
    after_help = "\
Examples:
  celloapi init                                   Write an example cello.toml
  celloapi signals                                List input signals of the configured chassis
  celloapi run --signals LacI,TetR                Select two inputs and compile
  celloapi result ./output                        Print scores for a finished run
  celloapi result ./output --format json          JSON output for scripting
  celloapi sweep --chassis Eco1C1G1T1 --chassis Eco2C1G3T1
                                                  Try every signal pair on two chassis"
)]
pub struct Cli {
    /// Config file (default: ./cello.toml, then ./.cellorc.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Query settings that override the config file
#[derive(Args, Debug, Default, Clone)]
pub struct QueryArgs {
    /// Directory holding every input file
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Directory the compiler writes results to
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Verilog file (relative to the input directory)
    #[arg(long)]
    pub verilog: Option<String>,

    /// Compiler options CSV
    #[arg(long)]
    pub options: Option<String>,

    /// User constraint file (chassis)
    #[arg(long)]
    pub ucf: Option<String>,

    /// Input sensor file
    #[arg(long)]
    pub sensors: Option<String>,

    /// Output device file
    #[arg(long)]
    pub output_device: Option<String>,

    /// Stream the compiler's output to the terminal
    #[arg(long)]
    pub logging: bool,

    /// Container image to run
    #[arg(long)]
    pub image: Option<String>,
}

impl QueryArgs {
    fn into_section(self) -> QuerySection {
        QuerySection {
            input_directory: self.input_dir,
            output_directory: self.output_dir,
            verilog_file: self.verilog,
            compiler_options: self.options,
            input_ucf: self.ucf,
            input_sensors: self.sensors,
            output_device: self.output_device,
            logging: self.logging,
            image: self.image,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write an example cello.toml to the current directory
    Init {
        /// Overwrite an existing cello.toml
        #[arg(long)]
        force: bool,
    },

    /// Compile the configured circuit once (archives earlier results first)
    Run {
        #[command(flatten)]
        query: QueryArgs,

        /// Restrict the sensor file to these input signals before running
        #[arg(long, value_delimiter = ',')]
        signals: Vec<String>,
    },

    /// Load a finished output directory and print its scores
    Result {
        /// Output directory of a completed run
        dir: PathBuf,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Which score line in the log to use when there are several: first, last
        #[arg(long)]
        score_line: Option<ScanDirection>,
    },

    /// List the input signals in the configured sensor file
    Signals {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Write a sensor file restricted to the given input signals
    SelectSignals {
        /// Signals to keep
        #[arg(required = true)]
        signals: Vec<String>,

        /// Name of the pruned file (written to the input directory)
        #[arg(long, default_value = CUSTOM_SENSORS_FILE)]
        output_file: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Compile every signal combination on every chassis and report the best
    Sweep {
        #[command(flatten)]
        query: QueryArgs,

        /// Chassis to try (repeatable; default from [sweep] in the config)
        #[arg(long)]
        chassis: Vec<String>,

        /// Input signals per circuit
        #[arg(long)]
        signals_per_circuit: Option<usize>,
    },
}

/// Config file values with command-line query overrides applied
fn load_merged(config_path: Option<&Path>, query: QueryArgs) -> Result<CelloConfig> {
    let cwd = std::env::current_dir()?;
    let mut config = config::load_config(config_path, &cwd)?;
    config.query.merge(query.into_section());
    Ok(config)
}

pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Init { force } => init::run(&std::env::current_dir()?, force),
        Commands::Run { query, signals } => {
            let config = load_merged(config_path, query)?;
            run::run(&config, &signals)
        }
        Commands::Result {
            dir,
            format,
            score_line,
        } => {
            let mut config = load_merged(config_path, QueryArgs::default())?;
            if let Some(direction) = score_line {
                config.result.score_line = direction;
            }
            result::run(&dir, &format, &config.result)
        }
        Commands::Signals { query } => {
            let config = load_merged(config_path, query)?;
            signals::list(&config.query)
        }
        Commands::SelectSignals {
            signals,
            output_file,
            query,
        } => {
            let config = load_merged(config_path, query)?;
            signals::select(&config.query, &signals, &output_file)
        }
        Commands::Sweep {
            query,
            chassis,
            signals_per_circuit,
        } => {
            let mut config = load_merged(config_path, query)?;
            if !chassis.is_empty() {
                config.sweep.chassis = chassis;
            }
            if let Some(n) = signals_per_circuit {
                config.sweep.signals_per_circuit = n;
            }
            sweep::run(&config)
        }
    }
}
