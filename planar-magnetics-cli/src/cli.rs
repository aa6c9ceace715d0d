//! Contains structures and functionality for the binary
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use crate::error::CliError;

/// Cli Arguments related to logging
#[derive(clap::Args, Debug)]
pub(crate) struct LoggingArgs {
    /// Increase log verbosity (multiple uses increase verbosity further)
    #[arg(short, long, action = clap::builder::ArgAction::Count, group = "verbosity")]
    verbose: u8,
    /// Reduce log verbosity to show only errors (equivalent to --log error)
    #[arg(short, long, group = "verbosity")]
    quiet: bool,
    /// Set log verbosity (default is "warn")
    #[arg(long = "log", value_parser=clap::builder::PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"]), group = "verbosity")]
    log_level: Option<String>,
}

impl LoggingArgs {
    /// Initialising Logging
    ///
    /// Sets the logging verbosity to the given log-level in the following order:
    ///  * `Info`, `Debug`, `Trace`; depending on the count of `-v`
    ///  * `Error` when `-q` is used
    ///  * The `PLM_LOG` environment variable value
    ///  * `Warn` otherwise
    pub(crate) fn initialize_logging(&self) {
        let mut builder = env_logger::Builder::new();

        // Default log level
        builder.filter_level(log::LevelFilter::Warn);

        builder.parse_env("PLM_LOG");
        if let Some(ref level) = self.log_level {
            builder.parse_filters(level);
        } else if self.quiet {
            builder.filter_level(log::LevelFilter::Error);
        } else if self.verbose > 0 {
            builder.filter_level(match self.verbose {
                1 => log::LevelFilter::Info,
                2 => log::LevelFilter::Debug,
                3 => log::LevelFilter::Trace,
                _ => log::LevelFilter::Warn,
            });
        }
        builder.init();
    }
}

/// Possible output formats for generated footprints.
#[derive(clap::ValueEnum, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    /// KiCad S-expressions
    #[default]
    Kicad,
    /// ASCII DXF (R2000)
    Dxf,
}

/// Cli arguments related to file output
#[derive(Debug, clap::Args)]
pub(crate) struct OutputArgs {
    /// File to write the footprint to; stdout when omitted
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,
    /// Serialization format of the footprint
    #[arg(short, long, value_enum, default_value_t)]
    pub(crate) format: OutputFormat,
    /// Replace any existing output file
    #[arg(long, default_value = "false")]
    pub(crate) overwrite: bool,
}

impl OutputArgs {
    /// Open the output for writing, guarding against accidental overwrites.
    pub(crate) fn open(&self) -> Result<Box<dyn Write>, CliError> {
        let Some(path) = &self.output else {
            return Ok(Box::new(std::io::stdout()));
        };

        if path.exists() && !self.overwrite {
            return Err(CliError::OutputExists {
                filename: path.clone(),
            });
        }

        let file = File::create(path).map_err(|error| CliError::OutputCreate {
            error,
            filename: path.clone(),
        })?;

        Ok(Box::new(file))
    }
}

/// Cli arguments describing the design input
#[derive(Debug, clap::Args)]
pub(crate) struct DesignArgs {
    /// JSON file with the design parameters
    #[arg(short, long)]
    pub(crate) params: PathBuf,
}

/// The work the binary is asked to do
#[derive(clap::Subcommand, Debug)]
pub(crate) enum Command {
    /// Generate a single-layer spiral winding
    Spiral {
        /// Arguments describing the design input
        #[command(flatten)]
        design: DesignArgs,
        /// Arguments related to output
        #[command(flatten)]
        output: OutputArgs,
        /// Copper weight (oz) used to estimate the winding resistance
        #[arg(long)]
        copper_weight: Option<f64>,
        /// Winding temperature (°C) for the resistance estimate
        #[arg(long, default_value_t = 25.0)]
        temperature: f64,
    },
    /// Generate a stacked winding with one turn per layer
    Cffc {
        /// Arguments describing the design input
        #[command(flatten)]
        design: DesignArgs,
        /// Arguments related to output
        #[command(flatten)]
        output: OutputArgs,
        /// Copper weights (oz) of each layer, top to bottom
        #[arg(long, value_delimiter = ',')]
        stackup: Option<Vec<f64>>,
        /// Winding temperature (°C) for the resistance estimate
        #[arg(long, default_value_t = 25.0)]
        temperature: f64,
    },
    /// Validate a changelog document
    CheckChangelog {
        /// The changelog file to validate
        file: PathBuf,
    },
}

/// Planar magnetics CLI
#[derive(clap::Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct CliApp {
    /// The requested subcommand
    #[command(subcommand)]
    pub(crate) command: Command,
    /// Arguments related to logging
    #[command(flatten)]
    pub(crate) logging: LoggingArgs,
}
