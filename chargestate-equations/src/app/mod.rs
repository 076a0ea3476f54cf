/// This module governs the high-level implementation of the application
mod configuration;
mod error;
mod reader;
mod telemetry;

pub use configuration::{Bounds, Configuration, EquationConfiguration, WindowConfiguration};
pub use error::ApplicationError;
pub use reader::{CoefficientTable, Transition};

use crate::{Formulation, RateEquations, RateEquationsBuilder};
use chargestate_network::{CoefficientStore, Rate, ReconcilerBuilder};
use clap::{ArgEnum, Parser};
use color_eyre::eyre::eyre;
use std::fmt;
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// The coefficient table
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// Overrides the formulation set in the configuration
    #[clap(arg_enum, short, long)]
    formulation: Option<Formulation>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
pub(crate) enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

/// Parse the command line, read the configuration and coefficient table, then assemble and
/// print the equation system
pub fn run() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = App::parse();

    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level);
    telemetry::init_subscriber(subscriber)?;

    let config = Configuration::build()?;

    let path = cli
        .file_path
        .ok_or_else(|| eyre!("A coefficient file path needs to be passed."))?;
    tracing::info!("Reading coefficients from {}", path.display());
    let table: CoefficientTable<f64> = CoefficientTable::build(path)?;

    let formulation = cli.formulation.unwrap_or(config.equations.formulation);
    let equations = assemble(table.into_store(), &config, formulation)?;

    report(&equations, &console::Term::stdout())?;
    Ok(())
}

/// Reconcile `store` against the configured windows and assemble it in `formulation`
pub fn assemble<T: Rate>(
    mut store: CoefficientStore<T>,
    config: &Configuration,
    formulation: Formulation,
) -> Result<RateEquations<T>, ApplicationError> {
    let network = ReconcilerBuilder::new()
        .with_store(&mut store)
        .with_row_window(config.window.row)
        .with_column_window(config.window.column)
        .with_requested_dimension(config.equations.dimension)
        .build()?;
    tracing::info!(
        "Assembling {:?} system for {} charge states in {}",
        formulation,
        network.dimension(),
        network.range()
    );
    Ok(RateEquationsBuilder::new()
        .with_info_desk(&network)
        .with_formulation(formulation)
        .build()?)
}

/// Write the assembled matrix and second member to `term`
fn report<T>(equations: &RateEquations<T>, term: &console::Term) -> Result<(), ApplicationError>
where
    T: Rate + fmt::Display,
{
    if equations.is_degenerate() {
        term.write_line("A single charge state: nothing to solve.")?;
        return Ok(());
    }
    term.write_line(&format!("{:?} matrix:", equations.formulation()))?;
    term.write_line(&format!("{}", equations.output()))?;
    if let Some(second_member) = equations.second_member() {
        term.write_line("second member:")?;
        term.write_line(&format!("{}", second_member))?;
    }
    Ok(())
}
