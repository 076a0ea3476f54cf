use super::ApplicationError;
use crate::Formulation;
use chargestate_network::IndexRange;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::env;
use std::path::Path;

#[derive(Debug, Deserialize)]
/// Run settings for an assembly
pub struct Configuration {
    /// The candidate index windows searched for coefficients
    pub window: WindowConfiguration,
    /// Settings for the equation system
    #[serde(default)]
    pub equations: EquationConfiguration,
}

#[derive(Debug, Deserialize)]
/// Inclusive candidate windows for the row index `i` and column index `j`
pub struct WindowConfiguration {
    /// Window for the row index `i`
    pub row: Bounds,
    /// Window for the column index `j`
    pub column: Bounds,
}

#[derive(Copy, Clone, Debug, Deserialize)]
/// An inclusive pair of bounds
pub struct Bounds {
    /// The lowest index searched
    pub min: usize,
    /// The highest index searched
    pub max: usize,
}

impl From<Bounds> for IndexRange {
    fn from(bounds: Bounds) -> Self {
        IndexRange::from_bounds(bounds.min, bounds.max)
    }
}

#[derive(Debug, Default, Deserialize)]
/// Settings for the equation system
pub struct EquationConfiguration {
    /// The requested number of coupled states, unset means whatever the data covers
    #[serde(default)]
    pub dimension: Option<usize>,
    /// The formulation to assemble
    #[serde(default)]
    pub formulation: Formulation,
}

impl Configuration {
    /// Layer the default configuration, the optional `RUN_MODE` override and `CHARGESTATE__*`
    /// environment variables
    pub fn build() -> Result<Self, ApplicationError> {
        Self::build_from_directory(".config")
    }

    /// As `build`, reading the configuration files from `directory`
    pub fn build_from_directory(directory: impl AsRef<Path>) -> Result<Self, ApplicationError> {
        let directory = directory.as_ref();
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            // The default settings which we use in the general case
            .add_source(File::with_name(&directory.join("default").to_string_lossy()))
            // The override settings which may be set by the user, optional
            .add_source(
                File::with_name(&directory.join(&run_mode).to_string_lossy()).required(false),
            )
            .add_source(Environment::with_prefix("CHARGESTATE").separator("__"))
            .build()?;

        Ok(s.try_deserialize()?)
    }

    /// Deserialize a configuration from a `toml` string
    pub fn from_toml_str(contents: &str) -> Result<Self, ApplicationError> {
        let s = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;
        Ok(s.try_deserialize()?)
    }
}

#[cfg(test)]
mod test {
    use super::Configuration;
    use crate::Formulation;
    use chargestate_network::IndexRange;

    #[test]
    fn full_configuration_is_deserialized() {
        let contents = r#"
            [window.row]
            min = 1
            max = 9

            [window.column]
            min = 2
            max = 8

            [equations]
            dimension = 3
            formulation = "static"
        "#;
        let config = Configuration::from_toml_str(contents).unwrap();
        assert_eq!(
            IndexRange::from(config.window.row),
            IndexRange::from_bounds(1, 9)
        );
        assert_eq!(
            IndexRange::from(config.window.column),
            IndexRange::from_bounds(2, 8)
        );
        assert_eq!(config.equations.dimension, Some(3));
        assert_eq!(config.equations.formulation, Formulation::Static);
    }

    #[test]
    fn equation_settings_default_to_an_unset_dynamic_system() {
        let contents = r#"
            [window]
            row = { min = 1, max = 4 }
            column = { min = 1, max = 4 }
        "#;
        let config = Configuration::from_toml_str(contents).unwrap();
        assert_eq!(config.equations.dimension, None);
        assert_eq!(config.equations.formulation, Formulation::Dynamic);
    }

    #[test]
    fn missing_window_is_an_error() {
        assert!(Configuration::from_toml_str("[equations]\ndimension = 3\n").is_err());
    }
}
