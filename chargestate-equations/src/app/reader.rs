//! Deserialization of the coefficient table into a `CoefficientStore`

use super::ApplicationError;
use chargestate_network::{CoefficientStore, Rate};
use config::{Config, File, FileFormat};
use serde::{de::DeserializeOwned, Deserialize};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
/// A list of transitions as read from disk
pub struct CoefficientTable<T> {
    coefficients: Vec<Transition<T>>,
}

#[derive(Debug, Deserialize)]
/// The rate for the transition between charge states `i` and `j`
pub struct Transition<T> {
    /// The first state of the pair
    pub i: usize,
    /// The second state of the pair
    pub j: usize,
    /// The transition rate
    pub rate: T,
}

impl<T: DeserializeOwned + Rate> CoefficientTable<T> {
    /// Read the table from the file at `path`, the format follows the file extension
    pub fn build(path: PathBuf) -> Result<Self, ApplicationError> {
        let s = Config::builder().add_source(File::from(path)).build()?;
        Ok(s.try_deserialize()?)
    }

    /// Read the table from a `toml` string
    pub fn from_toml_str(contents: &str) -> Result<Self, ApplicationError> {
        let s = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;
        Ok(s.try_deserialize()?)
    }

    /// The transitions in file order
    pub fn transitions(&self) -> &[Transition<T>] {
        &self.coefficients
    }

    /// Collect the table into a store, later duplicates replace earlier ones
    pub fn into_store(self) -> CoefficientStore<T> {
        let mut store = CoefficientStore::new();
        for Transition { i, j, rate } in self.coefficients {
            if let Some(previous) = store.insert(i, j, rate) {
                tracing::warn!(
                    "duplicate coefficient Q.{}.{}: {:?} replaces {:?}",
                    i,
                    j,
                    rate,
                    previous
                );
            }
        }
        store
    }
}

#[cfg(test)]
mod test {
    use super::CoefficientTable;

    #[test]
    fn transitions_are_collected_into_the_store() {
        let contents = r#"
            [[coefficients]]
            i = 1
            j = 2
            rate = 2.0

            [[coefficients]]
            i = 2
            j = 1
            rate = 1
        "#;
        let table: CoefficientTable<f64> = CoefficientTable::from_toml_str(contents).unwrap();
        assert_eq!(table.transitions().len(), 2);
        let store = table.into_store();
        assert_eq!(store.lookup(1, 2), Some(2.0));
        assert_eq!(store.lookup(2, 1), Some(1.0));
        assert!(store.is_supplied(2, 1));
    }

    #[test]
    fn later_duplicates_win() {
        let contents = r#"
            coefficients = [
                { i = 1, j = 2, rate = 2.0 },
                { i = 1, j = 2, rate = 5.0 },
            ]
        "#;
        let table: CoefficientTable<f64> = CoefficientTable::from_toml_str(contents).unwrap();
        let store = table.into_store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup(1, 2), Some(5.0));
    }
}
