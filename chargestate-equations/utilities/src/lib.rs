//! Network fixtures shared by the integration tests and benches

use chargestate_equations::app::CoefficientTable;
use chargestate_network::CoefficientStore;
use rand::{thread_rng, Rng};
use std::path::PathBuf;

/// Path to a coefficient table shipped in `test_networks`
pub fn test_network_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_networks")
        .join(name)
}

/// The three-state network read from `test_networks/three_state.toml`
pub fn three_state_store() -> CoefficientStore<f64> {
    let table: CoefficientTable<f64> = CoefficientTable::build(test_network_path("three_state.toml"))
        .expect("The three state network must deserialize");
    table.into_store()
}

/// A network of `num_states` states starting at `offset` where every pair of distinct states is
/// coupled by a random positive rate
pub fn construct_random_network(offset: usize, num_states: usize) -> CoefficientStore<f64> {
    let mut rng = thread_rng();
    let mut store = CoefficientStore::new();
    for i in offset..offset + num_states {
        for j in offset..offset + num_states {
            if i != j {
                store.insert(i, j, rng.gen_range(0.01..10.0));
            }
        }
    }
    store
}

/// A chain network where each state only couples to its neighbours, like single-electron
/// capture and loss
pub fn construct_random_chain(offset: usize, num_states: usize) -> CoefficientStore<f64> {
    let mut rng = thread_rng();
    let mut store = CoefficientStore::new();
    for i in offset..offset + num_states - 1 {
        store.insert(i, i + 1, rng.gen_range(0.01..10.0));
        store.insert(i + 1, i, rng.gen_range(0.01..10.0));
    }
    store
}
