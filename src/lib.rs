pub mod combinatorial;
pub mod error;
pub mod graph;

pub use error::{GraphError, Result};
pub use graph::{
    brute_force_hamiltonian_cycle, check_preconditions, connected_components,
    count_connected_components, find_hamiltonian_cycle, find_hamiltonian_cycle_traced, search,
    Graph, Position, SearchConfig, SearchMode, SearchResult, Step, StepKind,
};
