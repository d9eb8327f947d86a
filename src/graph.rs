pub mod adjacency;
pub mod brute_force;
pub mod components;
pub mod hamiltonian;
pub mod model;
pub mod preconditions;
pub mod random;
pub mod record;
pub mod trace;

pub use adjacency::Adjacency;
pub use brute_force::brute_force_hamiltonian_cycle;
pub use components::{connected_components, count_connected_components, Components};
pub use hamiltonian::{
    find_hamiltonian_cycle, find_hamiltonian_cycle_traced, search, SearchConfig, SearchMode,
};
pub use model::{Edge, Graph, GraphInfo, Position};
pub use preconditions::{check_preconditions, PreconditionFailure};
pub use random::{random_graph, seeded_random_graph, RandomGraphConfig};
pub use record::{GraphRecord, VertexRecord};
pub use trace::{Replay, SearchResult, Step, StepKind};
