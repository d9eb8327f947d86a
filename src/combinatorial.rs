pub mod backtracking;

pub use backtracking::{permutations, try_for_each_permutation};
