//! Backtracking permutation generators.
//!
//! Permutations are produced in lexicographic order of the input *positions*:
//! the first permutation is the input itself, and the last is its reverse.
//! This order is what the brute-force Hamiltonian search relies on to report
//! "the first tour in generated order".
//!
//! # Examples
//! ```
//! use hamilton::combinatorial::backtracking::permutations;
//! let data = vec![1, 2, 3];
//! let perms = permutations(&data);
//! assert_eq!(perms.len(), 6);
//! assert_eq!(perms[0], vec![1, 2, 3]);
//! assert_eq!(perms[5], vec![3, 2, 1]);
//! ```

use std::ops::ControlFlow;

/// Returns all permutations of the input slice using backtracking.
///
/// # Example
/// ```
/// use hamilton::combinatorial::backtracking::permutations;
///
/// let items = vec!['a', 'b', 'c'];
/// let perms = permutations(&items);
/// assert_eq!(perms, vec![
///     vec!['a', 'b', 'c'],
///     vec!['a', 'c', 'b'],
///     vec!['b', 'a', 'c'],
///     vec!['b', 'c', 'a'],
///     vec!['c', 'a', 'b'],
///     vec!['c', 'b', 'a'],
/// ]);
/// ```
pub fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
    let mut results = Vec::new();
    try_for_each_permutation(items, |perm| {
        results.push(perm.to_vec());
        ControlFlow::<()>::Continue(())
    });
    results
}

/// Visits every permutation of `items` in generated order, stopping as soon as
/// `visit` breaks. Returns the break value, or `None` if every permutation was
/// visited.
///
/// Nothing beyond the current permutation is kept in memory, so callers that
/// stop early never pay for the full factorial expansion.
///
/// # Example
/// ```
/// use std::ops::ControlFlow;
/// use hamilton::combinatorial::backtracking::try_for_each_permutation;
///
/// let first_descending = try_for_each_permutation(&[1, 2, 3], |perm| {
///     if perm[0] > perm[1] {
///         ControlFlow::Break(perm.to_vec())
///     } else {
///         ControlFlow::Continue(())
///     }
/// });
/// assert_eq!(first_descending, Some(vec![2, 1, 3]));
/// ```
pub fn try_for_each_permutation<T, B, F>(items: &[T], mut visit: F) -> Option<B>
where
    T: Clone,
    F: FnMut(&[T]) -> ControlFlow<B>,
{
    let mut used = vec![false; items.len()];
    let mut current = Vec::with_capacity(items.len());
    match backtrack_permutations(items, &mut used, &mut current, &mut visit) {
        ControlFlow::Break(value) => Some(value),
        ControlFlow::Continue(()) => None,
    }
}

fn backtrack_permutations<T, B, F>(
    items: &[T],
    used: &mut [bool],
    current: &mut Vec<T>,
    visit: &mut F,
) -> ControlFlow<B>
where
    T: Clone,
    F: FnMut(&[T]) -> ControlFlow<B>,
{
    if current.len() == items.len() {
        return visit(current);
    }
    for i in 0..items.len() {
        if used[i] {
            continue;
        }
        used[i] = true;
        current.push(items[i].clone());
        let flow = backtrack_permutations(items, used, current, visit);
        current.pop();
        used[i] = false;
        if let ControlFlow::Break(value) = flow {
            return ControlFlow::Break(value);
        }
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permutations_empty() {
        let items: Vec<i32> = vec![];
        let perms = permutations(&items);
        assert_eq!(perms, vec![Vec::<i32>::new()]);
    }

    #[test]
    fn test_permutations_single() {
        let items = vec![1];
        let perms = permutations(&items);
        assert_eq!(perms, vec![vec![1]]);
    }

    #[test]
    fn test_permutations_two() {
        let items = vec![1, 2];
        let perms = permutations(&items);
        assert_eq!(perms, vec![vec![1, 2], vec![2, 1]]);
    }

    #[test]
    fn test_permutations_lexicographic_by_position() {
        // Positions, not values, drive the order.
        let items = vec!['c', 'a', 'b'];
        let perms = permutations(&items);
        assert_eq!(
            perms,
            vec![
                vec!['c', 'a', 'b'],
                vec!['c', 'b', 'a'],
                vec!['a', 'c', 'b'],
                vec!['a', 'b', 'c'],
                vec!['b', 'c', 'a'],
                vec!['b', 'a', 'c'],
            ]
        );
    }

    #[test]
    fn test_permutations_count() {
        let items: Vec<u8> = (0..6).collect();
        assert_eq!(permutations(&items).len(), 720);
    }

    #[test]
    fn test_try_for_each_stops_early() {
        let mut visited = 0;
        let found = try_for_each_permutation(&[1, 2, 3, 4], |perm| {
            visited += 1;
            if perm == [1, 3, 2, 4] {
                ControlFlow::Break(visited)
            } else {
                ControlFlow::Continue(())
            }
        });
        // [1,2,3,4], [1,2,4,3], [1,3,2,4]
        assert_eq!(found, Some(3));
        assert_eq!(visited, 3);
    }

    #[test]
    fn test_try_for_each_exhausts() {
        let mut visited = 0;
        let found: Option<()> = try_for_each_permutation(&[1, 2, 3], |_| {
            visited += 1;
            ControlFlow::Continue(())
        });
        assert_eq!(found, None);
        assert_eq!(visited, 6);
    }
}
