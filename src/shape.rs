//! Graph shapes and the integer-partition sweep that enumerates them.
//!
//! A [`Shape`] abstracts a testimony case down to its attack topology: either
//! a single linear chain, or a set of independent branches hanging off the
//! root claim. [`partitions`] drives exhaustive sweeps by enumerating every
//! branch-length multiset for a given argument budget.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The abstract topology of a testimony case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    /// A pure chain: the root witness plus a single line of `L - 1` attackers,
    /// `L` arguments in total.
    Linear(usize),
    /// Independent attack branches off the root claim, one entry per branch
    /// giving its chain length. Invariant: every length is at least 1.
    Branching(Vec<usize>),
}

impl Shape {
    /// Total number of arguments (witnesses) the case requires, root included.
    pub fn num_arguments(&self) -> usize {
        match self {
            Shape::Linear(total) => *total,
            Shape::Branching(branches) => 1 + branches.iter().sum::<usize>(),
        }
    }

    /// The branch lengths of this shape.
    ///
    /// A linear shape of `L` arguments is one branch of `L - 1` attackers
    /// (or no branch at all when the root stands alone).
    pub fn branch_lengths(&self) -> Vec<usize> {
        match self {
            Shape::Linear(total) if *total <= 1 => Vec::new(),
            Shape::Linear(total) => vec![total - 1],
            Shape::Branching(branches) => branches.clone(),
        }
    }
}

impl From<usize> for Shape {
    fn from(total_arguments: usize) -> Self {
        Shape::Linear(total_arguments)
    }
}

impl From<Vec<usize>> for Shape {
    fn from(branches: Vec<usize>) -> Self {
        Shape::Branching(branches)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Linear(total) => write!(f, "linear({total})"),
            Shape::Branching(branches) => {
                write!(f, "(")?;
                for (i, b) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{b}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Enumerate every integer partition of `n` into parts >= 1.
///
/// Each partition appears exactly once as a multiset: the recursion keeps a
/// non-decreasing floor on the next part, so permutations of the same parts
/// are never re-emitted. `partitions(0)` yields nothing; sweep callers always
/// partition `max_args - 1` and treat each part as a branch length.
///
/// Puzzle-scale `n` keeps the result small (p(20) = 627), so the sequence is
/// materialized up front rather than streamed.
pub fn partitions(n: usize) -> impl Iterator<Item = Vec<usize>> {
    if n == 0 {
        Vec::new().into_iter()
    } else {
        partitions_with_floor(n, 1).into_iter()
    }
}

/// Partitions of `n` whose smallest part is at least `floor`.
fn partitions_with_floor(n: usize, floor: usize) -> Vec<Vec<usize>> {
    let mut out = vec![vec![n]];
    for i in floor..=n / 2 {
        for rest in partitions_with_floor(n - i, i) {
            let mut part = Vec::with_capacity(rest.len() + 1);
            part.push(i);
            part.extend(rest);
            out.push(part);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    /// Reference values of the partition function p(n).
    const PARTITION_COUNTS: [usize; 11] = [1, 2, 3, 5, 7, 11, 15, 22, 30, 42, 56];

    #[test]
    fn partition_counts_match_p_n() {
        for (i, &expected) in PARTITION_COUNTS.iter().enumerate() {
            let n = i + 1;
            let count = partitions(n).count();
            assert_eq!(count, expected, "p({n}) should be {expected}, got {count}");
        }
    }

    #[test]
    fn partitions_sum_to_n() {
        for n in 1..=12 {
            for part in partitions(n) {
                assert_eq!(part.iter().sum::<usize>(), n, "partition {part:?} of {n}");
            }
        }
    }

    #[test]
    fn partitions_are_distinct_as_multisets() {
        for n in 1..=12 {
            let mut seen = HashSet::new();
            for part in partitions(n) {
                let mut sorted = part.clone();
                sorted.sort_unstable();
                assert!(seen.insert(sorted), "duplicate multiset {part:?} for n={n}");
            }
        }
    }

    #[test]
    fn partitions_have_positive_parts() {
        for n in 1..=12 {
            for part in partitions(n) {
                assert!(part.iter().all(|&p| p >= 1));
            }
        }
    }

    #[test]
    fn partitions_of_zero_is_empty() {
        assert_eq!(partitions(0).count(), 0);
    }

    #[test]
    fn partitions_of_four() {
        let parts: Vec<Vec<usize>> = partitions(4).collect();
        assert_eq!(parts.len(), 5);
        assert!(parts.contains(&vec![4]));
        assert!(parts.contains(&vec![1, 3]));
        assert!(parts.contains(&vec![2, 2]));
        assert!(parts.contains(&vec![1, 1, 2]));
        assert!(parts.contains(&vec![1, 1, 1, 1]));
    }

    #[test]
    fn num_arguments_counts_the_root() {
        assert_eq!(Shape::Linear(3).num_arguments(), 3);
        assert_eq!(Shape::Branching(vec![2, 2]).num_arguments(), 5);
        assert_eq!(Shape::Branching(vec![]).num_arguments(), 1);
    }

    #[test]
    fn linear_branch_lengths() {
        assert_eq!(Shape::Linear(1).branch_lengths(), Vec::<usize>::new());
        assert_eq!(Shape::Linear(4).branch_lengths(), vec![3]);
        assert_eq!(Shape::Branching(vec![2, 3]).branch_lengths(), vec![2, 3]);
    }

    #[test]
    fn shape_display() {
        assert_eq!(format!("{}", Shape::Linear(5)), "linear(5)");
        assert_eq!(format!("{}", Shape::Branching(vec![1, 2, 2])), "(1,2,2)");
        assert_eq!(format!("{}", Shape::Branching(vec![])), "()");
    }
}
