//! Ground-truth acceptance under parity-based defeat semantics.
//!
//! Each branch is a simple chain of attacks ending at the root claim, and an
//! attack flips the believability of its target. Along a chain of length `b`
//! the root's status is flipped `b` times, so a branch undermines the root iff
//! `b` is odd: the attacker at the end of an even chain is itself defeated by
//! the witness before it, reinstating credibility along that branch. The root
//! claim is accepted iff no branch has odd length; a single odd branch rejects
//! it regardless of what the other branches look like.

use crate::shape::Shape;

/// Whether a single branch of the given length undermines the root claim.
pub fn branch_undermines(length: usize) -> bool {
    length % 2 == 1
}

/// Compute whether the root claim should be believed.
///
/// Pure and total over any shape whose branch lengths are all >= 1. A shape
/// with no branches at all means the root stands unattacked and is accepted.
/// `Shape::Linear(l)` is evaluated as "accepted iff `l` is odd" directly —
/// equivalent to the single branch of length `l - 1` being even, and well
/// defined even for the degenerate `l = 0` (no witness claims anything, so
/// there is nothing to believe).
pub fn accepted(shape: &Shape) -> bool {
    match shape {
        Shape::Linear(total) => total % 2 == 1,
        Shape::Branching(branches) => !branches.iter().any(|&b| branch_undermines(b)),
    }
}
