//! Instantiation of abstract shapes into concrete witness testimony.
//!
//! Binds a [`Shape`](crate::shape::Shape) to freshly drawn witness names and a
//! sampled statement, producing the case's sentences. The attack structure is
//! a tree of depth two by construction (root claim plus independent simple
//! chains), so it is modeled as a small tagged structure rather than a general
//! graph: no cycles or cross-branch edges ever occur.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{CaseError, CaseResult};
use crate::pool::{NameDraw, StatementPair, StatementPool};
use crate::shape::Shape;

// ---------------------------------------------------------------------------
// Sentences
// ---------------------------------------------------------------------------

/// One rendered line of testimony.
///
/// Sentences carry their full meaning in their text (who attacks whom is
/// spelled out, not positional), which is what makes later shuffling safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub text: String,
}

impl Sentence {
    /// The root claim: "Witness {name} says that {statement}."
    pub fn claim(name: &str, statement: &str) -> Self {
        Self {
            text: format!("Witness {name} says that {statement}."),
        }
    }

    /// An attack: "Witness {name} says that witness {target} is lying."
    pub fn attack(name: &str, target: &str) -> Self {
        Self {
            text: format!("Witness {name} says that witness {target} is lying."),
        }
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

// ---------------------------------------------------------------------------
// Testimony graph
// ---------------------------------------------------------------------------

/// The instantiated case: root claim plus its attacking branches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonyGraph {
    /// The root witness's claim sentence.
    pub root: Sentence,
    /// One sentence chain per branch, in attack order (first entry attacks
    /// the root witness directly).
    pub branches: Vec<Vec<Sentence>>,
}

impl TestimonyGraph {
    /// Total number of witnesses speaking in this graph.
    pub fn num_witnesses(&self) -> usize {
        1 + self.branches.iter().map(Vec::len).sum::<usize>()
    }

    /// All sentences in canonical order: root first, then each branch.
    pub fn into_sentences(self) -> Vec<Sentence> {
        let mut sentences = Vec::with_capacity(self.num_witnesses());
        sentences.push(self.root);
        for branch in self.branches {
            sentences.extend(branch);
        }
        sentences
    }
}

/// The result of instantiating a shape: the graph plus the statement pair
/// fixed for this case.
#[derive(Debug, Clone)]
pub struct Instantiation {
    pub graph: TestimonyGraph,
    pub statement: StatementPair,
}

// ---------------------------------------------------------------------------
// Instantiation
// ---------------------------------------------------------------------------

/// Instantiate a shape into concrete testimony.
///
/// Draws one statement pair, one name per witness (never reusing a name
/// within the case), and builds each branch as a chain of attacks that starts
/// back at the root witness. Fails up front with
/// [`CaseError::InsufficientNames`] when the shape needs more witnesses than
/// the working copy holds; no partial result is ever produced.
pub fn instantiate<R: Rng>(
    shape: &Shape,
    names: &mut NameDraw,
    statements: &StatementPool,
    rng: &mut R,
) -> CaseResult<Instantiation> {
    if matches!(shape, Shape::Linear(0)) {
        return Err(CaseError::ZeroArguments);
    }
    let branch_lengths = shape.branch_lengths();
    if let Some(&bad) = branch_lengths.iter().find(|&&b| b == 0) {
        return Err(CaseError::InvalidBranch { length: bad });
    }

    let requested = 1 + branch_lengths.iter().sum::<usize>();
    if requested > names.remaining() {
        return Err(CaseError::InsufficientNames {
            requested,
            available: names.remaining(),
        });
    }

    // Statement pair is fixed for the whole case.
    let statement = statements.sample_one(rng)?;

    let root_name = names.draw(rng)?;
    let root = Sentence::claim(&root_name, &statement.statement);

    let mut branches = Vec::with_capacity(branch_lengths.len());
    for length in branch_lengths {
        // Every branch's first attacker targets the root witness.
        let mut target = root_name.clone();
        let mut chain = Vec::with_capacity(length);
        for _ in 0..length {
            let name = names.draw(rng)?;
            chain.push(Sentence::attack(&name, &target));
            target = name;
        }
        branches.push(chain);
    }

    Ok(Instantiation {
        graph: TestimonyGraph { root, branches },
        statement,
    })
}
