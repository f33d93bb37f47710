//! Case generation: orchestrates shapes, pools, semantics, and rendering.
//!
//! A [`CaseGenerator`] owns the loaded pools and an RNG, and produces
//! immutable [`Case`] values one shape at a time or for a full partition
//! sweep. A case is either fully valid or not produced at all; failures
//! surface as explicit error results before anything is assembled.

use std::fmt;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{CaseError, CaseResult, TestimonyResult};
use crate::pool::{NamePool, StatementPool};
use crate::render;
use crate::semantics;
use crate::shape::{self, Shape};
use crate::testimony;

// ---------------------------------------------------------------------------
// Case
// ---------------------------------------------------------------------------

/// One generated puzzle with its ground-truth answer.
///
/// Constructed once and never mutated; downstream scoring only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    /// The abstract topology this case was built from.
    pub shape: Shape,
    /// Total witness count, root included.
    pub num_arguments: usize,
    /// The rendered puzzle text.
    pub prompt: String,
    /// Whether the root claim should be believed.
    pub answer: bool,
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Case with {} arguments and the following prompt:\n###\n{}\n###\n\nAnswer: {}",
            self.num_arguments, self.prompt, self.answer
        )
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// Configuration for a [`CaseGenerator`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorConfig {
    /// Permute sentence order within each rendered prompt.
    pub shuffle_sentences: bool,
    /// RNG seed for reproducible generation. `None` seeds from the OS.
    pub seed: Option<u64>,
}

/// Generates [`Case`] values from shapes.
pub struct CaseGenerator {
    names: NamePool,
    statements: StatementPool,
    shuffle_sentences: bool,
    rng: StdRng,
}

impl CaseGenerator {
    /// Create a generator over the bundled pools.
    pub fn new(config: GeneratorConfig) -> TestimonyResult<Self> {
        Ok(Self::with_pools(
            NamePool::bundled()?,
            StatementPool::bundled()?,
            config,
        ))
    }

    /// Create a generator over explicit pools.
    pub fn with_pools(names: NamePool, statements: StatementPool, config: GeneratorConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            names,
            statements,
            shuffle_sentences: config.shuffle_sentences,
            rng,
        }
    }

    /// Number of names available per case.
    pub fn pool_size(&self) -> usize {
        self.names.len()
    }

    /// Generate a single case.
    ///
    /// Accepts anything convertible to a [`Shape`]: a plain argument count
    /// (linear mode) or a branch-length vector (branching mode). The argument
    /// budget is validated against the name pool before any drawing happens;
    /// an oversized shape yields [`CaseError::InsufficientNames`] and no case.
    pub fn generate_case(&mut self, shape: impl Into<Shape>) -> CaseResult<Case> {
        let shape = shape.into();
        let requested = shape.num_arguments();
        let available = self.names.len();
        if requested > available {
            return Err(CaseError::InsufficientNames {
                requested,
                available,
            });
        }

        // Each case gets its own exclusively-owned working copy of the names.
        let mut draw = self.names.working_copy();
        let inst = testimony::instantiate(&shape, &mut draw, &self.statements, &mut self.rng)?;

        let answer = semantics::accepted(&shape);

        // The two variants use different surface phrasings of the same claim:
        // linear questions the raw statement, branching the question form.
        let question = match &shape {
            Shape::Linear(_) => format!("{}?", inst.statement.statement),
            Shape::Branching(_) => inst.statement.statement_q.clone(),
        };

        let sentences = inst.graph.into_sentences();
        let prompt = render::render(&sentences, &question, self.shuffle_sentences, &mut self.rng);

        tracing::debug!(%shape, num_arguments = requested, answer, "generated case");

        Ok(Case {
            shape,
            num_arguments: requested,
            prompt,
            answer,
        })
    }

    /// Generate one case per partition of `max_args - 1`.
    ///
    /// Every partition becomes a branching shape whose parts are the branch
    /// lengths, so each case has exactly `max_args` arguments. Order follows
    /// the enumeration order of [`shape::partitions`].
    pub fn generate_all_cases(&mut self, max_args: usize) -> CaseResult<Vec<Case>> {
        let mut cases = Vec::new();
        for part in shape::partitions(max_args.saturating_sub(1)) {
            cases.push(self.generate_case(Shape::Branching(part))?);
        }
        Ok(cases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::StatementPair;

    fn generator(pool_size: usize, shuffle: bool) -> CaseGenerator {
        let names =
            NamePool::from_names((0..pool_size).map(|i| format!("W{i}")).collect()).unwrap();
        let statements = StatementPool::from_pairs(vec![StatementPair {
            statement: "the vault was sealed".to_string(),
            statement_q: "the vault was sealed?".to_string(),
        }])
        .unwrap();
        CaseGenerator::with_pools(
            names,
            statements,
            GeneratorConfig {
                shuffle_sentences: shuffle,
                seed: Some(17),
            },
        )
    }

    #[test]
    fn linear_case_parity() {
        let mut g = generator(10, false);
        for l in 1..=6 {
            let case = g.generate_case(l).unwrap();
            assert_eq!(case.num_arguments, l);
            assert_eq!(case.answer, l % 2 == 1, "linear({l})");
            assert_eq!(case.shape, Shape::Linear(l));
        }
    }

    #[test]
    fn branching_case_parity() {
        let mut g = generator(12, false);
        assert!(g.generate_case(vec![2, 2]).unwrap().answer);
        assert!(!g.generate_case(vec![2, 3]).unwrap().answer);
        assert!(!g.generate_case(vec![1]).unwrap().answer);
        assert!(g.generate_case(Shape::Branching(Vec::new())).unwrap().answer);
    }

    #[test]
    fn linear_zero_yields_no_case() {
        let mut g = generator(6, false);
        let err = g.generate_case(0).unwrap_err();
        assert!(matches!(err, CaseError::ZeroArguments));
    }

    #[test]
    fn linear_question_uses_raw_statement() {
        let mut g = generator(8, false);
        let case = g.generate_case(3).unwrap();
        assert!(
            case.prompt
                .contains("Question: should it be believed that the vault was sealed?")
        );
    }

    #[test]
    fn branching_question_uses_question_form() {
        let mut g = generator(8, false);
        let case = g.generate_case(vec![2]).unwrap();
        assert!(
            case.prompt
                .contains("Question: should it be believed that the vault was sealed?")
        );
        assert!(case.prompt.ends_with(render::ANSWER_INSTRUCTION));
    }

    #[test]
    fn oversized_shape_is_a_soft_failure() {
        let mut g = generator(4, false);
        let err = g.generate_case(vec![2, 2]).unwrap_err();
        assert!(matches!(
            err,
            CaseError::InsufficientNames {
                requested: 5,
                available: 4,
            }
        ));
        // The generator stays usable.
        assert!(g.generate_case(vec![2]).is_ok());
    }

    #[test]
    fn sweep_produces_p_of_n_cases() {
        // p(5) = 7 partitions, each a case of exactly 6 arguments.
        let mut g = generator(10, false);
        let cases = g.generate_all_cases(6).unwrap();
        assert_eq!(cases.len(), 7);
        for case in &cases {
            assert_eq!(case.num_arguments, 6);
            assert!(matches!(case.shape, Shape::Branching(_)));
        }
    }

    #[test]
    fn shuffled_case_keeps_its_answer() {
        let mut plain = generator(10, false);
        let mut shuffled = generator(10, true);

        let a = plain.generate_case(vec![2, 2]).unwrap();
        let b = shuffled.generate_case(vec![2, 2]).unwrap();
        assert_eq!(a.answer, b.answer);
        assert_eq!(a.prompt.lines().count(), b.prompt.lines().count());
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let mut a = generator(10, false);
        let mut b = generator(10, false);
        assert_eq!(
            a.generate_case(vec![2, 1]).unwrap(),
            b.generate_case(vec![2, 1]).unwrap()
        );
    }

    #[test]
    fn case_display_shows_prompt_and_answer() {
        let mut g = generator(6, false);
        let case = g.generate_case(2).unwrap();
        let repr = format!("{case}");
        assert!(repr.contains("Case with 2 arguments"));
        assert!(repr.contains("###"));
        assert!(repr.contains("Answer: false"));
    }
}
