//! # testimony
//!
//! Generator of natural-language reasoning puzzles about witnesses accusing
//! one another of lying, with provable ground truth under parity-based defeat
//! semantics. Puzzles are rendered as prose prompts for probing whether a
//! language model can recover the correct acceptance value.
//!
//! ## Architecture
//!
//! - **Shapes** (`shape`): attack topologies enumerated via integer partitions
//! - **Semantics** (`semantics`): parity rule computing the ground-truth answer
//! - **Pools** (`pool`): witness names and claim statements, bundled as TOML
//! - **Instantiation** (`testimony`): shape + pools → concrete sentences
//! - **Rendering** (`render`): sentences → final puzzle text
//! - **Generation** (`generator`): orchestration producing immutable `Case`s
//! - **Models** (`model`): pluggable backends answering rendered prompts
//!
//! ## Library usage
//!
//! ```no_run
//! use testimony::generator::{CaseGenerator, GeneratorConfig};
//!
//! let mut generator = CaseGenerator::new(GeneratorConfig::default()).unwrap();
//! // Two even branches cancel out, so the root claim stands.
//! let case = generator.generate_case(vec![2, 2]).unwrap();
//! assert!(case.answer);
//! println!("{}", case.prompt);
//! ```

pub mod error;
pub mod export;
pub mod generator;
pub mod model;
pub mod pool;
pub mod render;
pub mod semantics;
pub mod shape;
pub mod testimony;
