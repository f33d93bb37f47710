//! Name and statement pools: the source material for case instantiation.
//!
//! Two pools feed the generator: a set of unique witness names and a set of
//! (statement, question-phrased statement) pairs. Default pools are bundled
//! into the binary as TOML via `include_str!`; external pools can be loaded
//! from disk in the same format.
//!
//! Pools are loaded once and treated as read-only source material. Each case
//! takes its own [`NameDraw`] working copy and consumes names from it without
//! replacement; statements are sampled with replacement across cases.

use std::collections::HashSet;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{PoolError, PoolResult};

// ---------------------------------------------------------------------------
// Bundled pools
// ---------------------------------------------------------------------------

const NAMES_TOML: &str = include_str!("../data/pools/names.toml");
const STATEMENTS_TOML: &str = include_str!("../data/pools/statements.toml");

#[derive(Debug, Deserialize)]
struct PoolMeta {
    #[allow(dead_code)]
    id: String,
    #[allow(dead_code)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct NamesToml {
    #[allow(dead_code)]
    pool: PoolMeta,
    names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StatementsToml {
    #[allow(dead_code)]
    pool: PoolMeta,
    #[serde(default)]
    statements: Vec<StatementPair>,
}

// ---------------------------------------------------------------------------
// Name pool
// ---------------------------------------------------------------------------

/// A read-only pool of unique witness names.
#[derive(Debug, Clone)]
pub struct NamePool {
    names: Vec<String>,
}

impl NamePool {
    /// Load the pool bundled into the binary.
    pub fn bundled() -> PoolResult<Self> {
        Self::parse(NAMES_TOML, "bundled names")
    }

    /// Load a pool from an external TOML file.
    pub fn from_file(path: &Path) -> PoolResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(toml_str: &str, what: &str) -> PoolResult<Self> {
        let parsed: NamesToml = toml::from_str(toml_str).map_err(|e| PoolError::Parse {
            what: what.to_string(),
            message: e.to_string(),
        })?;
        if parsed.names.is_empty() {
            return Err(PoolError::Empty { what: "name" });
        }
        let mut seen = HashSet::new();
        for name in &parsed.names {
            if !seen.insert(name.as_str()) {
                return Err(PoolError::DuplicateName { name: name.clone() });
            }
        }
        Ok(Self {
            names: parsed.names,
        })
    }

    /// Build a pool directly from a list of names. Duplicates are rejected.
    pub fn from_names(names: Vec<String>) -> PoolResult<Self> {
        if names.is_empty() {
            return Err(PoolError::Empty { what: "name" });
        }
        let mut seen = HashSet::new();
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(PoolError::DuplicateName { name: name.clone() });
            }
        }
        Ok(Self { names })
    }

    /// Number of names available.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Take a working copy for one case's construction.
    ///
    /// The copy is exclusively owned by that case and discarded afterwards;
    /// the pool itself is never mutated.
    pub fn working_copy(&self) -> NameDraw {
        NameDraw {
            remaining: self.names.clone(),
            drawn: 0,
        }
    }
}

/// A per-case working copy of the name pool, consumed without replacement.
#[derive(Debug)]
pub struct NameDraw {
    remaining: Vec<String>,
    drawn: usize,
}

impl NameDraw {
    /// Draw a uniformly random name and remove it from the working copy.
    pub fn draw<R: Rng>(&mut self, rng: &mut R) -> PoolResult<String> {
        if self.remaining.is_empty() {
            return Err(PoolError::Exhausted { drawn: self.drawn });
        }
        let idx = rng.gen_range(0..self.remaining.len());
        self.drawn += 1;
        Ok(self.remaining.swap_remove(idx))
    }

    /// How many names are still available to draw.
    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }
}

// ---------------------------------------------------------------------------
// Statement pool
// ---------------------------------------------------------------------------

/// A claim statement in its two surface forms.
///
/// `statement` is the declarative form spoken by the root witness;
/// `statement_q` is the form embedded in the final question line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementPair {
    pub statement: String,
    pub statement_q: String,
}

/// A read-only pool of claim statements, sampled with replacement.
#[derive(Debug, Clone)]
pub struct StatementPool {
    pairs: Vec<StatementPair>,
}

impl StatementPool {
    /// Load the pool bundled into the binary.
    pub fn bundled() -> PoolResult<Self> {
        Self::parse(STATEMENTS_TOML, "bundled statements")
    }

    /// Load a pool from an external TOML file.
    pub fn from_file(path: &Path) -> PoolResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| PoolError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(toml_str: &str, what: &str) -> PoolResult<Self> {
        let parsed: StatementsToml = toml::from_str(toml_str).map_err(|e| PoolError::Parse {
            what: what.to_string(),
            message: e.to_string(),
        })?;
        if parsed.statements.is_empty() {
            return Err(PoolError::Empty { what: "statement" });
        }
        Ok(Self {
            pairs: parsed.statements,
        })
    }

    /// Build a pool directly from statement pairs.
    pub fn from_pairs(pairs: Vec<StatementPair>) -> PoolResult<Self> {
        if pairs.is_empty() {
            return Err(PoolError::Empty { what: "statement" });
        }
        Ok(Self { pairs })
    }

    /// Number of statement pairs available.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sample one pair uniformly. The pair is fixed for the whole case.
    pub fn sample_one<R: Rng>(&self, rng: &mut R) -> PoolResult<StatementPair> {
        if self.pairs.is_empty() {
            return Err(PoolError::Empty { what: "statement" });
        }
        let idx = rng.gen_range(0..self.pairs.len());
        Ok(self.pairs[idx].clone())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::io::Write;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn bundled_pools_parse() {
        let names = NamePool::bundled().unwrap();
        assert!(names.len() >= 40, "expected 40+ bundled names");

        let statements = StatementPool::bundled().unwrap();
        assert!(statements.len() >= 10, "expected 10+ bundled statements");
    }

    #[test]
    fn bundled_statement_q_is_question_phrased() {
        let statements = StatementPool::bundled().unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let pair = statements.sample_one(&mut rng).unwrap();
        assert!(pair.statement_q.ends_with('?'));
        assert!(!pair.statement.ends_with('?'));
    }

    #[test]
    fn duplicate_names_rejected() {
        let result = NamePool::from_names(vec![
            "Ada".to_string(),
            "Bea".to_string(),
            "Ada".to_string(),
        ]);
        assert!(matches!(result, Err(PoolError::DuplicateName { .. })));
    }

    #[test]
    fn empty_pools_rejected() {
        assert!(matches!(
            NamePool::from_names(vec![]),
            Err(PoolError::Empty { what: "name" })
        ));
        assert!(matches!(
            StatementPool::from_pairs(vec![]),
            Err(PoolError::Empty { what: "statement" })
        ));
    }

    #[test]
    fn draws_are_unique_until_exhausted() {
        let pool = NamePool::from_names(
            ["Ada", "Bea", "Cal", "Dot"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
        .unwrap();

        let mut rng = StdRng::seed_from_u64(42);
        let mut draw = pool.working_copy();
        let mut seen = HashSet::new();
        for _ in 0..4 {
            let name = draw.draw(&mut rng).unwrap();
            assert!(seen.insert(name), "name drawn twice");
        }
        assert_eq!(draw.remaining(), 0);

        let err = draw.draw(&mut rng).unwrap_err();
        assert!(matches!(err, PoolError::Exhausted { drawn: 4 }));
    }

    #[test]
    fn working_copy_leaves_pool_untouched() {
        let pool = NamePool::bundled().unwrap();
        let before = pool.len();
        let mut rng = StdRng::seed_from_u64(1);
        let mut draw = pool.working_copy();
        draw.draw(&mut rng).unwrap();
        assert_eq!(pool.len(), before);
    }

    #[test]
    fn pool_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        // Top-level keys must precede the [pool] table.
        writeln!(
            file,
            "names = [\"Ada\", \"Bea\"]\n\n[pool]\nid = \"t\"\ndescription = \"t\""
        )
        .unwrap();
        let pool = NamePool::from_file(file.path()).unwrap();
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn names_nested_under_pool_table_is_parse_error() {
        // A names key written after [pool] belongs to the pool table, not the
        // top level, so the pool must fail to parse rather than come up empty.
        let toml = "[pool]\nid = \"t\"\ndescription = \"t\"\nnames = [\"Ada\"]";
        let err = NamePool::parse(toml, "fixture").unwrap_err();
        assert!(matches!(err, PoolError::Parse { .. }));
    }

    #[test]
    fn missing_pool_file_is_io_error() {
        let err = NamePool::from_file(Path::new("/nonexistent/names.toml")).unwrap_err();
        assert!(matches!(err, PoolError::Io { .. }));
    }

    #[test]
    fn malformed_pool_file_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "not valid toml [[[").unwrap();
        let err = NamePool::from_file(file.path()).unwrap_err();
        assert!(matches!(err, PoolError::Parse { .. }));
    }
}
