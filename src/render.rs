//! Prompt rendering: preamble, testimony lines, and the closing question.
//!
//! Sentence order may be permuted when shuffling is enabled. This never
//! changes the ground truth: the attack edges are encoded inside each
//! sentence's text, not by position.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::testimony::Sentence;

/// Fixed instructional preamble establishing the evaluation rule.
pub const PREAMBLE: &str = "The following is a reasoning puzzle. Witnesses should be believed \
     unless there is testimony that they are lying. Now consider the following facts:";

/// Lead-in for the closing question line.
pub const QUESTION_PREAMBLE: &str = "Question: should it be believed that ";

/// Fixed suffix instructing the consumer to answer with a literal yes/no tag.
pub const ANSWER_INSTRUCTION: &str = "End your answer with: \"Answer: yes or no\"";

/// Serialize sentences into the final puzzle text.
///
/// `question` is the already-chosen surface form of the claim: the raw
/// statement (with a trailing "?") for linear cases, the question-phrased
/// `statement_q` for branching ones. The two variants deliberately differ
/// and are not unified here.
pub fn render<R: Rng>(sentences: &[Sentence], question: &str, shuffle: bool, rng: &mut R) -> String {
    let mut lines: Vec<&str> = sentences.iter().map(|s| s.text.as_str()).collect();
    if shuffle {
        lines.shuffle(rng);
    }
    format!(
        "{PREAMBLE}\n{}\n{QUESTION_PREAMBLE}{question}\n{ANSWER_INSTRUCTION}",
        lines.join("\n")
    )
}
