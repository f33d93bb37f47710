//! Model backends: sending prompts to language models and reading answers.
//!
//! The [`Answerer`] trait abstracts over backends. HTTP backends use blocking
//! `ureq` calls; the [`DummyAnswerer`] answers offline with a fixed reply for
//! tests and dry runs. There is deliberately no retry or rate-limit logic
//! here: one prompt in, one response out.

use std::time::Duration;

use crate::error::{ModelError, ModelResult};

const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

/// Anything that can answer a rendered prompt.
pub trait Answerer {
    /// Send one prompt and return the model's raw text answer.
    fn answer(&self, prompt: &str) -> ModelResult<String>;

    /// The model id this backend was configured with.
    fn model_id(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Dummy backend
// ---------------------------------------------------------------------------

/// Offline backend that always answers "no". Useful for plumbing tests.
pub struct DummyAnswerer;

impl Answerer for DummyAnswerer {
    fn answer(&self, _prompt: &str) -> ModelResult<String> {
        Ok("\"Answer: no\"".to_string())
    }

    fn model_id(&self) -> &str {
        "dummy"
    }
}

// ---------------------------------------------------------------------------
// OpenAI backend
// ---------------------------------------------------------------------------

/// Chat-completions backend for OpenAI models.
pub struct OpenAiAnswerer {
    api_key: String,
    model: String,
}

impl OpenAiAnswerer {
    /// Build a backend for `model`, reading the key from `OPENAI_API_KEY`.
    pub fn new(model: &str) -> ModelResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ModelError::MissingKey {
                env_var: "OPENAI_API_KEY",
            })?;
        Ok(Self {
            api_key,
            model: model.to_string(),
        })
    }
}

impl Answerer for OpenAiAnswerer {
    fn answer(&self, prompt: &str) -> ModelResult<String> {
        let resp = ureq::post("https://api.openai.com/v1/chat/completions")
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .timeout(HTTP_TIMEOUT)
            .send_json(serde_json::json!({
                "model": self.model,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .map_err(|e| ModelError::Request {
                backend: "openai",
                message: e.to_string(),
            })?;

        let body: serde_json::Value = resp.into_json().map_err(|e| ModelError::Malformed {
            backend: "openai",
            message: e.to_string(),
        })?;

        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ModelError::Malformed {
                backend: "openai",
                message: "missing choices[0].message.content".to_string(),
            })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Anthropic backend
// ---------------------------------------------------------------------------

/// Messages-API backend for Anthropic models.
pub struct AnthropicAnswerer {
    api_key: String,
    model: String,
}

impl AnthropicAnswerer {
    /// Build a backend for `model`, reading the key from `ANTHROPIC_API_KEY`.
    pub fn new(model: &str) -> ModelResult<Self> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| ModelError::MissingKey {
                env_var: "ANTHROPIC_API_KEY",
            })?;
        Ok(Self {
            api_key,
            model: model.to_string(),
        })
    }
}

impl Answerer for AnthropicAnswerer {
    fn answer(&self, prompt: &str) -> ModelResult<String> {
        let resp = ureq::post("https://api.anthropic.com/v1/messages")
            .set("x-api-key", &self.api_key)
            .set("anthropic-version", "2023-06-01")
            .timeout(HTTP_TIMEOUT)
            .send_json(serde_json::json!({
                "model": self.model,
                "max_tokens": 1024,
                "messages": [{ "role": "user", "content": prompt }],
            }))
            .map_err(|e| ModelError::Request {
                backend: "anthropic",
                message: e.to_string(),
            })?;

        let body: serde_json::Value = resp.into_json().map_err(|e| ModelError::Malformed {
            backend: "anthropic",
            message: e.to_string(),
        })?;

        body["content"][0]["text"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ModelError::Malformed {
                backend: "anthropic",
                message: "missing content[0].text".to_string(),
            })
    }

    fn model_id(&self) -> &str {
        &self.model
    }
}

// ---------------------------------------------------------------------------
// Dispatch & answer parsing
// ---------------------------------------------------------------------------

/// Pick a backend from the model id.
///
/// Ids containing "claude" route to Anthropic, "gpt" or "o1" to OpenAI, and
/// the literal "dummy" to the offline backend.
pub fn answerer_for(model_id: &str) -> ModelResult<Box<dyn Answerer>> {
    let lower = model_id.to_lowercase();
    if lower.contains("claude") {
        return Ok(Box::new(AnthropicAnswerer::new(model_id)?));
    }
    if lower.contains("gpt") || lower.contains("o1") {
        return Ok(Box::new(OpenAiAnswerer::new(model_id)?));
    }
    if model_id == "dummy" {
        return Ok(Box::new(DummyAnswerer));
    }
    Err(ModelError::UnknownModel {
        model_id: model_id.to_string(),
    })
}

/// Parse a model's free-text answer into a boolean.
///
/// Looks at the text after the last occurrence of "answer". "yes" means
/// believed; "no" means not believed; "not" is treated as indeterminate
/// (it would otherwise match "no" inside e.g. "cannot").
pub fn parse_answer(text: &str) -> Option<bool> {
    let lower = text.to_lowercase();
    let tail = lower.rsplit("answer").next().unwrap_or(&lower);
    if tail.contains("yes") {
        return Some(true);
    }
    if tail.contains("not") {
        return None;
    }
    if tail.contains("no") {
        return Some(false);
    }
    None
}
