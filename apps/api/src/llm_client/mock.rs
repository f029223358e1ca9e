//! Scripted in-memory backend for tests.
//!
//! Each rule matches prompts containing a needle; the first matching rule
//! answers. Every prompt is recorded.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::config::GenerationParams;
use crate::llm_client::{LlmBackend, LlmError};

struct Rule {
    needle: String,
    reply: Result<String, u16>,
    failures_left: AtomicU32,
}

#[derive(Default)]
pub struct ScriptedLlm {
    rules: Vec<Rule>,
    calls: Mutex<Vec<(String, GenerationParams)>>,
}

impl ScriptedLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, needle: &str, text: &str) -> Self {
        self.rule(needle, Ok(text.to_string()), 0)
    }

    pub fn fail(self, needle: &str, status: u16) -> Self {
        self.rule(needle, Err(status), 0)
    }

    /// Answers 503 `times` times, then `text`.
    pub fn flaky(self, needle: &str, times: u32, text: &str) -> Self {
        self.rule(needle, Ok(text.to_string()), times)
    }

    fn rule(mut self, needle: &str, reply: Result<String, u16>, failures: u32) -> Self {
        self.rules.push(Rule {
            needle: needle.to_string(),
            reply,
            failures_left: AtomicU32::new(failures),
        });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(p, _)| p.clone())
            .collect()
    }

    pub fn params(&self) -> Vec<GenerationParams> {
        self.calls.lock().unwrap().iter().map(|(_, p)| *p).collect()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.calls().iter().filter(|p| p.contains(needle)).count()
    }
}

#[async_trait]
impl LlmBackend for ScriptedLlm {
    async fn generate(&self, prompt: &str, params: GenerationParams) -> Result<String, LlmError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), params));

        let Some(rule) = self.rules.iter().find(|r| prompt.contains(&r.needle)) else {
            return Err(LlmError::Api {
                status: 500,
                message: "no scripted reply".into(),
            });
        };

        if rule
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(LlmError::Api {
                status: 503,
                message: "temporarily unavailable".into(),
            });
        }

        match &rule.reply {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(LlmError::Api {
                status: *status,
                message: "scripted failure".into(),
            }),
        }
    }
}
