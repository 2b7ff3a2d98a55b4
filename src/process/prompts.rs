//! Prompt table and the scanner that answers prompts from output chunks

use crate::core::config::{PromptAnswer, PromptRuleConfig};
use crate::core::MigrationError;
use regex::Regex;

/// Pattern for matching converter output
#[derive(Debug, Clone)]
pub enum PromptPattern {
    /// Simple string contains match
    Simple(String),
    /// Regular expression match
    Regex(Regex),
}

impl PromptPattern {
    /// Check if the pattern matches the given text
    pub fn matches(&self, text: &str) -> bool {
        match self {
            PromptPattern::Simple(pattern) => text.contains(pattern.as_str()),
            PromptPattern::Regex(regex) => regex.is_match(text),
        }
    }

    pub fn display(&self) -> String {
        match self {
            PromptPattern::Simple(s) => s.clone(),
            PromptPattern::Regex(r) => format!("[regex: {}]", r.as_str()),
        }
    }
}

/// One prompt and its answer
#[derive(Debug, Clone)]
pub struct PromptRule {
    pub pattern: PromptPattern,
    pub answer: PromptAnswer,
}

impl PromptRule {
    pub fn from_config(config: &PromptRuleConfig) -> Result<Self, MigrationError> {
        let pattern = if config.use_regex {
            let regex = Regex::new(&config.pattern).map_err(|e| {
                MigrationError::Config(format!("Invalid prompt regex '{}': {}", config.pattern, e))
            })?;
            PromptPattern::Regex(regex)
        } else {
            PromptPattern::Simple(config.pattern.clone())
        };

        Ok(Self {
            pattern,
            answer: config.answer,
        })
    }
}

/// Ordered prompt table, first matching rule wins
#[derive(Debug, Clone, Default)]
pub struct PromptTable {
    rules: Vec<PromptRule>,
}

impl PromptTable {
    pub fn from_config(rules: &[PromptRuleConfig]) -> Result<Self, MigrationError> {
        let rules = rules
            .iter()
            .map(PromptRule::from_config)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// First rule matching the chunk
    pub fn lookup(&self, chunk: &str) -> Option<&PromptRule> {
        self.rules.iter().find(|rule| rule.pattern.matches(chunk))
    }
}

/// An answer that was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentAnswer {
    /// The rule's pattern, for display
    pub prompt: String,
    pub answer: PromptAnswer,
}

/// Scanner state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Watching output for prompts
    Scanning,
    /// The process exited
    Exited { code: Option<i32> },
    /// Reading output or writing an answer failed
    Failed { reason: String },
}

/// Streaming prompt detector
///
/// Stays in `Scanning` while chunks arrive; every matched chunk yields
/// exactly one answer. Terminal states ignore further chunks.
#[derive(Debug)]
pub struct PromptScanner {
    table: PromptTable,
    state: ScanState,
    answers: Vec<SentAnswer>,
}

impl PromptScanner {
    pub fn new(table: PromptTable) -> Self {
        Self {
            table,
            state: ScanState::Scanning,
            answers: Vec::new(),
        }
    }

    pub fn state(&self) -> &ScanState {
        &self.state
    }

    /// Answers produced so far, in the order prompts were seen
    pub fn answers(&self) -> &[SentAnswer] {
        &self.answers
    }

    /// Feed one output chunk; returns the answer to write, if any
    pub fn on_chunk(&mut self, chunk: &str) -> Option<PromptAnswer> {
        if self.state != ScanState::Scanning {
            return None;
        }

        let rule = self.table.lookup(chunk)?;
        self.answers.push(SentAnswer {
            prompt: rule.pattern.display(),
            answer: rule.answer,
        });
        Some(rule.answer)
    }

    pub fn on_exit(&mut self, code: Option<i32>) {
        if self.state == ScanState::Scanning {
            self.state = ScanState::Exited { code };
        }
    }

    pub fn on_error(&mut self, reason: impl Into<String>) {
        if self.state == ScanState::Scanning {
            self.state = ScanState::Failed {
                reason: reason.into(),
            };
        }
    }

    pub fn into_answers(self) -> Vec<SentAnswer> {
        self.answers
    }
}
