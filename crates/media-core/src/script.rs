//! Media scripts
//!
//! A script is an ordered list of `action:value` steps:
//!
//! | token             | meaning                                  |
//! |-------------------|------------------------------------------|
//! | `silence:<ms>`    | send `<ms>` milliseconds of silent audio |
//! | `dtmf:<digit>`    | send one RFC 4733 event (`0-9*#A-D`)     |
//! | `play:<path>`     | send the audio in a WAV file             |

use std::fmt;
use std::path::Path;

use sipcap_rtp_core::DtmfEvent;

use crate::error::{MediaError, Result};

/// Kind of media a step produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepAction {
    Silence,
    Dtmf,
    Play,
}

impl StepAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Silence => "silence",
            Self::Dtmf => "dtmf",
            Self::Play => "play",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "silence" => Some(Self::Silence),
            "dtmf" => Some(Self::Dtmf),
            "play" => Some(Self::Play),
            _ => None,
        }
    }
}

/// A step with its value already interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction<'a> {
    Silence { duration_ms: u64 },
    Dtmf { event: DtmfEvent },
    Play { path: &'a Path },
}

/// One validated `action:value` step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    action: StepAction,
    value: String,
}

impl Step {
    /// Parse an `action:value` token
    pub fn parse(token: &str) -> Result<Self> {
        let (name, value) = token
            .split_once(':')
            .ok_or_else(|| MediaError::invalid_step(token, "expected action:value"))?;
        let action = StepAction::from_name(name)
            .ok_or_else(|| MediaError::invalid_step(token, format!("unknown action {:?}", name)))?;

        let step = Self {
            action,
            value: value.to_string(),
        };
        if step.instruction().is_none() {
            let reason = match action {
                StepAction::Silence => "silence takes a duration in milliseconds",
                StepAction::Dtmf => "dtmf takes one of 0-9 * # A-D",
                StepAction::Play => "play takes a file path",
            };
            return Err(MediaError::invalid_step(token, reason));
        }
        Ok(step)
    }

    pub fn action(&self) -> StepAction {
        self.action
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Interpret the value for this step's action, `None` if it does not fit
    pub fn instruction(&self) -> Option<Instruction<'_>> {
        match self.action {
            StepAction::Silence => self
                .value
                .parse()
                .ok()
                .map(|duration_ms| Instruction::Silence { duration_ms }),
            StepAction::Dtmf => DtmfEvent::parse(&self.value)
                .ok()
                .map(|event| Instruction::Dtmf { event }),
            StepAction::Play if !self.value.is_empty() => Some(Instruction::Play {
                path: Path::new(&self.value),
            }),
            StepAction::Play => None,
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.action.as_str(), self.value)
    }
}

/// Ordered, append-only sequence of steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaScript {
    steps: Vec<Step>,
}

impl MediaScript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a script from a sequence of tokens, failing on the first bad one
    pub fn from_tokens<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut script = Self::new();
        for token in tokens {
            script.append(token.as_ref())?;
        }
        Ok(script)
    }

    /// Validate and append a step. The script is untouched on error.
    pub fn append(&mut self, token: &str) -> Result<()> {
        let step = Step::parse(token)?;
        self.steps.push(step);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Drop every step
    pub fn reset(&mut self) {
        self.steps.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_valid_steps() {
        let mut script = MediaScript::new();
        assert!(script.is_empty());

        script.append("silence:500").unwrap();
        script.append("dtmf:#").unwrap();
        script.append("play:/tmp/a:b.wav").unwrap();

        assert_eq!(script.len(), 3);
        assert_eq!(script.steps()[0].instruction(), Some(Instruction::Silence { duration_ms: 500 }));
        assert_eq!(
            script.steps()[1].instruction(),
            Some(Instruction::Dtmf { event: DtmfEvent::Pound })
        );
        // Only the first colon separates action from value
        assert_eq!(script.steps()[2].value(), "/tmp/a:b.wav");
        assert_eq!(script.steps()[2].to_string(), "play:/tmp/a:b.wav");
    }

    #[test]
    fn test_unknown_action_is_rejected_without_mutation() {
        let mut script = MediaScript::new();
        script.append("silence:20").unwrap();

        let err = script.append("foo:bar").unwrap_err();
        match err {
            MediaError::InvalidStep { token, .. } => assert_eq!(token, "foo:bar"),
            other => panic!("unexpected error {:?}", other),
        }
        assert_eq!(script.len(), 1);
    }

    #[test]
    fn test_malformed_values_are_rejected() {
        for token in ["silence", "silence:abc", "silence:-5", "dtmf:", "dtmf:12", "dtmf:x", "play:", "Silence:10"] {
            assert!(
                matches!(Step::parse(token), Err(MediaError::InvalidStep { .. })),
                "{} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_reset_and_from_tokens() {
        let mut script = MediaScript::from_tokens(["silence:40", "dtmf:1"]).unwrap();
        assert_eq!(script.len(), 2);
        script.reset();
        assert!(script.is_empty());

        assert!(MediaScript::from_tokens(["dtmf:1", "nope:1"]).is_err());
    }
}
