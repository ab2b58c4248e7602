//! Errors raised while wiring the facade together.

use std::error::Error;
use std::fmt::{Display, Formatter};

use pmemory::MemoryError;
use pprovider::CompletionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParleyErrorKind {
    Configuration,
    Completion,
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParleyError {
    pub kind: ParleyErrorKind,
    pub message: String,
}

impl ParleyError {
    pub fn new(kind: ParleyErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ParleyErrorKind::Configuration, message)
    }
}

impl Display for ParleyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for ParleyError {}

impl From<CompletionError> for ParleyError {
    fn from(value: CompletionError) -> Self {
        Self::new(ParleyErrorKind::Completion, value.to_string())
    }
}

impl From<MemoryError> for ParleyError {
    fn from(value: MemoryError) -> Self {
        Self::new(ParleyErrorKind::Memory, value.to_string())
    }
}
