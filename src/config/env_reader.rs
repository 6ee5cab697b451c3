//! Environment reader module
//!
//! This module provides a low-level abstraction over process environment
//! variables so configuration lookups can be substituted in tests.

use std::collections::HashMap;
use std::env::{self, VarError};
use thiserror::Error;

/// Errors that can occur while reading environment variables
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnvError {
    /// Variable is set but its value is not valid Unicode
    #[error("Environment variable '{key}' is not valid unicode")]
    NotUnicode { key: String },
}

/// Trait for reading configuration values from the environment
pub trait EnvReader {
    /// Get a variable by key, `None` when unset
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError>;
}

/// Reader backed by the real process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnvReader;

impl EnvReader for SystemEnvReader {
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError> {
        match env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(_)) => Err(EnvError::NotUnicode {
                key: key.to_owned(),
            }),
        }
    }
}

/// In-memory reader for tests
#[derive(Debug, Clone, Default)]
pub struct MockEnvReader {
    vars: HashMap<String, String>,
    invalid: Vec<String>,
}

impl MockEnvReader {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable
    #[must_use]
    pub fn with_var(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Mark a variable as holding non-unicode data
    #[must_use]
    pub fn with_invalid_var(mut self, key: &str) -> Self {
        self.invalid.push(key.to_owned());
        self
    }
}

impl EnvReader for MockEnvReader {
    fn get_var(&self, key: &str) -> Result<Option<String>, EnvError> {
        if self.invalid.iter().any(|k| k == key) {
            return Err(EnvError::NotUnicode {
                key: key.to_owned(),
            });
        }
        Ok(self.vars.get(key).cloned())
    }
}
