//! Named lexer options
//!
//! Options arrive as strings (`-O startinline=true`). Each language reads the ones it knows
//! through an `OptionReport`, which falls back to the documented default for any value it
//! cannot use and records why.

use super::error::OptionError;
use crate::log_warning;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexerOptions {
    values: BTreeMap<String, String>,
}

impl LexerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Split `key=value`; whitespace around both halves is trimmed
    pub fn parse_assignment(assignment: &str) -> Result<(String, String), OptionError> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(OptionError::MalformedAssignment {
                assignment: assignment.to_string(),
            }),
        }
    }

    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, OptionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::new();
        for assignment in assignments {
            let (key, value) = Self::parse_assignment(assignment.as_ref())?;
            options.set(&key, &value);
        }
        Ok(options)
    }

    /// `1/yes/true/on` or `0/no/false/off`, any case; `None` when unset
    pub fn get_bool(&self, name: &str) -> Result<Option<bool>, OptionError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };

        match value.to_lowercase().as_str() {
            "1" | "yes" | "true" | "on" => Ok(Some(true)),
            "0" | "no" | "false" | "off" => Ok(Some(false)),
            _ => Err(OptionError::InvalidValue {
                option: name.to_string(),
                value: value.to_string(),
                expected: "one of 1, yes, true, on, 0, no, false, off",
            }),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<Option<i64>, OptionError> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };

        value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| OptionError::InvalidValue {
                option: name.to_string(),
                value: value.to_string(),
                expected: "an integer",
            })
    }

    /// Items separated by whitespace or commas
    pub fn get_list(&self, name: &str) -> Option<Vec<String>> {
        self.get(name).map(|value| {
            value
                .split(|c: char| c.is_whitespace() || c == ',')
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
    }
}

/// Reads options for one lexer, substituting defaults and collecting problems
#[derive(Debug)]
pub struct OptionReport<'o> {
    lexer: &'static str,
    options: &'o LexerOptions,
    errors: Vec<OptionError>,
}

impl<'o> OptionReport<'o> {
    pub fn new(lexer: &'static str, options: &'o LexerOptions) -> Self {
        Self {
            lexer,
            options,
            errors: Vec::new(),
        }
    }

    pub fn bool(&mut self, name: &str, default: bool) -> bool {
        match self.options.get_bool(name) {
            Ok(value) => value.unwrap_or(default),
            Err(error) => {
                self.push(error);
                default
            }
        }
    }

    pub fn int(&mut self, name: &str, default: i64) -> i64 {
        match self.options.get_int(name) {
            Ok(value) => value.unwrap_or(default),
            Err(error) => {
                self.push(error);
                default
            }
        }
    }

    pub fn list(&self, name: &str, default: &[&str]) -> Vec<String> {
        self.options
            .get_list(name)
            .unwrap_or_else(|| default.iter().map(|s| s.to_string()).collect())
    }

    /// Record a problem found by the language itself, e.g. an unknown list entry
    pub fn push(&mut self, error: OptionError) {
        log_warning!(code = error.error_code(), &error.to_string(),
            "lexer" => self.lexer,
            "option" => error.option().unwrap_or_default()
        );
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[OptionError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<OptionError> {
        self.errors
    }
}
