use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::position::Range;

/// Which stage of the parse reported an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSource {
    /// The leading `---` metadata block.
    Frontmatter,
}

impl ErrorSource {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorSource::Frontmatter => "frontmatter",
        }
    }
}

impl fmt::Display for ErrorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single located parse error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{origin} error at {}:{}: {message}", .range.start.line + 1, .range.start.character + 1)]
pub struct ParseError {
    #[serde(rename = "source")]
    pub origin: ErrorSource,
    pub message: String,
    pub range: Range,
}

impl ParseError {
    pub fn frontmatter(message: impl Into<String>, range: Range) -> Self {
        Self {
            origin: ErrorSource::Frontmatter,
            message: message.into(),
            range,
        }
    }
}

/// The failure half of a parse: a non-empty, ordered list of errors and no
/// partial document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("failed to parse document: {}", first_message(.errors))]
pub struct ParseFailure {
    errors: Vec<ParseError>,
}

impl ParseFailure {
    pub(crate) fn single(error: ParseError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }
}

fn first_message(errors: &[ParseError]) -> String {
    match errors {
        [] => String::new(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{first} (and {} more)", rest.len()),
    }
}
