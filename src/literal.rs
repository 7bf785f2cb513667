//! Argument Literal Parser
//!
//! Turns one splitter token into a [`Literal`], the closed set of argument forms an
//! action may carry, and evaluates literals into runtime [`ArgValue`]s.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::split::split_args;

/// The one recognized live-text expression.
pub const LIVE_TEXT_EXPRESSION: &str = "document.getElementById('profile-name').textContent";

/// Id of the element whose text the live-text literal reads.
pub const LIVE_TEXT_ELEMENT_ID: &str = "profile-name";

lazy_static! {
    static ref INTEGER_RE: Regex = Regex::new(r"^-?[0-9]+$").unwrap();
    static ref SECTION_RE: Regex =
        Regex::new(r"^\{\s*section\s*:\s*'([A-Za-z0-9_-]+)'\s*\}$").unwrap();
}

// ═══════════════════════════════════════════════════════════════════════════════
// TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// A syntactic argument literal. Adding a new argument form means adding a
/// variant here and a recognizer in [`Literal::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "kebab-case")]
pub enum Literal {
    Str(String),
    Int(i64),
    Bool(bool),
    Section(String),
    LiveText,
}

/// An argument as the invoked function receives it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ArgValue {
    String { value: String },
    Number { value: i64 },
    Boolean { value: bool },
    SectionRef { section: String },
    LiveText { value: String },
}

impl ArgValue {
    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            value: value.into(),
        }
    }

    pub fn number(value: i64) -> Self {
        Self::Number { value }
    }

    pub fn boolean(value: bool) -> Self {
        Self::Boolean { value }
    }

    pub fn section(section: impl Into<String>) -> Self {
        Self::SectionRef {
            section: section.into(),
        }
    }

    /// Text of string-like values (strings and live text)
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String { value } | Self::LiveText { value } => Some(value),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean { value } => Some(*value),
            _ => None,
        }
    }

    pub fn as_section(&self) -> Option<&str> {
        match self {
            Self::SectionRef { section } => Some(section),
            _ => None,
        }
    }
}

/// Where live-text literals read their value from at evaluation time.
pub trait LiveTextSource {
    /// Current text content of the element with `id`, if it exists
    fn text_by_id(&self, id: &str) -> Option<String>;
}

/// A source with no elements; live text always evaluates to "".
pub struct NoLiveText;

impl LiveTextSource for NoLiveText {
    fn text_by_id(&self, _id: &str) -> Option<String> {
        None
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PARSING
// ═══════════════════════════════════════════════════════════════════════════════

impl Literal {
    /// Recognize a single trimmed token. First matching form wins.
    pub fn parse(token: &str) -> Result<Self, ActionError> {
        if let Some(inner) = quoted_contents(token) {
            // Escapes are kept as written
            return Ok(Literal::Str(inner.to_string()));
        }

        match token {
            "true" => return Ok(Literal::Bool(true)),
            "false" => return Ok(Literal::Bool(false)),
            _ => {}
        }

        if INTEGER_RE.is_match(token) {
            return token
                .parse::<i64>()
                .map(Literal::Int)
                .map_err(|_| ActionError::unsupported(token));
        }

        if let Some(caps) = SECTION_RE.captures(token) {
            return Ok(Literal::Section(caps[1].to_string()));
        }

        if token == LIVE_TEXT_EXPRESSION {
            return Ok(Literal::LiveText);
        }

        Err(ActionError::unsupported(token))
    }

    /// Produce the runtime value. Live text is read now, not deferred.
    pub fn evaluate(&self, source: &dyn LiveTextSource) -> ArgValue {
        match self {
            Literal::Str(s) => ArgValue::string(s.clone()),
            Literal::Int(n) => ArgValue::number(*n),
            Literal::Bool(b) => ArgValue::boolean(*b),
            Literal::Section(name) => ArgValue::section(name.clone()),
            Literal::LiveText => ArgValue::LiveText {
                value: source.text_by_id(LIVE_TEXT_ELEMENT_ID).unwrap_or_default(),
            },
        }
    }
}

/// Text between matching outer quotes, if the token is fully wrapped in them
fn quoted_contents(token: &str) -> Option<&str> {
    if token.len() < 2 {
        return None;
    }
    let first = token.chars().next()?;
    if (first == '\'' || first == '"') && token.ends_with(first) {
        Some(&token[1..token.len() - 1])
    } else {
        None
    }
}

/// Split a raw argument list and parse every token, stopping at the first failure.
pub fn parse_args(raw: &str) -> Result<Vec<Literal>, ActionError> {
    split_args(raw)
        .iter()
        .map(|token| Literal::parse(token))
        .collect()
}
