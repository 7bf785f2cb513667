//! Action Expression grammar
//!
//! `path(args)` where `path` is a dotted identifier chain, optionally prefixed by
//! the root namespace (`window.`), and `args` is handed to the splitter.
//!
//! The closing parenthesis is taken to be the last character of the whole
//! expression; it is not matched against the first `(`. Text after a complete call
//! therefore ends up inside the argument list rather than being rejected.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ActionError;
use crate::literal::{parse_args, Literal};

/// Dotted function path, with empty segments already dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionPath(Vec<String>);

impl ActionPath {
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ActionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

/// The call shell of an action: target path plus unparsed argument text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionExpr {
    pub raw: String,
    pub path: ActionPath,
    pub raw_args: String,
}

impl ActionExpr {
    pub fn parse(action: &str, root_namespace: &str) -> Result<Self, ActionError> {
        let open = match action.find('(') {
            Some(idx) if idx > 0 => idx,
            _ => return Err(ActionError::malformed(action)),
        };
        if !action.ends_with(')') {
            return Err(ActionError::malformed(action));
        }

        let mut path_src = action[..open].trim();
        if let Some(stripped) = path_src
            .strip_prefix(root_namespace)
            .and_then(|rest| rest.strip_prefix('.'))
        {
            path_src = stripped;
        }

        let segments: Vec<String> = path_src
            .split('.')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.is_empty() {
            return Err(ActionError::malformed(action));
        }

        // `open` is at least 1 and the string ends with `)`, so `close >= open`
        let close = action.len() - 1;
        let raw_args = if close > open {
            action[open + 1..close].to_string()
        } else {
            String::new()
        };

        Ok(ActionExpr {
            raw: action.to_string(),
            path: ActionPath(segments),
            raw_args,
        })
    }

    /// Parse every argument literal in order.
    pub fn arguments(&self) -> Result<Vec<Literal>, ActionError> {
        if self.raw_args.trim().is_empty() {
            return Ok(Vec::new());
        }
        parse_args(&self.raw_args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(action: &str) -> Result<ActionExpr, ActionError> {
        ActionExpr::parse(action, "window")
    }

    #[test]
    fn test_simple_call() {
        let expr = parse("openModal('modal-link-player')").unwrap();
        assert_eq!(expr.path.to_string(), "openModal");
        assert_eq!(expr.raw_args, "'modal-link-player'");
        assert_eq!(
            expr.arguments().unwrap(),
            vec![Literal::Str("modal-link-player".into())]
        );
    }

    #[test]
    fn test_root_prefix_is_stripped() {
        let expr = parse("window.foo.bar('x', 1)").unwrap();
        assert_eq!(expr.path.segments(), ["foo", "bar"]);
        // Only a prefix followed by a dot counts
        let expr = parse("windowed.open()").unwrap();
        assert_eq!(expr.path.segments(), ["windowed", "open"]);
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        let expr = parse(".app..nav.go.()").unwrap();
        assert_eq!(expr.path.to_string(), "app.nav.go");
    }

    #[test]
    fn test_malformed_actions() {
        for action in ["foo.bar", "(1)", "foo(1", "foo(1);", "", "window.()"] {
            assert_eq!(
                parse(action),
                Err(ActionError::malformed(action)),
                "action {action:?}"
            );
        }
    }

    #[test]
    fn test_empty_argument_list() {
        let expr = parse("refresh()").unwrap();
        assert_eq!(expr.raw_args, "");
        assert!(expr.arguments().unwrap().is_empty());
        assert!(parse("refresh(   )").unwrap().arguments().unwrap().is_empty());
    }

    #[test]
    fn test_trailing_text_is_swallowed_into_args() {
        let expr = parse("go('a') + extra)").unwrap();
        assert_eq!(expr.raw_args, "'a') + extra");
        assert_eq!(
            expr.arguments(),
            Err(ActionError::unsupported("'a') + extra"))
        );
    }

    #[test]
    fn test_live_text_argument_keeps_its_parentheses() {
        let expr =
            parse("app.profile.rename(document.getElementById('profile-name').textContent)")
                .unwrap();
        assert_eq!(expr.arguments().unwrap(), vec![Literal::LiveText]);
    }
}
