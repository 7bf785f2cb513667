use thiserror::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// DIAGNOSTIC CODES
// ═══════════════════════════════════════════════════════════════════════════════

pub const ERR_MALFORMED_ACTION: &str = "ACT001";
pub const ERR_UNRESOLVED_PATH: &str = "ACT002";
pub const ERR_NOT_CALLABLE: &str = "ACT003";
pub const ERR_UNSUPPORTED_ARGUMENT: &str = "ACT004";
pub const ERR_MISSING_CONTAINER: &str = "ACT005";

fn get_hint(code: &str) -> &'static str {
    match code {
        ERR_MALFORMED_ACTION => "Actions are written as `path.to.fn(arg, ...)` and must end with `)`.",
        ERR_UNRESOLVED_PATH => "Every action target must be registered before the page binds.",
        ERR_NOT_CALLABLE => "The action path names a namespace or value, not a function.",
        ERR_UNSUPPORTED_ARGUMENT => {
            "Arguments may be quoted strings, integers, booleans, {section: 'name'} or the profile name text."
        }
        ERR_MISSING_CONTAINER => "Markup can only be rendered into an element that exists in the document.",
        _ => "Unknown diagnostic.",
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ACTION ERRORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Everything that can go wrong between reading an action attribute and calling
/// its target. All variants are raised before the target is invoked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("malformed action '{action}'")]
    MalformedAction { action: String },

    #[error("action target '{path}' is not defined")]
    UnresolvedPath { path: String },

    #[error("action target '{path}' is not a function")]
    NotCallable { path: String },

    #[error("unsupported argument token: {token}")]
    UnsupportedArgumentToken { token: String },

    #[error("no element with id '{id}' to render into")]
    MissingContainer { id: String },
}

impl ActionError {
    pub fn malformed(action: &str) -> Self {
        Self::MalformedAction {
            action: action.to_string(),
        }
    }

    pub fn unsupported(token: &str) -> Self {
        Self::UnsupportedArgumentToken {
            token: token.to_string(),
        }
    }

    /// Stable diagnostic code for this error kind
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedAction { .. } => ERR_MALFORMED_ACTION,
            Self::UnresolvedPath { .. } => ERR_UNRESOLVED_PATH,
            Self::NotCallable { .. } => ERR_NOT_CALLABLE,
            Self::UnsupportedArgumentToken { .. } => ERR_UNSUPPORTED_ARGUMENT,
            Self::MissingContainer { .. } => ERR_MISSING_CONTAINER,
        }
    }

    pub fn hint(&self) -> &'static str {
        get_hint(self.code())
    }
}

/// Errors raised while populating an [`crate::registry::ActionRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("cannot register an empty path")]
    EmptyPath,

    #[error("'{segment}' in '{path}' is already bound to a non-namespace value")]
    PathConflict { path: String, segment: String },
}

/// Errors raised while loading a [`crate::config::DirectiveConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid directive config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid directive config: {0}")]
    Invalid(String),
}
