//! # Dashboard Action Directives
//!
//! Markup declares click behavior as a one-line call in an attribute:
//!
//! ```html
//! <button data-action="app.nav.show({section: 'sessions'}, 'recent', 20)">Sessions</button>
//! ```
//!
//! ## Pipeline
//!
//! Binder → Resolver → Splitter → Literal Parser → invocation.
//!
//! ## Invariants
//!
//! 1. **Closed Grammar**: a dotted path, one parenthesized argument list, and the
//!    literal forms of [`Literal`]. Nothing else is evaluated.
//!
//! 2. **Explicit Registry**: targets are looked up in an injected [`ActionRegistry`],
//!    never in ambient global state.
//!
//! 3. **Resolve Before Invoke**: malformed syntax, unknown paths, non-callable targets
//!    and unsupported literals are all reported before a target runs.
//!
//! 4. **Raw Strings**: quoted literals keep their backslash escapes exactly as
//!    written. The splitter only honors escapes to find the closing quote.
//!
//! 5. **Lenient Tail**: the last character of the expression closes the argument
//!    list. It is not matched against the first `(`.
//!
//! 6. **Contained Clicks**: a failing action is logged and swallowed at the click
//!    boundary. The page stays interactive.

#[cfg(feature = "napi")]
use napi_derive::napi;

mod audit;
mod bind;
mod config;
mod dom;
mod error;
mod expr;
mod literal;
pub mod logging;
mod page;
mod registry;
mod resolve;
mod split;

#[cfg(test)]
mod dispatch_tests;

pub use audit::{audit_directory, audit_markup, ActionFinding, AuditReport};
pub use bind::{dispatch, ActionBinder, BindReport, ClickHandler, ClickOutcome};
pub use config::DirectiveConfig;
pub use dom::Document;
pub use error::*;
pub use expr::{ActionExpr, ActionPath};
pub use literal::{
    parse_args, ArgValue, Literal, LiveTextSource, NoLiveText, LIVE_TEXT_ELEMENT_ID,
    LIVE_TEXT_EXPRESSION,
};
pub use page::Page;
pub use registry::{ActionFn, ActionRegistry, Binding, Namespace};
pub use resolve::{ActionResolver, ResolvedAction};
pub use split::split_args;

// Node handles for callers that walk the document themselves
pub use markup5ever_rcdom::Handle;

// ═══════════════════════════════════════════════════════════════════════════════
// NAPI EXPORTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "napi")]
#[napi]
pub fn directive_bridge() -> String {
    logging::init_logging(logging::LoggingConfig::default());
    "Directive Native Bridge Connected".to_string()
}

#[cfg(feature = "napi")]
#[napi]
pub fn split_args_native(args: String) -> Vec<String> {
    split_args(&args)
}

/// Parse an action expression into `{ path, args }` without resolving it.
#[cfg(feature = "napi")]
#[napi]
pub fn parse_action_native(action: String) -> napi::Result<serde_json::Value> {
    let config = DirectiveConfig::default();
    let expr = ActionExpr::parse(action.trim(), &config.root_namespace)
        .map_err(|e| napi::Error::from_reason(format!("{}: {}", e.code(), e)))?;
    let args = expr
        .arguments()
        .map_err(|e| napi::Error::from_reason(format!("{}: {}", e.code(), e)))?;

    Ok(serde_json::json!({
        "path": expr.path.segments(),
        "args": args,
    }))
}

#[cfg(feature = "napi")]
#[napi]
pub fn audit_templates_native(
    dir: String,
    config_json: Option<String>,
) -> napi::Result<serde_json::Value> {
    let config = match config_json {
        Some(json) => {
            DirectiveConfig::from_json(&json).map_err(|e| napi::Error::from_reason(e.to_string()))?
        }
        None => DirectiveConfig::default(),
    };
    let report = audit_directory(std::path::Path::new(&dir), &config, None);
    serde_json::to_value(report).map_err(|e| napi::Error::from_reason(e.to_string()))
}
