//! Action Binder / Dispatcher
//!
//! Wires click behavior onto elements that carry the action attribute and runs the
//! bound action when a click reaches one.
//!
//! ## Invariants
//!
//! 1. **Bind once**: an element enters the bound set at most once for its lifetime.
//!    Repeated passes over the same subtree never add a second handler.
//! 2. **Empty is not bound**: an element whose trimmed action is empty is skipped
//!    without being recorded, so a later pass can pick it up.
//! 3. **One action per click**: a click runs the innermost bound element on its
//!    path to the root. Bound ancestors of that element do not fire.
//! 4. **Containment**: resolution errors, `Err` returns and panics from a target are
//!    logged and flagged. Nothing escapes [`dispatch`].

use markup5ever_rcdom::{Handle, Node};
use serde::Serialize;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::{Rc, Weak};

use crate::config::DirectiveConfig;
use crate::dom::{self, Document};
use crate::resolve::ActionResolver;

/// Pointer identity of a node. The binder keeps a `Weak` next to every key, which
/// pins the allocation, so a key cannot be reused while its entry exists.
fn node_key(node: &Handle) -> usize {
    Rc::as_ptr(node) as usize
}

struct BoundElement {
    node: Weak<Node>,
    action: String,
}

/// Counts from a single bind pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BindReport {
    pub bound: usize,
    pub already_bound: usize,
    pub skipped_empty: usize,
}

/// What a click did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickOutcome {
    /// A bound element was reached and its action attempted
    pub handled: bool,
    /// The action failed to resolve or failed while running
    pub failed: bool,
    /// Default navigation was suppressed (fragment link)
    pub default_prevented: bool,
}

/// The bound element that answers a click.
#[derive(Clone)]
pub struct ClickHandler {
    pub element: Handle,
    pub action: String,
}

pub struct ActionBinder {
    attribute: String,
    bound: HashMap<usize, BoundElement>,
}

impl ActionBinder {
    pub fn new(config: &DirectiveConfig) -> Self {
        Self {
            attribute: config.action_attribute.clone(),
            bound: HashMap::new(),
        }
    }

    /// Bind every qualifying element under `root` (inclusive). Safe to repeat.
    pub fn bind(&mut self, root: &Handle) -> BindReport {
        self.prune();

        let mut report = BindReport::default();
        for element in dom::elements(root) {
            let Some(raw) = dom::attribute(&element, &self.attribute) else {
                continue;
            };

            let key = node_key(&element);
            if self.bound.contains_key(&key) {
                report.already_bound += 1;
                continue;
            }

            let action = raw.trim();
            if action.is_empty() {
                report.skipped_empty += 1;
                continue;
            }

            self.bound.insert(
                key,
                BoundElement {
                    node: Rc::downgrade(&element),
                    action: action.to_string(),
                },
            );
            report.bound += 1;
        }

        log::debug!(
            "[directive] bind pass: {} bound, {} already bound, {} empty",
            report.bound,
            report.already_bound,
            report.skipped_empty
        );
        report
    }

    pub fn is_bound(&self, node: &Handle) -> bool {
        self.bound
            .get(&node_key(node))
            .map(|entry| entry.node.strong_count() > 0)
            .unwrap_or(false)
    }

    /// Number of bound elements still alive
    pub fn bound_count(&self) -> usize {
        self.bound
            .values()
            .filter(|entry| entry.node.strong_count() > 0)
            .count()
    }

    /// The handler for a click on `target`: the target itself when bound, else its
    /// nearest bound ancestor.
    pub fn handler_for(&self, target: &Handle) -> Option<ClickHandler> {
        let mut current = Some(target.clone());
        while let Some(node) = current {
            if let Some(entry) = self.bound.get(&node_key(&node)) {
                return Some(ClickHandler {
                    element: node,
                    action: entry.action.clone(),
                });
            }
            current = dom::parent_of(&node);
        }
        None
    }

    pub fn dispatch_click(
        &self,
        target: &Handle,
        document: &Document,
        resolver: &ActionResolver,
    ) -> ClickOutcome {
        match self.handler_for(target) {
            Some(handler) => dispatch(&handler, document, resolver),
            None => ClickOutcome::default(),
        }
    }

    // Drop entries whose element has been garbage collected
    fn prune(&mut self) {
        self.bound.retain(|_, entry| entry.node.strong_count() > 0);
    }
}

/// Run one handler. Failures are logged against the original action string and
/// never propagate.
pub fn dispatch(
    handler: &ClickHandler,
    document: &Document,
    resolver: &ActionResolver,
) -> ClickOutcome {
    let mut outcome = ClickOutcome {
        handled: true,
        default_prevented: dom::is_fragment_link(&handler.element),
        ..Default::default()
    };

    if let Err(e) = run_action(&handler.action, document, resolver) {
        outcome.failed = true;
        log::error!("[directive] action '{}' failed: {:#}", handler.action, e);
    }

    outcome
}

fn run_action(action: &str, document: &Document, resolver: &ActionResolver) -> anyhow::Result<()> {
    let resolved = resolver.resolve(action, document)?;

    match panic::catch_unwind(AssertUnwindSafe(|| resolved.invoke())) {
        Ok(result) => result,
        Err(_) => Err(anyhow::anyhow!("'{}' panicked", resolved.path)),
    }
}
