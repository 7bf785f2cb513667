//! Page runtime
//!
//! Owns the document, the resolver and the binder for one loaded page. Loading runs
//! the first bind pass over the whole document; templating code calls
//! [`Page::render_into`] or [`Page::bind`] after injecting markup.
//!
//! All methods take `&self` so an action target holding a reference to the page can
//! render and rebind while its own click is being dispatched.

use markup5ever_rcdom::Handle;
use std::cell::RefCell;
use std::rc::Rc;

use crate::bind::{self, ActionBinder, BindReport, ClickOutcome};
use crate::config::DirectiveConfig;
use crate::dom::Document;
use crate::error::ActionError;
use crate::registry::ActionRegistry;
use crate::resolve::ActionResolver;

pub struct Page {
    document: Document,
    resolver: ActionResolver,
    binder: RefCell<ActionBinder>,
}

impl Page {
    /// Parse `html` and bind the whole document once.
    pub fn load(html: &str, registry: Rc<ActionRegistry>, config: &DirectiveConfig) -> Self {
        let page = Self {
            document: Document::parse(html),
            resolver: ActionResolver::new(registry, config),
            binder: RefCell::new(ActionBinder::new(config)),
        };
        let report = page.bind(None);
        log::info!("[directive] page ready, {} actions bound", report.bound);
        page
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn resolver(&self) -> &ActionResolver {
        &self.resolver
    }

    /// Re-scan `root` (the whole document when `None`) for unbound actions.
    pub fn bind(&self, root: Option<&Handle>) -> BindReport {
        let root = root.cloned().unwrap_or_else(|| self.document.root());
        self.binder.borrow_mut().bind(&root)
    }

    /// Append `html` under the element with `container_id` and bind what arrived.
    pub fn render_into(&self, container_id: &str, html: &str) -> Result<BindReport, ActionError> {
        let container =
            self.document
                .element_by_id(container_id)
                .ok_or_else(|| ActionError::MissingContainer {
                    id: container_id.to_string(),
                })?;

        let mut report = BindReport::default();
        for node in self.document.insert_html(&container, html) {
            let pass = self.bind(Some(&node));
            report.bound += pass.bound;
            report.already_bound += pass.already_bound;
            report.skipped_empty += pass.skipped_empty;
        }
        Ok(report)
    }

    pub fn is_bound(&self, node: &Handle) -> bool {
        self.binder.borrow().is_bound(node)
    }

    /// Deliver a click to `target`. Never fails; failures are logged and flagged on the outcome.
    pub fn click(&self, target: &Handle) -> ClickOutcome {
        // Release the binder before running targets, they may rebind
        let handler = self.binder.borrow().handler_for(target);
        match handler {
            Some(handler) => bind::dispatch(&handler, &self.document, &self.resolver),
            None => ClickOutcome::default(),
        }
    }

    pub fn click_by_id(&self, id: &str) -> Option<ClickOutcome> {
        self.document.element_by_id(id).map(|node| self.click(&node))
    }
}
