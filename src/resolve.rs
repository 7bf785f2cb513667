//! Action Resolver
//!
//! Turns an action string into a callable target plus its evaluated arguments.
//! Checks run in a fixed order: syntax, path lookup, callability, then argument
//! literals. Every check completes before anything is invoked.

use std::fmt;
use std::rc::Rc;

use crate::config::DirectiveConfig;
use crate::error::ActionError;
use crate::expr::ActionExpr;
use crate::literal::{ArgValue, LiveTextSource};
use crate::registry::{ActionFn, ActionRegistry, Binding};

/// A target ready to call, with arguments already evaluated.
#[derive(Clone)]
pub struct ResolvedAction {
    pub path: String,
    pub target: ActionFn,
    pub args: Vec<ArgValue>,
}

impl ResolvedAction {
    /// Call the target with the arguments as positional parameters.
    pub fn invoke(&self) -> anyhow::Result<()> {
        (self.target)(self.args.as_slice())
    }
}

impl fmt::Debug for ResolvedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAction")
            .field("path", &self.path)
            .field("args", &self.args)
            .finish_non_exhaustive()
    }
}

pub struct ActionResolver {
    registry: Rc<ActionRegistry>,
    root_namespace: String,
}

impl ActionResolver {
    pub fn new(registry: Rc<ActionRegistry>, config: &DirectiveConfig) -> Self {
        Self {
            registry,
            root_namespace: config.root_namespace.clone(),
        }
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn resolve(
        &self,
        action: &str,
        live_text: &dyn LiveTextSource,
    ) -> Result<ResolvedAction, ActionError> {
        let expr = ActionExpr::parse(action, &self.root_namespace)?;
        let path = expr.path.to_string();

        let target = match self.registry.lookup(expr.path.segments()) {
            Some(Binding::Function(f)) => Rc::clone(f),
            Some(_) => return Err(ActionError::NotCallable { path }),
            None => return Err(ActionError::UnresolvedPath { path }),
        };

        let args = expr
            .arguments()?
            .iter()
            .map(|literal| literal.evaluate(live_text))
            .collect();

        Ok(ResolvedAction { path, target, args })
    }
}
