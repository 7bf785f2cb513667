//! Action Registry
//!
//! An explicit namespace tree of invokable functions. Markup can only reach what
//! has been registered here; the resolver walks it one path segment at a time.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::rc::Rc;

use crate::error::RegistryError;
use crate::literal::ArgValue;

/// A registered action target. Arguments arrive positionally.
pub type ActionFn = Rc<dyn Fn(&[ArgValue]) -> anyhow::Result<()>>;

/// What a path segment is bound to.
#[derive(Clone)]
pub enum Binding {
    Function(ActionFn),
    Namespace(Namespace),
    /// Plain data reachable by path but not callable
    Value(serde_json::Value),
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Function(_) => write!(f, "Function"),
            Binding::Namespace(ns) => f.debug_tuple("Namespace").field(ns).finish(),
            Binding::Value(v) => f.debug_tuple("Value").field(v).finish(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Namespace {
    members: HashMap<String, Binding>,
}

impl Namespace {
    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.members.get(name)
    }

    fn collect_callables(&self, prefix: &str, out: &mut BTreeSet<String>) {
        for (name, binding) in &self.members {
            let path = if prefix.is_empty() {
                name.clone()
            } else {
                format!("{}.{}", prefix, name)
            };
            match binding {
                Binding::Function(_) => {
                    out.insert(path);
                }
                Binding::Namespace(ns) => ns.collect_callables(&path, out),
                Binding::Value(_) => {}
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ActionRegistry {
    root: Namespace,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `f` under a dotted path, creating namespaces along the way.
    /// Re-registering an existing leaf replaces it.
    pub fn register<F>(&mut self, path: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&[ArgValue]) -> anyhow::Result<()> + 'static,
    {
        self.bind(path, Binding::Function(Rc::new(f)))
    }

    /// Bind a non-callable value, e.g. configuration the page exposes by name.
    pub fn define_value(
        &mut self,
        path: &str,
        value: serde_json::Value,
    ) -> Result<(), RegistryError> {
        self.bind(path, Binding::Value(value))
    }

    fn bind(&mut self, path: &str, binding: Binding) -> Result<(), RegistryError> {
        let segments: Vec<&str> = path.split('.').filter(|s| !s.is_empty()).collect();
        let Some((leaf, parents)) = segments.split_last() else {
            return Err(RegistryError::EmptyPath);
        };

        let mut ns = &mut self.root;
        for segment in parents {
            let entry = ns
                .members
                .entry(segment.to_string())
                .or_insert_with(|| Binding::Namespace(Namespace::default()));
            ns = match entry {
                Binding::Namespace(inner) => inner,
                _ => {
                    return Err(RegistryError::PathConflict {
                        path: path.to_string(),
                        segment: segment.to_string(),
                    })
                }
            };
        }

        ns.members.insert(leaf.to_string(), binding);
        Ok(())
    }

    /// Walk the tree; any missing or non-namespace intermediate yields `None`.
    pub fn lookup(&self, segments: &[String]) -> Option<&Binding> {
        let (last, parents) = segments.split_last()?;
        let mut ns = &self.root;
        for segment in parents {
            match ns.get(segment)? {
                Binding::Namespace(inner) => ns = inner,
                _ => return None,
            }
        }
        ns.get(last)
    }

    /// Every dotted path that resolves to a function.
    pub fn callable_paths(&self) -> BTreeSet<String> {
        let mut out = BTreeSet::new();
        self.root.collect_callables("", &mut out);
        out
    }
}
