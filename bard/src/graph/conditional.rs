//! Conditional edge router: pick the next node from the state after a node ran.

use std::collections::HashMap;
use std::sync::Arc;

/// Routing function for conditional edges: `(state) -> key`.
pub type ConditionalRouterFn<S> = Arc<dyn Fn(&S) -> String + Send + Sync>;

/// Router attached to a source node by `add_conditional_edges`.
///
/// The key returned by `path` is looked up in `path_map` when present;
/// otherwise it is used directly as the next node id (or END).
pub(crate) struct ConditionalRouter<S> {
    pub path: ConditionalRouterFn<S>,
    pub path_map: Option<HashMap<String, String>>,
}

impl<S> Clone for ConditionalRouter<S> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            path_map: self.path_map.clone(),
        }
    }
}

impl<S> ConditionalRouter<S> {
    pub fn new(path: ConditionalRouterFn<S>, path_map: Option<HashMap<String, String>>) -> Self {
        Self { path, path_map }
    }

    /// Resolves the next node id for the given state.
    pub fn resolve_next(&self, state: &S) -> String {
        let key = (self.path)(state);
        match &self.path_map {
            Some(map) => map.get(&key).cloned().unwrap_or(key),
            None => key,
        }
    }
}

/// How to find the node after a given node: a fixed edge or a router.
pub(crate) enum NextEntry<S> {
    Unconditional(String),
    Conditional(ConditionalRouter<S>),
}

impl<S> Clone for NextEntry<S> {
    fn clone(&self) -> Self {
        match self {
            Self::Unconditional(id) => Self::Unconditional(id.clone()),
            Self::Conditional(router) => Self::Conditional(router.clone()),
        }
    }
}
