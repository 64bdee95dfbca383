//! Graph compilation error.

use thiserror::Error;

/// Error from `StateGraph::compile`: edges must reference known nodes and form
/// one chain from START to END, with at most one outgoing edge per node.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// An edge references a node id that was never registered.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// No edge from START, or more than one.
    #[error("graph must have exactly one edge from START")]
    MissingStart,

    /// No path reaches END.
    #[error("graph must have an edge or conditional path to END")]
    MissingEnd,

    /// Unconditional edges branch or cycle.
    #[error("edges must form a single chain from START to END: {0}")]
    InvalidChain(String),

    /// A node has both an outgoing edge and conditional edges.
    #[error("node has both edge and conditional edges: {0}")]
    NodeHasBothEdgeAndConditional(String),

    /// A conditional path_map value is neither a node id nor END.
    #[error("conditional path_map invalid target: {0}")]
    InvalidConditionalPathMap(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Scenario**: each variant's Display names the failure and, where present, the id.
    #[test]
    fn display_carries_failure_and_id() {
        let s = CompilationError::NodeNotFound("x".into()).to_string();
        assert!(s.contains("node not found") && s.contains('x'), "{}", s);
        assert!(CompilationError::MissingStart.to_string().contains("START"));
        assert!(CompilationError::MissingEnd.to_string().contains("END"));
        let s = CompilationError::NodeHasBothEdgeAndConditional("a".into()).to_string();
        assert!(s.contains('a'), "{}", s);
        let s = CompilationError::InvalidConditionalPathMap("b".into()).to_string();
        assert!(s.contains('b'), "{}", s);
    }
}
