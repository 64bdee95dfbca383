//! Next-step result returned by a node.

/// Where execution goes after a node has run.
///
/// - **Continue**: follow the node's outgoing edge (or END if none).
/// - **Node(id)**: jump to the node with that id.
/// - **End**: stop and return the current state.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Next {
    /// Follow the outgoing edge.
    Continue,
    /// Run the node with the given id next.
    Node(String),
    /// Stop and return the current state.
    End,
}
