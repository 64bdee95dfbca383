//! State graph: build with [`StateGraph`], run with [`CompiledStateGraph`].
//!
//! One shared state type flows through nodes; each node returns the updated
//! state plus [`Next`] (continue, jump, or end). Conditional edges route on the
//! state after the source node ran. Compiling with a checkpointer persists the
//! final state per `thread_id`.

mod compile_error;
mod compiled;
mod conditional;
mod next;
mod node;
mod run_context;
mod state_graph;

pub use compile_error::CompilationError;
pub use compiled::CompiledStateGraph;
pub use conditional::ConditionalRouterFn;
pub use next::Next;
pub use node::Node;
pub use run_context::RunContext;
pub use state_graph::{StateGraph, END, START};

pub(crate) use conditional::{ConditionalRouter, NextEntry};
