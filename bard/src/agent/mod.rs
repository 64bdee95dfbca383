//! Agent implementations. Currently one: the ReAct loop under [`react`].

pub mod react;

pub use react::{
    build_react_agent, build_react_initial_state, tools_condition, ActNode, ObserveNode,
    ThinkNode, ToolsConditionResult, MAX_REACT_TURNS,
};
