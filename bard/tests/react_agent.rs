//! Integration tests for the assembled ReAct agent: one tool round, direct
//! answers, thread memory across invokes, and token streaming.

mod init_logging;

use std::sync::Arc;

use tokio_stream::StreamExt;

use bard::{
    build_react_agent, build_react_initial_state, Checkpointer, MemorySaver, Message, MockLlm,
    MockToolSource, ReActState, RunnableConfig, StreamEvent, StreamMode,
};

const PROMPT: &str = "Thou art a helpful assistant.";

/// One tool round: think emits a call, act executes it, observe folds the
/// result back, the second think answers without tools and the run ends.
#[tokio::test]
async fn react_one_tool_round_then_answer() {
    let llm = Arc::new(MockLlm::first_tool_then_end(
        "get_todo_item",
        "{\"todo_id\": 1}",
        "Thy task standeth: delectus aut autem.",
    ));
    let graph = build_react_agent(llm, Box::new(MockToolSource::todo_example()), None)
        .expect("graph compiles");

    let state = build_react_initial_state("Fetch my first task.", None, None, Some(PROMPT))
        .await
        .unwrap();
    let out = graph.invoke(state, None).await.unwrap();

    assert_eq!(
        out.last_assistant_reply().as_deref(),
        Some("Thy task standeth: delectus aut autem.")
    );
    assert!(
        out.messages
            .iter()
            .any(|m| matches!(m, Message::User(s) if s.contains("Tool get_todo_item returned:"))),
        "tool result should be folded into the conversation"
    );
    assert!(out.tool_calls.is_empty());
    assert!(out.tool_results.is_empty());
    assert_eq!(out.turn_count, 1, "one observe round");
}

/// A direct answer skips act entirely: conditional routing goes think → END.
#[tokio::test]
async fn react_direct_answer_skips_tools() {
    let llm = Arc::new(MockLlm::with_no_tool_calls("Two and two make four."));
    let graph = build_react_agent(llm, Box::new(MockToolSource::todo_example()), None)
        .expect("graph compiles");

    let state = build_react_initial_state("What is 2+2?", None, None, Some(PROMPT))
        .await
        .unwrap();
    let out = graph.invoke(state, None).await.unwrap();

    assert_eq!(out.messages.len(), 3, "system, user, assistant");
    assert_eq!(out.turn_count, 0, "observe never ran");
}

/// Two invokes on one thread share history through the checkpointer.
#[tokio::test]
async fn react_thread_memory_across_invokes() {
    let llm = Arc::new(MockLlm::with_no_tool_calls("Well met."));
    let saver: Arc<MemorySaver<ReActState>> = Arc::new(MemorySaver::new());
    let graph = build_react_agent(
        llm,
        Box::new(MockToolSource::todo_example()),
        Some(saver.clone()),
    )
    .expect("graph compiles");

    let config = RunnableConfig::for_thread("conversation-1");

    let first = build_react_initial_state("Hi, I'm Zach.", Some(saver.as_ref()), Some(&config), Some(PROMPT))
        .await
        .unwrap();
    let first_out = graph.invoke(first, Some(config.clone())).await.unwrap();
    assert_eq!(first_out.messages.len(), 3);

    let second = build_react_initial_state(
        "What's my name?",
        Some(saver.as_ref()),
        Some(&config),
        Some(PROMPT),
    )
    .await
    .unwrap();
    assert_eq!(
        second.messages.len(),
        4,
        "restored history plus the new user message"
    );
    assert!(matches!(
        &second.messages[1],
        Message::User(s) if s == "Hi, I'm Zach."
    ));

    let second_out = graph.invoke(second, Some(config.clone())).await.unwrap();
    assert_eq!(second_out.messages.len(), 5);

    // Latest checkpoint holds the full five-message conversation.
    let (checkpoint, _meta) = saver.get_tuple(&config).await.unwrap().expect("saved");
    assert_eq!(checkpoint.state.messages.len(), 5);
}

/// Separate threads do not leak into each other.
#[tokio::test]
async fn react_threads_are_isolated() {
    let llm = Arc::new(MockLlm::with_no_tool_calls("Anon."));
    let saver: Arc<MemorySaver<ReActState>> = Arc::new(MemorySaver::new());
    let graph = build_react_agent(
        llm,
        Box::new(MockToolSource::todo_example()),
        Some(saver.clone()),
    )
    .expect("graph compiles");

    let config_a = RunnableConfig::for_thread("a");
    let state = build_react_initial_state("Hello from A.", Some(saver.as_ref()), Some(&config_a), Some(PROMPT))
        .await
        .unwrap();
    graph.invoke(state, Some(config_a)).await.unwrap();

    let config_b = RunnableConfig::for_thread("b");
    let state = build_react_initial_state("Hello from B.", Some(saver.as_ref()), Some(&config_b), Some(PROMPT))
        .await
        .unwrap();
    assert_eq!(state.messages.len(), 2, "thread b starts fresh");
}

/// Streaming a run yields Messages chunks tagged "think" that reassemble into
/// the assistant reply, and no Error event.
#[tokio::test]
async fn react_stream_emits_think_chunks() {
    let llm = Arc::new(MockLlm::with_no_tool_calls("What light through yonder window breaks"));
    let graph = build_react_agent(llm, Box::new(MockToolSource::todo_example()), None)
        .expect("graph compiles");

    let state = build_react_initial_state("Speak.", None, None, Some(PROMPT))
        .await
        .unwrap();
    let events: Vec<_> = graph
        .stream(state, None, [StreamMode::Messages])
        .collect()
        .await;

    let mut streamed = String::new();
    for event in &events {
        match event {
            StreamEvent::Messages { chunk, metadata } => {
                assert_eq!(metadata.node, "think");
                streamed.push_str(&chunk.content);
            }
            StreamEvent::Error(e) => panic!("unexpected error event: {}", e),
            _ => {}
        }
    }
    assert_eq!(streamed, "What light through yonder window breaks");
}
