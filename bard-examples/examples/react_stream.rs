//! One-shot ReAct run with token streaming: search + todo tools, conversation
//! memory on a fixed thread, tokens printed as they arrive separated by `|`.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p bard-examples --example react_stream
//! cargo run -p bard-examples --example react_stream -- "Fetch todo item 3"
//! ```
//!
//! ## Environment
//!
//! - `OPENAI_API_KEY`: required (in `.env` or environment).
//! - `TAVILY_API_KEY`: optional; enables the web search tool.
//! - `BARD_MODEL`: optional model override (default `gpt-4o-mini`).

use std::sync::Arc;

use tokio_stream::StreamExt;

use bard::{
    build_react_agent, build_react_initial_state, AggregateToolSource, ChatOpenAI, MemorySaver,
    ReActState, RunnableConfig, StreamEvent, StreamMode, TavilySearchTool, TodoTool, ToolSource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let query = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Search for the weather in Seoul.".to_string());
    let model = std::env::var("BARD_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());

    let tools = AggregateToolSource::new();
    tools.register(Box::new(TodoTool::new())).await;
    if let Ok(key) = std::env::var("TAVILY_API_KEY") {
        tools
            .register(Box::new(TavilySearchTool::new(key).with_max_results(2)))
            .await;
    } else {
        eprintln!("note: TAVILY_API_KEY not set, running with the todo tool only");
    }

    let specs = tools.list_tools().await?;
    let llm = Arc::new(ChatOpenAI::new(model).with_tools(specs));

    let saver = Arc::new(MemorySaver::<ReActState>::new());
    let graph = build_react_agent(llm, Box::new(tools), Some(saver.clone()))?;

    let config = RunnableConfig::for_thread("react-stream");
    let state =
        build_react_initial_state(&query, Some(saver.as_ref()), Some(&config), None).await?;

    println!("User: {}", query);

    let mut stream = graph.stream(state, Some(config), [StreamMode::Messages]);
    while let Some(event) = stream.next().await {
        match event {
            StreamEvent::Messages { chunk, metadata } if metadata.node == "think" => {
                print!("{}|", chunk.content);
            }
            StreamEvent::Error(e) => {
                eprintln!("\nError: {}", e);
                eprintln!("Ensure OPENAI_API_KEY is set in .env or the environment.");
                std::process::exit(1);
            }
            _ => {}
        }
    }
    println!();

    Ok(())
}
