//! Bard binary: interactive Shakespeare weather bot.
//!
//! Wires an OpenAI-compatible chat model to the ReAct graph with a web search
//! tool and a todo-item fetch tool, keeps conversation memory per session, and
//! streams the bot's replies to the terminal.

mod repl;

use std::sync::Arc;

use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use bard::{
    build_react_agent, AggregateToolSource, ChatOpenAI, MemorySaver, ReActState, RunnableConfig,
    TavilySearchTool, TodoTool, ToolSource,
};

use repl::Repl;

const SYSTEM_PROMPT: &str = "You are a helpful weather assistant that speaks in Shakespearean \
English. Answer all questions to the best of your ability using the tools available to you. \
Always explain what thou art doing before using tools, and provide clear summaries after \
getting results, all in the manner of Shakespeare's tongue.";

#[derive(Parser, Debug)]
#[command(name = "bard")]
#[command(about = "Shakespeare weather bot, interactive mode")]
#[command(after_help = "Example: bard \"Search for the weather in Seoul\"")]
struct Args {
    /// Initial query; the bot then prompts for follow-up questions
    query: String,

    /// Chat model name (any OpenAI-compatible model)
    #[arg(long, env = "BARD_MODEL", default_value = "gpt-4o-mini")]
    model: String,

    /// Thread id for conversation memory; default is a fresh id per session
    #[arg(long, value_name = "ID")]
    thread_id: Option<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Registers the bot's tools: todo fetch always, web search when a Tavily key
/// is configured.
async fn build_tools() -> AggregateToolSource {
    let tools = AggregateToolSource::new();
    tools.register(Box::new(TodoTool::new())).await;
    match std::env::var("TAVILY_API_KEY") {
        Ok(key) if !key.is_empty() => {
            tools
                .register(Box::new(TavilySearchTool::new(key).with_max_results(2)))
                .await;
        }
        _ => warn!("TAVILY_API_KEY not set; web search disabled for this session"),
    }
    tools
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if let Err(e) = config::load_and_apply("bard", None) {
        eprintln!("config load failed: {}", e);
    }
    init_tracing();

    let tools = build_tools().await;
    let specs = tools.list_tools().await?;
    let llm = Arc::new(ChatOpenAI::new(&args.model).with_tools(specs));

    let saver = Arc::new(MemorySaver::<ReActState>::new());
    let graph = build_react_agent(llm, Box::new(tools), Some(saver.clone()))?;

    let thread_id = args
        .thread_id
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
    let config = RunnableConfig::for_thread(thread_id);

    println!("🎭 Shakespeare Weather Bot - Interactive Mode");
    println!("{}", "=".repeat(60));
    println!("Type 'quit', 'exit', or 'bye' to end the conversation");
    println!("{}", "=".repeat(60));

    let repl = Repl::new(graph, saver, config, SYSTEM_PROMPT);
    repl.run(args.query).await?;

    Ok(())
}
