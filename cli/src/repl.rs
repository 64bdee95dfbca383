//! Interactive loop as an explicit state machine.
//!
//! States: `Streaming(query)` runs one agent turn and prints tokens as they
//! arrive; `AwaitingInput` reads the next line; `Terminated` says farewell.
//! A failed turn is reported and the loop continues; only an exit keyword,
//! an empty line, end-of-input, or Ctrl-C ends the session.

use std::io::Write;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_stream::StreamExt;

use bard::{
    build_react_initial_state, CompiledStateGraph, MemorySaver, ReActState, RunnableConfig,
    StreamEvent, StreamMode,
};

const FAREWELL: &str = "Farewell! May the weather be ever in thy favor! 🌤️";
const SEPARATOR_WIDTH: usize = 50;

/// One step of the interactive session.
enum ReplState {
    /// Run the agent on this query, streaming output.
    Streaming(String),
    /// Prompt for and read the next query.
    AwaitingInput,
    /// Say farewell and stop.
    Terminated,
}

/// Interactive session over one conversation thread.
pub struct Repl {
    graph: CompiledStateGraph<ReActState>,
    saver: Arc<MemorySaver<ReActState>>,
    config: RunnableConfig,
    system_prompt: &'static str,
}

impl Repl {
    pub fn new(
        graph: CompiledStateGraph<ReActState>,
        saver: Arc<MemorySaver<ReActState>>,
        config: RunnableConfig,
        system_prompt: &'static str,
    ) -> Self {
        Self {
            graph,
            saver,
            config,
            system_prompt,
        }
    }

    /// Drives the state machine until Terminated.
    pub async fn run(&self, initial_query: String) -> std::io::Result<()> {
        let mut reader = BufReader::new(tokio::io::stdin()).lines();
        let mut state = ReplState::Streaming(initial_query);

        loop {
            state = match state {
                ReplState::Streaming(query) => {
                    self.stream_turn(&query).await;
                    ReplState::AwaitingInput
                }
                ReplState::AwaitingInput => match self.read_next(&mut reader).await? {
                    Some(query) => ReplState::Streaming(query),
                    None => ReplState::Terminated,
                },
                ReplState::Terminated => {
                    println!("\n{}", FAREWELL);
                    return Ok(());
                }
            };
        }
    }

    /// Runs one turn: restore thread history, stream the run, print think-node
    /// tokens as they arrive, report errors and keep the session alive.
    async fn stream_turn(&self, query: &str) {
        println!("\nUser: {}", query);
        println!("\nShakespeare Weather Bot:");
        println!("{}", "-".repeat(SEPARATOR_WIDTH));

        let state = match build_react_initial_state(
            query,
            Some(self.saver.as_ref()),
            Some(&self.config),
            Some(self.system_prompt),
        )
        .await
        {
            Ok(s) => s,
            Err(e) => {
                println!("An error occurred: {}", e);
                println!("{}", "-".repeat(SEPARATOR_WIDTH));
                return;
            }
        };

        let mut stream =
            self.graph
                .stream(state, Some(self.config.clone()), [StreamMode::Messages]);
        while let Some(event) = stream.next().await {
            match event {
                // Model-generated tokens only; the think node is the one that
                // speaks to the user.
                StreamEvent::Messages { chunk, metadata } if metadata.node == "think" => {
                    print!("{}", chunk.content);
                    let _ = std::io::stdout().flush();
                }
                StreamEvent::Error(e) => {
                    println!("\nAn error occurred: {}", e);
                }
                _ => {}
            }
        }
        println!("\n{}", "-".repeat(SEPARATOR_WIDTH));
    }

    /// Reads the next query; None means the session is over (exit keyword,
    /// empty line, end-of-input, or Ctrl-C).
    async fn read_next(
        &self,
        reader: &mut tokio::io::Lines<BufReader<tokio::io::Stdin>>,
    ) -> std::io::Result<Option<String>> {
        print!("\nYour next question (or 'quit' to exit): ");
        std::io::stdout().flush()?;

        let line = tokio::select! {
            line = reader.next_line() => line?,
            _ = tokio::signal::ctrl_c() => None,
        };

        Ok(match line {
            None => None,
            Some(s) => {
                let s = s.trim().to_string();
                if is_exit_command(&s) {
                    None
                } else {
                    Some(s)
                }
            }
        })
    }
}

/// Exit keywords per the bot's banner; an empty line also ends the session.
fn is_exit_command(s: &str) -> bool {
    matches!(s.to_lowercase().as_str(), "quit" | "exit" | "bye" | "")
}
