//! Interactive read-eval-print loop.

use std::io::Write;
use std::path::PathBuf;

use giga_ai::tools::{ToolArguments, DATETIME_TOOL_NAME};
use giga_ai::{CallKind, CompletionResult, Session, Temperature};
use giga_common::GigaError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::boot::Boot;
use crate::commands::{self, Command, HELP};

const RULE: &str = "--------------------------------------------------------------------------------";

/// What the loop does after one line.
#[derive(Debug, PartialEq)]
pub enum Step {
    Print(String),
    Silent,
    Exit,
}

pub struct Shell {
    session: Session,
    temperature: Temperature,
    resources_dir: PathBuf,
}

impl Shell {
    pub fn new(boot: Boot) -> Self {
        Self {
            session: boot.session,
            temperature: boot.temperature,
            resources_dir: boot.resources_dir,
        }
    }

    pub async fn run(mut self) -> Result<(), GigaError> {
        println!("GigaChat shell. Type /help for commands, /exit to quit.");
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            print!("> ");
            std::io::stdout().flush()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            match self.handle_line(&line).await {
                Step::Print(text) => println!("{text}"),
                Step::Silent => {}
                Step::Exit => break,
            }
        }

        println!("Bye.");
        Ok(())
    }

    /// Parse and run one input line. Failures are rendered, never raised.
    pub async fn handle_line(&mut self, line: &str) -> Step {
        let command = match commands::parse(line) {
            Ok(command) => command,
            Err(e) => return Step::Print(format!("Error: {e}")),
        };
        match command {
            Command::Exit => Step::Exit,
            Command::Empty => Step::Silent,
            command => match self.execute(command).await {
                Ok(text) => Step::Print(text),
                Err(e) => Step::Print(format!("Error: {e}")),
            },
        }
    }

    async fn execute(&mut self, command: Command) -> Result<String, GigaError> {
        debug!(?command, "shell command");
        match command {
            Command::Exit | Command::Empty => Ok(String::new()),
            Command::Help => Ok(HELP.to_string()),
            Command::ShowTemperature => Ok(format!("Temperature: {}", self.temperature)),
            Command::SetTemperature(t) => {
                self.temperature = t;
                Ok(format!("Temperature set to {t}"))
            }
            Command::File(name) => {
                let path = self.resources_dir.join(&name);
                let text = match tokio::fs::read_to_string(&path).await {
                    Ok(text) => text,
                    Err(source) => return Err(GigaError::File { path, source }),
                };
                self.chat(text).await
            }
            Command::ShowSystemPrompt => Ok(match self.session.system_prompt() {
                Some(prompt) => format!("System prompt: \"{prompt}\""),
                None => "System prompt: not set".to_string(),
            }),
            Command::SetSystemPrompt(prompt) => {
                self.session.set_system_prompt(prompt);
                Ok("System prompt updated".to_string())
            }
            Command::Summary => Ok(match self.session.summarize_now().await {
                Ok(report) => format!(
                    "Context compressed: {} -> {} messages",
                    report.before, report.after
                ),
                Err(e) => format!(
                    "Summary failed, older history was dropped ({e}). Context: {} messages",
                    self.session.context().len()
                ),
            }),
            Command::Tools => Ok(self.render_tools()),
            Command::DateTime(timezone) => {
                let mut arguments = ToolArguments::new();
                if let Some(tz) = timezone {
                    arguments.insert("timezone".into(), serde_json::Value::String(tz));
                }
                let text = self
                    .session
                    .tools()
                    .invoke(DATETIME_TOOL_NAME, arguments)
                    .await?;
                Ok(format!("Current date and time: {text}"))
            }
            Command::Tool { name, arguments } => {
                let text = self.session.call_tool(&name, arguments).await?;
                Ok(format!("[{name}] {text}\n(added to the conversation)"))
            }
            Command::Stats => Ok(self.render_stats()),
            Command::Chat(text) => self.chat(text).await,
        }
    }

    async fn chat(&mut self, text: String) -> Result<String, GigaError> {
        let result = self.session.send_turn(text, self.temperature).await?;
        Ok(self.render_turn(&result))
    }

    fn render_turn(&self, result: &CompletionResult) -> String {
        let usage = &result.usage;
        format!(
            "GigaChat: {}\n{RULE}\nTokens: prompt {}, completion {}, total {}\n\
             Session total: {} tokens in turns\nContext: {} messages ({} tokens)",
            result.content.as_deref().unwrap_or("(empty reply)"),
            usage.prompt_tokens,
            usage.completion_tokens,
            usage.total_tokens,
            self.session
                .tracker()
                .for_kind(CallKind::Turn)
                .map_or(0, |usage| usage.total_tokens),
            result.context_size,
            result.context_tokens,
        )
    }

    fn render_tools(&self) -> String {
        let tools = self.session.tools().list();
        if tools.is_empty() {
            return "No tools registered".to_string();
        }
        let mut out = String::from("Tools:");
        for tool in tools {
            out.push_str(&format!("\n- {}: {}", tool.name, tool.description));
        }
        out
    }

    fn render_stats(&self) -> String {
        let tracker = self.session.tracker();
        let total = tracker.total();
        let context = self.session.context();
        format!(
            "Calls: {}\nTokens: prompt {}, completion {}, total {}\n\
             Context: {}/{} messages ({} tokens)\nTemperature: {}",
            tracker.call_count(),
            total.prompt_tokens,
            total.completion_tokens,
            total.total_tokens,
            context.len(),
            context.max_messages(),
            context.total_tokens(),
            self.temperature,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use giga_ai::tools::{ToolDescriptor, ToolHandler};
    use giga_ai::{
        ApiError, AuthError, CompletionClient, CompletionParams, Message, Role, TokenUsage,
        ToolRegistry,
    };

    use super::*;

    struct ScriptedClient {
        replies: Mutex<VecDeque<Result<CompletionResult, ApiError>>>,
        temperatures: Mutex<Vec<f64>>,
    }

    #[async_trait]
    impl CompletionClient for ScriptedClient {
        async fn complete(
            &self,
            _messages: &[Message],
            params: CompletionParams,
        ) -> Result<CompletionResult, ApiError> {
            self.temperatures
                .lock()
                .unwrap()
                .push(params.temperature.value());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::Network("script exhausted".into())))
        }
    }

    struct Clock;

    #[async_trait]
    impl ToolHandler for Clock {
        async fn call(&self, arguments: ToolArguments) -> Result<String, String> {
            let tz = arguments
                .get("timezone")
                .and_then(|v| v.as_str())
                .unwrap_or("UTC");
            if tz == "Mars/Olympus" {
                return Err("unknown time zone".into());
            }
            Ok(format!("{{\"timezone\":\"{tz}\"}}"))
        }
    }

    fn reply(text: &str) -> Result<CompletionResult, ApiError> {
        Ok(CompletionResult {
            content: Some(text.into()),
            usage: TokenUsage {
                prompt_tokens: 7,
                completion_tokens: 3,
                total_tokens: 10,
            },
            ..Default::default()
        })
    }

    fn shell(replies: Vec<Result<CompletionResult, ApiError>>) -> (Shell, Arc<ScriptedClient>) {
        let client = Arc::new(ScriptedClient {
            replies: Mutex::new(replies.into()),
            temperatures: Mutex::new(Vec::new()),
        });
        let mut tools = ToolRegistry::new();
        tools.register(
            ToolDescriptor {
                name: DATETIME_TOOL_NAME.into(),
                description: "clock".into(),
                input_schema: serde_json::json!({"type": "object"}),
            },
            Arc::new(Clock),
        );
        let shell = Shell::new(Boot {
            session: Session::new(client.clone()).with_tools(tools),
            temperature: Temperature::default(),
            resources_dir: PathBuf::from("/nonexistent/resources"),
        });
        (shell, client)
    }

    fn printed(step: Step) -> String {
        match step {
            Step::Print(text) => text,
            other => panic!("expected output, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn chat_line_prints_reply_and_stats() {
        let (mut shell, _) = shell(vec![reply("Hello there")]);

        let out = printed(shell.handle_line("Hi").await);

        assert!(out.starts_with("GigaChat: Hello there"));
        assert!(out.contains("Tokens: prompt 7, completion 3, total 10"));
        assert!(out.contains("Context: 2 messages (10 tokens)"));
    }

    #[tokio::test]
    async fn session_total_counts_turns_only() {
        let client = Arc::new(ScriptedClient {
            replies: Mutex::new(vec![reply("a1"), reply("a2"), reply("summary")].into()),
            temperatures: Mutex::new(Vec::new()),
        });
        let mut shell = Shell::new(Boot {
            session: Session::new(client).with_max_messages(4),
            temperature: Temperature::default(),
            resources_dir: PathBuf::from("/nonexistent/resources"),
        });

        let first = printed(shell.handle_line("q1").await);
        assert!(first.contains("Session total: 10 tokens in turns"));

        // The second turn fills the context and triggers a summary call.
        let second = printed(shell.handle_line("q2").await);
        assert!(second.contains("Session total: 20 tokens in turns"));
        assert_eq!(shell.session.tracker().total_tokens(), 30);
    }

    #[tokio::test]
    async fn out_of_range_temperature_keeps_previous() {
        let (mut shell, client) = shell(vec![reply("ok")]);

        let out = printed(shell.handle_line("/temp 2.5").await);
        assert!(out.contains("out of range"));
        assert_eq!(
            printed(shell.handle_line("/temp").await),
            "Temperature: 0.87"
        );

        shell.handle_line("hello").await;
        assert_eq!(*client.temperatures.lock().unwrap(), vec![0.87]);
    }

    #[tokio::test]
    async fn temperature_applies_to_next_turn() {
        let (mut shell, client) = shell(vec![reply("ok")]);
        shell.handle_line("/temp 1.5").await;
        shell.handle_line("hello").await;
        assert_eq!(*client.temperatures.lock().unwrap(), vec![1.5]);
    }

    #[tokio::test]
    async fn failures_name_their_stage() {
        let (mut shell, _) = shell(vec![
            Err(ApiError::AuthUnavailable(AuthError::MissingToken)),
            Err(ApiError::Status {
                status: 500,
                body: "down".into(),
            }),
        ]);

        assert!(printed(shell.handle_line("one").await).starts_with("Error: auth error"));
        assert!(printed(shell.handle_line("two").await).starts_with("Error: completion error"));
        assert!(printed(shell.handle_line("/file missing.txt").await).starts_with("Error: file error"));
        assert!(printed(shell.handle_line("/datetime Mars/Olympus").await)
            .starts_with("Error: tool error"));
    }

    #[tokio::test]
    async fn file_contents_are_sent_as_a_turn() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("question.txt"), "What is Rust?").unwrap();
        let (mut shell, _) = shell(vec![reply("A language.")]);
        shell.resources_dir = dir.path().to_path_buf();

        let out = printed(shell.handle_line("/file question.txt").await);

        assert!(out.starts_with("GigaChat: A language."));
        assert_eq!(
            shell.session.context().messages()[0],
            Message::user("What is Rust?")
        );
    }

    #[tokio::test]
    async fn system_prompt_round_trip() {
        let (mut shell, _) = shell(vec![]);
        assert_eq!(
            printed(shell.handle_line("/system_prompt").await),
            "System prompt: not set"
        );
        shell.handle_line("/system_prompt Be terse.").await;
        assert_eq!(
            printed(shell.handle_line("/system_prompt").await),
            "System prompt: \"Be terse.\""
        );
    }

    #[tokio::test]
    async fn datetime_prints_without_touching_context() {
        let (mut shell, _) = shell(vec![]);
        let out = printed(shell.handle_line("/datetime Europe/Moscow").await);
        assert!(out.contains("Europe/Moscow"));
        assert!(shell.session.context().is_empty());
    }

    #[tokio::test]
    async fn tool_result_joins_the_conversation() {
        let (mut shell, _) = shell(vec![]);
        let out = printed(
            shell
                .handle_line(r#"/tool get_current_datetime {"timezone":"Asia/Tokyo"}"#)
                .await,
        );
        assert!(out.contains("Asia/Tokyo"));
        let last = shell.session.context().messages().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert!(last.content.starts_with("[Tool Result: get_current_datetime]"));
    }

    #[tokio::test]
    async fn tools_and_stats_listing() {
        let (mut shell, _) = shell(vec![reply("ok")]);
        assert!(printed(shell.handle_line("/tools").await).contains("- get_current_datetime: clock"));

        shell.handle_line("hi").await;
        let stats = printed(shell.handle_line("/stats").await);
        assert!(stats.contains("Calls: 1"));
        assert!(stats.contains("Context: 2/10 messages (10 tokens)"));
    }

    #[tokio::test]
    async fn exit_and_blank_lines() {
        let (mut shell, _) = shell(vec![]);
        assert_eq!(shell.handle_line("   ").await, Step::Silent);
        assert_eq!(shell.handle_line("/exit").await, Step::Exit);
    }
}
