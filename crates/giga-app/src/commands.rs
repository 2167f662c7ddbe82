//! Shell command parsing.

use giga_ai::tools::ToolArguments;
use giga_ai::{Temperature, TemperatureError};

pub const HELP: &str = "\
Commands:
  /exit                     quit
  /temp [value]             show or set the temperature (0.0-2.0)
  /file <name>              send the contents of a file from the resources directory
  /system_prompt [text]     show or set the system prompt
  /summary                  compress the conversation into a summary now
  /tools                    list the registered tools
  /datetime [timezone]      current date and time (IANA zone, default UTC)
  /tool <name> [json]       run a tool and add its result to the conversation
  /stats                    token usage and context size
  /help                     this list
Anything else is sent to the model.";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Empty,
    Exit,
    Help,
    ShowTemperature,
    SetTemperature(Temperature),
    File(String),
    ShowSystemPrompt,
    SetSystemPrompt(String),
    Summary,
    Tools,
    DateTime(Option<String>),
    Tool {
        name: String,
        arguments: ToolArguments,
    },
    Stats,
    Chat(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CommandError {
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("{0}")]
    Temperature(#[from] TemperatureError),
    #[error("tool arguments must be a JSON object: {0}")]
    Arguments(String),
}

pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Empty);
    }
    if !line.starts_with('/') {
        return Ok(Command::Chat(line.to_string()));
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match head {
        "/exit" | "/quit" => Command::Exit,
        "/help" => Command::Help,
        "/temp" if rest.is_empty() => Command::ShowTemperature,
        "/temp" => Command::SetTemperature(rest.parse()?),
        "/file" if rest.is_empty() => return Err(CommandError::Usage("/file <name>")),
        "/file" => Command::File(rest.to_string()),
        "/system_prompt" if rest.is_empty() => Command::ShowSystemPrompt,
        "/system_prompt" => Command::SetSystemPrompt(rest.to_string()),
        "/summary" => Command::Summary,
        "/tools" => Command::Tools,
        "/datetime" => Command::DateTime((!rest.is_empty()).then(|| rest.to_string())),
        "/tool" => parse_tool(rest)?,
        "/stats" => Command::Stats,
        _ => Command::Chat(line.to_string()),
    };
    Ok(command)
}

fn parse_tool(rest: &str) -> Result<Command, CommandError> {
    let (name, json) = match rest.split_once(char::is_whitespace) {
        Some((name, json)) => (name, json.trim()),
        None => (rest, ""),
    };
    if name.is_empty() {
        return Err(CommandError::Usage("/tool <name> [json-object]"));
    }

    let arguments = if json.is_empty() {
        ToolArguments::new()
    } else {
        match serde_json::from_str(json) {
            Ok(serde_json::Value::Object(map)) => map,
            Ok(other) => return Err(CommandError::Arguments(format!("got {other}"))),
            Err(e) => return Err(CommandError::Arguments(e.to_string())),
        }
    };

    Ok(Command::Tool {
        name: name.to_string(),
        arguments,
    })
}
