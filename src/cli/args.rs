//! Command-line argument parsing for qachat.

use crate::models::{ChatRequest, MessageType};

pub const USAGE: &str = "\
Usage: qachat [OPTIONS] <MESSAGE>...

Ask the AI assistant a question and stream the answer to stdout.

Options:
  -s, --session <ID>   Continue an existing session
  -r, --recommend      Ask for learning resource recommendations
  -t, --type <KIND>    Message type: general, question or help
  -h, --help           Print this help
  -V, --version        Print the version

Environment:
  QACHAT_BASE_URL              Server root (default http://localhost:8080)
  QACHAT_TOKEN                 Bearer token
  QACHAT_CONNECT_TIMEOUT_SECS  Connect timeout in seconds (default 10)
  RUST_LOG                     Log filter, logs go to stderr (default warn)";

/// Options for a single question.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AskOptions {
    pub message: String,
    pub session_id: Option<String>,
    pub recommend: bool,
    pub message_type: MessageType,
}

impl AskOptions {
    pub fn to_request(&self) -> ChatRequest {
        let mut request = ChatRequest::new(self.message.clone())
            .with_recommendation(self.recommend)
            .with_message_type(self.message_type);
        if let Some(session_id) = &self.session_id {
            request = request.with_session(session_id.clone());
        }
        request
    }
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Send a message and stream the answer
    Ask(AskOptions),
}

/// Parse command-line arguments; the first item is the program name.
///
/// Remaining positional words are joined with spaces into the message.
/// `--` ends option parsing.
///
/// # Examples
///
/// ```
/// use qachat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["qachat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: Iterator<Item = String>,
{
    let mut options = AskOptions::default();
    let mut words: Vec<String> = Vec::new();
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--recommend" | "-r" => options.recommend = true,
            "--session" | "-s" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("{} requires a session id", arg))?;
                options.session_id = Some(value);
            }
            "--type" | "-t" => {
                let value = args
                    .next()
                    .ok_or_else(|| format!("{} requires a message type", arg))?;
                options.message_type = value.parse()?;
            }
            "--" => {
                words.extend(args.by_ref());
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown option '{}'", flag));
            }
            _ => words.push(arg),
        }
    }

    options.message = words.join(" ");
    if options.message.trim().is_empty() {
        return Err("no message given".to_string());
    }
    Ok(CliCommand::Ask(options))
}
