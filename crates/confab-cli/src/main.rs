use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use confab_application::{
    AnalyzeEndpoint, ChatEndpoint, ChatSession, DocumentSession, SummarySession,
};
use confab_core::ConfabError;
use confab_core::conversation::{MessageRole, Thread};
use confab_infrastructure::{HistoryStore, SnapshotStore};
use confab_interaction::{BackendClient, ClientConfig};

#[derive(Parser)]
#[command(name = "confab")]
#[command(about = "Confab - chat, document Q&A, and video summaries from your terminal", long_about = None)]
struct Cli {
    /// Backend base URL (overrides config file and CONFAB_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Model identifier forwarded to the backend
    #[arg(long)]
    model: Option<String>,

    /// Directory for persisted history and snapshot files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

/// The active interaction mode of the REPL.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    Chat,
    Docs,
    Summary,
}

impl Mode {
    fn prompt(self) -> &'static str {
        match self {
            Mode::Chat => "chat> ",
            Mode::Docs => "docs> ",
            Mode::Summary => "summary> ",
        }
    }
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: [
                "/chat",
                "/docs",
                "/summary",
                "/open",
                "/new",
                "/retry",
                "/history",
                "/load",
                "/clear-history",
                "/help",
            ]
            .into_iter()
            .map(str::to_string)
            .collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::load()?;
    if let Some(url) = cli.backend_url {
        config.base_url = url;
    }
    if let Some(model) = cli.model {
        config.model = Some(model);
    }
    let client = BackendClient::from_config(&config);

    let (history, snapshot) = match &cli.data_dir {
        Some(dir) => (HistoryStore::open(dir)?, SnapshotStore::open(dir)?),
        None => (
            HistoryStore::default_location()?,
            SnapshotStore::default_location()?,
        ),
    };

    let mut chat = ChatSession::new(ChatEndpoint::new(client.clone()));
    let mut docs = DocumentSession::new(AnalyzeEndpoint::new(client.clone()));
    let mut summary = SummarySession::new(client, history, snapshot);
    let mut mode = Mode::Chat;

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Confab ===".bright_magenta().bold());
    println!(
        "{}",
        "Modes: /chat, /docs, /summary. Type /help for commands, 'quit' to exit.".bright_black()
    );
    if let Some(record) = summary.current() {
        println!(
            "{}",
            format!("Resumed summary session: {}", record.title()).bright_black()
        );
    }
    println!();

    loop {
        let readline = rl.readline(mode.prompt());

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if let Some(command) = trimmed.strip_prefix('/') {
                    mode = handle_command(command, mode, &mut chat, &mut docs, &mut summary).await;
                } else {
                    dispatch_input(trimmed, mode, &mut chat, &mut docs, &mut summary).await;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Readline error: {err}").red());
                break;
            }
        }
    }

    Ok(())
}

async fn handle_command(
    command: &str,
    mode: Mode,
    chat: &mut ChatSession<ChatEndpoint>,
    docs: &mut DocumentSession<AnalyzeEndpoint>,
    summary: &mut SummarySession<BackendClient>,
) -> Mode {
    let (name, arg) = match command.split_once(' ') {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "chat" => return Mode::Chat,
        "docs" => return Mode::Docs,
        "summary" => return Mode::Summary,
        "open" => {
            if arg.is_empty() {
                print_error("Usage: /open <path-to-text-file>");
            } else {
                match std::fs::read_to_string(arg) {
                    Ok(text) => {
                        docs.attach_document(&text);
                        print_last_reply(docs.thread());
                        return Mode::Docs;
                    }
                    Err(err) => print_error(&format!("Failed to read {arg}: {err}")),
                }
            }
        }
        "new" => match mode {
            Mode::Chat => chat.start_new(),
            Mode::Docs => docs.start_new(),
            Mode::Summary => {
                if let Err(err) = summary.start_new() {
                    print_error(&err.to_string());
                } else {
                    println!("{}", "Ready for a new video URL.".bright_black());
                }
            }
        },
        "retry" => match mode {
            Mode::Chat => {
                if chat.retry().await.unwrap_or(false) {
                    print_outcome(chat.thread(), chat.last_error());
                } else {
                    print_error("Nothing to retry");
                }
            }
            Mode::Docs => {
                if docs.retry().await.unwrap_or(false) {
                    print_outcome(docs.thread(), docs.last_error());
                } else {
                    print_error("Nothing to retry");
                }
            }
            Mode::Summary => retry_summary(summary).await,
        },
        "history" => {
            if summary.history().is_empty() {
                println!("{}", "No summarized videos yet.".bright_black());
            }
            for (index, record) in summary.history().iter().enumerate() {
                println!(
                    "{} {} {}",
                    format!("[{index}]").bright_yellow(),
                    record.title(),
                    record.created_at.bright_black()
                );
            }
        }
        "load" => match arg.parse::<usize>() {
            Ok(index) => match summary.load_history_entry(index) {
                Ok(true) => {
                    print_record(summary);
                    return Mode::Summary;
                }
                Ok(false) => print_error("No history entry with that index"),
                Err(err) => print_error(&err.to_string()),
            },
            Err(_) => print_error("Usage: /load <index>"),
        },
        "clear-history" => match summary.clear_history() {
            Ok(()) => println!("{}", "History cleared successfully!".bright_green()),
            Err(err) => print_error(&err.to_string()),
        },
        "help" => print_help(),
        _ => print_error("Unknown command; type /help"),
    }

    mode
}

async fn dispatch_input(
    input: &str,
    mode: Mode,
    chat: &mut ChatSession<ChatEndpoint>,
    docs: &mut DocumentSession<AnalyzeEndpoint>,
    summary: &mut SummarySession<BackendClient>,
) {
    match mode {
        Mode::Chat => {
            if chat.submit(input).await.unwrap_or(false) {
                print_outcome(chat.thread(), chat.last_error());
            }
        }
        Mode::Docs => {
            if docs.submit(input).await.unwrap_or(false) {
                print_outcome(docs.thread(), docs.last_error());
            }
        }
        Mode::Summary => {
            // Before a summary exists the input is the video URL;
            // afterwards it is a follow-up question (use /new to switch
            // to another video).
            if summary.current().is_none() {
                match summary.summarize(input).await {
                    Ok(true) => {
                        if summary.summarize_error().is_some() {
                            retry_hint(summary.summarize_error());
                        } else {
                            print_record(summary);
                        }
                    }
                    Ok(false) => {}
                    Err(err) => print_input_error(&err),
                }
            } else {
                match summary.ask(input).await {
                    Ok(true) => print_outcome(summary.thread(), summary.ask_error()),
                    Ok(false) => {}
                    Err(err) => print_input_error(&err),
                }
            }
        }
    }
}

async fn retry_summary(summary: &mut SummarySession<BackendClient>) {
    if summary.can_retry_ask() {
        if summary.retry_ask().await.unwrap_or(false) {
            print_outcome(summary.thread(), summary.ask_error());
        }
        return;
    }

    match summary.retry_summarize().await {
        Ok(true) => {
            if summary.summarize_error().is_some() {
                retry_hint(summary.summarize_error());
            } else {
                print_record(summary);
            }
        }
        Ok(false) => print_error("Nothing to retry"),
        Err(err) => print_input_error(&err),
    }
}

/// Prints the latest assistant reply, plus the retry hint on failure.
fn print_outcome(thread: &Thread, error: Option<&str>) {
    print_last_reply(thread);
    if error.is_some() {
        retry_hint(error);
    }
}

fn print_last_reply(thread: &Thread) {
    if let Some(message) = thread.last() {
        if message.role == MessageRole::Assistant {
            for line in message.content.lines() {
                println!("{}", line.bright_blue());
            }
        }
    }
}

fn print_record(summary: &SummarySession<BackendClient>) {
    if let Some(record) = summary.current() {
        println!("{}", format!("Summary of {}", record.title()).bold());
        for line in record.summary.lines() {
            println!("{}", line.bright_blue());
        }
        println!(
            "{}",
            "Ask follow-up questions, or /new for another video.".bright_black()
        );
    }
}

fn retry_hint(error: Option<&str>) {
    if let Some(message) = error {
        println!("{}", format!("Error: {message}").red());
        println!("{}", "Type /retry to try again.".bright_black());
    }
}

fn print_input_error(error: &ConfabError) {
    print_error(&error.user_message());
}

fn print_error(message: &str) {
    println!("{}", message.red());
}

fn print_help() {
    println!("{}", "Commands:".bold());
    println!("  /chat            switch to free-form chat");
    println!("  /docs            switch to document Q&A");
    println!("  /summary         switch to video summaries");
    println!("  /open <path>     attach a document (docs mode)");
    println!("  /new             start a fresh session in the current mode");
    println!("  /retry           retry the last failed request");
    println!("  /history         list summarized videos");
    println!("  /load <index>    reopen a summarized video");
    println!("  /clear-history   remove all summarized videos");
    println!("  quit             exit");
}
