use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::Editor;
use rustyline::{Context, Helper};
use tracing_subscriber::EnvFilter;

use lingo_application::SessionService;
use lingo_core::{LingoError, OptionId, OptionRegistry, SubmitOutcome, TutorEngine};

/// The single conversation a REPL process drives.
const CONVERSATION_ID: &str = "repl";

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/start".to_string(),
                "/stop".to_string(),
                "/options".to_string(),
                "/toggle".to_string(),
                "/transcript".to_string(),
            ],
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

/// Renders the option menu with selected-state markers.
async fn print_menu(service: &SessionService, registry: &OptionRegistry) {
    let selected = service
        .selected_options(CONVERSATION_ID)
        .await
        .unwrap_or_default();

    println!("{}", "Options (toggle with /toggle <name>):".bright_yellow());
    for entry in registry.entries() {
        let marker = if selected.contains(&entry.id) {
            "[x]".bright_green().to_string()
        } else {
            "[ ]".bright_black().to_string()
        };
        println!("  {} {:<18} {}", marker, entry.id.to_string(), entry.label);
    }
}

fn print_reply(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Reply(text) => {
            for line in text.lines() {
                println!("{}", line.bright_blue());
            }
        }
        SubmitOutcome::Warning(text) => {
            println!("{}", text.yellow());
        }
    }
}

fn print_error(err: &LingoError) {
    if err.is_user_error() {
        println!("{}", err.to_string().yellow());
    } else {
        eprintln!("{}", err.to_string().red());
    }
}

/// The main entry point for the Lingo readline REPL.
///
/// Wires the engine together (dispatcher backed by hosted-LLM
/// transforms, session service, rustyline editor) and binds the four
/// session operations to slash commands. Plain input is submitted as a
/// sentence against the accumulated option selection.
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // ===== Backend Initialization =====
    let registry = OptionRegistry::full();
    let dispatcher = lingo_interaction::build_dispatcher(registry.clone())
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    let engine = Arc::new(TutorEngine::new(Arc::new(dispatcher)));
    let service = SessionService::new(engine);

    // ===== REPL Setup =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Lingo REPL ===".bright_magenta().bold());
    println!(
        "{}",
        "Type '/start' to open a session, '/options' to see the menu, or 'quit' to exit."
            .bright_black()
    );
    println!();

    // ===== Main REPL Loop =====
    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }

                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match trimmed {
                    "/start" => {
                        service.start(CONVERSATION_ID).await;
                        println!("{}", "Session started. Pick your options:".bright_green());
                        print_menu(&service, &registry).await;
                        println!(
                            "{}",
                            "Then send an English sentence to process.".bright_black()
                        );
                    }
                    "/stop" => match service.stop(CONVERSATION_ID).await {
                        Ok(()) => println!("{}", "Session stopped.".bright_green()),
                        Err(err) => print_error(&err),
                    },
                    "/options" => print_menu(&service, &registry).await,
                    "/transcript" => match service.export_transcript(CONVERSATION_ID).await {
                        Ok(text) if text.is_empty() => {
                            println!("{}", "Transcript is empty.".bright_black())
                        }
                        Ok(text) => println!("{}", text),
                        Err(err) => print_error(&err),
                    },
                    _ if trimmed.starts_with("/toggle") => {
                        let name = trimmed.trim_start_matches("/toggle").trim();
                        match name.parse::<OptionId>() {
                            Ok(id) => match service.toggle_option(CONVERSATION_ID, id).await {
                                Ok(selected) => {
                                    let state = if selected { "selected" } else { "deselected" };
                                    println!("{}", format!("{} {}", id, state).bright_green());
                                    print_menu(&service, &registry).await;
                                }
                                Err(err) => print_error(&err),
                            },
                            Err(_) => {
                                print_error(&LingoError::unknown_option(name));
                            }
                        }
                    }
                    _ if trimmed.starts_with('/') => {
                        println!("{}", "Unknown command".bright_black());
                    }
                    sentence => {
                        // Display user input in green, as a chat turn
                        println!("{}", format!("> {}", sentence).green());

                        match service.submit(CONVERSATION_ID, sentence).await {
                            Ok(outcome) => print_reply(&outcome),
                            Err(err) => print_error(&err),
                        }
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
