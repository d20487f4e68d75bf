//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! Each line is one user event: it is parsed, dispatched to the shell and
//! the page is re-rendered from a fresh snapshot before the next line is read.

use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::identity::SessionIdentity;
use crate::output::{DetailOptions, Formatter};
use crate::shell::{QuestionDraft, Shell};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use stackit_domain::traits::IdentityProvider;
use stackit_domain::{FilterMode, Tag, VoteKind};
use stackit_store::{MemoryStore, StoreError};
use std::path::PathBuf;
use tracing::{debug, info};

/// Shell type driven by the REPL.
pub type ReplShell = Shell<MemoryStore, SessionIdentity>;

/// Run the interactive REPL.
pub fn run_repl(shell: &mut ReplShell, formatter: &Formatter, history_size: usize) -> Result<()> {
    println!("{}", formatter.info("StackIt - Type 'help' for commands, 'exit' to quit"));
    println!();

    // Initialize readline editor
    let editor_config = rustyline::Config::builder()
        .max_history_size(history_size)
        .map_err(readline_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(readline_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    info!(user = ?shell.identity().current_user(), "session started");
    render(shell, formatter)?;

    loop {
        let prompt = match shell.identity().current_user() {
            Some(user) => format!("stackit ({})> ", user),
            None => "stackit (guest)> ".to_string(),
        };

        match editor.readline(&prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                // Parse command
                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => {
                        print_help(formatter);
                    }
                    Ok(cmd) => {
                        debug!(?cmd, "dispatching");
                        match execute_repl_command(cmd, shell, &mut editor, formatter) {
                            Ok(Flow::Render) => render(shell, formatter)?,
                            Ok(Flow::Stay) => {}
                            Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ReplCommand {
    Exit,
    Help,
    List,
    Page(usize),
    Next,
    Prev,
    Mode(FilterMode),
    Tag(Tag),
    Tags,
    Clear,
    Ask,
    Show(usize),
    Answer { position: usize, text: Option<String> },
    Vote { position: usize, answer: usize, kind: VoteKind },
    Delete(usize),
    DeleteAnswer { position: usize, answer: usize },
    Login(String),
    Logout,
    Whoami,
}

/// What to do after a command ran.
enum Flow {
    Render,
    Stay,
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    let args = &parts[1..];
    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "list" | "ls" => Ok(ReplCommand::List),
        "page" => Ok(ReplCommand::Page(parse_position(args.first(), "Usage: page <n>")?)),
        "next" | "n" => Ok(ReplCommand::Next),
        "prev" | "p" => Ok(ReplCommand::Prev),
        "newest" => Ok(ReplCommand::Mode(FilterMode::Newest)),
        "unanswered" => Ok(ReplCommand::Mode(FilterMode::Unanswered)),
        "all" => Ok(ReplCommand::Mode(FilterMode::All)),
        "tag" => parse_tag_command(args),
        "tags" => Ok(ReplCommand::Tags),
        "clear" => Ok(ReplCommand::Clear),
        "ask" => Ok(ReplCommand::Ask),
        "show" => Ok(ReplCommand::Show(parse_position(args.first(), "Usage: show <n>")?)),
        "answer" => parse_answer_command(args),
        "vote" => parse_vote_command(args),
        "like" | "dislike" => parse_vote_shortcut(parts[0], args),
        "delete" => Ok(ReplCommand::Delete(parse_position(args.first(), "Usage: delete <n>")?)),
        "delete-answer" => {
            let usage = "Usage: delete-answer <n> <answer>";
            Ok(ReplCommand::DeleteAnswer {
                position: parse_position(args.first(), usage)?,
                answer: parse_position(args.get(1), usage)?,
            })
        }
        "login" => {
            if args.is_empty() {
                return Err(CliError::InvalidInput("Usage: login <name>".to_string()));
            }
            Ok(ReplCommand::Login(args.join(" ")))
        }
        "logout" => Ok(ReplCommand::Logout),
        "whoami" => Ok(ReplCommand::Whoami),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
fn execute_repl_command(
    cmd: ReplCommand,
    shell: &mut ReplShell,
    editor: &mut DefaultEditor,
    formatter: &Formatter,
) -> Result<Flow> {
    match cmd {
        ReplCommand::List => {
            println!("{}", formatter.format_view_state(shell.view_state()));
        }
        ReplCommand::Page(page) => {
            shell.goto_page(page)?;
        }
        ReplCommand::Next => {
            shell.next_page()?;
        }
        ReplCommand::Prev => {
            shell.prev_page()?;
        }
        ReplCommand::Mode(mode) => shell.set_mode(mode),
        ReplCommand::Tag(tag) => shell.filter_by_tag(tag),
        ReplCommand::Tags => {
            println!("{}", formatter.format_tags(shell.view_state().tag));
            return Ok(Flow::Stay);
        }
        ReplCommand::Clear => shell.clear_filters(),
        ReplCommand::Ask => return run_ask(shell, editor, formatter),
        ReplCommand::Show(position) => {
            shell.toggle_answers(position)?;
        }
        ReplCommand::Answer { position, text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    shell.open_answer_input(position)?;
                    match prompt(editor, "Your answer: ", "")? {
                        Some(text) => text,
                        None => return Ok(Flow::Render),
                    }
                }
            };
            shell.submit_answer(position, &text)?;
            println!("{}", formatter.success("Answer posted"));
        }
        ReplCommand::Vote { position, answer, kind } => {
            let outcome = shell.vote(position, answer, kind)?;
            println!("{}", formatter.vote_result(&outcome));
        }
        ReplCommand::Delete(position) => {
            if !shell.can_delete_question(position) {
                return Err(CliError::NotPermitted("only the author can delete this question".to_string()));
            }
            if !confirm(editor, "Delete this question? [y/N] ", false)? {
                println!("{}", formatter.info("Operation cancelled"));
                return Ok(Flow::Stay);
            }
            shell.delete_question(position)?;
            println!("{}", formatter.success("Question deleted"));
        }
        ReplCommand::DeleteAnswer { position, answer } => {
            if !shell.can_delete_answer(position, answer) {
                return Err(CliError::NotPermitted("only the author can delete this answer".to_string()));
            }
            if !confirm(editor, "Delete this answer? [y/N] ", false)? {
                println!("{}", formatter.info("Operation cancelled"));
                return Ok(Flow::Stay);
            }
            shell.delete_answer(position, answer)?;
            println!("{}", formatter.success("Answer deleted"));
        }
        ReplCommand::Login(user) => {
            shell.identity_mut().login(&user)?;
            println!("{}", formatter.success(&format!("Signed in as {}", user.trim())));
        }
        ReplCommand::Logout => {
            shell.identity_mut().logout();
            println!("{}", formatter.info("Signed out"));
        }
        ReplCommand::Whoami => {
            let message = match shell.identity().current_user() {
                Some(user) => format!("Signed in as {}", user),
                None => "Not signed in".to_string(),
            };
            println!("{}", formatter.info(&message));
            return Ok(Flow::Stay);
        }
        ReplCommand::Exit | ReplCommand::Help => return Ok(Flow::Stay),
    }

    Ok(Flow::Render)
}

/// Walk the user through the ask dialog until it is submitted or cancelled.
fn run_ask(shell: &mut ReplShell, editor: &mut DefaultEditor, formatter: &Formatter) -> Result<Flow> {
    let resumed = shell.draft() != &QuestionDraft::default();
    shell.open_ask();

    println!("{}", formatter.info("Ask a Question (Ctrl-C cancels, your draft is kept)"));
    if resumed {
        println!("{}", formatter.info("Resuming your draft"));
    }

    loop {
        let Some(title) = prompt(editor, "Title: ", &shell.draft().title)? else {
            return Ok(cancel_ask(shell, formatter));
        };
        let Some(description) = prompt(editor, "Description (HTML allowed): ", &shell.draft().description)? else {
            return Ok(cancel_ask(shell, formatter));
        };

        println!("{}", formatter.format_tags(None));
        let current_tags = shell
            .draft()
            .tags()
            .iter()
            .map(Tag::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let Some(tags) = prompt(editor, "Tags (names or numbers, comma-separated): ", &current_tags)? else {
            return Ok(cancel_ask(shell, formatter));
        };

        if let Some(draft) = shell.draft_mut() {
            draft.title = title;
            draft.description = description;
        }
        match parse_tag_list(&tags) {
            Ok(tags) => {
                if let Some(draft) = shell.draft_mut() {
                    draft.set_tags(&tags);
                }
            }
            Err(e) => {
                eprintln!("{}", formatter.error(&e.to_string()));
                continue;
            }
        }

        if !confirm(editor, "Submit? [Y/n] ", true)? {
            return Ok(cancel_ask(shell, formatter));
        }

        match shell.submit_ask() {
            Ok(id) => {
                println!("{}", formatter.success(&format!("Question posted: {}", id)));
                return Ok(Flow::Render);
            }
            Err(CliError::Store(StoreError::Validation(e))) => {
                eprintln!("{}", formatter.error(&format!("Fill all fields: {}", e)));
            }
            Err(e) => return Err(e),
        }
    }
}

fn cancel_ask(shell: &mut ReplShell, formatter: &Formatter) -> Flow {
    shell.cancel_ask();
    println!("{}", formatter.warning("Draft kept. Type 'ask' to continue it."));
    Flow::Stay
}

/// Print the current page, with details for expanded questions.
fn render(shell: &ReplShell, formatter: &Formatter) -> Result<()> {
    let snapshot = shell.snapshot();
    println!("{}", formatter.format_snapshot(&snapshot)?);

    if formatter.format() != OutputFormat::Table {
        return Ok(());
    }

    let viewer = shell.identity().current_user();
    for (i, question) in snapshot.items.iter().enumerate() {
        if !shell.is_expanded(question.id) {
            continue;
        }
        let options = DetailOptions {
            viewer: viewer.as_deref(),
            answer_input_open: shell.is_answer_input_open(question.id),
        };
        println!();
        println!("{}", formatter.format_question(i + 1, question, options));
    }
    println!();

    Ok(())
}

// Simple argument parsers for REPL (minimal argument parsing)

fn parse_position(arg: Option<&&str>, usage: &str) -> Result<usize> {
    arg.and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
        .ok_or_else(|| CliError::InvalidInput(usage.to_string()))
}

fn parse_tag_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: tag <name>".to_string()));
    }
    let name = args.join(" ");
    Tag::parse(&name)
        .map(ReplCommand::Tag)
        .ok_or_else(|| CliError::InvalidInput(format!("Unknown tag: {}. Type 'tags' to list them.", name)))
}

fn parse_answer_command(args: &[&str]) -> Result<ReplCommand> {
    let position = parse_position(args.first(), "Usage: answer <n> [text]")?;
    let text = (args.len() > 1).then(|| args[1..].join(" "));
    Ok(ReplCommand::Answer { position, text })
}

fn parse_vote_command(args: &[&str]) -> Result<ReplCommand> {
    let usage = "Usage: vote <n> <answer> like|dislike";
    let position = parse_position(args.first(), usage)?;
    let answer = parse_position(args.get(1), usage)?;
    let kind = args
        .get(2)
        .and_then(|s| VoteKind::parse(s))
        .ok_or_else(|| CliError::InvalidInput(usage.to_string()))?;
    Ok(ReplCommand::Vote { position, answer, kind })
}

fn parse_vote_shortcut(verb: &str, args: &[&str]) -> Result<ReplCommand> {
    let usage = format!("Usage: {} <n> <answer>", verb);
    let kind = VoteKind::parse(verb).ok_or_else(|| CliError::InvalidInput(usage.clone()))?;
    Ok(ReplCommand::Vote {
        position: parse_position(args.first(), &usage)?,
        answer: parse_position(args.get(1), &usage)?,
        kind,
    })
}

/// Parse a comma-separated list of tag names or 1-based catalog numbers.
fn parse_tag_list(input: &str) -> Result<Vec<Tag>> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let by_number = s
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| Tag::ALL.get(i).copied());
            by_number
                .or_else(|| Tag::parse(s))
                .ok_or_else(|| CliError::InvalidInput(format!("Unknown tag: {}", s)))
        })
        .collect()
}

fn prompt(editor: &mut DefaultEditor, label: &str, initial: &str) -> Result<Option<String>> {
    match editor.readline_with_initial(label, (initial, "")) {
        Ok(line) => Ok(Some(line)),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
        Err(e) => Err(readline_error(e)),
    }
}

fn confirm(editor: &mut DefaultEditor, label: &str, default: bool) -> Result<bool> {
    let Some(answer) = prompt(editor, label, "")? else {
        return Ok(false);
    };
    let answer = answer.trim();
    if answer.is_empty() {
        return Ok(default);
    }
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

fn readline_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to read input: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  list, ls                       - Show the current page");
    println!("  page <n> | next | prev         - Change page");
    println!("  newest | unanswered | all      - Change listing mode");
    println!("  tag <name>                     - Filter by tag");
    println!("  tags                           - List tags");
    println!("  clear                          - Clear filters");
    println!("  ask                            - Ask a question");
    println!("  show <n>                       - Expand or collapse answers of question n");
    println!("  answer <n> [text]              - Answer question n");
    println!("  vote <n> <a> like|dislike      - Vote on answer a of question n");
    println!("  like <n> <a> | dislike <n> <a> - Vote shortcuts");
    println!("  delete <n>                     - Delete your question n");
    println!("  delete-answer <n> <a>          - Delete your answer a of question n");
    println!("  login <name> | logout | whoami - Manage your identity");
    println!("  help, ?                        - Show this help");
    println!("  exit, quit, q                  - Exit REPL");
    println!();
}
