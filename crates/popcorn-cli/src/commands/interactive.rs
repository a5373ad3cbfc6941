//! Line-oriented interactive session.
//!
//! Plain text updates the search query. Lines starting with `:` are
//! commands; an empty line is an Enter key press.

use super::{prompts, ui, views, views::Panes, Session};
use crate::output::Output;
use color_eyre::Result;
use popcorn_core::{App, Intent, Storage};
use tracing::debug;

const HELP: &str = "\
Type to search. Commands:
  :open <n|id>     open (or close) a result
  :close, :esc     close the open title (Escape)
  :enter           focus and clear the search box (Enter)
  :blur            leave the search box
  :rate <1-10>     rate the open title
  :add             add the open title to your watched list
  :remove <n|id>   remove a title from your watched list
  :toggle <pane>   expand/collapse results, detail, summary or watched
  :help            show this help
  :quit            exit";

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Query(String),
    Key(&'static str),
    Open(String),
    Rate(String),
    Add,
    Remove(String),
    Blur,
    Toggle(String),
    Help,
    Quit,
    Unknown(String),
}

fn parse_line(line: &str) -> Command {
    let Some(rest) = line.strip_prefix(':') else {
        if line.trim().is_empty() {
            return Command::Key("Enter");
        }
        return Command::Query(line.to_string());
    };

    let (name, arg) = match rest.trim().split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim().to_string()),
        None => (rest.trim(), String::new()),
    };
    match name {
        "open" | "o" => Command::Open(arg),
        "close" | "esc" => Command::Key("Escape"),
        "enter" => Command::Key("Enter"),
        "blur" => Command::Blur,
        "rate" => Command::Rate(arg),
        "add" | "a" => Command::Add,
        "remove" | "rm" => Command::Remove(arg),
        "toggle" | "t" => Command::Toggle(arg),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

/// A 1-based index into `ids`, or the id itself
fn resolve_id(arg: &str, ids: &[String]) -> Option<String> {
    if arg.is_empty() {
        return None;
    }
    match arg.parse::<usize>() {
        Ok(n) if n >= 1 => ids.get(n - 1).cloned(),
        Ok(_) => None,
        Err(_) => Some(arg.to_string()),
    }
}

pub async fn run_interactive(session: &Session, output: &Output) -> Result<()> {
    let mut app = session.app()?;
    let mut panes = Panes::default();

    output.info(HELP);
    ui::set_terminal_title(&app.title());

    loop {
        let line = prompts::prompt_line("popcorn")?;
        let command = parse_line(&line);
        debug!("Interactive command: {:?}", command);

        let result = match command {
            Command::Quit => break,
            Command::Help => {
                output.info(HELP);
                continue;
            }
            Command::Unknown(name) => {
                output.warn(format!("Unknown command ':{}'. Type :help for a list.", name));
                continue;
            }
            Command::Toggle(name) => {
                match panes.toggle(&name) {
                    Some(open) => output.info(format!("{} {}", name, if open { "expanded" } else { "collapsed" })),
                    None => output.warn(format!("Unknown pane '{}'", name)),
                }
                Ok(())
            }
            Command::Query(text) => app.dispatch(Intent::Query(text)),
            Command::Key(code) => app.press_key(code).map(|_| ()),
            Command::Blur => app.dispatch(Intent::BlurSearch),
            Command::Open(arg) => {
                let ids: Vec<String> = app.search_state().items.into_iter().map(|i| i.imdb_id).collect();
                match resolve_id(&arg, &ids) {
                    Some(id) => app.dispatch(Intent::Select(id)),
                    None => {
                        output.warn(format!("No result '{}'", arg));
                        continue;
                    }
                }
            }
            Command::Rate(arg) => match arg.parse::<u8>() {
                Ok(value) => app.dispatch(Intent::Rate(value)),
                Err(_) => {
                    output.warn("Usage: :rate <1-10>");
                    continue;
                }
            },
            Command::Add => app.dispatch(Intent::AddWatched),
            Command::Remove(arg) => {
                let ids: Vec<String> = app.watched().movies().iter().map(|m| m.imdb_id.clone()).collect();
                match resolve_id(&arg, &ids) {
                    Some(id) => app.dispatch(Intent::RemoveWatched(id)),
                    None => {
                        output.warn(format!("No watched title '{}'", arg));
                        continue;
                    }
                }
            }
        };

        if let Err(e) = result {
            output.error(e.to_string());
        }

        let spinner = ui::Spinner::start("Loading...");
        app.settled().await;
        spinner.finish();

        render(&app, &panes, output);
    }

    app.shutdown();
    ui::set_terminal_title("");
    Ok(())
}

fn render<S: Storage>(app: &App<S>, panes: &Panes, output: &Output) {
    ui::set_terminal_title(&app.title());

    let search = app.search_state();
    if panes.results {
        if let Some(error) = &search.error {
            output.error(error);
        } else if !search.items.is_empty() {
            output.table(&views::results_table(&search.items, app.selection().active(), |id| {
                app.is_watched(id)
            }));
        }
    } else if !search.items.is_empty() {
        output.info(format!("[+] {} results", search.items.len()));
    }

    if let Some(active) = app.selection().active() {
        let detail = app.detail_state();
        if let Some(error) = &detail.error {
            output.error(error);
        } else if let Some(record) = detail.record.as_ref().filter(|_| panes.detail) {
            let rated = app.watched().user_rating_for(active);
            output.table(&views::detail_table(record, rated, Some(app.draft())));
        }
    }

    if panes.summary {
        output.table(&views::summary_table(&app.summary()));
    }
    if panes.watched && !app.watched().is_empty() {
        output.table(&views::watched_table(app.watched().movies()));
    }
}
