//! Line commands typed on stdin.

use ghibli_core::{AppViewModel, Msg};

pub const HELP: &str = "\
Commands:
  <enter>            continue past the splash screen
  search | s         open search
  query <text>       set the search text (also: /<text>)
  open <n> | <n>     open the n-th listed film
  characters | c     show the characters of the open film
  close              close the character dialog
  retry | r          reload after an error
  back | b           go back
  quit | q           exit
  help | ?           show this help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    Invalid(String),
}

/// Maps one input line to a message, resolving list positions against `view`.
pub fn parse(line: &str, view: &AppViewModel) -> Command {
    let line = line.trim();
    if let Some(query) = line.strip_prefix('/') {
        return Command::Dispatch(Msg::QueryChanged(query.to_string()));
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let msg = match word.to_ascii_lowercase().as_str() {
        "" | "enter" | "continue" => Msg::SplashDismissed,
        "search" | "s" => Msg::SearchOpened,
        "query" => Msg::QueryChanged(rest.to_string()),
        "open" | "o" => return select(rest, view),
        "characters" | "c" => Msg::ViewCharactersClicked,
        "close" => Msg::DialogDismissed,
        "retry" | "r" => Msg::RetryClicked,
        "back" | "b" => Msg::BackPressed,
        "quit" | "q" | "exit" => Msg::QuitRequested,
        "help" | "?" => return Command::Help,
        _ if word.chars().all(|c| c.is_ascii_digit()) => return select(word, view),
        _ => return Command::Invalid(format!("unknown command '{line}'")),
    };
    Command::Dispatch(msg)
}

fn select(position: &str, view: &AppViewModel) -> Command {
    let Ok(position) = position.parse::<usize>() else {
        return Command::Invalid(format!("'{position}' is not a list position"));
    };
    match position
        .checked_sub(1)
        .and_then(|index| view.selectable().get(index))
    {
        Some(row) => Command::Dispatch(Msg::FilmSelected {
            film_id: row.id.clone(),
        }),
        None => Command::Invalid(format!("no film #{position} on this screen")),
    }
}
