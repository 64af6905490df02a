use crate::{Character, Film, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// App launched; the splash screen mounts.
    Started,
    /// User left the splash screen.
    SplashDismissed,
    /// Engine finished a film list request.
    FilmsLoaded {
        request: RequestId,
        result: Result<Vec<Film>, String>,
    },
    /// Engine finished a character request.
    CharactersLoaded {
        request: RequestId,
        result: Result<Vec<Character>, String>,
    },
    /// User opened the search screen.
    SearchOpened,
    /// User edited the search box.
    QueryChanged(String),
    /// User picked a film from the visible list.
    FilmSelected { film_id: String },
    /// User pressed "view characters" on the detail screen.
    ViewCharactersClicked,
    /// User closed the character dialog.
    DialogDismissed,
    /// User asked to reload a screen that failed.
    RetryClicked,
    /// Back navigation.
    BackPressed,
    QuitRequested,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for unrecognised input.
    NoOp,
}
