use ghibli_logging::ghibli_debug;

use crate::state::{CharacterDialog, Remote, Screen};
use crate::{AppState, Effect, Msg, RequestId};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            if matches!(state.top(), Screen::Splash(_)) {
                mount_top(&mut state).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::SplashDismissed => {
            if !matches!(state.top(), Screen::Splash(_)) {
                return (state, Vec::new());
            }
            let dropped = state.reset_root(Screen::dashboard());
            let mut effects = cancel_all(&dropped);
            effects.extend(mount_top(&mut state));
            effects
        }
        Msg::FilmsLoaded { request, result } => {
            match state.films_awaiting(request) {
                Some(films) => {
                    films.settle(result);
                    state.mark_dirty();
                }
                None => ignore_stale("film list", request),
            }
            Vec::new()
        }
        Msg::CharactersLoaded { request, result } => {
            match state.characters_awaiting(request) {
                Some(characters) => {
                    characters.settle(result);
                    state.mark_dirty();
                }
                None => ignore_stale("character list", request),
            }
            Vec::new()
        }
        Msg::SearchOpened => {
            if matches!(state.top(), Screen::Dashboard(_)) && state.can_push() {
                state.push(Screen::search());
                mount_top(&mut state).into_iter().collect()
            } else {
                Vec::new()
            }
        }
        Msg::QueryChanged(query) => {
            if let Screen::Search(search) = state.top_mut() {
                if search.query != query {
                    search.query = query;
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::FilmSelected { film_id } => select_film(&mut state, &film_id),
        Msg::ViewCharactersClicked => open_characters(&mut state),
        Msg::DialogDismissed => close_dialog(&mut state),
        Msg::RetryClicked => retry(&mut state),
        Msg::BackPressed => {
            let dialog_open = matches!(
                state.top(),
                Screen::Detail(detail) if detail.dialog != CharacterDialog::Closed
            );
            if dialog_open {
                close_dialog(&mut state)
            } else {
                match state.pop() {
                    Some(screen) => cancel_all(std::slice::from_ref(&screen)),
                    None => vec![Effect::Quit],
                }
            }
        }
        Msg::QuitRequested => vec![Effect::Quit],
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Starts the top screen's film fetch.
fn mount_top(state: &mut AppState) -> Option<Effect> {
    if state.top_mut().films_mut().is_none() {
        return None;
    }
    let request = state.next_request();
    let films = state.top_mut().films_mut()?;
    *films = Remote::Loading { request };
    state.mark_dirty();
    Some(Effect::FetchFilms { request })
}

fn select_film(state: &mut AppState, film_id: &str) -> Vec<Effect> {
    let Some(film) = state
        .top()
        .films()
        .iter()
        .find(|film| film.id == film_id)
        .cloned()
    else {
        return Vec::new();
    };

    if matches!(state.top(), Screen::Search(_)) {
        let search = state.replace_top(Screen::detail(film));
        return cancel_all(std::slice::from_ref(&search));
    }
    if matches!(state.top(), Screen::Dashboard(_)) && state.can_push() {
        state.push(Screen::detail(film));
    }
    Vec::new()
}

fn open_characters(state: &mut AppState) -> Vec<Effect> {
    let film_id = match state.top() {
        Screen::Detail(detail)
            if !matches!(detail.dialog, CharacterDialog::Open(Remote::Loading { .. })) =>
        {
            detail.film.id.clone()
        }
        // Not on a detail screen, or a fetch is already in flight.
        _ => return Vec::new(),
    };
    let request = state.next_request();
    let Some(dialog) = state.top_mut().dialog_mut() else {
        return Vec::new();
    };
    *dialog = CharacterDialog::Open(Remote::Loading { request });
    state.mark_dirty();
    vec![Effect::FetchCharacters { request, film_id }]
}

fn close_dialog(state: &mut AppState) -> Vec<Effect> {
    let Some(dialog) = state.top_mut().dialog_mut() else {
        return Vec::new();
    };
    let closed = std::mem::replace(dialog, CharacterDialog::Closed);
    let CharacterDialog::Open(characters) = closed else {
        return Vec::new();
    };
    state.mark_dirty();
    characters
        .pending()
        .map(|request| Effect::Cancel { request })
        .into_iter()
        .collect()
}

fn retry(state: &mut AppState) -> Vec<Effect> {
    let dialog_failed = matches!(
        state.top(),
        Screen::Detail(detail) if matches!(detail.dialog, CharacterDialog::Open(Remote::Error(_)))
    );
    if dialog_failed {
        return open_characters(state);
    }
    let list_failed = state
        .top_mut()
        .films_mut()
        .is_some_and(|films| matches!(films, Remote::Error(_)));
    if list_failed {
        mount_top(state).into_iter().collect()
    } else {
        Vec::new()
    }
}

fn cancel_all(screens: &[Screen]) -> Vec<Effect> {
    screens
        .iter()
        .flat_map(Screen::pending_requests)
        .map(|request| Effect::Cancel { request })
        .collect()
}

fn ignore_stale(what: &str, request: RequestId) {
    ghibli_debug!("ignoring {what} result for request {request}: no screen is waiting on it");
}
