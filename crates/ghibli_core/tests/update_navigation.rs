use std::sync::Once;

use ghibli_core::{
    update, AppState, Effect, Film, LoadStatus, Msg, RequestId, ScreenView, MAX_PUSHED_SCREENS,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(ghibli_logging::initialize_for_tests);
}

fn film(id: &str, title: &str) -> Film {
    Film {
        id: id.to_string(),
        title: title.to_string(),
        director: "Hayao Miyazaki".to_string(),
        release_date: "1988".to_string(),
        ..Film::default()
    }
}

fn films_request(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchFilms { request } => Some(*request),
            _ => None,
        })
        .expect("a film fetch effect")
}

/// Splash -> dashboard with the catalog loaded.
fn dashboard_with(films: Vec<Film>) -> AppState {
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, effects) = update(state, Msg::SplashDismissed);
    let request = films_request(&effects);
    let (state, _) = update(
        state,
        Msg::FilmsLoaded {
            request,
            result: Ok(films),
        },
    );
    state
}

fn catalog() -> Vec<Film> {
    vec![film("1", "Castle in the Sky"), film("2", "My Neighbor Totoro")]
}

#[test]
fn app_starts_on_splash_and_loads_cover() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::Started);

    assert_eq!(effects, vec![Effect::FetchFilms { request: 1 }]);
    assert!(state.consume_dirty());
    match state.view().screen {
        ScreenView::Splash(splash) => {
            assert!(splash.loading);
            assert_eq!(splash.cover_image, None);
        }
        other => panic!("expected splash, got {other:?}"),
    }
}

#[test]
fn dismissing_splash_cancels_cover_fetch_and_mounts_dashboard() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::Started);
    let (state, effects) = update(state, Msg::SplashDismissed);

    assert_eq!(
        effects,
        vec![
            Effect::Cancel { request: 1 },
            Effect::FetchFilms { request: 2 },
        ]
    );
    assert_eq!(state.depth(), 1);
    match state.view().screen {
        ScreenView::Dashboard(dashboard) => assert_eq!(dashboard.status, LoadStatus::Loading),
        other => panic!("expected dashboard, got {other:?}"),
    }
}

#[test]
fn selecting_from_dashboard_pushes_detail_and_back_pops_it() {
    init_logging();
    let state = dashboard_with(catalog());

    let (state, effects) = update(
        state,
        Msg::FilmSelected {
            film_id: "2".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.depth(), 2);
    match state.view().screen {
        ScreenView::Detail(detail) => {
            assert_eq!(detail.film.title, "My Neighbor Totoro");
            assert_eq!(detail.film.score, "N/A");
            assert_eq!(detail.dialog, None);
        }
        other => panic!("expected detail, got {other:?}"),
    }

    let (state, effects) = update(state, Msg::BackPressed);
    assert!(effects.is_empty());
    assert_eq!(state.depth(), 1);
    // The dashboard kept its list; nothing is refetched.
    match state.view().screen {
        ScreenView::Dashboard(dashboard) => assert_eq!(dashboard.status, LoadStatus::Ready),
        other => panic!("expected dashboard, got {other:?}"),
    }
}

#[test]
fn unknown_film_is_ignored() {
    init_logging();
    let state = dashboard_with(catalog());
    let before = state.clone();

    let (state, effects) = update(
        state,
        Msg::FilmSelected {
            film_id: "missing".to_string(),
        },
    );
    assert_eq!(state, before);
    assert!(effects.is_empty());
}

#[test]
fn search_screen_refetches_on_every_open() {
    init_logging();
    let state = dashboard_with(catalog());

    let (state, effects) = update(state, Msg::SearchOpened);
    let first = films_request(&effects);
    assert_eq!(state.depth(), 2);

    let (state, effects) = update(state, Msg::BackPressed);
    assert_eq!(effects, vec![Effect::Cancel { request: first }]);

    let (state, effects) = update(state, Msg::SearchOpened);
    let second = films_request(&effects);
    assert!(second > first);
    assert_eq!(state.depth(), 2);
}

#[test]
fn selecting_from_search_replaces_search_with_detail() {
    init_logging();
    let state = dashboard_with(catalog());
    let (state, effects) = update(state, Msg::SearchOpened);
    let request = films_request(&effects);
    let (state, _) = update(
        state,
        Msg::FilmsLoaded {
            request,
            result: Ok(catalog()),
        },
    );

    let (state, effects) = update(
        state,
        Msg::FilmSelected {
            film_id: "1".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.depth(), 2);
    assert!(matches!(state.view().screen, ScreenView::Detail(_)));

    // Back from detail lands on the dashboard, not on search.
    let (state, _) = update(state, Msg::BackPressed);
    assert!(matches!(state.view().screen, ScreenView::Dashboard(_)));
}

#[test]
fn navigation_depth_is_bounded() {
    init_logging();
    let state = dashboard_with(catalog());
    let (state, _) = update(
        state,
        Msg::FilmSelected {
            film_id: "1".to_string(),
        },
    );
    let (state, effects) = update(state, Msg::SearchOpened);

    assert!(effects.is_empty());
    assert!(state.depth() <= MAX_PUSHED_SCREENS + 1);
    assert!(matches!(state.view().screen, ScreenView::Detail(_)));
}

#[test]
fn back_at_root_quits() {
    init_logging();
    let state = dashboard_with(Vec::new());
    let (_state, effects) = update(state, Msg::BackPressed);
    assert_eq!(effects, vec![Effect::Quit]);

    let (_state, effects) = update(AppState::new(), Msg::QuitRequested);
    assert_eq!(effects, vec![Effect::Quit]);
}

#[test]
fn query_change_filters_without_touching_load_status() {
    init_logging();
    let state = dashboard_with(catalog());
    let (state, effects) = update(state, Msg::SearchOpened);
    let request = films_request(&effects);

    // Typing while the list is still loading keeps it loading.
    let (state, effects) = update(state, Msg::QueryChanged("my".to_string()));
    assert!(effects.is_empty());
    match state.view().screen {
        ScreenView::Search(search) => {
            assert_eq!(search.status, LoadStatus::Loading);
            assert_eq!(search.query, "my");
        }
        other => panic!("expected search, got {other:?}"),
    }

    let (state, _) = update(
        state,
        Msg::FilmsLoaded {
            request,
            result: Ok(catalog()),
        },
    );
    let view = state.view();
    let titles: Vec<_> = view.selectable().iter().map(|row| row.title.as_str()).collect();
    assert_eq!(titles, vec!["My Neighbor Totoro"]);

    let (mut state, _) = update(state, Msg::QueryChanged("zzz".to_string()));
    assert!(state.consume_dirty());
    match state.view().screen {
        ScreenView::Search(search) => {
            assert_eq!(search.status, LoadStatus::NoMatches);
            assert!(search.results.is_empty());
        }
        other => panic!("expected search, got {other:?}"),
    }

    // Same text again is not a change.
    let (mut state, _) = update(state, Msg::QueryChanged("zzz".to_string()));
    assert!(!state.consume_dirty());
}

#[test]
fn query_change_outside_search_is_ignored() {
    init_logging();
    let state = dashboard_with(catalog());
    let before = state.clone();
    let (state, _) = update(state, Msg::QueryChanged("totoro".to_string()));
    assert_eq!(state, before);
}
