use crate::projection::{self, MatchMode};
use crate::view_model::{
    AppViewModel, DashboardView, DetailView, DialogView, FilmRow, FilmSection, LoadStatus,
    ScreenView, SearchView, SplashView,
};
use crate::{Character, Film, RequestId};

/// Screens allowed above the root (Dashboard -> Search or Detail).
pub const MAX_PUSHED_SCREENS: usize = 2;

/// Outcome of one remote request as seen by a screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remote<T> {
    Idle,
    Loading { request: RequestId },
    Ready(Vec<T>),
    Error(String),
}

impl<T> Default for Remote<T> {
    fn default() -> Self {
        Remote::Idle
    }
}

impl<T> Remote<T> {
    /// Request this value is waiting on, if any.
    pub fn pending(&self) -> Option<RequestId> {
        match self {
            Remote::Loading { request } => Some(*request),
            _ => None,
        }
    }

    /// Loaded items; empty in every other state.
    pub fn items(&self) -> &[T] {
        match self {
            Remote::Ready(items) => items,
            _ => &[],
        }
    }

    fn is_waiting_on(&self, request: RequestId) -> bool {
        self.pending() == Some(request)
    }

    pub(crate) fn settle(&mut self, result: Result<Vec<T>, String>) {
        *self = match result {
            Ok(items) => Remote::Ready(items),
            Err(message) => Remote::Error(message),
        };
    }
}

/// Knobs that shape projections; fixed for the lifetime of an `AppState`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub search_mode: MatchMode,
    pub spotlight_director: String,
    pub featured_title: String,
    /// Chooses the splash cover among the loaded films.
    pub cover_seed: u64,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            search_mode: MatchMode::Prefix,
            spotlight_director: "Miyazaki".to_string(),
            featured_title: "My Neighbor Totoro".to_string(),
            cover_seed: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplashState {
    pub(crate) films: Remote<Film>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DashboardState {
    pub(crate) films: Remote<Film>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchState {
    pub(crate) films: Remote<Film>,
    pub(crate) query: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CharacterDialog {
    Closed,
    Open(Remote<Character>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub(crate) film: Film,
    pub(crate) dialog: CharacterDialog,
}

/// One entry of the navigation stack, owning that screen's private state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Splash(SplashState),
    Dashboard(DashboardState),
    Search(SearchState),
    Detail(DetailState),
}

impl Screen {
    pub(crate) fn dashboard() -> Self {
        Screen::Dashboard(DashboardState::default())
    }

    pub(crate) fn search() -> Self {
        Screen::Search(SearchState::default())
    }

    pub(crate) fn detail(film: Film) -> Self {
        Screen::Detail(DetailState {
            film,
            dialog: CharacterDialog::Closed,
        })
    }

    /// The film list this screen loads on mount, if it loads one.
    pub(crate) fn films_mut(&mut self) -> Option<&mut Remote<Film>> {
        match self {
            Screen::Splash(splash) => Some(&mut splash.films),
            Screen::Dashboard(dashboard) => Some(&mut dashboard.films),
            Screen::Search(search) => Some(&mut search.films),
            Screen::Detail(_) => None,
        }
    }

    pub(crate) fn films(&self) -> &[Film] {
        match self {
            Screen::Splash(splash) => splash.films.items(),
            Screen::Dashboard(dashboard) => dashboard.films.items(),
            Screen::Search(search) => search.films.items(),
            Screen::Detail(_) => &[],
        }
    }

    pub(crate) fn dialog_mut(&mut self) -> Option<&mut CharacterDialog> {
        match self {
            Screen::Detail(detail) => Some(&mut detail.dialog),
            _ => None,
        }
    }

    /// Requests still owned by this screen; cancelled when it goes away.
    pub(crate) fn pending_requests(&self) -> Vec<RequestId> {
        match self {
            Screen::Splash(SplashState { films })
            | Screen::Dashboard(DashboardState { films })
            | Screen::Search(SearchState { films, .. }) => films.pending().into_iter().collect(),
            Screen::Detail(DetailState {
                dialog: CharacterDialog::Open(characters),
                ..
            }) => characters.pending().into_iter().collect(),
            Screen::Detail(_) => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    stack: Vec<Screen>,
    last_request: RequestId,
    settings: BrowserSettings,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_settings(BrowserSettings::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: BrowserSettings) -> Self {
        Self {
            stack: vec![Screen::Splash(SplashState::default())],
            last_request: 0,
            settings,
            dirty: false,
        }
    }

    pub fn settings(&self) -> &BrowserSettings {
        &self.settings
    }

    /// Number of screens on the navigation stack, root included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn next_request(&mut self) -> RequestId {
        self.last_request += 1;
        self.last_request
    }

    pub(crate) fn top(&self) -> &Screen {
        // The stack is never emptied: pops stop at the root.
        &self.stack[self.stack.len() - 1]
    }

    pub(crate) fn top_mut(&mut self) -> &mut Screen {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    pub(crate) fn can_push(&self) -> bool {
        self.stack.len() <= MAX_PUSHED_SCREENS
    }

    pub(crate) fn push(&mut self, screen: Screen) {
        self.stack.push(screen);
        self.mark_dirty();
    }

    /// Pops the top screen unless it is the root.
    pub(crate) fn pop(&mut self) -> Option<Screen> {
        if self.stack.len() <= 1 {
            return None;
        }
        self.mark_dirty();
        self.stack.pop()
    }

    pub(crate) fn replace_top(&mut self, screen: Screen) -> Screen {
        self.mark_dirty();
        std::mem::replace(self.top_mut(), screen)
    }

    /// Drops the whole stack in favour of a new root.
    pub(crate) fn reset_root(&mut self, screen: Screen) -> Vec<Screen> {
        self.mark_dirty();
        std::mem::replace(&mut self.stack, vec![screen])
    }

    /// The film list waiting on `request`, wherever it sits on the stack.
    pub(crate) fn films_awaiting(&mut self, request: RequestId) -> Option<&mut Remote<Film>> {
        self.stack
            .iter_mut()
            .filter_map(Screen::films_mut)
            .find(|films| films.is_waiting_on(request))
    }

    pub(crate) fn characters_awaiting(
        &mut self,
        request: RequestId,
    ) -> Option<&mut Remote<Character>> {
        self.stack
            .iter_mut()
            .filter_map(Screen::dialog_mut)
            .find_map(|dialog| match dialog {
                CharacterDialog::Open(characters) if characters.is_waiting_on(request) => {
                    Some(characters)
                }
                _ => None,
            })
    }

    pub fn view(&self) -> AppViewModel {
        let screen = match self.top() {
            Screen::Splash(splash) => ScreenView::Splash(self.splash_view(splash)),
            Screen::Dashboard(dashboard) => ScreenView::Dashboard(self.dashboard_view(dashboard)),
            Screen::Search(search) => ScreenView::Search(self.search_view(search)),
            Screen::Detail(detail) => ScreenView::Detail(detail_view(detail)),
        };
        AppViewModel {
            screen,
            depth: self.depth(),
            dirty: self.dirty,
        }
    }

    fn splash_view(&self, splash: &SplashState) -> SplashView {
        SplashView {
            loading: matches!(splash.films, Remote::Idle | Remote::Loading { .. }),
            cover_image: projection::splash_cover(splash.films.items(), self.settings.cover_seed)
                .map(ToOwned::to_owned),
        }
    }

    fn dashboard_view(&self, dashboard: &DashboardState) -> DashboardView {
        let films = dashboard.films.items();
        let status = list_status(&dashboard.films, false);
        if status != LoadStatus::Ready {
            return DashboardView {
                status,
                featured: None,
                sections: Vec::new(),
            };
        }

        let director = &self.settings.spotlight_director;
        let mut sections = Vec::with_capacity(4);
        let mut add_section = |title: String, rows: Vec<Film>| {
            if !rows.is_empty() {
                sections.push(FilmSection {
                    title,
                    films: rows.iter().map(FilmRow::from).collect(),
                });
            }
        };
        add_section("Top Rated".to_string(), projection::top_rated(films));
        add_section(
            format!("Directed by {director}"),
            projection::by_director(films, director),
        );
        add_section("Latest Releases".to_string(), projection::most_recent(films));
        add_section("All Films".to_string(), films.to_vec());

        DashboardView {
            status,
            featured: projection::featured(films, &self.settings.featured_title).map(FilmRow::from),
            sections,
        }
    }

    fn search_view(&self, search: &SearchState) -> SearchView {
        let results = projection::search(
            search.films.items(),
            &search.query,
            self.settings.search_mode,
        );
        let no_matches = results.is_empty() && !search.query.trim().is_empty();
        SearchView {
            status: list_status(&search.films, no_matches),
            query: search.query.clone(),
            results: results.iter().map(FilmRow::from).collect(),
        }
    }
}

fn detail_view(detail: &DetailState) -> DetailView {
    let dialog = match &detail.dialog {
        CharacterDialog::Closed => None,
        CharacterDialog::Open(characters) => Some(DialogView {
            status: list_status(characters, false),
            characters: characters.items().to_vec(),
        }),
    };
    DetailView {
        film: (&detail.film).into(),
        dialog,
    }
}

fn list_status<T>(remote: &Remote<T>, no_matches: bool) -> LoadStatus {
    match remote {
        Remote::Idle => LoadStatus::Idle,
        Remote::Loading { .. } => LoadStatus::Loading,
        Remote::Error(message) => LoadStatus::Failed(message.clone()),
        Remote::Ready(items) if items.is_empty() => LoadStatus::Empty,
        Remote::Ready(_) if no_matches => LoadStatus::NoMatches,
        Remote::Ready(_) => LoadStatus::Ready,
    }
}
