use crate::{Character, Film};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Failed(String),
    /// Loaded, but the source list is empty.
    Empty,
    /// Loaded, but nothing matches the current query.
    NoMatches,
    Ready,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppViewModel {
    pub screen: ScreenView,
    pub depth: usize,
    pub dirty: bool,
}

impl AppViewModel {
    /// Films the user can pick by position on the current screen.
    ///
    /// On the dashboard this is the "All Films" row, which keeps catalog order.
    pub fn selectable(&self) -> &[FilmRow] {
        match &self.screen {
            ScreenView::Dashboard(dashboard) => dashboard
                .sections
                .last()
                .map(|section| section.films.as_slice())
                .unwrap_or_default(),
            ScreenView::Search(search) => &search.results,
            ScreenView::Splash(_) | ScreenView::Detail(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenView {
    Splash(SplashView),
    Dashboard(DashboardView),
    Search(SearchView),
    Detail(DetailView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashView {
    pub loading: bool,
    pub cover_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub status: LoadStatus,
    pub featured: Option<FilmRow>,
    /// Non-empty rows only; "All Films" is always last when present.
    pub sections: Vec<FilmSection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmSection {
    pub title: String,
    pub films: Vec<FilmRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchView {
    pub status: LoadStatus,
    pub query: String,
    pub results: Vec<FilmRow>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailView {
    pub film: FilmDetail,
    /// `Some` while the character dialog is open.
    pub dialog: Option<DialogView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogView {
    pub status: LoadStatus,
    pub characters: Vec<Character>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmRow {
    pub id: String,
    pub title: String,
    pub director: String,
    pub release_date: String,
    pub score: String,
}

impl From<&Film> for FilmRow {
    fn from(film: &Film) -> Self {
        Self {
            id: film.id.clone(),
            title: film.title.clone(),
            director: film.director.clone(),
            release_date: film.release_date.clone(),
            score: film.score_label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilmDetail {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub director: String,
    pub release_date: String,
    pub score: String,
    pub running_time: String,
    pub image: String,
    pub banner: String,
}

impl From<&Film> for FilmDetail {
    fn from(film: &Film) -> Self {
        Self {
            id: film.id.clone(),
            title: film.title.clone(),
            original_title: film.original_title.clone(),
            description: film.description.clone(),
            director: film.director.clone(),
            release_date: film.release_date.clone(),
            score: film.score_label().to_string(),
            running_time: film.running_time_label(),
            image: film.image.clone(),
            banner: film.movie_banner.clone(),
        }
    }
}
