//! Ghibli browser core: data model, projections and the pure screen state machine.
mod effect;
mod model;
mod msg;
pub mod projection;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use model::{Character, Film, RequestId, NOT_AVAILABLE, UNKNOWN_ATTRIBUTE};
pub use msg::Msg;
pub use projection::MatchMode;
pub use state::{AppState, BrowserSettings, Remote, MAX_PUSHED_SCREENS};
pub use update::update;
pub use view_model::{
    AppViewModel, DashboardView, DetailView, DialogView, FilmDetail, FilmRow, FilmSection,
    LoadStatus, ScreenView, SearchView, SplashView,
};
