use std::fmt::Write;

use ghibli_core::{
    AppViewModel, Character, DashboardView, DetailView, DialogView, FilmRow, LoadStatus,
    ScreenView, SearchView, SplashView,
};

/// Renders the whole screen as plain text.
pub fn render(view: &AppViewModel) -> String {
    let mut out = String::new();
    match &view.screen {
        ScreenView::Splash(splash) => render_splash(&mut out, splash),
        ScreenView::Dashboard(dashboard) => render_dashboard(&mut out, dashboard),
        ScreenView::Search(search) => render_search(&mut out, search),
        ScreenView::Detail(detail) => render_detail(&mut out, detail),
    }
    if view.depth > 1 {
        line(&mut out, "");
        line(&mut out, "[back]");
    }
    out
}

fn render_splash(out: &mut String, splash: &SplashView) {
    line(out, "GHIBLI");
    match (&splash.cover_image, splash.loading) {
        (Some(cover), _) => line(out, &format!("Cover: {cover}")),
        (None, true) => line(out, "Loading cover..."),
        (None, false) => {}
    }
    line(out, "Press Enter to start.");
}

fn render_dashboard(out: &mut String, dashboard: &DashboardView) {
    line(out, "GHIBLI                                   [search]");
    if render_status(out, &dashboard.status, "No films available") {
        return;
    }
    if let Some(featured) = &dashboard.featured {
        line(
            out,
            &format!("Featured: {} ({})", featured.title, featured.release_date),
        );
    }
    let last = dashboard.sections.len().saturating_sub(1);
    for (index, section) in dashboard.sections.iter().enumerate() {
        line(out, "");
        line(out, &format!("== {} ==", section.title));
        // Only the last row ("All Films") is numbered for `open <n>`.
        let numbered = index == last;
        for (position, film) in section.films.iter().enumerate() {
            film_line(out, film, numbered.then_some(position + 1));
        }
    }
}

fn render_search(out: &mut String, search: &SearchView) {
    line(out, &format!("Search: {}_", search.query));
    let empty = "No films available";
    if search.status == LoadStatus::NoMatches {
        line(out, &format!("No films match '{}'", search.query.trim()));
        return;
    }
    if render_status(out, &search.status, empty) {
        return;
    }
    line(out, &format!("{} film(s)", search.results.len()));
    for (position, film) in search.results.iter().enumerate() {
        film_line(out, film, Some(position + 1));
    }
}

fn render_detail(out: &mut String, detail: &DetailView) {
    let film = &detail.film;
    line(out, &format!("{} ({})", film.title, film.original_title));
    line(out, &format!("Director:     {}", film.director));
    line(out, &format!("Released:     {}", film.release_date));
    line(out, &format!("Score:        {}", film.score));
    line(out, &format!("Running time: {}", film.running_time));
    if !film.banner.is_empty() {
        line(out, &format!("Banner:       {}", film.banner));
    }
    line(out, "");
    line(out, &film.description);

    match &detail.dialog {
        Some(dialog) => render_dialog(out, dialog),
        None => {
            line(out, "");
            line(out, "[characters]");
        }
    }
}

fn render_dialog(out: &mut String, dialog: &DialogView) {
    line(out, "");
    line(out, "-- Characters --");
    if render_status(out, &dialog.status, "No characters listed") {
        return;
    }
    for character in &dialog.characters {
        character_line(out, character);
    }
}

/// Writes the non-ready states; returns `true` when there is nothing else to show.
fn render_status(out: &mut String, status: &LoadStatus, empty: &str) -> bool {
    match status {
        LoadStatus::Idle | LoadStatus::Loading => line(out, "Loading..."),
        LoadStatus::Failed(message) => {
            line(out, &format!("Error: {message}"));
            line(out, "Type 'retry' to try again.");
        }
        LoadStatus::Empty => line(out, empty),
        LoadStatus::NoMatches | LoadStatus::Ready => return false,
    }
    true
}

fn film_line(out: &mut String, film: &FilmRow, position: Option<usize>) {
    let prefix = match position {
        Some(position) => format!("{position:>3}. "),
        None => "   - ".to_string(),
    };
    line(
        out,
        &format!(
            "{prefix}{} ({}) {} - score {}",
            film.title, film.release_date, film.director, film.score
        ),
    );
}

fn character_line(out: &mut String, character: &Character) {
    line(
        out,
        &format!(
            "  {}: gender {}, age {}, eyes {}, hair {}",
            character.name,
            character.gender,
            character.age,
            character.eye_color,
            character.hair_color
        ),
    );
}

fn line(out: &mut String, text: &str) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{text}");
}
