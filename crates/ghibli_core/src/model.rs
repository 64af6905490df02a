/// Identifier attached to every fetch effect and its result message.
pub type RequestId = u64;

/// Label shown for a missing score or running time.
pub const NOT_AVAILABLE: &str = "N/A";

/// Value used for character attributes the API leaves out.
pub const UNKNOWN_ATTRIBUTE: &str = "Unknown";

/// One film from the catalog. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Film {
    pub id: String,
    pub title: String,
    pub original_title: String,
    pub description: String,
    pub director: String,
    /// Kept as text; the API sends a bare year.
    pub release_date: String,
    pub image: String,
    pub movie_banner: String,
    pub running_time: String,
    pub rt_score: String,
}

impl Film {
    /// Rotten Tomatoes score as a number; anything non-numeric counts as 0.
    pub fn score(&self) -> i32 {
        self.rt_score.parse().unwrap_or(0)
    }

    pub fn score_label(&self) -> &str {
        if self.rt_score.is_empty() {
            NOT_AVAILABLE
        } else {
            &self.rt_score
        }
    }

    pub fn running_time_label(&self) -> String {
        if self.running_time.is_empty() {
            NOT_AVAILABLE.to_string()
        } else {
            format!("{}m", self.running_time)
        }
    }
}

/// One person appearing in a film.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub age: String,
    pub eye_color: String,
    pub hair_color: String,
}

impl Character {
    /// A character with only identity known; every attribute is `Unknown`.
    pub fn named(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            gender: UNKNOWN_ATTRIBUTE.to_string(),
            age: UNKNOWN_ATTRIBUTE.to_string(),
            eye_color: UNKNOWN_ATTRIBUTE.to_string(),
            hair_color: UNKNOWN_ATTRIBUTE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_optional_fields_render_as_not_available() {
        let film = Film::default();
        assert_eq!(film.score(), 0);
        assert_eq!(film.score_label(), "N/A");
        assert_eq!(film.running_time_label(), "N/A");
    }

    #[test]
    fn present_fields_render_verbatim() {
        let film = Film {
            rt_score: "97".into(),
            running_time: "125".into(),
            ..Film::default()
        };
        assert_eq!(film.score(), 97);
        assert_eq!(film.score_label(), "97");
        assert_eq!(film.running_time_label(), "125m");
    }

    #[test]
    fn garbage_score_counts_as_zero() {
        let film = Film {
            rt_score: "9x".into(),
            ..Film::default()
        };
        assert_eq!(film.score(), 0);
    }
}
