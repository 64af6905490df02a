//! Typed access to the Ghibli API endpoints on top of a [`Fetcher`].

use ghibli_core::{Character, Film};
use ghibli_logging::{ghibli_debug, ghibli_warn};
use url::Url;

use crate::decode::{decode_character, decode_films, decode_people, decode_text};
use crate::{CharacterFailurePolicy, FailureKind, FetchError, Fetcher};

pub const DEFAULT_BASE_URL: &str = "https://ghibliapi.vercel.app";

pub struct Catalog<F> {
    base: Url,
    fetcher: F,
    character_failures: CharacterFailurePolicy,
}

impl<F: Fetcher> Catalog<F> {
    pub fn new(
        base_url: &str,
        fetcher: F,
        character_failures: CharacterFailurePolicy,
    ) -> Result<Self, FetchError> {
        let mut base = Url::parse(base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{base_url}: {err}")))?;
        // Joining relative paths needs a trailing slash, or the last segment is replaced.
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self {
            base,
            fetcher,
            character_failures,
        })
    }

    pub fn films_url(&self) -> Result<Url, FetchError> {
        self.endpoint("films")
    }

    pub fn film_url(&self, film_id: &str) -> Result<Url, FetchError> {
        let mut url = self.films_url()?;
        url.path_segments_mut()
            .map_err(|()| FetchError::new(FailureKind::InvalidUrl, "base url cannot hold a path"))?
            .push(film_id);
        Ok(url)
    }

    /// The whole film list in API order.
    pub async fn films(&self) -> Result<Vec<Film>, FetchError> {
        let text = self.get_text(self.films_url()?.as_str()).await?;
        Ok(decode_films(&text)?)
    }

    /// Character resource URLs listed on a film.
    pub async fn people(&self, film_id: &str) -> Result<Vec<String>, FetchError> {
        let text = self.get_text(self.film_url(film_id)?.as_str()).await?;
        Ok(decode_people(&text)?)
    }

    pub async fn character(&self, url: &str) -> Result<Character, FetchError> {
        let text = self.get_text(url).await?;
        Ok(decode_character(&text)?)
    }

    /// Every character of a film, fetched one after another in `people` order.
    pub async fn characters(&self, film_id: &str) -> Result<Vec<Character>, FetchError> {
        let people = self.people(film_id).await?;
        ghibli_debug!("film {} lists {} characters", film_id, people.len());

        let mut characters = Vec::with_capacity(people.len());
        for url in &people {
            match self.character(url).await {
                Ok(character) => characters.push(character),
                Err(err) => match self.character_failures {
                    CharacterFailurePolicy::Skip => {
                        ghibli_warn!("skipping character {}: {}", url, err);
                    }
                    CharacterFailurePolicy::Abort => return Err(err),
                },
            }
        }
        Ok(characters)
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base
            .join(path)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let output = self.fetcher.get(url).await?;
        Ok(decode_text(
            &output.bytes,
            output.metadata.content_type.as_deref(),
        )?)
    }
}
