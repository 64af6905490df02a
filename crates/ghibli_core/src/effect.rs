use crate::RequestId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchFilms { request: RequestId },
    FetchCharacters { request: RequestId, film_id: String },
    /// The screen that issued `request` is gone; its result will be ignored.
    Cancel { request: RequestId },
    Quit,
}
