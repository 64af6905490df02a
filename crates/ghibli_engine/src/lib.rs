//! Ghibli engine: HTTP fetching, decoding and cancellable catalog requests.
mod catalog;
mod decode;
mod engine;
mod fetch;
mod types;

pub use catalog::{Catalog, DEFAULT_BASE_URL};
pub use decode::{decode_character, decode_films, decode_people, decode_text, DecodeError};
pub use engine::{ChannelEventSink, EngineConfig, EngineError, EngineHandle, EventSink};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use types::{
    CharacterFailurePolicy, EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput,
};
