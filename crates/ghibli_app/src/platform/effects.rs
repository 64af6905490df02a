use std::sync::{mpsc, Arc};

use ghibli_core::{Effect, Msg};
use ghibli_engine::{EngineConfig, EngineError, EngineEvent, EngineHandle, EventSink};
use ghibli_logging::{ghibli_info, ghibli_warn};

use super::app::AppEvent;

/// Executes core effects against the engine.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, app_tx: mpsc::Sender<AppEvent>) -> Result<Self, EngineError> {
        let sink = Arc::new(MsgSink { tx: app_tx });
        let engine = EngineHandle::new(config, sink)?;
        Ok(Self { engine })
    }

    /// Runs `effects` in order; returns `true` once a quit was requested.
    pub fn run(&self, effects: Vec<Effect>) -> bool {
        let mut quit = false;
        for effect in effects {
            match effect {
                Effect::FetchFilms { request } => {
                    ghibli_info!("FetchFilms request={}", request);
                    self.engine.load_films(request);
                }
                Effect::FetchCharacters { request, film_id } => {
                    ghibli_info!("FetchCharacters request={} film_id={}", request, film_id);
                    self.engine.load_characters(request, film_id);
                }
                Effect::Cancel { request } => {
                    ghibli_info!("Cancel request={}", request);
                    self.engine.cancel(request);
                }
                Effect::Quit => quit = true,
            }
        }
        quit
    }
}

/// Turns engine completions into core messages on the app channel.
struct MsgSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let msg = to_msg(event);
        let _ = self.tx.send(AppEvent::Engine(msg));
    }
}

pub(crate) fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::FilmsLoaded { request, result } => Msg::FilmsLoaded {
            request,
            result: result.map_err(|err| {
                ghibli_warn!("Film request {} failed ({}): {}", request, err.kind, err);
                err.to_string()
            }),
        },
        EngineEvent::CharactersLoaded { request, result } => Msg::CharactersLoaded {
            request,
            result: result.map_err(|err| {
                ghibli_warn!("Character request {} failed ({}): {}", request, err.kind, err);
                err.to_string()
            }),
        },
    }
}
