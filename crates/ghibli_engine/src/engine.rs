use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use ghibli_core::RequestId;
use ghibli_logging::{ghibli_debug, ghibli_info, ghibli_warn};
use tokio_util::sync::CancellationToken;

use crate::catalog::{Catalog, DEFAULT_BASE_URL};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::{CharacterFailurePolicy, EngineEvent, FetchError};

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub base_url: String,
    pub fetch: FetchSettings,
    pub character_failures: CharacterFailurePolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            fetch: FetchSettings::default(),
            character_failures: CharacterFailurePolicy::default(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to set up catalog client: {0}")]
    Client(#[from] FetchError),
}

/// Receives completed requests; called from engine worker tasks.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

enum EngineCommand {
    LoadFilms { request: RequestId },
    LoadCharacters { request: RequestId, film_id: String },
    Cancel { request: RequestId },
}

type InFlight = Arc<Mutex<HashMap<RequestId, CancellationToken>>>;

/// Runs catalog requests on a background tokio runtime.
///
/// Each request can be cancelled by id; a cancelled request reports nothing.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let fetcher = ReqwestFetcher::new(config.fetch.clone())?;
        Self::with_fetcher(config, fetcher, sink)
    }

    pub fn with_fetcher<F>(
        config: EngineConfig,
        fetcher: F,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, EngineError>
    where
        F: Fetcher + 'static,
    {
        let catalog = Arc::new(Catalog::new(
            &config.base_url,
            fetcher,
            config.character_failures,
        )?);
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            let in_flight: InFlight = Arc::default();
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Cancel { request } => cancel(&in_flight, request),
                    EngineCommand::LoadFilms { request } => {
                        let catalog = catalog.clone();
                        spawn_request(&runtime, &in_flight, &sink, request, async move {
                            EngineEvent::FilmsLoaded {
                                request,
                                result: catalog.films().await,
                            }
                        });
                    }
                    EngineCommand::LoadCharacters { request, film_id } => {
                        let catalog = catalog.clone();
                        spawn_request(&runtime, &in_flight, &sink, request, async move {
                            EngineEvent::CharactersLoaded {
                                request,
                                result: catalog.characters(&film_id).await,
                            }
                        });
                    }
                }
            }
            ghibli_info!("engine command channel closed; shutting down");
        });

        Ok(Self { cmd_tx })
    }

    pub fn load_films(&self, request: RequestId) {
        self.send(EngineCommand::LoadFilms { request });
    }

    pub fn load_characters(&self, request: RequestId, film_id: impl Into<String>) {
        self.send(EngineCommand::LoadCharacters {
            request,
            film_id: film_id.into(),
        });
    }

    pub fn cancel(&self, request: RequestId) {
        self.send(EngineCommand::Cancel { request });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            ghibli_warn!("engine is gone; dropping command");
        }
    }
}

fn spawn_request<T>(
    runtime: &tokio::runtime::Runtime,
    in_flight: &InFlight,
    sink: &Arc<dyn EventSink>,
    request: RequestId,
    task: T,
) where
    T: std::future::Future<Output = EngineEvent> + Send + 'static,
{
    let token = CancellationToken::new();
    if let Ok(mut map) = in_flight.lock() {
        map.insert(request, token.clone());
    }
    let in_flight = in_flight.clone();
    let sink = sink.clone();

    runtime.spawn(async move {
        let outcome = tokio::select! {
            _ = token.cancelled() => None,
            event = task => Some(event),
        };
        if let Ok(mut map) = in_flight.lock() {
            map.remove(&request);
        }
        match outcome {
            Some(event) => sink.emit(event),
            None => ghibli_debug!("request {} cancelled", request),
        }
    });
}

fn cancel(in_flight: &InFlight, request: RequestId) {
    let token = in_flight
        .lock()
        .ok()
        .and_then(|mut map| map.remove(&request));
    match token {
        Some(token) => token.cancel(),
        None => ghibli_debug!("cancel for request {} ignored: not in flight", request),
    }
}
