use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use ghibli_core::{update, AppState, Msg};
use ghibli_logging::{ghibli_debug, ghibli_info};

use super::config::AppConfig;
use super::effects::EffectRunner;
use super::ui::commands::{self, Command, HELP};
use super::ui::render;

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum AppEvent {
    /// A line typed by the user.
    Input(String),
    /// stdin reached end of file.
    InputClosed,
    /// A message produced by the engine.
    Engine(Msg),
}

pub fn run_app(config: &AppConfig) -> anyhow::Result<()> {
    let (app_tx, app_rx) = mpsc::channel::<AppEvent>();
    let runner = EffectRunner::new(config.engine_config(), app_tx.clone())?;
    spawn_input_reader(app_tx);

    let mut state = AppState::with_settings(config.browser_settings(rand::random()));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut pending = Some(Msg::Started);
    loop {
        let msg = match pending.take() {
            Some(msg) => msg,
            None => match app_rx.recv() {
                Ok(event) => match resolve(event, &state, &mut out)? {
                    Some(msg) => msg,
                    None => continue,
                },
                Err(_) => break,
            },
        };

        ghibli_debug!("dispatch {:?}", msg);
        let (next, effects) = update(state, msg);
        state = next;
        let quit = runner.run(effects);

        if state.consume_dirty() {
            write!(out, "\n{}", render::render(&state.view()))?;
            out.flush()?;
        }
        if quit {
            break;
        }
    }

    ghibli_info!("Leaving the browser");
    Ok(())
}

/// Turns an event into a message; help and input errors are answered directly.
fn resolve(event: AppEvent, state: &AppState, out: &mut impl Write) -> io::Result<Option<Msg>> {
    match event {
        AppEvent::Engine(msg) => Ok(Some(msg)),
        AppEvent::InputClosed => Ok(Some(Msg::QuitRequested)),
        AppEvent::Input(line) => match commands::parse(&line, &state.view()) {
            Command::Dispatch(msg) => Ok(Some(msg)),
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(None)
            }
            Command::Invalid(reason) => {
                writeln!(out, "{reason} (type 'help' for commands)")?;
                Ok(None)
            }
        },
    }
}

fn spawn_input_reader(app_tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if app_tx.send(AppEvent::Input(line)).is_err() {
                return;
            }
        }
        let _ = app_tx.send(AppEvent::InputClosed);
    });
}

#[cfg(test)]
mod tests {
    use ghibli_engine::{EngineEvent, FailureKind, FetchError};

    use crate::platform::effects::to_msg;
    use super::*;

    #[test]
    fn engine_failures_reach_the_core_as_text() {
        let event = EngineEvent::FilmsLoaded {
            request: 4,
            result: Err(FetchError {
                kind: FailureKind::Timeout,
                message: "operation timed out".to_string(),
            }),
        };
        assert_eq!(
            to_msg(event),
            Msg::FilmsLoaded {
                request: 4,
                result: Err("operation timed out".to_string()),
            }
        );
    }

    #[test]
    fn help_and_typos_are_answered_without_a_message() {
        let state = AppState::new();
        let mut out = Vec::new();

        let msg = resolve(AppEvent::Input("help".into()), &state, &mut out).unwrap();
        assert_eq!(msg, None);
        let msg = resolve(AppEvent::Input("dance".into()), &state, &mut out).unwrap();
        assert_eq!(msg, None);

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Commands:"));
        assert!(text.contains("unknown command 'dance'"));
    }

    #[test]
    fn closed_input_quits() {
        let state = AppState::new();
        let msg = resolve(AppEvent::InputClosed, &state, &mut Vec::new()).unwrap();
        assert_eq!(msg, Some(Msg::QuitRequested));
    }
}
