//! Interactive search-and-forecast session.
//!
//! `SessionState` is an explicit state object changed only through
//! [`SessionState::apply`]. Every selection and every search bumps a
//! generation counter; asynchronous outcomes carry the generation they were
//! started under and are discarded when it is no longer current, so a slow
//! response for an earlier selection can never overwrite a newer one.
//!
//! [`spawn_session`] runs the state on a single task: user input arrives on a
//! channel, search text passes through a debounce stage, and fetches run as
//! spawned tasks that report back as events.

use std::time::Duration;
use tokio::sync::{mpsc, watch};

use crate::errors::AppError;
use crate::services::debounce::debounce;
use crate::services::forecast::{fetch_surf_forecast, SurfForecast};
use crate::services::open_meteo::{GeoPlace, OpenMeteoClient, MIN_QUERY_CHARS};

/// Place-search part of the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub generation: u64,
    pub results: Vec<GeoPlace>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub selected: Option<GeoPlace>,
    /// Incremented on every selection
    pub generation: u64,
    pub loading: bool,
    pub error: Option<String>,
    pub forecast: Option<SurfForecast>,
    pub search: SearchState,
}

/// Everything that can change a session.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    SelectionChanged(GeoPlace),
    FetchSucceeded {
        generation: u64,
        forecast: SurfForecast,
    },
    FetchFailed {
        generation: u64,
        message: String,
    },
    /// A (debounced) search text
    SearchQueryChanged(String),
    SearchResultsArrived {
        generation: u64,
        outcome: Result<Vec<GeoPlace>, String>,
    },
}

/// Work requested by a state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    FetchForecast { generation: u64, place: GeoPlace },
    SearchPlaces { generation: u64, query: String },
}

/// What the user should currently see for the selected place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// Nothing selected yet
    Idle,
    Loading,
    Failed,
    /// Fetch succeeded but produced no days
    NoForecast,
    Ready,
}

impl SessionState {
    /// Apply one event and return the work it requires, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<SessionCommand> {
        match event {
            SessionEvent::SelectionChanged(place) => {
                self.generation += 1;
                self.selected = Some(place.clone());
                self.forecast = None;
                self.error = None;
                self.loading = true;
                tracing::debug!(
                    "Selected {} (generation {})",
                    place.display_name(),
                    self.generation
                );
                Some(SessionCommand::FetchForecast {
                    generation: self.generation,
                    place,
                })
            }
            SessionEvent::FetchSucceeded {
                generation,
                forecast,
            } => {
                if generation != self.generation {
                    tracing::debug!("Dropping stale forecast (generation {})", generation);
                    return None;
                }
                self.forecast = Some(forecast);
                self.loading = false;
                None
            }
            SessionEvent::FetchFailed {
                generation,
                message,
            } => {
                if generation != self.generation {
                    tracing::debug!("Dropping stale fetch failure (generation {})", generation);
                    return None;
                }
                self.error = Some(message);
                self.loading = false;
                None
            }
            SessionEvent::SearchQueryChanged(query) => {
                let search = &mut self.search;
                search.generation += 1;
                search.error = None;
                search.query = query;

                let trimmed = search.query.trim();
                if trimmed.chars().count() < MIN_QUERY_CHARS {
                    search.results.clear();
                    search.loading = false;
                    return None;
                }

                search.loading = true;
                Some(SessionCommand::SearchPlaces {
                    generation: search.generation,
                    query: trimmed.to_string(),
                })
            }
            SessionEvent::SearchResultsArrived {
                generation,
                outcome,
            } => {
                let search = &mut self.search;
                if generation != search.generation {
                    tracing::debug!("Dropping stale search results (generation {})", generation);
                    return None;
                }
                match outcome {
                    Ok(results) => search.results = results,
                    Err(message) => search.error = Some(message),
                }
                search.loading = false;
                None
            }
        }
    }

    pub fn status(&self) -> SessionStatus {
        if self.selected.is_none() {
            SessionStatus::Idle
        } else if self.loading {
            SessionStatus::Loading
        } else if self.error.is_some() {
            SessionStatus::Failed
        } else {
            match &self.forecast {
                Some(f) if f.forecast_available => SessionStatus::Ready,
                _ => SessionStatus::NoForecast,
            }
        }
    }
}

/// Raw user input fed into a running session.
#[derive(Debug, Clone)]
pub enum UserInput {
    /// Search box text, one message per keystroke
    Query(String),
    Select(GeoPlace),
}

/// Handle to a session running on its own task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    input: mpsc::UnboundedSender<UserInput>,
    state: watch::Receiver<SessionState>,
}

impl SessionHandle {
    pub fn type_query(&self, text: impl Into<String>) -> Result<(), AppError> {
        self.send(UserInput::Query(text.into()))
    }

    pub fn select_place(&self, place: GeoPlace) -> Result<(), AppError> {
        self.send(UserInput::Select(place))
    }

    /// Current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.clone()
    }

    /// Wait until the state satisfies `predicate` and return it.
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&SessionState) -> bool,
    ) -> Result<SessionState, AppError> {
        let mut rx = self.state.clone();
        let state = rx
            .wait_for(predicate)
            .await
            .map_err(|_| AppError::InternalError("Session task has stopped".to_string()))?;
        Ok(state.clone())
    }

    fn send(&self, input: UserInput) -> Result<(), AppError> {
        self.input
            .send(input)
            .map_err(|_| AppError::InternalError("Session task has stopped".to_string()))
    }
}

/// Start a session task. It stops when every handle has been dropped.
pub fn spawn_session(client: OpenMeteoClient, debounce_delay: Duration) -> SessionHandle {
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let (state_tx, state_rx) = watch::channel(SessionState::default());

    tokio::spawn(run_session(client, debounce_delay, input_rx, state_tx));

    SessionHandle {
        input: input_tx,
        state: state_rx,
    }
}

async fn run_session(
    client: OpenMeteoClient,
    debounce_delay: Duration,
    mut input: mpsc::UnboundedReceiver<UserInput>,
    state_tx: watch::Sender<SessionState>,
) {
    let (query_tx, query_rx) = mpsc::unbounded_channel();
    let mut queries = debounce(query_rx, debounce_delay);
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let mut state = SessionState::default();

    tracing::debug!("Session started");

    loop {
        let event = tokio::select! {
            user = input.recv() => match user {
                Some(UserInput::Query(text)) => {
                    // Debounce task only exits once query_tx is dropped
                    let _ = query_tx.send(text);
                    continue;
                }
                Some(UserInput::Select(place)) => SessionEvent::SelectionChanged(place),
                None => break,
            },
            Some(query) = queries.recv() => SessionEvent::SearchQueryChanged(query),
            Some(event) = events.recv() => event,
        };

        if let Some(command) = state.apply(event) {
            dispatch(command, &client, &event_tx);
        }
        state_tx.send_replace(state.clone());
    }

    tracing::debug!("Session stopped");
}

/// Run a command in the background; its outcome comes back as an event.
fn dispatch(
    command: SessionCommand,
    client: &OpenMeteoClient,
    events: &mpsc::UnboundedSender<SessionEvent>,
) {
    let client = client.clone();
    let events = events.clone();

    match command {
        SessionCommand::FetchForecast { generation, place } => {
            tokio::spawn(async move {
                let event =
                    match fetch_surf_forecast(&client, place.latitude, place.longitude).await {
                        Ok(forecast) => SessionEvent::FetchSucceeded {
                            generation,
                            forecast,
                        },
                        Err(e) => SessionEvent::FetchFailed {
                            generation,
                            message: e.message().to_string(),
                        },
                    };
                // Receiver gone means the session ended
                let _ = events.send(event);
            });
        }
        SessionCommand::SearchPlaces { generation, query } => {
            tokio::spawn(async move {
                let outcome = client
                    .search_places(&query)
                    .await
                    .map_err(|e| e.message().to_string());
                let _ = events.send(SessionEvent::SearchResultsArrived {
                    generation,
                    outcome,
                });
            });
        }
    }
}
