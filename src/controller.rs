//! Fetch/presentation state machine
//!
//! Coordinates one fetch cycle at a time: location acquisition, network
//! retrieval, outcome classification, and publication of the observable
//! presentation state. The controller is the single writer of that state;
//! the display layer subscribes through a watch channel and always observes
//! complete, consistent snapshots.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::data::{FetchError, Forecast, ForecastFetcher};
use crate::location::LocationProvider;

/// Observable snapshot of the fetch pipeline
///
/// The default value is the idle state: nothing loading, no forecast, no
/// error. During a cycle `is_loading` is true; afterwards exactly one of
/// `forecast` (refreshed) or `error` (newly set) reflects the outcome. A
/// failed refresh leaves any previously held forecast in place so the
/// display layer can choose to show stale data alongside the error.
#[derive(Debug, Clone, Default)]
pub struct PresentationState {
    /// Whether a fetch cycle is in flight
    pub is_loading: bool,
    /// The most recently decoded forecast, if any
    pub forecast: Option<Forecast>,
    /// The most recent fetch failure, cleared when a new cycle starts
    pub error: Option<FetchError>,
}

/// Orchestrates fetch cycles and publishes [`PresentationState`]
///
/// `start` and `retry` may be called at any time; each call supersedes any
/// cycle still in flight, and a superseded cycle's outcome is discarded so
/// the published state always reflects the most recently started request.
pub struct FetchController<L, N> {
    location: Arc<L>,
    network: Arc<N>,
    state: watch::Sender<PresentationState>,
    sequence: Arc<AtomicU64>,
}

impl<L, N> FetchController<L, N>
where
    L: LocationProvider + 'static,
    N: ForecastFetcher + 'static,
{
    /// Creates a controller in the idle state with injected collaborators.
    pub fn new(location: L, network: N) -> Self {
        let (state, _) = watch::channel(PresentationState::default());
        Self {
            location: Arc::new(location),
            network: Arc::new(network),
            state,
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Subscribes to presentation state snapshots.
    pub fn subscribe(&self) -> watch::Receiver<PresentationState> {
        self.state.subscribe()
    }

    /// Returns the current presentation state snapshot.
    pub fn state(&self) -> PresentationState {
        self.state.borrow().clone()
    }

    /// Starts a fetch cycle.
    ///
    /// Publishes the loading state immediately, then resolves the location
    /// (degrading to the fallback on failure) and fetches the forecast on a
    /// spawned task. The returned handle completes when the cycle has
    /// published its outcome or discarded it as superseded.
    pub fn start(&self) -> JoinHandle<()> {
        let request_id = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(request_id, "fetch cycle started");

        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let location = Arc::clone(&self.location);
        let network = Arc::clone(&self.network);
        let state = self.state.clone();
        let sequence = Arc::clone(&self.sequence);

        tokio::spawn(async move {
            let coordinates = match location.request_location().await {
                Ok(coordinates) => Some(coordinates),
                Err(err) => {
                    debug!(error = %err, "location unavailable, proceeding with fallback");
                    None
                }
            };

            let outcome = network.fetch_forecast(coordinates).await;

            // Last-write-wins by request identity: only the most recently
            // started cycle may publish.
            let published = state.send_if_modified(|state| {
                if sequence.load(Ordering::SeqCst) != request_id {
                    return false;
                }
                state.is_loading = false;
                match outcome {
                    Ok(forecast) => {
                        state.error = None;
                        state.forecast = Some(forecast);
                    }
                    Err(error) => {
                        warn!(request_id, %error, "fetch cycle failed");
                        // Stale forecast stays in place on failure.
                        state.error = Some(error);
                    }
                }
                true
            });

            if !published {
                debug!(request_id, "discarded superseded fetch outcome");
            }
        })
    }

    /// User-triggered retry, identical to [`FetchController::start`].
    pub fn retry(&self) -> JoinHandle<()> {
        self.start()
    }
}
