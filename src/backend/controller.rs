use super::state::ResolutionState;
use crate::extractor::{extract, normalize, FormatSource, MediaFormat, VideoReference};
use crate::utils::error::ResolveError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Owns the resolution state machine.
///
/// Every call to [`resolve`](Self::resolve) starts a new generation;
/// completions from older generations are dropped without touching state.
pub struct ResolutionController {
    source: Arc<dyn FormatSource>,
    shared: Arc<Mutex<Shared>>,
}

#[derive(Default)]
struct Shared {
    generation: u64,
    state: ResolutionState,
    subscribers: Vec<mpsc::UnboundedSender<ResolutionState>>,
}

impl Shared {
    fn apply(&mut self, state: ResolutionState) {
        debug!("State -> {}", state.label());
        self.state = state;
        let state = &self.state;
        self.subscribers.retain(|tx| tx.send(state.clone()).is_ok());
    }
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ResolutionController {
    pub fn new(source: Arc<dyn FormatSource>) -> Self {
        info!("ResolutionController using source {}", source.id());
        Self {
            source,
            shared: Arc::new(Mutex::new(Shared::default())),
        }
    }

    /// Snapshot of the current state
    pub fn current_state(&self) -> ResolutionState {
        lock(&self.shared).state.clone()
    }

    /// Receive every state transition from now on, in order
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<ResolutionState> {
        let (tx, rx) = mpsc::unbounded_channel();
        lock(&self.shared).subscribers.push(tx);
        rx
    }

    /// Start resolving `input`, superseding any attempt still in flight.
    ///
    /// Invalid input fails immediately without a network call and returns
    /// `None`, as does a call made outside a Tokio runtime. Otherwise the
    /// fetch runs on the runtime and its handle is returned; dropping it
    /// does not cancel the attempt.
    pub fn resolve(&self, input: &str) -> Option<JoinHandle<()>> {
        let mut shared = lock(&self.shared);
        shared.generation += 1;
        let generation = shared.generation;

        let Some(reference) = extract(input) else {
            info!("Rejected input that holds no video identifier");
            shared.apply(ResolutionState::failed(None, &ResolveError::InvalidInput));
            return None;
        };

        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                error!("Cannot resolve {} without a Tokio runtime: {}", reference, e);
                let err = ResolveError::Configuration("no Tokio runtime".to_string());
                shared.apply(ResolutionState::failed(Some(reference), &err));
                return None;
            }
        };

        info!("Resolving {} (generation {})", reference, generation);
        shared.apply(ResolutionState::Pending {
            reference: reference.clone(),
        });
        drop(shared);

        let fetch = runtime.spawn(fetch_and_normalize(
            Arc::clone(&self.source),
            reference.clone(),
        ));
        let shared = Arc::clone(&self.shared);
        Some(runtime.spawn(async move {
            // A panicking or cancelled fetch still has to leave Pending.
            let outcome = fetch.await.unwrap_or_else(|e| {
                error!("Fetch task for {} died: {}", reference, e);
                Err(ResolveError::TaskFailed(e.to_string()))
            });

            let mut guard = lock(&shared);
            if guard.generation != generation {
                debug!(
                    "Dropping stale result for {} (generation {}, current {})",
                    reference, generation, guard.generation
                );
                return;
            }

            let next = match outcome {
                Ok((title, formats)) => {
                    info!("Resolved {} with {} format(s)", reference, formats.len());
                    ResolutionState::Succeeded {
                        reference,
                        formats,
                        title,
                    }
                }
                Err(e) => {
                    warn!("Resolution of {} failed: {}", reference, e);
                    ResolutionState::failed(Some(reference), &e)
                }
            };
            guard.apply(next);
        }))
    }
}

async fn fetch_and_normalize(
    source: Arc<dyn FormatSource>,
    reference: VideoReference,
) -> Result<(Option<String>, Vec<MediaFormat>), ResolveError> {
    let document = source.fetch_formats(&reference).await?;
    let formats = normalize(&document)?;
    Ok((document.title, formats))
}
