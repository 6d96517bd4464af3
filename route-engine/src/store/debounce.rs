//! Debounced background saving.
//!
//! Every edit hands the latest state to the writer; the store is only
//! written once edits have been quiet for the debounce period.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};
use tracing::trace;

use crate::domain::TripId;
use crate::route::RouteState;

use super::{ProfileStore, StoreError};

enum Command {
    Update(RouteState),
    Flush(oneshot::Sender<Result<(), StoreError>>),
}

/// Saves the most recent route for one trip after a quiet period.
///
/// Last writer wins: intermediate states are never written. Errors from
/// background saves are held and returned by the next [`flush`] or
/// [`shutdown`].
///
/// [`flush`]: DebouncedWriter::flush
/// [`shutdown`]: DebouncedWriter::shutdown
pub struct DebouncedWriter {
    tx: mpsc::UnboundedSender<Command>,
    task: JoinHandle<()>,
}

impl DebouncedWriter {
    /// Start a writer on the current tokio runtime.
    pub fn spawn<S>(store: Arc<S>, trip: TripId, delay: chrono::Duration) -> Self
    where
        S: ProfileStore + 'static,
    {
        let delay = delay.to_std().unwrap_or_default();
        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run(store, trip, delay, rx));
        Self { tx, task }
    }

    /// Queue a state to be saved. Replaces any state not yet written.
    pub fn update(&self, state: RouteState) {
        if self.tx.send(Command::Update(state)).is_err() {
            trace!("Dropping update for stopped writer");
        }
    }

    /// Save any pending state now.
    pub async fn flush(&self) -> Result<(), StoreError> {
        let (reply, done) = oneshot::channel();
        self.tx
            .send(Command::Flush(reply))
            .map_err(|_| StoreError::WriterClosed)?;
        done.await.map_err(|_| StoreError::WriterClosed)?
    }

    /// Flush and stop the writer.
    pub async fn shutdown(self) -> Result<(), StoreError> {
        let result = self.flush().await;
        drop(self.tx);
        // The task ends once the channel closes
        let _ = self.task.await;
        result
    }
}

async fn run<S: ProfileStore>(
    store: Arc<S>,
    trip: TripId,
    delay: std::time::Duration,
    mut rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut pending: Option<RouteState> = None;
    let mut deadline = Instant::now();
    let mut failed: Option<StoreError> = None;

    loop {
        tokio::select! {
            command = rx.recv() => match command {
                Some(Command::Update(state)) => {
                    pending = Some(state);
                    deadline = Instant::now() + delay;
                }
                Some(Command::Flush(reply)) => {
                    let saved = match pending.take() {
                        Some(state) => store.save(&trip, &state),
                        None => Ok(()),
                    };
                    let result = match failed.take() {
                        Some(e) => Err(e),
                        None => saved,
                    };
                    let _ = reply.send(result);
                }
                None => {
                    if let Some(state) = pending.take() {
                        let _ = store.save(&trip, &state);
                    }
                    break;
                }
            },
            () = sleep_until(deadline), if pending.is_some() => {
                if let Some(state) = pending.take() {
                    trace!(%trip, "Saving debounced route");
                    if let Err(e) = store.save(&trip, &state) {
                        failed = Some(e);
                    }
                }
            }
        }
    }
}
