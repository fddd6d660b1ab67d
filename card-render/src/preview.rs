//! Debounced live preview
//!
//! Input snapshots go into a `watch` channel, so only the newest one is
//! kept. A worker waits until no new snapshot has arrived for the quiet
//! period and then renders that one. Intermediate snapshots of a burst are
//! skipped; the final one is always rendered, including when the producer
//! hangs up mid-window.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Producer side of a debouncer
#[derive(Debug)]
pub struct DebounceHandle<T> {
    tx: watch::Sender<Option<T>>,
}

impl<T> DebounceHandle<T> {
    /// Replace the pending snapshot and restart the quiet period
    pub fn push(&self, value: T) {
        self.tx.send_replace(Some(value));
    }

    /// Worker has exited
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Spawn a debounce worker calling `on_settled` with each settled snapshot.
///
/// The worker ends once the handle is dropped and any pending snapshot has
/// been rendered.
pub fn debounce<T, F, Fut>(quiet: Duration, mut on_settled: F) -> (DebounceHandle<T>, JoinHandle<()>)
where
    T: Clone + Send + Sync + 'static,
    F: FnMut(T) -> Fut + Send + 'static,
    Fut: Future<Output = ()> + Send,
{
    let (tx, mut rx) = watch::channel::<Option<T>>(None);

    let worker = tokio::spawn(async move {
        loop {
            if rx.changed().await.is_err() {
                break;
            }

            let closed = loop {
                tokio::select! {
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break true;
                        }
                        trace!("snapshot superseded, quiet period restarted");
                    }
                    _ = tokio::time::sleep(quiet) => break false,
                }
            };

            let snapshot = rx.borrow_and_update().clone();
            if let Some(snapshot) = snapshot {
                on_settled(snapshot).await;
            }
            if closed {
                break;
            }
        }
    });

    (DebounceHandle { tx }, worker)
}
