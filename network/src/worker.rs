// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background fetch worker: a dedicated thread owning a tokio runtime.
//!
//! The engine talks to it through [`HttpFetchBackend`]; every completed
//! fetch comes back through the core's delivery channel. Fetches are
//! fire-and-forget: a request for a side whose game has since ended simply
//! delivers a result nobody consumes.

use crate::gateway::AnswerClient;
use crate::image;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::thread;
use tokio::runtime::Runtime;
use yesno_core::{DeliverySink, FetchBackend, FetchResult, Side};

/// Requests accepted by the worker thread
pub enum FetchRequest {
    /// Fetch the next answer for this side
    Fetch(Side),
    /// Stop the worker loop
    Shutdown,
}

/// The engine-side handle implementing [`FetchBackend`] over the request
/// channel.
#[derive(Debug, Clone)]
pub struct HttpFetchBackend {
    tx: Sender<FetchRequest>,
}

impl HttpFetchBackend {
    /// Ask the worker loop to stop. In-flight fetches are abandoned.
    pub fn shutdown(&self) {
        let _ = self.tx.send(FetchRequest::Shutdown);
    }
}

impl FetchBackend for HttpFetchBackend {
    fn start_fetch(&mut self, side: Side) {
        if self.tx.send(FetchRequest::Fetch(side)).is_err() {
            tracing::warn!(?side, "fetch worker is gone, request dropped");
        }
    }
}

/// Spawn the background worker thread.
///
/// `fetch_images` mirrors the overlay toggle: when off, the image locator is
/// ignored and only the answer travels back.
pub fn spawn_worker(
    client: AnswerClient,
    sink: DeliverySink,
    fetch_images: bool,
) -> anyhow::Result<(HttpFetchBackend, thread::JoinHandle<()>)> {
    let (tx, rx) = unbounded();
    let handle = thread::Builder::new()
        .name("answer-fetcher".to_string())
        .spawn(move || {
            if let Err(err) = run_worker(rx, client, sink, fetch_images) {
                tracing::error!(error = %err, "fetch worker exited with error");
            }
        })?;
    Ok((HttpFetchBackend { tx }, handle))
}

fn run_worker(
    rx: Receiver<FetchRequest>,
    client: AnswerClient,
    sink: DeliverySink,
    fetch_images: bool,
) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    while let Ok(request) = rx.recv() {
        match request {
            FetchRequest::Shutdown => break,
            FetchRequest::Fetch(side) => {
                let client = client.clone();
                let sink = sink.clone();
                rt.spawn(async move {
                    let (outcome, image_url) = client.fetch().await;
                    let image = match image_url {
                        Some(url) if fetch_images => {
                            image::fetch_animation(client.http(), &url).await
                        }
                        _ => None,
                    };
                    tracing::debug!(?side, ?outcome, has_image = image.is_some(), "fetch done");
                    sink.deliver(FetchResult {
                        side,
                        outcome,
                        image,
                    });
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_survives_a_dead_worker() {
        let (tx, rx) = unbounded();
        drop(rx);
        let mut backend = HttpFetchBackend { tx };
        // Must not panic; the engine self-heals by re-requesting next turn.
        backend.start_fetch(Side::Yes);
    }

    #[test]
    fn shutdown_request_ends_the_loop() {
        let (sink, _source) = yesno_core::delivery_channel();
        let client = AnswerClient::new("http://127.0.0.1:9/api").expect("client builds");
        let (backend, handle) = spawn_worker(client, sink, false).expect("worker spawns");
        backend.shutdown();
        handle.join().expect("worker thread joins cleanly");
    }
}
