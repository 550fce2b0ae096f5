use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use panel_logging::{panel_debug, panel_info, panel_warn};
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::preview::shape_preview;
use crate::EngineEvent;
use extractor_core::ScrapeRequest;

/// Status poll period. The server recomputes its report on every request, so
/// anything faster only burns sockets.
const POLL_PERIOD: Duration = Duration::from_secs(1);

enum EngineCommand {
    Submit { request: ScrapeRequest },
    StartPolling,
    StopPolling,
    FetchPreview { filename: String },
}

/// Handle to the IO worker thread.
///
/// Commands go in over an mpsc channel; events come back over another and are
/// drained with [`EngineHandle::try_recv`] from the UI thread. The worker owns
/// the tokio runtime, so the UI side never blocks on the network.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            // At most one poller exists: starting a new one cancels the token
            // of the previous one first.
            let mut poller: Option<CancellationToken> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit { request } => {
                        panel_info!(
                            "Submitting scrape city={} areas={} category={}",
                            request.city,
                            request.areas.len(),
                            request.category
                        );
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = client.start_scrape(&request).await;
                            let _ = event_tx.send(EngineEvent::Submission { result });
                        });
                    }
                    EngineCommand::StartPolling => {
                        if let Some(token) = poller.take() {
                            token.cancel();
                        }
                        let token = CancellationToken::new();
                        poller = Some(token.clone());
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        panel_debug!("Status polling started");
                        runtime.spawn(poll_status(client, event_tx, token));
                    }
                    EngineCommand::StopPolling => {
                        if let Some(token) = poller.take() {
                            panel_debug!("Status polling stopped");
                            token.cancel();
                        }
                    }
                    EngineCommand::FetchPreview { filename } => {
                        let client = client.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = client
                                .fetch_preview(&filename)
                                .await
                                .map(|records| shape_preview(&records));
                            let _ = event_tx.send(EngineEvent::Preview { result });
                        });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn submit(&self, request: ScrapeRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { request });
    }

    pub fn start_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StartPolling);
    }

    pub fn stop_polling(&self) {
        let _ = self.cmd_tx.send(EngineCommand::StopPolling);
    }

    pub fn fetch_preview(&self, filename: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchPreview {
            filename: filename.into(),
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn poll_status(
    client: Arc<dyn ApiClient>,
    event_tx: mpsc::Sender<EngineEvent>,
    token: CancellationToken,
) {
    let mut interval = tokio::time::interval(POLL_PERIOD);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    loop {
        tokio::select! {
            _ = token.cancelled() => break,
            _ = interval.tick() => {
                let result = client.fetch_status().await;
                if let Err(err) = &result {
                    panel_warn!("Status poll failed: {}", err);
                }
                if event_tx.send(EngineEvent::StatusTick { result }).is_err() {
                    break;
                }
            }
        }
    }
}
