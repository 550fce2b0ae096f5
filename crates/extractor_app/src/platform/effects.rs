use std::path::PathBuf;
use std::sync::Arc;

use extractor_client::{
    ApiError, ClientSettings, EngineEvent, EngineHandle, ReqwestApiClient,
};
use extractor_core::{Effect, Msg};
use panel_logging::{panel_error, panel_info, panel_warn};

use super::persistence;

/// Executes IO effects against the engine worker and translates engine events
/// back into messages. Lives on the UI thread; the engine worker does the
/// actual blocking.
pub struct EffectRunner {
    engine: EngineHandle,
    settings: ClientSettings,
    state_dir: PathBuf,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings, state_dir: PathBuf) -> Result<Self, ApiError> {
        let client = Arc::new(ReqwestApiClient::new(settings.clone())?);
        Ok(Self {
            engine: EngineHandle::new(client),
            settings,
            state_dir,
        })
    }

    /// Runs one IO effect. `Toast` is a presentation concern and is handled
    /// by the shell before effects reach this point.
    pub fn run(&self, effect: Effect) {
        match effect {
            Effect::SubmitScrape { request } => self.engine.submit(request),
            Effect::StartPolling => self.engine.start_polling(),
            Effect::StopPolling => self.engine.stop_polling(),
            Effect::FetchPreview { filename } => self.engine.fetch_preview(filename),
            Effect::OpenDownload { filename } => self.open_download(&filename),
            Effect::PersistAreas { areas } => persistence::save_areas(&self.state_dir, &areas),
            Effect::Notify { title, body } => send_notification(&title, &body),
            Effect::Toast { .. } => {}
        }
    }

    /// Maps the next engine event, if any, to a panel message.
    pub fn try_recv(&self) -> Option<Msg> {
        self.engine.try_recv().map(|event| match event {
            EngineEvent::Submission { result: Ok(()) } => Msg::ScrapeAccepted,
            EngineEvent::Submission { result: Err(err) } => {
                panel_warn!("Scrape submission failed: {}", err);
                Msg::ScrapeFailed(err.message)
            }
            EngineEvent::StatusTick { result: Ok(report) } => Msg::StatusReceived(report.into()),
            EngineEvent::StatusTick {
                result: Err(err),
            } => Msg::StatusUnavailable(err.to_string()),
            EngineEvent::Preview { result: Ok(table) } => Msg::PreviewLoaded(table),
            EngineEvent::Preview { result: Err(err) } => {
                panel_warn!("Preview fetch failed: {}", err);
                Msg::PreviewFailed(err.message)
            }
        })
    }

    fn open_download(&self, filename: &str) {
        let url = match self.settings.download_url(filename) {
            Ok(url) => url,
            Err(err) => {
                panel_error!("Could not build download url for {}: {}", filename, err);
                return;
            }
        };
        panel_info!("Opening download {}", url);
        if let Err(err) = webbrowser::open(&url) {
            panel_error!("Could not open browser for {}: {}", url, err);
        }
    }
}

/// Send a desktop notification (non-blocking, best-effort).
fn send_notification(title: &str, body: &str) {
    let _ = notify_rust::Notification::new()
        .summary(title)
        .body(body)
        .appname("Business Data Extractor")
        .timeout(notify_rust::Timeout::Milliseconds(5000))
        .show();
}
