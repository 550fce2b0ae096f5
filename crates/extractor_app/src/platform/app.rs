use std::path::PathBuf;
use std::time::{Duration, Instant};

use eframe::egui;
use extractor_client::ClientSettings;
use extractor_core::{update, Effect, Msg, PanelState};
use panel_logging::panel_error;

use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::persistence;
use super::ui;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

pub fn run_app() -> Result<(), eframe::Error> {
    logging::initialize(LogDestination::File);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Business Data Extractor")
            .with_inner_size([1100.0, 780.0])
            .with_min_inner_size([900.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Business Data Extractor",
        options,
        Box::new(|cc| Ok(Box::new(PanelApp::new(cc)))),
    )
}

/// One transient toast popup, dropped after [`TOAST_LIFETIME`].
pub(crate) struct ActiveToast {
    pub(crate) message: String,
    created: Instant,
}

struct PanelApp {
    state: PanelState,
    /// None when the HTTP client could not be built; the panel still renders
    /// but no effect reaches the network.
    effects: Option<EffectRunner>,
    toasts: Vec<ActiveToast>,
}

impl PanelApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        ui::configure_visuals(&cc.egui_ctx);

        let state_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let mut app = Self {
            state: PanelState::new(),
            effects: None,
            toasts: Vec::new(),
        };

        match EffectRunner::new(ClientSettings::default(), state_dir.clone()) {
            Ok(runner) => app.effects = Some(runner),
            Err(err) => {
                panel_error!("Failed to initialize HTTP client: {}", err);
                app.dispatch(Msg::ScrapeFailed(err.to_string()));
            }
        }

        if let Some(areas) = persistence::load_areas(&state_dir) {
            app.dispatch(Msg::RestoreAreas(areas));
        }
        app.dispatch(Msg::PanelOpened);
        app
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;

        for effect in effects {
            match effect {
                Effect::Toast { message } => self.toasts.push(ActiveToast {
                    message,
                    created: Instant::now(),
                }),
                other => {
                    if let Some(runner) = &self.effects {
                        runner.run(other);
                    }
                }
            }
        }
    }

    fn drain_engine_events(&mut self) {
        let mut inbox = Vec::new();
        if let Some(runner) = &self.effects {
            while let Some(msg) = runner.try_recv() {
                inbox.push(msg);
            }
        }
        for msg in inbox {
            self.dispatch(msg);
        }
    }

    fn expire_toasts(&mut self) {
        self.toasts
            .retain(|toast| toast.created.elapsed() < TOAST_LIFETIME);
    }
}

impl eframe::App for PanelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_engine_events();
        self.expire_toasts();

        let view = self.state.view();
        for msg in ui::render(ctx, &view, &self.toasts) {
            self.dispatch(msg);
        }

        // Engine events arrive over a channel, so keep repainting even while
        // the pointer is idle.
        ctx.request_repaint_after(Duration::from_millis(200));
    }
}
