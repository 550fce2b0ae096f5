use crate::view_model::PanelViewModel;

/// City used when the user never edits the city input.
pub const DEFAULT_CITY: &str = "Surat";
/// Seed area set for a fresh install with no persisted settings.
pub const DEFAULT_AREAS: &[&str] = &["Adajan"];
/// Fallback for a zero `total` in a progress report.
pub const DEFAULT_TOTAL: u64 = 100;
/// Server prefix on log lines that must surface as transient toasts.
pub const POPUP_MARKER: &str = "[POPUP]";

const GENERAL_CATEGORY: &str = "it";
const CUSTOM_CATEGORY: &str = "custom";

/// Search mode selected in the configuration panel.
///
/// Held in memory only; a restart falls back to the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchMode {
    /// Search the predefined business category.
    #[default]
    GeneralCategory,
    /// Search a free-text query supplied by the user.
    CustomQuery,
}

impl SearchMode {
    /// Category value sent on the wire for this mode.
    pub fn wire_category(self) -> &'static str {
        match self {
            SearchMode::GeneralCategory => GENERAL_CATEGORY,
            SearchMode::CustomQuery => CUSTOM_CATEGORY,
        }
    }
}

/// Payload for a scrape submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub city: String,
    pub areas: Vec<String>,
    pub category: String,
    pub custom_query: String,
}

/// Server-reported job status, already mapped off the wire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusUpdate {
    pub is_scraping: bool,
    pub latest_file: Option<String>,
    pub progress: ProgressUpdate,
}

/// Progress counters and log as reported by the server.
///
/// Log lines may still carry the popup marker; `update` strips it before the
/// lines reach the snapshot used for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressUpdate {
    pub total: u64,
    pub processed: u64,
    pub current_area: String,
    pub log: Vec<String>,
    pub status: String,
}

/// Progress state mirrored for rendering, with marker-free log lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    pub total: u64,
    pub processed: u64,
    pub current_area: String,
    pub log: Vec<String>,
    pub status: String,
}

/// Shaped preview of the result dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<PreviewCell>>,
    /// Row count of the full dataset, not just the previewed slice.
    pub total_rows: usize,
}

/// One rendered preview cell: display text plus an optional link target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewCell {
    pub text: String,
    pub link: Option<CellLink>,
}

/// Link classification for website and email columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellLink {
    Website(String),
    Email(String),
}

/// All panel state. Owns what the browser original kept in module-level
/// globals, so every mutation goes through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    mode: SearchMode,
    city: String,
    custom_query: String,
    area_input: String,
    areas: Vec<String>,
    overlay_visible: bool,
    polling: bool,
    seen_log_count: usize,
    shown_file: Option<String>,
    percent: u8,
    progress: ProgressSnapshot,
    results_visible: bool,
    preview: Option<PreviewTable>,
    alert: Option<String>,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            city: DEFAULT_CITY.to_string(),
            custom_query: String::new(),
            area_input: String::new(),
            areas: DEFAULT_AREAS.iter().map(|area| area.to_string()).collect(),
            overlay_visible: false,
            polling: false,
            seen_log_count: 0,
            shown_file: None,
            percent: 0,
            progress: ProgressSnapshot::default(),
            results_visible: false,
            preview: None,
            alert: None,
        }
    }
}

impl PanelState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> PanelViewModel {
        PanelViewModel {
            mode: self.mode,
            city: self.city.clone(),
            custom_query: self.custom_query.clone(),
            show_custom_query: self.mode == SearchMode::CustomQuery,
            area_input: self.area_input.clone(),
            areas: self.areas.clone(),
            overlay_visible: self.overlay_visible,
            polling: self.polling,
            percent: self.percent,
            progress: self.progress.clone(),
            status_line: self.status_line(),
            results_visible: self.results_visible,
            latest_file: self.shown_file.clone(),
            preview: self.preview.clone(),
            alert: self.alert.clone(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn areas(&self) -> &[String] {
        &self.areas
    }

    pub fn latest_file(&self) -> Option<&str> {
        self.shown_file.as_deref()
    }

    pub fn is_polling(&self) -> bool {
        self.polling
    }

    fn status_line(&self) -> String {
        if self.overlay_visible {
            let total = effective_total(self.progress.total);
            format!(
                "{} | {}/{}",
                self.progress.current_area, self.progress.processed, total
            )
        } else if self.progress.status.is_empty() {
            "System Ready".to_string()
        } else {
            self.progress.status.clone()
        }
    }

    pub(crate) fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
    }

    pub(crate) fn set_city(&mut self, city: String) {
        self.city = city;
    }

    pub(crate) fn set_custom_query(&mut self, query: String) {
        self.custom_query = query;
    }

    pub(crate) fn set_area_input(&mut self, input: String) {
        self.area_input = input;
    }

    pub(crate) fn area_input(&self) -> &str {
        &self.area_input
    }

    /// Appends a new area if it is not already present.
    ///
    /// Returns true when the set changed, so the caller knows whether the
    /// full set must be re-persisted.
    pub(crate) fn add_area(&mut self, area: String) -> bool {
        if self.areas.iter().any(|existing| *existing == area) {
            return false;
        }
        self.areas.push(area);
        self.area_input.clear();
        true
    }

    /// Removes the first exact match. Returns true when the set changed.
    pub(crate) fn remove_area(&mut self, area: &str) -> bool {
        match self.areas.iter().position(|existing| existing == area) {
            Some(index) => {
                self.areas.remove(index);
                true
            }
            None => false,
        }
    }

    /// Replaces the area set from persisted settings, deduplicating
    /// defensively in case the settings file was hand-edited.
    pub(crate) fn restore_areas(&mut self, areas: Vec<String>) {
        let mut restored: Vec<String> = Vec::with_capacity(areas.len());
        for area in areas {
            if !restored.contains(&area) {
                restored.push(area);
            }
        }
        self.areas = restored;
    }

    pub(crate) fn scrape_request(&self) -> ScrapeRequest {
        ScrapeRequest {
            city: self.city.clone(),
            areas: self.areas.clone(),
            category: self.mode.wire_category().to_string(),
            custom_query: match self.mode {
                SearchMode::CustomQuery => self.custom_query.clone(),
                SearchMode::GeneralCategory => String::new(),
            },
        }
    }

    pub(crate) fn begin_submission(&mut self) {
        self.overlay_visible = true;
        self.seen_log_count = 0;
        self.percent = 0;
        self.progress = ProgressSnapshot {
            status: "Starting".to_string(),
            ..ProgressSnapshot::default()
        };
    }

    pub(crate) fn submission_accepted(&mut self) {
        self.polling = true;
    }

    pub(crate) fn submission_failed(&mut self) {
        self.overlay_visible = false;
    }

    pub(crate) fn start_polling(&mut self) {
        self.polling = true;
    }

    pub(crate) fn stop_polling(&mut self) {
        self.polling = false;
    }

    pub(crate) fn set_overlay(&mut self, visible: bool) {
        self.overlay_visible = visible;
    }

    pub(crate) fn seen_log_count(&self) -> usize {
        self.seen_log_count
    }

    pub(crate) fn mark_logs_seen(&mut self, count: usize) {
        self.seen_log_count = count;
    }

    pub(crate) fn apply_progress(&mut self, progress: ProgressSnapshot, percent: u8) {
        self.progress = progress;
        self.percent = percent;
    }

    pub(crate) fn shown_file(&self) -> Option<&str> {
        self.shown_file.as_deref()
    }

    pub(crate) fn show_results(&mut self, filename: String) {
        self.shown_file = Some(filename);
        self.results_visible = true;
        self.percent = 100;
        self.progress.status = "Completed!".to_string();
    }

    pub(crate) fn mark_completed_empty(&mut self) {
        self.progress.status = "Completed (No Data)".to_string();
    }

    pub(crate) fn preview_open(&self) -> bool {
        self.preview.is_some()
    }

    pub(crate) fn open_preview(&mut self, table: PreviewTable) {
        self.preview = Some(table);
    }

    pub(crate) fn close_preview(&mut self) {
        self.preview = None;
    }

    pub(crate) fn raise_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    pub(crate) fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

/// Applies the divide-by-zero guard: a zero total counts as the default.
pub(crate) fn effective_total(total: u64) -> u64 {
    if total == 0 {
        DEFAULT_TOTAL
    } else {
        total
    }
}
