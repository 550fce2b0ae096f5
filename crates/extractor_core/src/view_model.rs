use crate::{PreviewTable, ProgressSnapshot, SearchMode};

/// Render-ready projection of [`crate::PanelState`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelViewModel {
    pub mode: SearchMode,
    pub city: String,
    pub custom_query: String,
    /// The custom query input is only visible in custom mode.
    pub show_custom_query: bool,
    pub area_input: String,
    pub areas: Vec<String>,
    pub overlay_visible: bool,
    pub polling: bool,
    /// Progress percentage, already clamped to 0..=100.
    pub percent: u8,
    pub progress: ProgressSnapshot,
    /// "current area | processed/total" while running, job status otherwise.
    pub status_line: String,
    pub results_visible: bool,
    pub latest_file: Option<String>,
    pub preview: Option<PreviewTable>,
    pub alert: Option<String>,
}
