//! Extractor panel core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{
    CellLink, PanelState, PreviewCell, PreviewTable, ProgressSnapshot, ProgressUpdate,
    ScrapeRequest, SearchMode, StatusUpdate, DEFAULT_AREAS, DEFAULT_CITY, DEFAULT_TOTAL,
    POPUP_MARKER,
};
pub use update::update;
pub use view_model::PanelViewModel;
