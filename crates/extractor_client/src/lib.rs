//! Extractor client: HTTP API access, status polling worker, preview shaping.
mod api;
mod engine;
mod persist;
mod preview;
mod types;

pub use api::{ApiClient, ClientSettings, ReqwestApiClient};
pub use engine::EngineHandle;
pub use persist::{ensure_state_dir, AtomicFileWriter, PersistError};
pub use preview::{shape_preview, MAX_PREVIEW_ROWS, PREVIEW_COLUMNS};
pub use types::{
    ApiError, EngineEvent, FailureKind, PreviewDocument, ProgressReport, RawRecord, ScrapeOutcome,
    StatusReport,
};
