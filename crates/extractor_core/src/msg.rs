#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Panel window finished opening; picks up any job already in flight.
    PanelOpened,
    /// User switched between category search and custom query.
    ModeSelected(crate::SearchMode),
    /// User edited the target city input.
    CityChanged(String),
    /// User edited the custom query input.
    CustomQueryChanged(String),
    /// User edited the pending area input.
    AreaInputChanged(String),
    /// User submitted the pending area input.
    AreaSubmitted,
    /// User removed an area tag.
    AreaRemoved(String),
    /// Restore the persisted area set at startup.
    RestoreAreas(Vec<String>),
    /// User clicked the run button.
    StartClicked,
    /// Server accepted the scrape submission.
    ScrapeAccepted,
    /// Submission failed: transport error or a rejecting response body.
    ScrapeFailed(String),
    /// A status poll tick came back.
    StatusReceived(crate::StatusUpdate),
    /// A status poll tick failed; the next tick will try again.
    StatusUnavailable(String),
    /// User clicked View Data (opens on first click, closes on second).
    ViewDataClicked,
    /// Shaped preview rows arrived.
    PreviewLoaded(crate::PreviewTable),
    /// Preview fetch failed.
    PreviewFailed(String),
    /// User clicked Download.
    DownloadClicked,
    /// User dismissed the modal alert.
    AlertDismissed,
}
