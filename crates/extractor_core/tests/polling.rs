use std::sync::Once;

use extractor_core::{
    update, Effect, Msg, PanelState, ProgressUpdate, StatusUpdate, DEFAULT_TOTAL,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(panel_logging::initialize_for_tests);
}

fn running_status(processed: u64, total: u64) -> StatusUpdate {
    StatusUpdate {
        is_scraping: true,
        latest_file: None,
        progress: ProgressUpdate {
            total,
            processed,
            current_area: "Adajan".to_string(),
            log: Vec::new(),
            status: "Scraping".to_string(),
        },
    }
}

fn opened(state: PanelState) -> PanelState {
    let (state, _) = update(state, Msg::PanelOpened);
    state
}

#[test]
fn panel_open_starts_a_poll_cycle() {
    init_logging();
    let (state, effects) = update(PanelState::new(), Msg::PanelOpened);

    assert!(state.is_polling());
    assert_eq!(effects, vec![Effect::StartPolling]);
}

#[test]
fn active_status_updates_percent_and_status_line() {
    init_logging();
    let state = opened(PanelState::new());
    let (state, effects) = update(state, Msg::StatusReceived(running_status(50, 200)));
    let view = state.view();

    assert!(effects.is_empty());
    assert!(view.overlay_visible);
    assert_eq!(view.percent, 25);
    assert_eq!(view.status_line, "Adajan | 50/200");
}

#[test]
fn zero_total_falls_back_to_default() {
    init_logging();
    let state = opened(PanelState::new());
    let (state, _) = update(state, Msg::StatusReceived(running_status(30, 0)));
    let view = state.view();

    assert_eq!(view.percent, 30);
    assert_eq!(view.status_line, format!("Adajan | 30/{DEFAULT_TOTAL}"));
}

#[test]
fn percent_never_exceeds_hundred() {
    init_logging();
    let state = opened(PanelState::new());
    let (state, _) = update(state, Msg::StatusReceived(running_status(250, 200)));

    assert_eq!(state.view().percent, 100);
}

#[test]
fn popup_lines_toast_exactly_once() {
    init_logging();
    let mut status = running_status(1, 10);
    status.progress.log = vec![
        "Processing Adajan".to_string(),
        "[POPUP] Found 12 businesses".to_string(),
    ];

    let state = opened(PanelState::new());
    let (state, effects) = update(state, Msg::StatusReceived(status.clone()));
    assert_eq!(
        effects,
        vec![Effect::Toast {
            message: "Found 12 businesses".to_string(),
        }]
    );

    // The same log replayed on the next tick must not toast again.
    let (state, effects) = update(state, Msg::StatusReceived(status.clone()));
    assert!(effects.is_empty());

    // A newly appended marked line toasts, older ones stay silent.
    status
        .progress
        .log
        .push("[POPUP] Found 3 businesses".to_string());
    let (_, effects) = update(state, Msg::StatusReceived(status));
    assert_eq!(
        effects,
        vec![Effect::Toast {
            message: "Found 3 businesses".to_string(),
        }]
    );
}

#[test]
fn popup_marker_is_stripped_from_displayed_log() {
    init_logging();
    let mut status = running_status(1, 10);
    status.progress.log = vec![
        "Processing Adajan".to_string(),
        "[POPUP] Found 12 businesses".to_string(),
    ];

    let state = opened(PanelState::new());
    let (state, _) = update(state, Msg::StatusReceived(status));

    assert_eq!(
        state.view().progress.log,
        vec![
            "Processing Adajan".to_string(),
            "Found 12 businesses".to_string(),
        ]
    );
}

#[test]
fn log_mirror_replaces_wholesale_each_tick() {
    init_logging();
    let state = opened(PanelState::new());

    let mut first = running_status(1, 10);
    first.progress.log = vec!["line one".to_string(), "line two".to_string()];
    let (state, _) = update(state, Msg::StatusReceived(first));

    let mut second = running_status(2, 10);
    second.progress.log = vec!["fresh line".to_string()];
    let (state, _) = update(state, Msg::StatusReceived(second));

    assert_eq!(state.view().progress.log, vec!["fresh line".to_string()]);
}

#[test]
fn fresh_file_stops_polling_and_notifies_once() {
    init_logging();
    let state = opened(PanelState::new());
    let done = StatusUpdate {
        is_scraping: false,
        latest_file: Some("results.xlsx".to_string()),
        progress: ProgressUpdate::default(),
    };

    let (state, effects) = update(state, Msg::StatusReceived(done.clone()));
    let view = state.view();

    assert!(!state.is_polling());
    assert!(!view.overlay_visible);
    assert!(view.results_visible);
    assert_eq!(view.latest_file.as_deref(), Some("results.xlsx"));
    assert_eq!(view.percent, 100);
    assert_eq!(effects.len(), 2);
    assert_eq!(effects[0], Effect::StopPolling);
    assert!(matches!(effects[1], Effect::Notify { .. }));

    // Seeing the same file again after a restart ends polling quietly.
    let (restarted, _) = update(state, Msg::PanelOpened);
    let (_, effects) = update(restarted, Msg::StatusReceived(done));
    assert_eq!(effects, vec![Effect::StopPolling]);
}

#[test]
fn completed_without_file_alerts_and_stops() {
    init_logging();
    let state = opened(PanelState::new());
    let (state, effects) = update(
        state,
        Msg::StatusReceived(StatusUpdate {
            is_scraping: false,
            latest_file: None,
            progress: ProgressUpdate {
                status: "Completed".to_string(),
                ..ProgressUpdate::default()
            },
        }),
    );
    let view = state.view();

    assert!(!state.is_polling());
    assert_eq!(effects, vec![Effect::StopPolling]);
    assert_eq!(view.progress.status, "Completed (No Data)");
    assert_eq!(
        view.alert.as_deref(),
        Some("Scraping finished but no data was collected. Try a different area or keyword.")
    );
}

#[test]
fn idle_status_keeps_polling_alive() {
    init_logging();
    let state = opened(PanelState::new());
    let (state, effects) = update(
        state,
        Msg::StatusReceived(StatusUpdate {
            is_scraping: false,
            latest_file: None,
            progress: ProgressUpdate::default(),
        }),
    );

    assert!(state.is_polling());
    assert!(effects.is_empty());
}

#[test]
fn failed_tick_is_a_no_op() {
    init_logging();
    let state = opened(PanelState::new());
    let (state, _) = update(state, Msg::StatusReceived(running_status(50, 200)));

    let before = state.view();
    let (state, effects) = update(
        state,
        Msg::StatusUnavailable("connection refused".to_string()),
    );

    assert!(effects.is_empty());
    assert!(state.is_polling());
    assert_eq!(state.view(), before);
}

#[test]
fn new_run_resets_toast_bookkeeping() {
    init_logging();
    let mut status = running_status(1, 10);
    status.progress.log = vec!["[POPUP] Found 5 businesses".to_string()];

    let state = opened(PanelState::new());
    let (state, _) = update(state, Msg::StatusReceived(status.clone()));

    // A second run re-reports the first line of a fresh server log.
    let (state, _) = update(state, Msg::StartClicked);
    let (_, effects) = update(state, Msg::StatusReceived(status));
    assert_eq!(
        effects,
        vec![Effect::Toast {
            message: "Found 5 businesses".to_string(),
        }]
    );
}

#[test]
fn overlay_reappears_when_scraping_resumes() {
    init_logging();
    let state = opened(PanelState::new());
    let (state, _) = update(
        state,
        Msg::StatusReceived(StatusUpdate {
            is_scraping: false,
            latest_file: None,
            progress: ProgressUpdate::default(),
        }),
    );
    assert!(!state.view().overlay_visible);

    let (state, _) = update(state, Msg::StatusReceived(running_status(1, 10)));
    assert!(state.view().overlay_visible);
}
