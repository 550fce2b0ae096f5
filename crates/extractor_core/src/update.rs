use crate::state::effective_total;
use crate::{Effect, Msg, PanelState, ProgressSnapshot, ProgressUpdate, StatusUpdate, POPUP_MARKER};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: PanelState, msg: Msg) -> (PanelState, Vec<Effect>) {
    let effects = match msg {
        Msg::PanelOpened => {
            // One poll cycle starts at launch so a job already in flight
            // (panel restarted mid-scrape) is picked up again.
            state.start_polling();
            vec![Effect::StartPolling]
        }
        Msg::ModeSelected(mode) => {
            state.set_mode(mode);
            Vec::new()
        }
        Msg::CityChanged(city) => {
            state.set_city(city);
            Vec::new()
        }
        Msg::CustomQueryChanged(query) => {
            state.set_custom_query(query);
            Vec::new()
        }
        Msg::AreaInputChanged(input) => {
            state.set_area_input(input);
            Vec::new()
        }
        Msg::AreaSubmitted => {
            let area = state.area_input().trim().to_string();
            if area.is_empty() {
                return (state, Vec::new());
            }
            if state.add_area(area) {
                vec![Effect::PersistAreas {
                    areas: state.areas().to_vec(),
                }]
            } else {
                // Duplicate submission is idempotent: no mutation, no save.
                Vec::new()
            }
        }
        Msg::AreaRemoved(area) => {
            if state.remove_area(&area) {
                vec![Effect::PersistAreas {
                    areas: state.areas().to_vec(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::RestoreAreas(areas) => {
            state.restore_areas(areas);
            Vec::new()
        }
        Msg::StartClicked => {
            if state.areas().is_empty() {
                state.raise_alert("Please add at least one area!");
                return (state, Vec::new());
            }
            let request = state.scrape_request();
            state.begin_submission();
            vec![Effect::SubmitScrape { request }]
        }
        Msg::ScrapeAccepted => {
            state.submission_accepted();
            vec![
                Effect::Notify {
                    title: "Scraper started".to_string(),
                    body: "The scrape is running in the background.".to_string(),
                },
                Effect::StartPolling,
            ]
        }
        Msg::ScrapeFailed(message) => {
            state.submission_failed();
            state.raise_alert(format!("Error: {message}"));
            Vec::new()
        }
        Msg::StatusReceived(report) => apply_status(&mut state, report),
        Msg::StatusUnavailable(_) => {
            // A failed tick is not terminal; the interval tries again.
            Vec::new()
        }
        Msg::ViewDataClicked => {
            if state.preview_open() {
                state.close_preview();
                Vec::new()
            } else {
                match state.shown_file() {
                    Some(filename) => vec![Effect::FetchPreview {
                        filename: filename.to_string(),
                    }],
                    None => {
                        state.raise_alert(
                            "No file generated yet! Please start extraction first.",
                        );
                        Vec::new()
                    }
                }
            }
        }
        Msg::PreviewLoaded(table) => {
            state.open_preview(table);
            Vec::new()
        }
        Msg::PreviewFailed(message) => {
            state.raise_alert(format!("Error viewing data: {message}"));
            Vec::new()
        }
        Msg::DownloadClicked => match state.shown_file() {
            Some(filename) => vec![Effect::OpenDownload {
                filename: filename.to_string(),
            }],
            None => {
                state.raise_alert("No file generated yet! Please start extraction first.");
                Vec::new()
            }
        },
        Msg::AlertDismissed => {
            state.dismiss_alert();
            Vec::new()
        }
    };

    (state, effects)
}

fn apply_status(state: &mut PanelState, report: StatusUpdate) -> Vec<Effect> {
    if report.is_scraping {
        state.set_overlay(true);
        let effects = toast_new_popup_lines(state, &report.progress.log);
        let percent = percent_done(report.progress.processed, report.progress.total);
        state.apply_progress(snapshot_for_display(report.progress), percent);
        return effects;
    }

    state.set_overlay(false);

    if let Some(filename) = report.latest_file {
        // A present file always ends polling, even when it is the one
        // already on screen after a panel restart.
        state.stop_polling();
        let mut effects = vec![Effect::StopPolling];
        if state.shown_file() != Some(filename.as_str()) {
            state.show_results(filename.clone());
            effects.push(Effect::Notify {
                title: "Scraping completed".to_string(),
                body: "Your data is ready. Open the results panel to view it.".to_string(),
            });
        }
        effects
    } else if report.progress.status == "Completed" {
        // Completed with nothing to show: zero results were collected.
        state.stop_polling();
        state.mark_completed_empty();
        state.raise_alert(
            "Scraping finished but no data was collected. Try a different area or keyword.",
        );
        vec![Effect::StopPolling]
    } else {
        Vec::new()
    }
}

/// Emits one toast per not-yet-seen popup-marked log line and advances the
/// seen counter, so each marked line toasts exactly once.
fn toast_new_popup_lines(state: &mut PanelState, log: &[String]) -> Vec<Effect> {
    let seen = state.seen_log_count();
    if log.len() <= seen {
        return Vec::new();
    }
    let effects = log[seen..]
        .iter()
        .filter_map(|line| line.strip_prefix(POPUP_MARKER))
        .map(|rest| Effect::Toast {
            message: rest.trim().to_string(),
        })
        .collect();
    state.mark_logs_seen(log.len());
    effects
}

fn snapshot_for_display(progress: ProgressUpdate) -> ProgressSnapshot {
    let log = progress
        .log
        .into_iter()
        .map(|line| match line.strip_prefix(POPUP_MARKER) {
            Some(rest) => rest.trim_start().to_string(),
            None => line,
        })
        .collect();
    ProgressSnapshot {
        total: progress.total,
        processed: progress.processed,
        current_area: progress.current_area,
        log,
        status: progress.status,
    }
}

fn percent_done(processed: u64, total: u64) -> u8 {
    let total = effective_total(total);
    let percent = ((processed as f64 / total as f64) * 100.0).round() as u64;
    percent.min(100) as u8
}
