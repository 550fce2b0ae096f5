use eframe::egui;
use egui::{Color32, RichText};
use egui_extras::{Column, TableBuilder};
use extractor_core::{CellLink, Msg, PanelViewModel, PreviewTable, SearchMode};

use super::app::ActiveToast;

pub(crate) fn configure_visuals(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.window_fill = Color32::from_rgb(18, 20, 26);
    visuals.panel_fill = Color32::from_rgb(22, 25, 32);
    visuals.extreme_bg_color = Color32::from_rgb(14, 16, 21);
    visuals.override_text_color = Some(Color32::from_gray(235));
    visuals.selection.bg_fill = Color32::from_rgb(66, 133, 244);
    visuals.hyperlink_color = Color32::from_rgb(110, 190, 255);
    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    ctx.set_style(style);
}

/// Renders one frame from the view model and returns the messages raised by
/// user interaction, in the order they occurred.
pub(crate) fn render(
    ctx: &egui::Context,
    view: &PanelViewModel,
    toasts: &[ActiveToast],
) -> Vec<Msg> {
    let mut msgs = Vec::new();

    top_bar(ctx, view);
    config_panel(ctx, view, &mut msgs);
    main_panel(ctx, view, &mut msgs);
    alert_modal(ctx, view, &mut msgs);
    toast_overlay(ctx, toasts);

    msgs
}

fn top_bar(ctx: &egui::Context, view: &PanelViewModel) {
    egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.heading("Business Data Extractor");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(&view.status_line);
                if view.polling {
                    ui.spinner();
                }
            });
        });
    });
}

fn config_panel(ctx: &egui::Context, view: &PanelViewModel, msgs: &mut Vec<Msg>) {
    egui::SidePanel::left("config_panel")
        .resizable(true)
        .default_width(320.0)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            ui.label(RichText::new("Search Setup").strong());
            ui.add_space(6.0);

            ui.label("City");
            let mut city = view.city.clone();
            if ui.text_edit_singleline(&mut city).changed() {
                msgs.push(Msg::CityChanged(city));
            }

            ui.add_space(4.0);
            ui.label("Search mode");
            let mut mode = view.mode;
            egui::ComboBox::from_id_source("search_mode")
                .selected_text(mode_label(mode))
                .show_ui(ui, |ui| {
                    for candidate in [SearchMode::GeneralCategory, SearchMode::CustomQuery] {
                        ui.selectable_value(&mut mode, candidate, mode_label(candidate));
                    }
                });
            if mode != view.mode {
                msgs.push(Msg::ModeSelected(mode));
            }

            if view.show_custom_query {
                ui.label("Custom query");
                let mut query = view.custom_query.clone();
                if ui.text_edit_singleline(&mut query).changed() {
                    msgs.push(Msg::CustomQueryChanged(query));
                }
            }

            ui.add_space(8.0);
            ui.separator();
            ui.label(RichText::new("Areas").strong());
            for area in &view.areas {
                ui.horizontal(|ui| {
                    ui.label(area);
                    if ui.small_button("✕").clicked() {
                        msgs.push(Msg::AreaRemoved(area.clone()));
                    }
                });
            }
            ui.horizontal(|ui| {
                let mut input = view.area_input.clone();
                let response = ui.text_edit_singleline(&mut input);
                if response.changed() {
                    msgs.push(Msg::AreaInputChanged(input));
                }
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Add").clicked() || submitted {
                    msgs.push(Msg::AreaSubmitted);
                }
            });

            ui.add_space(12.0);
            let start = egui::Button::new(RichText::new("Start Extraction").strong());
            if ui.add_enabled(!view.overlay_visible, start).clicked() {
                msgs.push(Msg::StartClicked);
            }
        });
}

fn main_panel(ctx: &egui::Context, view: &PanelViewModel, msgs: &mut Vec<Msg>) {
    egui::CentralPanel::default().show(ctx, |ui| {
        if view.overlay_visible {
            progress_section(ui, view);
        } else if !view.results_visible {
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                ui.label("Configure a search on the left and start the extraction.");
            });
        }

        if view.results_visible {
            results_section(ui, view, msgs);
        }
    });
}

fn progress_section(ui: &mut egui::Ui, view: &PanelViewModel) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(RichText::new(&view.status_line).strong());
    });
    ui.add(
        egui::ProgressBar::new(f32::from(view.percent) / 100.0)
            .text(format!("{}%", view.percent)),
    );

    ui.add_space(6.0);
    ui.label("Activity");
    egui::ScrollArea::vertical()
        .max_height(260.0)
        .stick_to_bottom(true)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for line in &view.progress.log {
                ui.monospace(line);
            }
        });
    ui.add_space(8.0);
}

fn results_section(ui: &mut egui::Ui, view: &PanelViewModel, msgs: &mut Vec<Msg>) {
    ui.separator();
    ui.horizontal(|ui| {
        ui.label(RichText::new("Results").strong());
        if let Some(filename) = &view.latest_file {
            ui.monospace(filename);
        }
    });
    ui.horizontal(|ui| {
        let view_label = if view.preview.is_some() {
            "Hide Data"
        } else {
            "View Data"
        };
        if ui.button(view_label).clicked() {
            msgs.push(Msg::ViewDataClicked);
        }
        if ui.button("Download").clicked() {
            msgs.push(Msg::DownloadClicked);
        }
    });

    if let Some(preview) = &view.preview {
        ui.add_space(6.0);
        preview_table(ui, preview);
    }
}

fn preview_table(ui: &mut egui::Ui, table: &PreviewTable) {
    TableBuilder::new(ui)
        .striped(true)
        .columns(Column::auto().resizable(true), table.columns.len())
        .header(22.0, |mut header| {
            for column in &table.columns {
                header.col(|ui| {
                    ui.label(RichText::new(column).strong());
                });
            }
        })
        .body(|mut body| {
            for cells in &table.rows {
                body.row(20.0, |mut row| {
                    for cell in cells {
                        row.col(|ui| match &cell.link {
                            Some(CellLink::Website(url)) => {
                                ui.hyperlink_to(&cell.text, url);
                            }
                            Some(CellLink::Email(address)) => {
                                ui.hyperlink_to(&cell.text, format!("mailto:{address}"));
                            }
                            None => {
                                ui.label(&cell.text);
                            }
                        });
                    }
                });
            }
        });

    if table.total_rows > table.rows.len() {
        ui.add_space(4.0);
        ui.label(format!(
            "Showing {} of {} rows. Download the file for the full dataset.",
            table.rows.len(),
            table.total_rows
        ));
    }
}

fn alert_modal(ctx: &egui::Context, view: &PanelViewModel, msgs: &mut Vec<Msg>) {
    let Some(message) = &view.alert else {
        return;
    };
    egui::Window::new("Notice")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                if ui.button("OK").clicked() {
                    msgs.push(Msg::AlertDismissed);
                }
            });
        });
}

fn toast_overlay(ctx: &egui::Context, toasts: &[ActiveToast]) {
    if toasts.is_empty() {
        return;
    }
    egui::Area::new(egui::Id::new("toast_overlay"))
        .anchor(egui::Align2::RIGHT_BOTTOM, [-16.0, -16.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            for toast in toasts {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(&toast.message);
                });
                ui.add_space(4.0);
            }
        });
}

fn mode_label(mode: SearchMode) -> &'static str {
    match mode {
        SearchMode::GeneralCategory => "IT companies",
        SearchMode::CustomQuery => "Custom query",
    }
}
