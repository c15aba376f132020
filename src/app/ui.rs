use super::{OcrUploader, ServerHealth, UiAction};
use super::state::{FileSummary, MetadataSummary, ResultView, Tab, UiState};
use crate::utils::file_size::FileSizeUtils;
use crate::utils::markdown::PreviewBlock;
use eframe::egui::{self, Color32, RichText};

const ACCENT: Color32 = Color32::from_rgb(161, 89, 225);
const SUCCESS: Color32 = Color32::from_rgb(0, 180, 0);
const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
const MUTED: Color32 = Color32::from_rgb(150, 150, 150);

impl OcrUploader {
    /// Draws the one section the current state calls for.
    pub(crate) fn render(&self, ctx: &egui::Context) -> Option<UiAction> {
        let hovering = ctx.input(|i| !i.raw.hovered_files.is_empty());
        let mut action = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    self.render_header(ui);
                    ui.add_space(20.0);

                    action = match self.widget.state() {
                        UiState::Idle => {
                            render_upload_box(ui, hovering, self.widget.max_file_size())
                        }
                        UiState::FileSelected(file) => render_file_selected(ui, file),
                        UiState::Processing => {
                            let name = self.widget.selected_file().map(|f| f.name.as_str());
                            render_progress(ui, name);
                            None
                        }
                        UiState::Result(view) => {
                            let output = self.widget.output_filename();
                            render_result(ui, view, self.widget.active_tab(), output)
                        }
                        UiState::Error(err) => render_error(ui, &err.to_string()),
                    };

                    ui.add_space(20.0);
                });
        });

        action
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.heading("PDF OCR");
            ui.add_space(5.0);
            ui.label(
                RichText::new("Convert scanned PDFs to Markdown")
                    .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
            ui.add_space(3.0);

            match &self.health {
                ServerHealth::Checking => {
                    ui.label(RichText::new("Checking server…").small().color(MUTED));
                }
                ServerHealth::Online(service) => {
                    ui.label(
                        RichText::new(format!("● Server online: {service}"))
                            .small()
                            .color(SUCCESS),
                    );
                }
                ServerHealth::Unreachable => {
                    ui.label(RichText::new("● Server unreachable").small().color(ERROR));
                }
            }
        });
    }
}

fn render_upload_box(ui: &mut egui::Ui, hovering: bool, max_file_size: u64) -> Option<UiAction> {
    let mut action = None;
    let stroke = if hovering {
        egui::Stroke::new(2.0, ACCENT)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    egui::Frame::group(ui.style())
        .stroke(stroke)
        .inner_margin(30.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new("📄").size(40.0));
                ui.add_space(8.0);
                ui.heading("Drop a PDF here");
                ui.label(RichText::new("or").color(MUTED));
                ui.add_space(8.0);
                let button = egui::Button::new("📁 Select File").min_size(egui::vec2(160.0, 36.0));
                if ui.add(button).clicked() {
                    action = Some(UiAction::PickFile);
                }
                ui.add_space(8.0);
                ui.label(
                    RichText::new(format!(
                        "PDF only, up to {}",
                        FileSizeUtils::format_size(max_file_size)
                    ))
                    .small()
                    .color(MUTED),
                );
            });
        });

    action
}

fn render_file_selected(ui: &mut egui::Ui, file: &FileSummary) -> Option<UiAction> {
    let mut action = None;

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new("📄").size(24.0));
            ui.vertical(|ui| {
                ui.label(RichText::new(&file.name).strong());
                ui.label(RichText::new(&file.size).color(MUTED));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Change File").clicked() {
                    action = Some(UiAction::PickFile);
                }
            });
        });
    });

    ui.add_space(20.0);
    ui.vertical_centered(|ui| {
        let button = egui::Button::new("🚀 Start OCR").min_size(egui::vec2(200.0, 40.0));
        if ui.add(button).clicked() {
            action = Some(UiAction::Process);
        }
    });

    action
}

fn render_progress(ui: &mut egui::Ui, file_name: Option<&str>) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            ui.add(egui::Spinner::new().size(32.0));
            ui.add_space(10.0);
            match file_name {
                Some(name) => ui.label(format!("📤 Processing: {name}")),
                None => ui.label("📤 Processing…"),
            };
            ui.label(
                RichText::new("This can take a while for long documents")
                    .small()
                    .color(MUTED),
            );
            ui.add_space(10.0);
        });
    });
}

fn render_result(
    ui: &mut egui::Ui,
    view: &ResultView,
    active: Tab,
    output_file: Option<&str>,
) -> Option<UiAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.colored_label(SUCCESS, "✅ Processing complete");
    });
    ui.add_space(10.0);

    ui.horizontal(|ui| {
        for tab in Tab::ALL {
            if ui.selectable_label(tab == active, tab.label()).clicked() && tab != active {
                action = Some(UiAction::SwitchTab(tab));
            }
        }
        if let (Tab::Preview, Some(html)) = (active, &view.preview_html) {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("📋 Copy HTML").clicked() {
                    ui.output_mut(|o| o.copied_text = html.clone());
                }
            });
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .id_source("result_pane")
        .max_height(360.0)
        .show(ui, |ui| {
            egui::Frame::none()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(12.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    match active {
                        Tab::Preview => render_preview(ui, &view.preview_blocks),
                        Tab::Markdown => {
                            let mut raw: &str = view.raw_markdown.as_deref().unwrap_or_default();
                            ui.add(
                                egui::TextEdit::multiline(&mut raw)
                                    .code_editor()
                                    .desired_width(f32::INFINITY),
                            );
                        }
                    }
                });
        });

    if let Some(meta) = &view.metadata {
        ui.add_space(10.0);
        render_metadata(ui, meta);
    }

    ui.add_space(20.0);
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            let download = ui
                .add_enabled(output_file.is_some(), egui::Button::new("⬇ Download Markdown"))
                .on_hover_text(output_file.unwrap_or("No output file"));
            if download.clicked() {
                action = Some(UiAction::Download);
            }
            if ui.button("🔄 Process Another").clicked() {
                action = Some(UiAction::Reset);
            }
        });
    });

    action
}

fn render_preview(ui: &mut egui::Ui, blocks: &[PreviewBlock]) {
    if blocks.is_empty() {
        ui.label(RichText::new("No content").color(MUTED));
        return;
    }

    for block in blocks {
        match block {
            PreviewBlock::Heading { level, text } => {
                let size = match level {
                    1 => 24.0,
                    2 => 20.0,
                    3 => 17.0,
                    _ => 15.0,
                };
                ui.add_space(6.0);
                ui.label(RichText::new(text).size(size).strong());
            }
            PreviewBlock::Paragraph(text) => {
                ui.label(text);
            }
            PreviewBlock::ListItem { depth, text } => {
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(*depth as f32 * 16.0);
                    ui.label("•");
                    ui.label(text);
                });
            }
            PreviewBlock::Code { text, .. } | PreviewBlock::Html(text) => {
                egui::Frame::none()
                    .fill(ui.visuals().faint_bg_color)
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.label(RichText::new(text).monospace());
                    });
            }
            PreviewBlock::Quote(text) => {
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("▍").color(ACCENT));
                    ui.label(RichText::new(text).italics());
                });
            }
            PreviewBlock::TableRow(cells) => {
                ui.label(RichText::new(cells.join("  │  ")).monospace());
            }
            PreviewBlock::Rule => {
                ui.separator();
            }
        }
        ui.add_space(4.0);
    }
}

fn render_metadata(ui: &mut egui::Ui, meta: &MetadataSummary) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(meta.title).strong());
        egui::Grid::new("metadata_grid")
            .num_columns(2)
            .spacing([12.0, 4.0])
            .show(ui, |ui| {
                for field in &meta.fields {
                    ui.label(RichText::new(field.label).color(MUTED));
                    ui.label(&field.value);
                    ui.end_row();
                }
            });
    });
}

fn render_error(ui: &mut egui::Ui, message: &str) -> Option<UiAction> {
    let mut action = None;

    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.add_space(10.0);
            ui.colored_label(ERROR, format!("❌ {message}"));
            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("🔁 Retry").clicked() {
                    action = Some(UiAction::Retry);
                }
                if ui.button("🗑 Start Over").clicked() {
                    action = Some(UiAction::Reset);
                }
            });
            ui.add_space(10.0);
        });
    });

    action
}
