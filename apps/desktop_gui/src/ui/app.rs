use std::{path::PathBuf, time::Duration};

use client_core::{
    ClientSettings, Notice, NoticeLevel, RequestState, SelectedFile, SystemClipboard,
    UploadController,
};
use crossbeam_channel::{Receiver, Sender};
use egui::Color32;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{events::UiEvent, orchestration::dispatch_split},
    ui::{
        cards::{show_card, PreviewCache},
        sinks::SaveDialogSink,
    },
};

pub struct StartupConfig {
    pub settings: ClientSettings,
}

pub struct SplitterApp {
    controller: UploadController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    downloads: SaveDialogSink,
    clipboard: SystemClipboard,
    previews: PreviewCache,
    server_url: String,
}

impl SplitterApp {
    pub fn new(
        config: StartupConfig,
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
    ) -> Self {
        let settings = config.settings;
        let start_dir = Some(settings.download_dir.clone())
            .filter(|dir| dir.is_dir())
            .or_else(dirs::download_dir);

        Self {
            controller: UploadController::new(settings.request_timeout()),
            cmd_tx,
            ui_rx,
            downloads: SaveDialogSink::new(start_dir),
            clipboard: SystemClipboard::default(),
            previews: PreviewCache::default(),
            server_url: settings.server_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::SplitFinished(outcome) => {
                    if self.controller.finish_submit(outcome).is_ok() {
                        self.previews.clear();
                    }
                }
                UiEvent::BackendUnavailable(reason) => {
                    self.controller.notify(Notice::new(
                        NoticeLevel::Danger,
                        format!("Split backend unavailable: {reason}"),
                    ));
                }
            }
        }
    }

    fn pick_file(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("PDF document", &["pdf"])
            .pick_file()
        else {
            return;
        };
        self.load_candidate(path);
    }

    fn load_candidate(&mut self, path: PathBuf) {
        match SelectedFile::from_path(&path) {
            Ok(file) => {
                if self.controller.select(Some(file)).is_ok() {
                    self.previews.clear();
                }
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), "failed to read candidate: {err}");
                let _ = self.controller.select(None);
                self.controller.notify(Notice::new(
                    NoticeLevel::Danger,
                    format!("Failed to read {}: {err}", path.display()),
                ));
            }
        }
    }

    fn show_notice(&mut self, ui: &mut egui::Ui) {
        let Some(notice) = self.controller.notice() else {
            return;
        };
        let color = notice_color(notice.level);
        let text = notice.text.clone();

        let mut dismissed = false;
        egui::Frame::group(ui.style())
            .stroke(egui::Stroke::new(1.0, color))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(color, text);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        dismissed = ui.small_button("✕").clicked();
                    });
                });
            });
        if dismissed {
            self.controller.dismiss_notice();
        }
        ui.add_space(6.0);
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .add_enabled(
                    self.controller.picker_enabled(),
                    egui::Button::new("Choose PDF…"),
                )
                .clicked()
            {
                self.pick_file();
            }

            match self.controller.selected() {
                Some(file) => {
                    ui.label(format!(
                        "{} ({})",
                        file.name(),
                        human_readable_bytes(file.size())
                    ));
                    if ui
                        .add_enabled(self.controller.picker_enabled(), egui::Button::new("✕").small())
                        .on_hover_text("Remove file")
                        .clicked()
                    {
                        let _ = self.controller.select(None);
                    }
                }
                None => {
                    ui.weak("No file selected (PDF, at most 10 MB)");
                }
            }
        });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(self.controller.submit_enabled(), egui::Button::new("Split PDF"))
                .clicked()
            {
                dispatch_split(&self.cmd_tx, &mut self.controller);
            }
            if ui
                .add_enabled(self.controller.clear_enabled(), egui::Button::new("Clear"))
                .clicked()
            {
                self.controller.clear_all();
                self.previews.clear();
            }
            if let RequestState::Busy { started_at } = self.controller.request_state() {
                ui.spinner();
                ui.weak(format!("Splitting… {}s", started_at.elapsed().as_secs()));
            }
        });
    }

    fn show_results(&mut self, ui: &mut egui::Ui) {
        let Some(results) = self.controller.results() else {
            return;
        };

        ui.heading(format!("Pages ({})", results.total_pages));
        ui.add_space(4.0);

        let mut clicked = None;
        ui.horizontal_wrapped(|ui| {
            for card in &results.cards {
                if let Some(action) = show_card(ui, &mut self.previews, card) {
                    clicked = Some(action);
                }
            }
        });

        if let Some(action) = clicked {
            let _ = self
                .controller
                .perform(&action, &mut self.downloads, &mut self.clipboard);
        }
    }
}

impl eframe::App for SplitterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("PDF Page Splitter");
            ui.weak(format!("Server: {}", self.server_url));
            ui.add_space(8.0);

            self.show_notice(ui);
            self.show_controls(ui);
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.show_results(ui));
        });

        if self.controller.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for SplitterApp {
    fn drop(&mut self) {
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}

fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Success => Color32::from_rgb(46, 160, 67),
        NoticeLevel::Warning => Color32::from_rgb(210, 153, 34),
        NoticeLevel::Danger => Color32::from_rgb(218, 54, 51),
        NoticeLevel::Info => Color32::from_rgb(56, 139, 253),
    }
}

fn human_readable_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes < KB {
        return format!("{bytes} B");
    }
    if bytes < MB {
        return format_scaled_unit(bytes, KB, "KB");
    }
    format_scaled_unit(bytes, MB, "MB")
}

fn format_scaled_unit(bytes: u64, unit_size: u64, unit_label: &str) -> String {
    let value = bytes as f64 / unit_size as f64;
    let value_text = format!("{value:.1}");
    let compact_value = value_text.strip_suffix(".0").unwrap_or(&value_text);
    format!("{compact_value} {unit_label}")
}
