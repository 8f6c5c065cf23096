use std::time::Duration;

use client_core::{FileHandle, SlotInput, SubmissionController};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use eframe::egui;
use shared::{domain::SlotRole, error::SubmitError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::drop_routing::{DragFrame, DropRouter};
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::{
    apply_backend_disconnected, apply_ui_event, ServiceHealth, ShellState,
};
use crate::ui::slot_widget::{show_slot, SlotAction};

const BUTTON_FILL: egui::Color32 = egui::Color32::from_rgb(79, 70, 229);
const ERROR_FILL: egui::Color32 = egui::Color32::from_rgb(254, 242, 242);
const ERROR_STROKE: egui::Color32 = egui::Color32::from_rgb(254, 202, 202);
const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(185, 28, 28);

pub struct TemplateFillerApp {
    controller: SubmissionController,
    shell: ShellState,
    drop_router: DropRouter,
    slot_rects: Vec<(SlotRole, egui::Rect)>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
}

impl TemplateFillerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup_warning: Option<String>,
    ) -> Self {
        let mut shell = ShellState::default();
        if let Some(warning) = startup_warning {
            shell.status = warning;
        }
        Self {
            controller: SubmissionController::new(),
            shell,
            drop_router: DropRouter::default(),
            slot_rects: Vec::new(),
            cmd_tx,
            ui_rx,
        }
    }

    fn process_ui_events(&mut self) {
        loop {
            match self.ui_rx.try_recv() {
                Ok(event) => apply_ui_event(&mut self.controller, &mut self.shell, event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.shell.backend_alive {
                        tracing::error!("backend worker event channel disconnected");
                        apply_backend_disconnected(&mut self.controller, &mut self.shell);
                    }
                    break;
                }
            }
        }
    }

    fn process_file_drag(&mut self, ctx: &egui::Context) {
        let (hovering_files, pointer, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.pointer.latest_pos(),
                i.raw.dropped_files.clone(),
            )
        });

        let dropped = dropped
            .into_iter()
            .filter_map(|file| match (file.path, file.bytes) {
                (Some(path), _) => match FileHandle::from_path(&path) {
                    Ok(handle) => Some(handle),
                    Err(err) => {
                        self.shell.status = format!("Could not use dropped file: {err}");
                        None
                    }
                },
                (None, Some(bytes)) => Some(FileHandle::from_bytes(file.name, bytes)),
                (None, None) => None,
            })
            .collect();

        let routed = self.drop_router.route(DragFrame {
            hovering_files,
            pointer,
            dropped,
            slot_rects: &self.slot_rects,
        });
        for (role, input) in routed.inputs {
            self.controller.handle_slot_input(role, input);
        }
        if !routed.unplaced.is_empty() {
            tracing::info!(files = ?routed.unplaced, "drop did not land on a slot");
            self.shell.status = format!(
                "Drop {} onto the Data File or Template File area",
                routed.unplaced.join(", ")
            );
        }
    }

    fn browse(&mut self, role: SlotRole) {
        let Some(hint) = self.controller.request_browse(role) else {
            return;
        };
        let mut dialog = rfd::FileDialog::new().add_filter(hint.filter_name, hint.extensions);
        if let Some(dir) = dirs::document_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        match FileHandle::from_path(&path) {
            Ok(file) => {
                self.controller
                    .handle_slot_input(role, SlotInput::BrowseChanged(Some(file)));
            }
            Err(err) => {
                self.shell.status = format!("Could not use selected file: {err}");
            }
        }
    }

    fn start_submission(&mut self) {
        let Ok(job) = self.controller.begin_submission() else {
            return;
        };
        if let Err(message) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::FillTemplates(job))
        {
            self.controller
                .finish_submission(Err(SubmitError::Unexpected(message)));
        }
    }

    fn check_service(&mut self) {
        match dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth) {
            Ok(()) => self.shell.service_health = ServiceHealth::Checking,
            Err(message) => self.shell.status = message,
        }
    }

    fn show_error_banner(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.controller.last_error().map(ToString::to_string) else {
            return;
        };
        egui::Frame::NONE
            .fill(ERROR_FILL)
            .stroke(egui::Stroke::new(1.0, ERROR_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new(message).color(ERROR_TEXT));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.controller.dismiss_error();
                        }
                    });
                });
            });
        ui.add_space(12.0);
    }

    fn show_submit_button(&mut self, ui: &mut egui::Ui) {
        let size = egui::vec2(ui.available_width(), 48.0);
        if self.controller.is_submitting() {
            ui.add_sized(size, |ui: &mut egui::Ui| {
                ui.horizontal_centered(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Processing...").strong());
                })
                .response
            });
            return;
        }

        let enabled = self.controller.can_submit() && self.shell.backend_alive;
        let button = egui::Button::new(
            egui::RichText::new("Generate Documents")
                .size(18.0)
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(BUTTON_FILL)
        .min_size(size);
        if ui.add_enabled(enabled, button).clicked() {
            self.start_submission();
        }
    }

    fn show_footer(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let health = match &self.shell.service_health {
                ServiceHealth::Unknown => "Service: not checked".to_string(),
                ServiceHealth::Checking => "Service: checking...".to_string(),
                ServiceHealth::Up => "Service: up".to_string(),
                ServiceHealth::Degraded(status) => format!("Service: {status}"),
                ServiceHealth::Down(reason) => format!("Service: down ({reason})"),
            };
            ui.label(egui::RichText::new(health).small());
            if ui
                .add_enabled(self.shell.backend_alive, egui::Button::new("Check service").small())
                .clicked()
            {
                self.check_service();
            }
        });
        ui.label(egui::RichText::new(&self.shell.status).small().weak());
    }

    fn show_main(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(egui::RichText::new("Template Filler").size(30.0).strong());
                ui.label("Upload your data and template to generate filled documents");
            });
            ui.add_space(20.0);

            let controller = &self.controller;
            let (data, template) = ui.columns(2, |cols| {
                (
                    show_slot(&mut cols[0], controller.slot(SlotRole::Data)),
                    show_slot(&mut cols[1], controller.slot(SlotRole::Template)),
                )
            });
            self.slot_rects = vec![(SlotRole::Data, data.rect), (SlotRole::Template, template.rect)];

            for (role, action) in [
                (SlotRole::Data, data.action),
                (SlotRole::Template, template.action),
            ] {
                match action {
                    SlotAction::None => {}
                    SlotAction::Browse => self.browse(role),
                    SlotAction::Remove => {
                        self.controller.handle_slot_input(role, SlotInput::Clear);
                    }
                }
            }

            ui.add_space(20.0);
            self.show_error_banner(ui);
            self.show_submit_button(ui);
            ui.add_space(12.0);
            self.show_footer(ui);
        });
    }
}

impl eframe::App for TemplateFillerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.process_file_drag(ctx);
        self.show_main(ctx);

        if self.controller.is_submitting()
            || self.shell.service_health == ServiceHealth::Checking
        {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
