use client_core::SelectionSlot;
use eframe::egui;

const IDLE_FILL: egui::Color32 = egui::Color32::from_rgb(246, 247, 249);
const IDLE_STROKE: egui::Color32 = egui::Color32::from_rgb(200, 204, 212);
const DRAG_FILL: egui::Color32 = egui::Color32::from_rgb(234, 236, 255);
const DRAG_STROKE: egui::Color32 = egui::Color32::from_rgb(99, 102, 241);
const FILLED_FILL: egui::Color32 = egui::Color32::from_rgb(236, 253, 243);
const FILLED_STROKE: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
const REMOVE_TEXT: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotAction {
    None,
    Browse,
    Remove,
}

pub struct SlotResponse {
    pub rect: egui::Rect,
    pub action: SlotAction,
}

fn frame_colors(slot: &SelectionSlot) -> (egui::Color32, egui::Color32) {
    if slot.is_drag_active() {
        (DRAG_FILL, DRAG_STROKE)
    } else if slot.held_file().is_some() {
        (FILLED_FILL, FILLED_STROKE)
    } else {
        (IDLE_FILL, IDLE_STROKE)
    }
}

/// Button clicks win over the zone click they also land in.
fn resolve_action(enabled: bool, zone_clicked: bool, button: SlotAction) -> SlotAction {
    if !enabled {
        SlotAction::None
    } else if button == SlotAction::None && zone_clicked {
        SlotAction::Browse
    } else {
        button
    }
}

/// Draws one drop zone. Drag state is fed in separately through the drop
/// router; this only reports clicks. A click anywhere on an empty part of
/// the zone browses.
pub fn show_slot(ui: &mut egui::Ui, slot: &SelectionSlot) -> SlotResponse {
    let role = slot.role();
    let (fill, stroke) = frame_colors(slot);
    let mut action = SlotAction::None;

    let enabled = !slot.is_disabled();
    let inner = ui.add_enabled_ui(enabled, |ui| {
        // The zone senses clicks before its children are laid out, so the
        // Remove and Browse buttons still take their own clicks.
        let zone = ui.scope_builder(egui::UiBuilder::new().sense(egui::Sense::click()), |ui| {
            egui::Frame::NONE
                .fill(fill)
                .stroke(egui::Stroke::new(2.0, stroke))
                .corner_radius(12.0)
                .inner_margin(egui::Margin::same(16))
                .show(ui, |ui| {
                    ui.set_min_height(150.0);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(role.label()).strong().size(16.0));
                        ui.label(egui::RichText::new(role.description()).small().weak());
                        ui.add_space(8.0);

                        match slot.held_file() {
                            Some(file) => {
                                ui.label(egui::RichText::new(file.name()).strong());
                                ui.label(egui::RichText::new(file.size_label()).small().weak());
                                ui.add_space(4.0);
                                let remove = egui::Button::new(
                                    egui::RichText::new("Remove").color(REMOVE_TEXT),
                                )
                                .frame(false);
                                if ui.add(remove).clicked() {
                                    action = SlotAction::Remove;
                                }
                            }
                            None => {
                                ui.label(
                                    egui::RichText::new("Drag & drop or click to browse")
                                        .small()
                                        .weak(),
                                );
                            }
                        }

                        ui.add_space(4.0);
                        let accept = slot.accept().as_accept_attr();
                        if ui
                            .button("Browse…")
                            .on_hover_text(format!("Accepts {accept}"))
                            .clicked()
                        {
                            action = SlotAction::Browse;
                        }
                    });
                })
        });
        let zone = zone.response.on_hover_cursor(egui::CursorIcon::PointingHand);
        action = resolve_action(enabled, zone.clicked(), action);
        zone.rect
    });

    SlotResponse {
        rect: inner.inner,
        action,
    }
}
