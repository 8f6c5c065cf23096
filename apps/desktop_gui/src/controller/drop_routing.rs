//! Turns window-level OS file drag state into per-slot drag and drop inputs.
//!
//! egui only reports hovered and dropped files for the whole window, so the
//! slot under the pointer is worked out here from the rects drawn last frame.

use client_core::{FileHandle, SlotInput};
use egui::{Pos2, Rect};
use shared::domain::SlotRole;

/// What the window saw this frame.
pub struct DragFrame<'a> {
    pub hovering_files: bool,
    pub pointer: Option<Pos2>,
    pub dropped: Vec<FileHandle>,
    pub slot_rects: &'a [(SlotRole, Rect)],
}

/// Per-slot inputs for this frame, plus the names of dropped files that
/// could not be matched to any slot.
#[derive(Debug, Default)]
pub struct Routed {
    pub inputs: Vec<(SlotRole, SlotInput)>,
    pub unplaced: Vec<String>,
}

#[derive(Debug, Default)]
pub struct DropRouter {
    over: Option<SlotRole>,
}

impl DropRouter {
    #[cfg(test)]
    pub fn hovered_slot(&self) -> Option<SlotRole> {
        self.over
    }

    pub fn route(&mut self, frame: DragFrame<'_>) -> Routed {
        let mut routed = Routed::default();
        let has_drop = !frame.dropped.is_empty();
        let target = if frame.hovering_files || has_drop {
            slot_under_pointer(frame.pointer, frame.slot_rects)
        } else {
            None
        };

        if has_drop {
            let previous = self.over.take();
            // Some platforms stop reporting the pointer during an OS drag. The
            // slot hovered last frame wins; the type hint only breaks a tie
            // when nothing was hovered at all.
            let target = match frame.pointer {
                Some(_) => target,
                None => previous.or_else(|| hinted_slot(&frame.dropped, frame.slot_rects)),
            };
            if let Some(previous) = previous {
                if Some(previous) != target {
                    routed.inputs.push((previous, SlotInput::DragLeave));
                }
            }
            match target {
                Some(role) => routed.inputs.push((role, SlotInput::Drop(frame.dropped))),
                None => {
                    routed.unplaced = frame
                        .dropped
                        .iter()
                        .map(|file| file.name().to_string())
                        .collect();
                }
            }
            return routed;
        }

        if target != self.over {
            if let Some(previous) = self.over {
                routed.inputs.push((previous, SlotInput::DragLeave));
            }
            if let Some(role) = target {
                routed.inputs.push((role, SlotInput::DragEnter));
            }
        } else if let Some(role) = target {
            routed.inputs.push((role, SlotInput::DragOver));
        }
        self.over = target;
        routed
    }
}

fn hinted_slot(dropped: &[FileHandle], rects: &[(SlotRole, Rect)]) -> Option<SlotRole> {
    let file = dropped.first()?;
    rects
        .iter()
        .map(|(role, _)| *role)
        .find(|role| role.accept().matches_name(file.name()))
}

fn slot_under_pointer(pointer: Option<Pos2>, rects: &[(SlotRole, Rect)]) -> Option<SlotRole> {
    let pointer = pointer?;
    rects
        .iter()
        .find(|(_, rect)| rect.contains(pointer))
        .map(|(role, _)| *role)
}
