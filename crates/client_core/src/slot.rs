//! Single-file selection slot: drag-and-drop and browse inputs reconciled into
//! one held file.

use shared::domain::{AcceptHint, SlotRole};
use tracing::debug;

use crate::file::FileHandle;

/// Raw user input addressed to a slot.
#[derive(Debug, Clone)]
pub enum SlotInput {
    DragEnter,
    DragOver,
    DragLeave,
    Drop(Vec<FileHandle>),
    BrowseChanged(Option<FileHandle>),
    Clear,
}

/// What a slot reports upward after handling an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotChange {
    Unchanged,
    Changed(Option<FileHandle>),
}

impl SlotChange {
    pub fn is_changed(&self) -> bool {
        matches!(self, SlotChange::Changed(_))
    }
}

#[derive(Debug, Clone)]
pub struct SelectionSlot {
    role: SlotRole,
    held_file: Option<FileHandle>,
    is_drag_active: bool,
    is_disabled: bool,
    // Value of the underlying file-choosing control. A change event that repeats
    // it is swallowed, so it must be reset whenever the control stops
    // reflecting the held file.
    browse_value: Option<FileHandle>,
}

impl SelectionSlot {
    pub fn new(role: SlotRole) -> Self {
        Self {
            role,
            held_file: None,
            is_drag_active: false,
            is_disabled: false,
            browse_value: None,
        }
    }

    pub fn role(&self) -> SlotRole {
        self.role
    }

    pub fn held_file(&self) -> Option<&FileHandle> {
        self.held_file.as_ref()
    }

    pub fn is_drag_active(&self) -> bool {
        self.is_drag_active
    }

    pub fn is_disabled(&self) -> bool {
        self.is_disabled
    }

    pub fn accept(&self) -> AcceptHint {
        self.role.accept()
    }

    /// Replaces the held file unconditionally. No type or size checks.
    pub fn select(&mut self, candidate: Option<FileHandle>) -> SlotChange {
        debug!(
            role = ?self.role,
            file = candidate.as_ref().map(FileHandle::name),
            "slot selection replaced"
        );
        if self.browse_value != candidate {
            self.browse_value = None;
        }
        self.held_file = candidate.clone();
        SlotChange::Changed(candidate)
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.is_disabled = disabled;
        if disabled {
            self.is_drag_active = false;
        }
    }

    pub fn handle(&mut self, input: SlotInput) -> SlotChange {
        match input {
            SlotInput::DragEnter | SlotInput::DragOver => {
                self.drag_over();
                SlotChange::Unchanged
            }
            SlotInput::DragLeave => {
                self.drag_leave();
                SlotChange::Unchanged
            }
            SlotInput::Drop(files) => self.drop_files(files),
            SlotInput::BrowseChanged(file) => self.browse_changed(file),
            SlotInput::Clear => self.clear(),
        }
    }

    pub fn drag_over(&mut self) {
        if !self.is_disabled {
            self.is_drag_active = true;
        }
    }

    pub fn drag_leave(&mut self) {
        self.is_drag_active = false;
    }

    /// Only the first dropped file is taken; one file per slot.
    pub fn drop_files(&mut self, files: Vec<FileHandle>) -> SlotChange {
        self.is_drag_active = false;
        if self.is_disabled {
            return SlotChange::Unchanged;
        }
        let Some(first) = files.into_iter().next() else {
            return SlotChange::Unchanged;
        };
        self.select(Some(first))
    }

    /// Returns the dialog filter to open with, or `None` while disabled.
    pub fn request_browse(&self) -> Option<AcceptHint> {
        if self.is_disabled {
            None
        } else {
            Some(self.accept())
        }
    }

    pub fn browse_changed(&mut self, file: Option<FileHandle>) -> SlotChange {
        if self.is_disabled {
            return SlotChange::Unchanged;
        }
        let Some(file) = file else {
            return SlotChange::Unchanged;
        };
        if self.browse_value.as_ref() == Some(&file) {
            return SlotChange::Unchanged;
        }
        let change = self.select(Some(file.clone()));
        self.browse_value = Some(file);
        change
    }

    pub fn clear(&mut self) -> SlotChange {
        if self.is_disabled {
            return SlotChange::Unchanged;
        }
        self.browse_value = None;
        self.select(None)
    }
}

#[cfg(test)]
#[path = "tests/slot_tests.rs"]
mod tests;
