use serde::{Deserialize, Serialize};

/// The input a selection slot is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotRole {
    Data,
    Template,
}

impl SlotRole {
    pub const ALL: [SlotRole; 2] = [SlotRole::Data, SlotRole::Template];

    pub fn label(self) -> &'static str {
        match self {
            SlotRole::Data => "Data File",
            SlotRole::Template => "Template File",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SlotRole::Data => "Excel or CSV",
            SlotRole::Template => "Word Document",
        }
    }

    pub fn accept(self) -> AcceptHint {
        match self {
            SlotRole::Data => AcceptHint {
                filter_name: "Spreadsheets",
                extensions: &["xlsx", "xls", "csv"],
            },
            SlotRole::Template => AcceptHint {
                filter_name: "Word documents",
                extensions: &["docx"],
            },
        }
    }
}

/// Advisory file-type filter for the browse dialog. Never enforced on selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptHint {
    pub filter_name: &'static str,
    pub extensions: &'static [&'static str],
}

impl AcceptHint {
    /// Matches the `.xlsx,.xls,.csv` form used by HTML `accept` attributes.
    pub fn as_accept_attr(&self) -> String {
        self.extensions
            .iter()
            .map(|ext| format!(".{ext}"))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn matches_name(&self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accept_hints_follow_slot_roles() {
        assert_eq!(SlotRole::Data.accept().as_accept_attr(), ".xlsx,.xls,.csv");
        assert_eq!(SlotRole::Template.accept().as_accept_attr(), ".docx");
    }

    #[test]
    fn matches_name_is_case_insensitive_and_needs_extension() {
        let hint = SlotRole::Data.accept();
        assert!(hint.matches_name("people.CSV"));
        assert!(hint.matches_name("report.final.xlsx"));
        assert!(!hint.matches_name("template.docx"));
        assert!(!hint.matches_name("csv"));
    }
}
