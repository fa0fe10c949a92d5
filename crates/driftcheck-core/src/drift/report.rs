//! Human-readable drift report renderer.

use crate::drift::model::{DriftRecord, DriftSummary};
use crate::tree::Node;
use comfy_table::{presets, Attribute, Cell, Table};

/// Report text used when desired and actual states agree.
pub const NO_DRIFT_MESSAGE: &str =
    "No configuration drift detected: desired and actual states are aligned.";

/// Marker shown in place of a value that is absent on one side.
pub const ABSENT_MARKER: &str = "<absent>";

/// Renders a drift list for display.
///
/// Informational only: rendering never alters the drift list.
pub trait DriftRenderer: Send + Sync {
    fn render(&self, drifts: &[DriftRecord]) -> String;
}

/// Tabular renderer with Path / Status / Desired / Actual columns.
#[derive(Debug, Clone)]
pub struct TableRenderer {
    pub title: String,
    /// Use plain ASCII borders instead of UTF-8 box drawing
    pub ascii: bool,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self {
            title: "Drift Report".to_string(),
            ascii: false,
        }
    }
}

impl TableRenderer {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    fn create_table(&self) -> Table {
        let mut table = Table::new();
        if self.ascii {
            table.load_preset(presets::ASCII_FULL);
        } else {
            table.load_preset(presets::UTF8_FULL_CONDENSED);
        }
        table.set_header(
            ["Path", "Status", "Desired", "Actual"]
                .into_iter()
                .map(|h| Cell::new(h).add_attribute(Attribute::Bold))
                .collect::<Vec<_>>(),
        );
        table
    }
}

impl DriftRenderer for TableRenderer {
    fn render(&self, drifts: &[DriftRecord]) -> String {
        if drifts.is_empty() {
            return NO_DRIFT_MESSAGE.to_string();
        }

        let mut table = self.create_table();
        for drift in drifts {
            table.add_row(vec![
                Cell::new(&drift.path),
                Cell::new(drift.status.as_str()),
                Cell::new(display_value(drift.desired.as_ref())),
                Cell::new(display_value(drift.actual.as_ref())),
            ]);
        }

        format!(
            "{}\n{}\n{}",
            self.title,
            table,
            DriftSummary::from_records(drifts)
        )
    }
}

fn display_value(value: Option<&Node>) -> String {
    value.map_or_else(|| ABSENT_MARKER.to_string(), Node::to_string)
}
