//! Display rules shared by every surface that shows a [`DropRow`].

use crate::report::DropRow;
use crate::voltage_drop::{Severity, VoltageDrop};

pub const PLACEHOLDER: &str = "—";

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Self::Missing => "to be entered",
            Self::Ok => "ok",
            Self::Warn => "warning",
            Self::Fail => "too high",
        }
    }
}

pub fn drop_volts(drop: &VoltageDrop) -> String {
    if drop.severity.is_missing() {
        PLACEHOLDER.to_string()
    } else {
        format!("{:.2}", drop.drop_v)
    }
}

pub fn drop_percent(drop: &VoltageDrop) -> String {
    if drop.severity.is_missing() {
        drop.severity.label().to_string()
    } else {
        format!("{:.2} %", drop.drop_pct)
    }
}

pub fn length(row: &DropRow) -> String {
    if row.run.length_m > 0.0 {
        format!("{}", row.run.length_m)
    } else {
        PLACEHOLDER.to_string()
    }
}

pub fn section(row: &DropRow) -> String {
    if row.run.section_mm2 > 0.0 {
        format!("{}", row.run.section_mm2)
    } else {
        PLACEHOLDER.to_string()
    }
}

pub fn current(row: &DropRow) -> String {
    if row.has_analysis {
        format!("{:.2}", row.current_a)
    } else {
        PLACEHOLDER.to_string()
    }
}

pub fn voltage(row: &DropRow) -> String {
    if row.has_analysis {
        format!("{:.1}", row.reference_voltage_v)
    } else {
        PLACEHOLDER.to_string()
    }
}
