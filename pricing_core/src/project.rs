//! # Project Data Structures
//!
//! A `Project` is a product definition: which filaments it consumes, how long
//! one print run takes, how many sellable units a run yields and which
//! printers may produce it.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── filaments: Vec<ProjectFilamentUse> (filament id + grams, per print run)
//! ├── print time: print_hours + print_minutes
//! ├── yield: units_produced - units_wasted = net units
//! ├── packaging_cost (per net unit)
//! ├── allowed_printers (empty = every printer)
//! └── license, model_link (informational)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::project::{Project, ProjectFilamentUse};
//!
//! let project = Project {
//!     name: "Cable clip".to_string(),
//!     filaments: vec![ProjectFilamentUse { filament_id: 1, grams: 100.0 }],
//!     print_hours: 2.0,
//!     print_minutes: 30.0,
//!     units_produced: 10.0,
//!     units_wasted: 2.0,
//!     ..Project::default()
//! };
//!
//! assert_eq!(project.net_units(), 8.0);
//! assert_eq!(project.total_print_hours(), 2.5);
//! assert!(project.allows_printer(42));
//! ```

use serde::{Deserialize, Serialize};

use crate::records::RecordId;
use crate::sanitize::lenient_f64;
use crate::units::{Hours, Minutes};

/// Amount of one filament consumed by a print run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilamentUse {
    /// Reference into the filament table; stale ids are tolerated
    #[serde(default)]
    pub filament_id: RecordId,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub grams: f64,
}

/// Distribution license of the printed model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum License {
    #[default]
    Free,
    NonCommercial,
    Commercial,
}

impl License {
    pub fn display_name(&self) -> &'static str {
        match self {
            License::Free => "Free",
            License::NonCommercial => "Non-Commercial",
            License::Commercial => "Commercial",
        }
    }
}

/// Product definition priced by the engine.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    /// Filaments consumed by one print run, in entry order
    #[serde(default)]
    pub filaments: Vec<ProjectFilamentUse>,

    #[serde(default, deserialize_with = "lenient_f64")]
    pub print_hours: f64,

    /// Conventionally 0-59, not enforced
    #[serde(default, deserialize_with = "lenient_f64")]
    pub print_minutes: f64,

    /// Units coming off the printer per run
    #[serde(default, deserialize_with = "lenient_f64")]
    pub units_produced: f64,

    /// Units of the run that cannot be sold
    #[serde(default, deserialize_with = "lenient_f64")]
    pub units_wasted: f64,

    /// Packaging cost per net unit
    #[serde(default, deserialize_with = "lenient_f64")]
    pub packaging_cost: f64,

    /// Printers allowed to produce this project; empty means all of them
    #[serde(default)]
    pub allowed_printers: Vec<RecordId>,

    #[serde(default)]
    pub license: License,

    #[serde(default)]
    pub model_link: String,
}

impl Project {
    /// Sellable units per run. Zero or negative values are passed through;
    /// per-unit figures then come out non-finite or negative.
    pub fn net_units(&self) -> f64 {
        self.units_produced - self.units_wasted
    }

    /// Print duration in hours: `print_hours + print_minutes / 60`.
    pub fn total_print_hours(&self) -> f64 {
        (Hours(self.print_hours) + Hours::from(Minutes(self.print_minutes))).value()
    }

    /// Packaging cost for the whole run.
    pub fn packaging_total(&self) -> f64 {
        self.packaging_cost * self.net_units()
    }

    /// Whether `printer_id` may produce this project.
    pub fn allows_printer(&self, printer_id: RecordId) -> bool {
        self.allowed_printers.is_empty() || self.allowed_printers.contains(&printer_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_from_exported_json() {
        let json = r#"{
            "id": 1700000000100,
            "name": "Vase",
            "filaments": [{ "filamentId": 1700000000010, "grams": "120" }],
            "printHours": 3,
            "printMinutes": 15,
            "unitsProduced": 4,
            "unitsWasted": 1,
            "packagingCost": 0.75,
            "finalPrice": 0,
            "modelLink": "https://example.com/vase",
            "license": "non-commercial",
            "allowedPrinters": [1700000000001]
        }"#;

        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.filaments[0].grams, 120.0);
        assert_eq!(project.license, License::NonCommercial);
        assert_eq!(project.net_units(), 3.0);
        assert_eq!(project.total_print_hours(), 3.25);
        assert_eq!(project.packaging_total(), 2.25);
        assert!(project.allows_printer(1700000000001));
        assert!(!project.allows_printer(7));
    }

    #[test]
    fn test_missing_fields_default() {
        let project: Project = serde_json::from_str(r#"{ "name": "Bare" }"#).unwrap();
        assert_eq!(project.license, License::Free);
        assert!(project.filaments.is_empty());
        assert_eq!(project.net_units(), 0.0);
        assert!(project.allows_printer(1));
    }

    #[test]
    fn test_license_serialization() {
        let json = serde_json::to_string(&License::NonCommercial).unwrap();
        assert_eq!(json, "\"non-commercial\"");
        assert_eq!(License::Commercial.display_name(), "Commercial");
    }

    #[test]
    fn test_net_units_not_guarded() {
        let project = Project {
            units_produced: 2.0,
            units_wasted: 5.0,
            ..Project::default()
        };
        assert_eq!(project.net_units(), -3.0);
    }
}
