//! # Workbook
//!
//! The `Workbook` is the root container the surrounding application keeps:
//! the energy tariff, the printer/filament/project/channel collections and
//! the user's final prices per (project, printer) pair. It is what gets
//! exported to and imported from `.json` files.
//!
//! The pricing engine never sees a `Workbook`; callers pull the inputs out of
//! it and hand them to [`crate::calculations`] as plain borrowed values.
//!
//! ## Structure
//!
//! ```text
//! Workbook
//! ├── meta: WorkbookMeta (schema version, last modification)
//! ├── globalConfig: GlobalConfig
//! ├── printers / filaments / projects / channels: Vec<...>
//! └── projectPrices: { "<projectId>-<printerId>": final price per unit }
//! ```
//!
//! Every section is optional on load, so bare exports such as
//! `{"printers": [...]}` are accepted.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{PricingError, PricingResult};
use crate::project::Project;
use crate::records::{find_channel, Channel, Filament, FilamentCatalog, GlobalConfig, Printer, RecordId};
use crate::sanitize::sanitize_amount;

/// Current schema version for workbook files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root container for all pricing inputs.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Workbook {
    pub meta: WorkbookMeta,
    pub global_config: GlobalConfig,
    pub printers: Vec<Printer>,
    pub filaments: Vec<Filament>,
    pub projects: Vec<Project>,
    pub channels: Vec<Channel>,
    /// Final price per unit chosen by the user, keyed by [`final_price_key`]
    #[serde(deserialize_with = "crate::sanitize::lenient_f64_map")]
    pub project_prices: HashMap<String, f64>,
}

/// Workbook file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkbookMeta {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the workbook was last modified
    pub modified: DateTime<Utc>,
}

impl Default for WorkbookMeta {
    fn default() -> Self {
        WorkbookMeta {
            version: SCHEMA_VERSION.to_string(),
            modified: Utc::now(),
        }
    }
}

/// Key of a final price in [`Workbook::project_prices`].
pub fn final_price_key(project_id: RecordId, printer_id: RecordId) -> String {
    format!("{}-{}", project_id, printer_id)
}

impl Workbook {
    pub fn new() -> Self {
        Workbook::default()
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Get a project by id.
    pub fn project(&self, id: RecordId) -> PricingResult<&Project> {
        self.projects
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PricingError::record_not_found("Project", id))
    }

    /// Get a printer by id.
    pub fn printer(&self, id: RecordId) -> PricingResult<&Printer> {
        self.printers
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| PricingError::record_not_found("Printer", id))
    }

    /// Get a sales channel by name. Duplicate names resolve to the first.
    pub fn channel(&self, name: &str) -> PricingResult<&Channel> {
        find_channel(&self.channels, name).ok_or_else(|| PricingError::record_not_found("Channel", name))
    }

    /// Printers the project may be produced on, in workbook order.
    pub fn allowed_printers<'a>(&'a self, project: &'a Project) -> impl Iterator<Item = &'a Printer> + 'a {
        self.printers
            .iter()
            .filter(move |printer| project.allows_printer(printer.id))
    }

    /// Final price per unit chosen for the pair, `0.0` when unset.
    pub fn final_price(&self, project_id: RecordId, printer_id: RecordId) -> f64 {
        self.project_prices
            .get(&final_price_key(project_id, printer_id))
            .copied()
            .map(sanitize_amount)
            .unwrap_or(0.0)
    }

    /// Store a final price per unit. Non-finite and negative values are
    /// stored as `0.0`, since JSON has no spelling for them.
    pub fn set_final_price(&mut self, project_id: RecordId, printer_id: RecordId, price: f64) {
        let price = if price.is_finite() && price > 0.0 { price } else { 0.0 };
        self.project_prices
            .insert(final_price_key(project_id, printer_id), price);
        self.touch();
    }

    /// Caller-side sanity checks of the pricing inputs.
    ///
    /// The engine happily computes with any numbers; this lists what would
    /// make its output non-finite or meaningless, so a front end can warn
    /// before rendering. An empty vector means every check passed.
    pub fn validate(&self) -> Vec<PricingError> {
        let mut problems = Vec::new();

        if self.global_config.energy_cost < 0.0 {
            problems.push(PricingError::invalid_input(
                "globalConfig.energyCost",
                self.global_config.energy_cost.to_string(),
                "Energy cost cannot be negative",
            ));
        }

        for printer in &self.printers {
            let field = |name: &str| format!("printers[{}].{}", printer.id, name);
            if printer.hours_per_day <= 0.0 || printer.hours_per_day > 24.0 {
                problems.push(PricingError::invalid_input(
                    field("hoursPerDay"),
                    printer.hours_per_day.to_string(),
                    "Hours per day must be greater than 0 and at most 24",
                ));
            }
            for (name, value) in [
                ("powerConsumption", printer.power_consumption),
                ("cost", printer.cost),
                ("maintenanceCost", printer.maintenance_cost),
            ] {
                if value < 0.0 {
                    problems.push(PricingError::invalid_input(field(name), value.to_string(), "Cannot be negative"));
                }
            }
        }

        for filament in &self.filaments {
            if filament.price_per_kg < 0.0 {
                problems.push(PricingError::invalid_input(
                    format!("filaments[{}].pricePerKg", filament.id),
                    filament.price_per_kg.to_string(),
                    "Cannot be negative",
                ));
            }
        }

        for channel in &self.channels {
            if !(0.0..100.0).contains(&channel.profit_percentage) {
                problems.push(PricingError::invalid_input(
                    format!("channels[{}].profitPercentage", channel.id),
                    channel.profit_percentage.to_string(),
                    "Channel fee must be at least 0% and below 100%",
                ));
            }
            if channel.name.trim().is_empty() {
                problems.push(PricingError::missing_field(format!("channels[{}].name", channel.id)));
            }
        }

        for project in &self.projects {
            let field = |name: &str| format!("projects[{}].{}", project.id, name);
            if project.net_units() <= 0.0 {
                problems.push(PricingError::invalid_input(
                    field("unitsWasted"),
                    project.units_wasted.to_string(),
                    "Wasted units must leave at least one sellable unit",
                ));
            }
            if project.packaging_cost < 0.0 {
                problems.push(PricingError::invalid_input(
                    field("packagingCost"),
                    project.packaging_cost.to_string(),
                    "Cannot be negative",
                ));
            }
            for usage in &project.filaments {
                if self.filaments.filament(usage.filament_id).is_none() {
                    problems.push(PricingError::record_not_found("Filament", usage.filament_id));
                }
            }
        }

        problems
    }
}
