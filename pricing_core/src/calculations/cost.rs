//! # Cost Aggregation
//!
//! Turns a (project, printer, filament table, tariff) tuple into the
//! pre-depreciation cost figures of one print run.
//!
//! ## Formulas
//!
//! ```text
//! filament    = Σ (grams / 1000) × price_per_kg       (unresolved ids skipped)
//! hours       = print_hours + print_minutes / 60
//! energy      = power_consumption × hours × energy_cost
//! maintenance = maintenance_cost / (hours_per_day × 365) × hours
//! base        = energy + filament
//! total       = base + maintenance
//! ```
//!
//! A printer with `hours_per_day = 0` yields a non-finite maintenance figure.
//! That is reported, not raised.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::cost::compute_base_costs;
//! use pricing_core::project::{Project, ProjectFilamentUse};
//! use pricing_core::records::{Filament, GlobalConfig, Printer};
//!
//! let printer = Printer { power_consumption: 0.2, hours_per_day: 8.0, ..Printer::default() };
//! let filaments = vec![Filament { id: 1, name: "PLA".into(), price_per_kg: 20.0 }];
//! let project = Project {
//!     filaments: vec![ProjectFilamentUse { filament_id: 1, grams: 100.0 }],
//!     print_hours: 2.0,
//!     ..Project::default()
//! };
//!
//! let costs = compute_base_costs(&project, &printer, &filaments, &GlobalConfig::new(0.15));
//! assert!((costs.filament_cost - 2.0).abs() < 1e-9);
//! assert!((costs.energy_cost - 0.06).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::project::Project;
use crate::records::{FilamentCatalog, GlobalConfig, Printer};
use crate::units::{Grams, Hours, Kilograms, Kilowatts};

/// Pre-depreciation cost figures of one print run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaseCosts {
    /// Electricity for the run
    pub energy_cost: f64,
    /// Material for the run
    pub filament_cost: f64,
    /// Share of the yearly maintenance budget consumed by the run
    pub maintenance_cost: f64,
    /// energy + filament
    pub base_cost: f64,
    /// base + maintenance
    pub total_cost: f64,
    /// Print duration in hours
    pub total_hours: f64,
}

impl BaseCosts {
    pub fn is_finite(&self) -> bool {
        [
            self.energy_cost,
            self.filament_cost,
            self.maintenance_cost,
            self.base_cost,
            self.total_cost,
            self.total_hours,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Material cost of all resolvable filament uses in the project.
pub fn filament_cost<C>(project: &Project, filaments: &C) -> f64
where
    C: FilamentCatalog + ?Sized,
{
    let mut total = 0.0;
    for usage in &project.filaments {
        let Some(filament) = filaments.filament(usage.filament_id) else {
            debug!(
                project = %project.name,
                filament_id = usage.filament_id,
                "skipping unresolved filament reference"
            );
            continue;
        };
        let kg: Kilograms = Grams(usage.grams).into();
        total += kg.value() * filament.price_per_kg;
    }
    total
}

/// Electricity cost of running `printer` for `total_hours`.
pub fn energy_cost(printer: &Printer, total_hours: f64, config: &GlobalConfig) -> f64 {
    let consumed = Kilowatts(printer.power_consumption) * Hours(total_hours);
    consumed.value() * config.energy_cost
}

/// Maintenance budget share for `total_hours` of printing.
pub fn maintenance_cost(printer: &Printer, total_hours: f64) -> f64 {
    (printer.maintenance_cost / printer.yearly_print_hours()) * total_hours
}

/// Aggregate the pre-depreciation costs of one print run.
pub fn compute_base_costs<C>(
    project: &Project,
    printer: &Printer,
    filaments: &C,
    config: &GlobalConfig,
) -> BaseCosts
where
    C: FilamentCatalog + ?Sized,
{
    let total_hours = project.total_print_hours();
    let filament_cost = filament_cost(project, filaments);
    let energy_cost = energy_cost(printer, total_hours, config);
    let maintenance_cost = maintenance_cost(printer, total_hours);

    let base_cost = energy_cost + filament_cost;
    let total_cost = base_cost + maintenance_cost;

    BaseCosts {
        energy_cost,
        filament_cost,
        maintenance_cost,
        base_cost,
        total_cost,
        total_hours,
    }
}
