//! # Cost Breakdown
//!
//! One-call composition of the cost aggregator and the price matrix builder:
//! everything needed to render the cost and pricing tables of a
//! (project, printer) pair.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::breakdown::calculate_costs;
//! use pricing_core::project::{Project, ProjectFilamentUse};
//! use pricing_core::records::{Channel, Filament, GlobalConfig, Printer};
//!
//! let printer = Printer {
//!     power_consumption: 0.2,
//!     cost: 500.0,
//!     maintenance_cost: 120.0,
//!     hours_per_day: 8.0,
//!     ..Printer::default()
//! };
//! let filaments = vec![Filament { id: 1, name: "PLA".into(), price_per_kg: 20.0 }];
//! let channels = vec![Channel { id: 1, name: "Direct".into(), profit_percentage: 20.0 }];
//! let project = Project {
//!     filaments: vec![ProjectFilamentUse { filament_id: 1, grams: 100.0 }],
//!     print_hours: 2.0,
//!     units_produced: 10.0,
//!     packaging_cost: 0.5,
//!     ..Project::default()
//! };
//!
//! let breakdown = calculate_costs(&project, &printer, &filaments, &GlobalConfig::new(0.15), &channels);
//! let twelve_months = &breakdown.prices[3];
//! assert_eq!(twelve_months.months, 12);
//! assert!((twelve_months.channel_prices[0].price_per_unit - 0.936).abs() < 1e-3);
//! assert!(breakdown.is_priceable());
//! ```

use serde::{Deserialize, Serialize};

use super::cost::compute_base_costs;
use super::price_matrix::{build_price_matrix, DepreciationEntry};
use crate::project::Project;
use crate::records::{Channel, FilamentCatalog, GlobalConfig, Printer};

/// Full cost breakdown of a (project, printer) pair.
///
/// A breakdown containing any non-finite figure means there is not enough
/// data to price the combination; see [`CostBreakdown::is_priceable`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub energy_cost: f64,
    pub filament_cost: f64,
    pub maintenance_cost: f64,
    /// energy + filament
    pub base_cost: f64,
    /// base + maintenance (before depreciation and packaging)
    pub total_cost: f64,
    /// One entry per depreciation horizon, ascending
    pub prices: Vec<DepreciationEntry>,
}

impl CostBreakdown {
    /// True when every figure, including every matrix cell, is finite.
    pub fn is_priceable(&self) -> bool {
        [
            self.energy_cost,
            self.filament_cost,
            self.maintenance_cost,
            self.base_cost,
            self.total_cost,
        ]
        .iter()
        .all(|v| v.is_finite())
            && self.prices.iter().all(DepreciationEntry::is_finite)
    }

    /// Per-print and per-unit view of the run costs.
    pub fn per_unit(&self, project: &Project) -> UnitCosts {
        let net_units = project.net_units();
        UnitCosts {
            net_units,
            energy_per_unit: self.energy_cost / net_units,
            filament_per_unit: self.filament_cost / net_units,
            maintenance_per_unit: self.maintenance_cost / net_units,
            base_per_unit: self.base_cost / net_units,
            packaging_total: project.packaging_total(),
            packaging_per_unit: project.packaging_cost,
        }
    }
}

/// Run costs divided over the net units of the run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitCosts {
    pub net_units: f64,
    pub energy_per_unit: f64,
    pub filament_per_unit: f64,
    pub maintenance_per_unit: f64,
    pub base_per_unit: f64,
    /// Packaging for the whole run
    pub packaging_total: f64,
    pub packaging_per_unit: f64,
}

/// Compute the cost breakdown and price matrix for one (project, printer) pair.
pub fn calculate_costs<C>(
    project: &Project,
    printer: &Printer,
    filaments: &C,
    config: &GlobalConfig,
    channels: &[Channel],
) -> CostBreakdown
where
    C: FilamentCatalog + ?Sized,
{
    let base = compute_base_costs(project, printer, filaments, config);
    let prices = build_price_matrix(base.total_cost, base.total_hours, printer, project, channels);

    CostBreakdown {
        energy_cost: base.energy_cost,
        filament_cost: base.filament_cost,
        maintenance_cost: base.maintenance_cost,
        base_cost: base.base_cost,
        total_cost: base.total_cost,
        prices,
    }
}
