//! # pricing_core - 3D Print Cost & Pricing Engine
//!
//! `pricing_core` is the computational heart of Filacost. Given a product
//! definition, a printer profile, a filament cost table, an energy tariff and
//! a set of sales channels, it computes the cost of a print run and a matrix
//! of recommended selling prices across printer-depreciation horizons and
//! channels, plus margin and "nearest bracket" analytics for a chosen price.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions over borrowed inputs, recomputed on every call
//! - **Never panics on numbers**: Zero divisors yield `inf`/`NaN`, reported to the caller
//! - **JSON-First**: All records and results implement Serialize/Deserialize
//! - **Storage-agnostic**: The engine never touches files; [`file_io`] is a separate collaborator
//!
//! ## Quick Start
//!
//! ```rust
//! use pricing_core::calculations::{calculate_costs, margin_percent, nearest_bracket};
//! use pricing_core::project::{Project, ProjectFilamentUse};
//! use pricing_core::records::{Channel, Filament, GlobalConfig, Printer};
//!
//! let printer = Printer { power_consumption: 0.2, cost: 500.0, maintenance_cost: 120.0, hours_per_day: 8.0, ..Printer::default() };
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
//! let bracket = nearest_bracket(&breakdown.prices, "Direct", 0.95);
//! assert_eq!(bracket.lower.map(|p| p.months), Some(12));
//! assert_eq!(bracket.higher.map(|p| p.months), Some(9));
//! assert!(margin_percent(0.95, breakdown.base_cost / project.net_units()) > 0.0);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The pricing engine (costs, price matrix, margins, brackets)
//! - [`records`] - Printer, filament, channel and tariff records
//! - [`project`] - Product definitions
//! - [`workbook`] - Container for all inputs plus user final prices
//! - [`sanitize`] - Lenient numeric coercion for user-entered values
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types
//! - [`file_io`] - Workbook loading and atomic saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod project;
pub mod records;
pub mod sanitize;
pub mod units;
pub mod workbook;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CostBreakdown, DepreciationEntry, ChannelPrice, PriceBracket};
pub use errors::{PricingError, PricingResult};
pub use file_io::{load_workbook, save_workbook};
pub use project::{License, Project, ProjectFilamentUse};
pub use records::{Channel, Filament, FilamentCatalog, GlobalConfig, Printer, RecordId};
pub use workbook::Workbook;
