//! # Pricing Calculations
//!
//! The pricing engine. Every function here is a pure computation over
//! borrowed inputs: nothing is cached, nothing is mutated and nothing can
//! fail. Division by zero (no print hours per day, a 100% channel fee, no
//! net units) surfaces as `inf`/`NaN` in the affected figures, which callers
//! must treat as "not enough data to price this combination".
//!
//! ## Pipeline
//!
//! - [`cost`] - energy, filament, maintenance and base costs of one run
//! - [`price_matrix`] - depreciation horizons × channels sell prices
//! - [`breakdown`] - both of the above in one [`CostBreakdown`]
//! - [`margin`] - margin percentage and nearest-horizon brackets for a final price
//! - [`analysis`] - all of the above for a project across its allowed printers

pub mod analysis;
pub mod breakdown;
pub mod cost;
pub mod margin;
pub mod price_matrix;

// Re-export commonly used types
pub use analysis::{analyze_project, analyze_workbook, ChannelBracket, PrinterQuote, ProjectAnalysis};
pub use breakdown::{calculate_costs, CostBreakdown, UnitCosts};
pub use cost::{compute_base_costs, BaseCosts};
pub use margin::{margin_percent, nearest_bracket, BracketPoint, PriceBracket};
pub use price_matrix::{build_price_matrix, ChannelPrice, DepreciationEntry, DEPRECIATION_HORIZONS_MONTHS};
