//! # Depreciation & Price Matrix
//!
//! Expands the cost of one print run over the fixed depreciation horizons and,
//! within each horizon, over every distribution channel.
//!
//! ## Per horizon `m` (months)
//!
//! ```text
//! depreciation            = (printer.cost / m) / (hours_per_day × 30) × hours
//! total_with_depreciation = total_cost + depreciation + packaging_cost × net_units
//! ```
//!
//! ## Per channel (fee `p` percent)
//!
//! ```text
//! price           = total_with_depreciation / (1 - p/100)
//! price_per_unit  = price / net_units
//! channel_cut     = price × p/100
//! seller_earnings = price - channel_cut
//! ```
//!
//! Zero divisors (no print hours per day, a 100% fee, no net units) produce
//! `inf`/`NaN` cells which are left in the matrix for the caller to handle.
//!
//! Horizons come out in ascending order and channel prices keep the order in
//! which channels were supplied.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::project::Project;
use crate::records::{Channel, Printer};

/// Depreciation horizons in months, in output order.
pub const DEPRECIATION_HORIZONS_MONTHS: [u32; 5] = [3, 6, 9, 12, 24];

/// Sell price of a whole print run through one channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPrice {
    pub channel_name: String,
    /// Gross price for all net units of the run
    pub price: f64,
    pub price_per_unit: f64,
    /// Fee kept by the channel
    pub channel_cut: f64,
    /// What the seller receives after the fee
    pub seller_earnings: f64,
}

impl ChannelPrice {
    pub fn channel_cut_per_unit(&self, net_units: f64) -> f64 {
        self.channel_cut / net_units
    }

    pub fn is_finite(&self) -> bool {
        self.price.is_finite()
            && self.price_per_unit.is_finite()
            && self.channel_cut.is_finite()
            && self.seller_earnings.is_finite()
    }
}

/// Costs and channel prices for one depreciation horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepreciationEntry {
    /// Horizon length, one of [`DEPRECIATION_HORIZONS_MONTHS`]
    pub months: u32,
    /// Printer depreciation charged to the run
    pub depreciation_cost: f64,
    /// Run cost including depreciation and packaging
    pub total_cost: f64,
    pub channel_prices: Vec<ChannelPrice>,
}

impl DepreciationEntry {
    /// Price through the channel named `channel_name`, if present.
    pub fn channel_price(&self, channel_name: &str) -> Option<&ChannelPrice> {
        self.channel_prices
            .iter()
            .find(|cp| cp.channel_name == channel_name)
    }

    pub fn depreciation_per_unit(&self, net_units: f64) -> f64 {
        self.depreciation_cost / net_units
    }

    pub fn is_finite(&self) -> bool {
        self.depreciation_cost.is_finite()
            && self.total_cost.is_finite()
            && self.channel_prices.iter().all(ChannelPrice::is_finite)
    }
}

/// Printer depreciation charged to a run of `total_hours` when the printer
/// is written off over `months`.
pub fn depreciation_cost(printer: &Printer, months: u32, total_hours: f64) -> f64 {
    let monthly_depreciation = printer.cost / f64::from(months);
    let monthly_print_hours = printer.monthly_print_hours();
    (monthly_depreciation / monthly_print_hours) * total_hours
}

/// Price a run through one channel.
pub fn channel_price(channel: &Channel, total_with_depreciation: f64, net_units: f64) -> ChannelPrice {
    let price = total_with_depreciation / channel.seller_fraction();
    let price_per_unit = price / net_units;
    let channel_cut = price * channel.fee_fraction();
    let seller_earnings = price - channel_cut;

    ChannelPrice {
        channel_name: channel.name.clone(),
        price,
        price_per_unit,
        channel_cut,
        seller_earnings,
    }
}

/// Build the horizon × channel price matrix for one (project, printer) pair.
///
/// `total_cost` and `total_hours` come from
/// [`compute_base_costs`](super::cost::compute_base_costs).
pub fn build_price_matrix(
    total_cost: f64,
    total_hours: f64,
    printer: &Printer,
    project: &Project,
    channels: &[Channel],
) -> Vec<DepreciationEntry> {
    let net_units = project.net_units();
    let packaging_total = project.packaging_total();

    debug!(
        project = %project.name,
        printer = %printer.name,
        channels = channels.len(),
        net_units,
        "building price matrix"
    );

    DEPRECIATION_HORIZONS_MONTHS
        .iter()
        .map(|&months| {
            let depreciation_cost = depreciation_cost(printer, months, total_hours);
            let total_with_depreciation = total_cost + depreciation_cost + packaging_total;

            let channel_prices = channels
                .iter()
                .map(|channel| channel_price(channel, total_with_depreciation, net_units))
                .collect();

            DepreciationEntry {
                months,
                depreciation_cost,
                total_cost: total_with_depreciation,
                channel_prices,
            }
        })
        .collect()
}
