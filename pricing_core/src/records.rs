//! # Input Records
//!
//! The independent inputs of the pricing engine: the energy tariff, printer
//! profiles, the filament cost table and distribution channels. Records are
//! plain values; the engine only ever borrows them.
//!
//! Field names serialize in camelCase so workbooks exported by earlier tools
//! (`powerConsumption`, `pricePerKg`, `profitPercentage`, ...) load as-is.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": 1700000000001,
//!   "name": "Prusa MK4",
//!   "powerConsumption": 0.2,
//!   "cost": 500,
//!   "maintenanceCost": 120,
//!   "hoursPerDay": 8
//! }
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::sanitize::lenient_f64;

/// Identifier shared by all records (millisecond timestamps in exported data)
pub type RecordId = u64;

/// Days in the month used to spread depreciation
pub const DAYS_PER_MONTH: f64 = 30.0;

/// Days in the year used to spread maintenance
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Process-wide pricing settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalConfig {
    /// Electricity tariff in currency per kWh
    #[serde(default, deserialize_with = "lenient_f64")]
    pub energy_cost: f64,
}

impl GlobalConfig {
    pub fn new(energy_cost: f64) -> Self {
        GlobalConfig { energy_cost }
    }
}

/// Equipment profile of a 3D printer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Printer {
    #[serde(default)]
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    /// Average power draw while printing (kW)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub power_consumption: f64,

    /// Purchase price, amortized over the depreciation horizons
    #[serde(default, deserialize_with = "lenient_f64")]
    pub cost: f64,

    /// Maintenance budget per year
    #[serde(default, deserialize_with = "lenient_f64")]
    pub maintenance_cost: f64,

    /// Hours the printer runs per day (0-24)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub hours_per_day: f64,
}

impl Printer {
    /// Printing hours available in one 30-day month.
    pub fn monthly_print_hours(&self) -> f64 {
        self.hours_per_day * DAYS_PER_MONTH
    }

    /// Printing hours available in one 365-day year.
    pub fn yearly_print_hours(&self) -> f64 {
        self.hours_per_day * DAYS_PER_YEAR
    }
}

/// A filament in the material cost table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filament {
    #[serde(default)]
    pub id: RecordId,

    #[serde(default)]
    pub name: String,

    /// Spool price in currency per kilogram
    #[serde(default, deserialize_with = "lenient_f64")]
    pub price_per_kg: f64,
}

/// A distribution outlet that keeps a percentage of every sale.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    #[serde(default)]
    pub id: RecordId,

    /// Channel names are the identity key inside price matrices
    #[serde(default)]
    pub name: String,

    /// Platform fee as a percentage of the sale price (0-100)
    #[serde(default, deserialize_with = "lenient_f64")]
    pub profit_percentage: f64,
}

impl Channel {
    /// Share of the gross price the channel keeps.
    pub fn fee_fraction(&self) -> f64 {
        self.profit_percentage / 100.0
    }

    /// Share of the gross price the seller keeps: `1 - fee_fraction`.
    pub fn seller_fraction(&self) -> f64 {
        1.0 - self.fee_fraction()
    }
}

/// Lookup from filament id to filament record.
///
/// The cost aggregator only needs to resolve ids; whether the table is a
/// slice or an indexed map is up to the caller.
pub trait FilamentCatalog {
    fn filament(&self, id: RecordId) -> Option<&Filament>;
}

impl FilamentCatalog for [Filament] {
    fn filament(&self, id: RecordId) -> Option<&Filament> {
        self.iter().find(|f| f.id == id)
    }
}

impl FilamentCatalog for Vec<Filament> {
    fn filament(&self, id: RecordId) -> Option<&Filament> {
        self.as_slice().filament(id)
    }
}

impl FilamentCatalog for HashMap<RecordId, Filament> {
    fn filament(&self, id: RecordId) -> Option<&Filament> {
        self.get(&id)
    }
}

/// Find a channel by name. The first match wins; duplicates are not detected.
pub fn find_channel<'a>(channels: &'a [Channel], name: &str) -> Option<&'a Channel> {
    channels.iter().find(|c| c.name == name)
}
