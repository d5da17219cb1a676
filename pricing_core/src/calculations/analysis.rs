//! # Project Analysis
//!
//! Runs the pricing engine for every allowed printer of a project and
//! evaluates the user's final price against the results. This is the data
//! behind a cost-analysis screen: summary line, cost table, price matrix,
//! bracket highlighting and margin readout.
//!
//! Everything is recomputed from the workbook on each call.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::breakdown::{calculate_costs, CostBreakdown, UnitCosts};
use super::margin::{margin_percent, nearest_bracket, PriceBracket};
use crate::project::{License, Project};
use crate::records::{Printer, RecordId};
use crate::workbook::Workbook;

/// Bracket of the final price within one channel's row of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelBracket {
    pub channel_name: String,
    pub bracket: PriceBracket,
}

/// Pricing of a project on one printer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrinterQuote {
    pub printer_id: RecordId,
    pub printer_name: String,
    pub breakdown: CostBreakdown,
    pub unit_costs: UnitCosts,
    /// Final price per unit chosen by the user, `0.0` when unset
    pub final_price: f64,
    /// Material and energy per unit
    pub base_price_per_unit: f64,
    /// Margin of the final price over `base_price_per_unit`
    pub summary_margin: f64,
    /// Material, energy and maintenance per unit
    pub base_with_maintenance_per_unit: f64,
    /// Material, energy, maintenance and packaging per unit
    pub full_cost_per_unit: f64,
    /// Margin of the final price over `full_cost_per_unit`
    pub selected_margin: f64,
    /// One bracket per workbook channel, in channel order
    pub brackets: Vec<ChannelBracket>,
}

impl PrinterQuote {
    pub fn has_final_price(&self) -> bool {
        self.final_price > 0.0
    }

    pub fn is_priceable(&self) -> bool {
        self.breakdown.is_priceable()
    }

    pub fn bracket(&self, channel_name: &str) -> Option<&PriceBracket> {
        self.brackets
            .iter()
            .find(|b| b.channel_name == channel_name)
            .map(|b| &b.bracket)
    }
}

/// Pricing of a project across its allowed printers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectAnalysis {
    pub project_id: RecordId,
    pub project_name: String,
    pub license: License,
    pub quotes: Vec<PrinterQuote>,
}

/// Price `project` on `printer` using the workbook's tariff, filaments,
/// channels and final prices.
pub fn quote_printer(workbook: &Workbook, project: &Project, printer: &Printer) -> PrinterQuote {
    let breakdown = calculate_costs(
        project,
        printer,
        &workbook.filaments,
        &workbook.global_config,
        &workbook.channels,
    );
    let unit_costs = breakdown.per_unit(project);
    let net_units = unit_costs.net_units;
    let final_price = workbook.final_price(project.id, printer.id);

    let base_price_per_unit = breakdown.base_cost / net_units;
    let base_with_maintenance_per_unit = (breakdown.base_cost + breakdown.maintenance_cost) / net_units;
    let full_cost_per_unit =
        (breakdown.base_cost + breakdown.maintenance_cost + unit_costs.packaging_total) / net_units;

    let brackets = workbook
        .channels
        .iter()
        .map(|channel| ChannelBracket {
            channel_name: channel.name.clone(),
            bracket: nearest_bracket(&breakdown.prices, &channel.name, final_price),
        })
        .collect();

    PrinterQuote {
        printer_id: printer.id,
        printer_name: printer.name.clone(),
        final_price,
        base_price_per_unit,
        summary_margin: margin_percent(final_price, base_price_per_unit),
        base_with_maintenance_per_unit,
        full_cost_per_unit,
        selected_margin: margin_percent(final_price, full_cost_per_unit),
        brackets,
        unit_costs,
        breakdown,
    }
}

/// Price a project on every printer it allows, in workbook printer order.
pub fn analyze_project(workbook: &Workbook, project: &Project) -> ProjectAnalysis {
    let quotes: Vec<PrinterQuote> = workbook
        .allowed_printers(project)
        .map(|printer| quote_printer(workbook, project, printer))
        .collect();

    debug!(project = %project.name, quotes = quotes.len(), "analyzed project");

    ProjectAnalysis {
        project_id: project.id,
        project_name: project.name.clone(),
        license: project.license,
        quotes,
    }
}

/// Analyze every project in the workbook, in workbook order.
pub fn analyze_workbook(workbook: &Workbook) -> Vec<ProjectAnalysis> {
    workbook
        .projects
        .iter()
        .map(|project| analyze_project(workbook, project))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectFilamentUse;
    use crate::records::{Channel, Filament, GlobalConfig};

    fn workbook() -> Workbook {
        Workbook {
            global_config: GlobalConfig::new(0.15),
            printers: vec![
                Printer { id: 1, name: "MK4".to_string(), power_consumption: 0.2, cost: 500.0, maintenance_cost: 120.0, hours_per_day: 8.0 },
                Printer { id: 2, name: "Idle".to_string(), power_consumption: 0.1, cost: 300.0, maintenance_cost: 50.0, hours_per_day: 0.0 },
            ],
            filaments: vec![Filament { id: 10, name: "PLA".to_string(), price_per_kg: 20.0 }],
            projects: vec![
                Project {
                    id: 100,
                    name: "Clip".to_string(),
                    filaments: vec![ProjectFilamentUse { filament_id: 10, grams: 100.0 }],
                    print_hours: 2.0,
                    units_produced: 10.0,
                    packaging_cost: 0.5,
                    license: License::Commercial,
                    ..Project::default()
                },
                Project {
                    id: 101,
                    name: "Hook".to_string(),
                    filaments: vec![ProjectFilamentUse { filament_id: 10, grams: 50.0 }],
                    print_hours: 1.0,
                    units_produced: 4.0,
                    allowed_printers: vec![1],
                    ..Project::default()
                },
            ],
            channels: vec![
                Channel { id: 7, name: "Direct".to_string(), profit_percentage: 20.0 },
                Channel { id: 8, name: "Shop".to_string(), profit_percentage: 0.0 },
            ],
            ..Workbook::default()
        }
    }

    #[test]
    fn test_quotes_follow_allowed_printers() {
        let workbook = workbook();
        let analyses = analyze_workbook(&workbook);

        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].quotes.len(), 2);
        assert_eq!(analyses[0].license, License::Commercial);
        let hook: Vec<RecordId> = analyses[1].quotes.iter().map(|q| q.printer_id).collect();
        assert_eq!(hook, vec![1]);
    }

    #[test]
    fn test_unset_final_price() {
        let workbook = workbook();
        let analysis = analyze_project(&workbook, &workbook.projects[0]);
        let quote = &analysis.quotes[0];

        assert!(!quote.has_final_price());
        assert_eq!(quote.summary_margin, 0.0);
        assert_eq!(quote.selected_margin, 0.0);
        assert!(quote.brackets.iter().all(|b| b.bracket.is_empty()));
        assert!((quote.base_price_per_unit - 0.206).abs() < 1e-9);
    }

    #[test]
    fn test_final_price_margins_and_brackets() {
        let mut workbook = workbook();
        workbook.set_final_price(100, 1, 1.0);
        let analysis = analyze_project(&workbook, &workbook.projects[0]);
        let quote = &analysis.quotes[0];

        assert!(quote.has_final_price());
        // (1.0 - 0.206) / 1.0
        assert!((quote.summary_margin - 79.4).abs() < 1e-6);

        // (2.06 + 0.0822 + 5.0) / 10 = 0.71422
        assert!((quote.full_cost_per_unit - 0.714219).abs() < 1e-5);
        assert!((quote.selected_margin - 28.578).abs() < 1e-2);
        assert!((quote.base_with_maintenance_per_unit - 0.214219).abs() < 1e-5);

        // Direct per unit: 3m 1.066, 6m 0.980, 9m 0.951, 12m 0.936, 24m 0.914
        let direct = quote.bracket("Direct").unwrap();
        assert_eq!(direct.lower.map(|p| p.months), Some(6));
        assert_eq!(direct.higher.map(|p| p.months), Some(3));
        // Every Shop price is below 1.0
        let shop = quote.bracket("Shop").unwrap();
        assert_eq!(shop.lower.map(|p| p.months), Some(3));
        assert!(shop.higher.is_none());
    }

    #[test]
    fn test_unpriceable_printer_is_flagged() {
        let workbook = workbook();
        let analysis = analyze_project(&workbook, &workbook.projects[0]);

        assert!(analysis.quotes[0].is_priceable());
        assert!(!analysis.quotes[1].is_priceable());
    }
}
