//! Plain-text rendering of project analyses.

use std::fmt;

use pricing_core::calculations::{PrinterQuote, ProjectAnalysis};

/// Money with two decimals, or `n/a` for figures the engine could not price.
pub fn money(value: f64) -> String {
    if value.is_finite() {
        format!("${:.2}", value)
    } else {
        "n/a".to_string()
    }
}

pub fn percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.1}%", value)
    } else {
        "n/a".to_string()
    }
}

/// Text rendering of one project: a cost table and a horizon × channel
/// matrix per allowed printer.
pub struct AnalysisReport<'a>(pub &'a ProjectAnalysis);

impl fmt::Display for AnalysisReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;
        writeln!(f, "═══════════════════════════════════════")?;
        writeln!(f, "  {} (license: {})", analysis.project_name, analysis.license.display_name())?;
        writeln!(f, "═══════════════════════════════════════")?;

        if analysis.quotes.is_empty() {
            writeln!(f, "  No printers allowed for this project.")?;
        }
        analysis.quotes.iter().try_for_each(|quote| write_quote(f, quote))
    }
}

/// One-line summary: final price with margin, or base price per unit.
pub fn summary_line(quote: &PrinterQuote) -> String {
    if quote.has_final_price() {
        format!(
            "{}: {}/unit ({} margin)",
            quote.printer_name,
            money(quote.final_price),
            percent(quote.summary_margin)
        )
    } else {
        format!("{}: {}/unit (base)", quote.printer_name, money(quote.base_price_per_unit))
    }
}

fn write_quote(f: &mut fmt::Formatter<'_>, quote: &PrinterQuote) -> fmt::Result {
    let b = &quote.breakdown;
    let u = &quote.unit_costs;

    writeln!(f)?;
    writeln!(f, "Printer: {}", summary_line(quote))?;
    if !quote.is_priceable() {
        writeln!(f, "  [WARN] insufficient data to price this combination")?;
    }

    writeln!(f, "  {:<18}{:>12}{:>12}", "Cost", "Per print", "Per unit")?;
    let rows = [
        ("Energy", b.energy_cost, u.energy_per_unit),
        ("Filament", b.filament_cost, u.filament_per_unit),
        ("Maintenance", b.maintenance_cost, u.maintenance_per_unit),
        ("Base", b.base_cost, u.base_per_unit),
        ("Packaging", u.packaging_total, u.packaging_per_unit),
    ];
    for (label, per_print, per_unit) in rows {
        writeln!(f, "  {:<18}{:>12}{:>12}", label, money(per_print), money(per_unit))?;
    }

    writeln!(f)?;
    write!(f, "  {:<18}", "Per unit")?;
    for entry in &b.prices {
        write!(f, "{:>10}", format!("{}m", entry.months))?;
    }
    writeln!(f)?;

    write!(f, "  {:<18}", "Depreciation")?;
    for entry in &b.prices {
        write!(f, "{:>9} ", money(entry.depreciation_per_unit(u.net_units)))?;
    }
    writeln!(f)?;

    for cb in &quote.brackets {
        write!(f, "  {:<18}", cb.channel_name)?;
        for entry in &b.prices {
            let cell = entry
                .channel_price(&cb.channel_name)
                .map(|cp| money(cp.price_per_unit))
                .unwrap_or_else(|| "-".to_string());
            let marker = if cb.bracket.lower.map(|p| p.months) == Some(entry.months) {
                "<"
            } else if cb.bracket.higher.map(|p| p.months) == Some(entry.months) {
                ">"
            } else {
                " "
            };
            write!(f, "{:>9}{}", cell, marker)?;
        }
        writeln!(f)?;

        write!(f, "  {:<18}", "  fee")?;
        for entry in &b.prices {
            let fee = entry
                .channel_price(&cb.channel_name)
                .map(|cp| money(cp.channel_cut_per_unit(u.net_units)))
                .unwrap_or_else(|| "-".to_string());
            write!(f, "{:>9} ", fee)?;
        }
        writeln!(f)?;
    }

    if quote.has_final_price() {
        writeln!(f)?;
        writeln!(
            f,
            "  Final price {} -> margin {} (base: {}/unit)",
            money(quote.final_price),
            percent(quote.selected_margin),
            money(quote.base_with_maintenance_per_unit)
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(9.3618), "$9.36");
        assert_eq!(money(f64::INFINITY), "n/a");
        assert_eq!(money(f64::NAN), "n/a");
    }

    #[test]
    fn test_percent_formatting() {
        assert_eq!(percent(33.3333), "33.3%");
        assert_eq!(percent(f64::NEG_INFINITY), "n/a");
    }
}
