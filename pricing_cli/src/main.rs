//! # Filacost CLI Application
//!
//! Terminal front end for the pricing engine. Reads a workbook (the JSON
//! export of printers, filaments, projects, channels and final prices),
//! prints cost breakdowns and price matrices, and records final prices.
//!
//! ```text
//! filacost --data shop.json analyze
//! filacost --data shop.json analyze --project 1 --channel Etsy
//! filacost --data shop.json set-price --project 1 --printer 2 --price 2.49
//! filacost margin --price 2.49 --cost 1.10
//! filacost demo
//! ```

mod cli;
mod logging;
mod report;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use pricing_core::calculations::{analyze_project, analyze_workbook, margin_percent, ProjectAnalysis};
use pricing_core::file_io::{load_workbook, save_workbook};
use pricing_core::sanitize::parse_amount;
use pricing_core::{Channel, Filament, GlobalConfig, Printer, Project, ProjectFilamentUse, Workbook};

use crate::cli::{Cli, Commands};
use crate::report::AnalysisReport;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Analyze { project, channel, json } => {
            let mut workbook = load_workbook(&cli.data)
                .with_context(|| format!("loading workbook {}", cli.data.display()))?;
            if let Some(name) = channel {
                let selected = workbook.channel(&name)?.clone();
                workbook.channels = vec![selected];
            }
            let analyses = match project {
                Some(id) => vec![analyze_project(&workbook, workbook.project(id)?)],
                None => analyze_workbook(&workbook),
            };
            print_analyses(&analyses, json)?;
        }
        Commands::Margin { price, cost } => {
            let price = parse_amount(&price);
            let cost = parse_amount(&cost);
            let margin = margin_percent(price, cost);
            if price == 0.0 || cost == 0.0 {
                println!("Margin: {} (price or cost not set)", report::percent(margin));
            } else {
                println!("Margin: {}", report::percent(margin));
            }
        }
        Commands::SetPrice { project, printer, price } => {
            let mut workbook = load_workbook(&cli.data)
                .with_context(|| format!("loading workbook {}", cli.data.display()))?;
            workbook.project(project)?;
            workbook.printer(printer)?;

            let price = parse_amount(&price);
            workbook.set_final_price(project, printer, price);
            save_workbook(&workbook, &cli.data)
                .with_context(|| format!("saving workbook {}", cli.data.display()))?;

            info!(project, printer, price, "stored final price");
            println!("Final price for project {} on printer {}: {}", project, printer, report::money(workbook.final_price(project, printer)));
        }
        Commands::Validate => {
            let workbook = load_workbook(&cli.data)
                .with_context(|| format!("loading workbook {}", cli.data.display()))?;
            let problems = workbook.validate();
            if problems.is_empty() {
                println!("[OK] {} is ready for pricing", cli.data.display());
                return Ok(());
            }
            for problem in &problems {
                warn!(code = problem.error_code(), "{}", problem);
                println!("[{}] {}", problem.error_code(), problem);
            }
            bail!("{} problem(s) found in {}", problems.len(), cli.data.display());
        }
        Commands::Demo { json } => {
            let workbook = demo_workbook();
            print_analyses(&analyze_workbook(&workbook), json)?;
        }
    }

    Ok(())
}

fn print_analyses(analyses: &[ProjectAnalysis], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(analyses)?);
    } else {
        for analysis in analyses {
            println!("{}", AnalysisReport(analysis));
        }
    }
    Ok(())
}

/// A one-printer workshop selling a small desk item through two channels.
fn demo_workbook() -> Workbook {
    let mut workbook = Workbook {
        global_config: GlobalConfig::new(0.15),
        printers: vec![Printer {
            id: 1,
            name: "Workshop printer".to_string(),
            power_consumption: 0.2,
            cost: 500.0,
            maintenance_cost: 120.0,
            hours_per_day: 8.0,
        }],
        filaments: vec![Filament {
            id: 10,
            name: "PLA".to_string(),
            price_per_kg: 20.0,
        }],
        projects: vec![Project {
            id: 100,
            name: "Desk organizer".to_string(),
            filaments: vec![ProjectFilamentUse {
                filament_id: 10,
                grams: 100.0,
            }],
            print_hours: 2.0,
            units_produced: 10.0,
            packaging_cost: 0.5,
            ..Project::default()
        }],
        channels: vec![
            Channel {
                id: 1000,
                name: "Direct".to_string(),
                profit_percentage: 20.0,
            },
            Channel {
                id: 1001,
                name: "Marketplace".to_string(),
                profit_percentage: 35.0,
            },
        ],
        ..Workbook::default()
    };
    workbook.set_final_price(100, 1, 1.20);
    workbook
}
