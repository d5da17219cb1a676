use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "filacost", version, about = "3D print cost and pricing calculator")]
pub struct Cli {
    /// Workbook file with printers, filaments, projects and channels
    #[arg(short, long, env = "FILACOST_DATA", default_value = "filacost.json", global = true)]
    pub data: PathBuf,

    /// Log engine details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Show cost breakdowns and price matrices
    Analyze {
        /// Only analyze this project id
        #[arg(short, long)]
        project: Option<u64>,

        /// Only price through the sales channel with this name
        #[arg(short, long)]
        channel: Option<String>,

        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Compute the margin of a selling price over a cost
    Margin {
        /// Selling price per unit
        #[arg(short, long)]
        price: String,

        /// Cost per unit
        #[arg(short, long)]
        cost: String,
    },

    /// Store the final price per unit for a project on a printer
    SetPrice {
        #[arg(long)]
        project: u64,

        #[arg(long)]
        printer: u64,

        /// Final price per unit (blank or invalid clears it)
        #[arg(long)]
        price: String,
    },

    /// Check the workbook for values that make prices meaningless
    Validate,

    /// Price a built-in sample workshop without reading a workbook
    Demo {
        /// Print JSON instead of tables
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from(["filacost", "--data", "shop.json", "analyze", "--project", "42"]).unwrap();
        assert_eq!(cli.data, PathBuf::from("shop.json"));
        assert_eq!(
            cli.command,
            Commands::Analyze {
                project: Some(42),
                channel: None,
                json: false
            }
        );
    }

    #[test]
    fn test_parse_analyze_channel() {
        let cli = Cli::try_parse_from(["filacost", "analyze", "--channel", "Marketplace", "--json"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Analyze {
                project: None,
                channel: Some("Marketplace".to_string()),
                json: true
            }
        );
    }

    #[test]
    fn test_parse_margin_keeps_raw_amounts() {
        let cli = Cli::try_parse_from(["filacost", "margin", "--price", "150", "--cost", "abc"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Margin {
                price: "150".to_string(),
                cost: "abc".to_string()
            }
        );
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["filacost", "demo", "--json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.command, Commands::Demo { json: true });
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["filacost"]).is_err());
    }
}
