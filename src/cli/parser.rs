use crate::export::ExportFormat;
use crate::utils::date::Period;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for pdvcontrol
#[derive(Parser, Debug)]
#[command(
    name = "pdvcontrol",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check-in tracker for field promoters visiting points of sale",
    long_about = None
)]
pub struct Cli {
    /// Override the record file path
    #[arg(global = true, long = "db", value_name = "FILE")]
    pub db: Option<String>,

    /// Use this configuration file instead of the default one
    #[arg(global = true, long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the configuration file and an empty record file
    Init,

    /// View or edit the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", requires = "edit_config", help = "Editor to use")]
        editor: Option<String>,
    },

    /// Register a check-in
    Add {
        #[arg(long)]
        promotor: String,

        #[arg(long)]
        pdv: String,

        /// Travel cost; defaults to `default_valor_deslocamento` from the configuration
        #[arg(long)]
        valor: Option<f64>,

        #[arg(long, default_value_t = 1)]
        entradas: u32,

        #[arg(long, default_value = "")]
        obs: String,

        /// Visit date (YYYY-MM-DD or DD/MM/YYYY); defaults to today
        #[arg(long)]
        date: Option<String>,

        /// Visit time (HH:MM[:SS]); defaults to now
        #[arg(long)]
        time: Option<String>,

        /// Photo file to attach (repeatable)
        #[arg(long = "photo", value_name = "FILE")]
        photos: Vec<PathBuf>,

        /// Do not push the check-in to the mirror even when configured
        #[arg(long = "no-mirror")]
        no_mirror: bool,
    },

    /// List check-ins, newest first
    List {
        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        promotor: Option<String>,

        #[arg(long)]
        pdv: Option<String>,

        #[arg(long, value_enum, conflicts_with_all = ["date", "range"])]
        period: Option<Period>,

        /// YYYY, YYYY-MM, YYYY-MM-DD or start:end
        #[arg(long, conflicts_with = "date")]
        range: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one check-in
    Show { id: String },

    /// Change fields of a check-in
    Edit {
        id: String,

        #[arg(long)]
        date: Option<String>,

        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        promotor: Option<String>,

        #[arg(long)]
        pdv: Option<String>,

        #[arg(long)]
        valor: Option<f64>,

        #[arg(long)]
        entradas: Option<u32>,

        #[arg(long)]
        obs: Option<String>,
    },

    /// Delete a check-in
    Del {
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Delete every check-in
    Clear {
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Write a timestamped snapshot to the backup directory
    Backup {
        /// Store the snapshot as a zip archive
        #[arg(long)]
        compress: bool,
    },

    /// Export check-ins
    Export {
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        /// Output file (absolute path)
        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter by year/month/day or a custom range (YYYY, YYYY-MM, YYYY-MM-DD, start:end)"
        )]
        range: Option<String>,

        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Totals and averages, global or for one promoter
    Stats {
        #[arg(long)]
        promotor: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Manage the promoter roster
    Promotor {
        #[command(subcommand)]
        action: RosterAction,
    },

    /// Manage the PDV roster
    Pdv {
        #[command(subcommand)]
        action: RosterAction,
    },

    /// Find (and optionally delete) duplicate rows in the mirror sheet
    Dups {
        /// Delete these sheet rows
        #[arg(
            long = "delete",
            value_name = "ROW",
            num_args = 1..,
            conflicts_with = "purge"
        )]
        delete: Vec<usize>,

        /// Delete every duplicate found
        #[arg(long)]
        purge: bool,

        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum RosterAction {
    Add { name: String },
    Remove { name: String },
    List,
}
