//! CLI command implementations.

pub mod catalog;
pub mod config;
pub mod customer;
pub mod data;
pub mod gate;

use clap::{Args, Subcommand};

/// Arguments for the catalog command.
#[derive(Args)]
pub struct CatalogArgs {
    /// Gate type to list (e.g. doors, wing-gates, "Schubtore").
    #[arg(short = 't', long = "type")]
    pub gate_type: Option<String>,

    /// Include the general accessories shared by all gate types.
    #[arg(long)]
    pub general: bool,
}

/// Arguments for the customer command.
#[derive(Args)]
pub struct CustomerArgs {
    #[command(subcommand)]
    pub command: CustomerCommand,
}

/// Contact fields accepted by `customer add` and `customer update`.
#[derive(Args, Default)]
pub struct ContactArgs {
    /// Company name.
    #[arg(long)]
    pub company: Option<String>,

    /// Street and house number.
    #[arg(long)]
    pub address: Option<String>,

    /// Postal code and city.
    #[arg(long)]
    pub city: Option<String>,

    /// Phone number.
    #[arg(long)]
    pub phone: Option<String>,

    /// Email address.
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Subcommand)]
pub enum CustomerCommand {
    /// Add a customer.
    Add {
        /// Customer name.
        name: String,
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// List customers.
    List,
    /// Show a customer with their gates.
    Show {
        /// Customer ID.
        id: String,
    },
    /// Update contact fields of a customer.
    Update {
        /// Customer ID.
        id: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        contact: ContactArgs,
    },
    /// Delete a customer and all their gates.
    Delete {
        /// Customer ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the gate command.
#[derive(Args)]
pub struct GateArgs {
    #[command(subcommand)]
    pub command: GateCommand,
}

/// Gate configuration given on the command line.
#[derive(Args, Default)]
pub struct GateSpecArgs {
    /// Gate type (doors, wing-gates, push-gates, sliding-doors or German label).
    #[arg(short = 't', long = "type")]
    pub gate_type: Option<String>,

    /// Width in cm.
    #[arg(long)]
    pub width: Option<f64>,

    /// Height in cm.
    #[arg(long)]
    pub height: Option<f64>,

    /// Height of the glazed band in cm.
    #[arg(long)]
    pub glass_height: Option<f64>,

    /// Surcharge in percent.
    #[arg(long)]
    pub surcharge: Option<f64>,

    /// Product as ID[:QUANTITY[:single|double]]. Repeatable.
    #[arg(short, long = "product")]
    pub products: Vec<String>,

    /// Pick the main product tier from the gate area.
    #[arg(long)]
    pub auto_tier: bool,
}

#[derive(Subcommand)]
pub enum GateCommand {
    /// Price a gate without saving it.
    Quote {
        #[command(flatten)]
        spec: GateSpecArgs,
        /// Discount in percent on the final total.
        #[arg(long)]
        discount: Option<f64>,
    },
    /// Save a new gate, or change a saved one with --gate.
    Save {
        /// Customer ID.
        #[arg(long)]
        customer: String,
        /// ID of a saved gate to change.
        #[arg(short, long)]
        gate: Option<String>,
        /// Gate label.
        #[arg(long)]
        name: Option<String>,
        /// Free-text notes.
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        spec: GateSpecArgs,
    },
    /// List the gates of a customer.
    List {
        /// Customer ID.
        #[arg(long)]
        customer: String,
    },
    /// Show a saved gate with its price breakdown.
    Show {
        /// Customer ID.
        #[arg(long)]
        customer: String,
        /// Gate ID.
        id: String,
    },
    /// Delete a saved gate.
    Delete {
        /// Customer ID.
        #[arg(long)]
        customer: String,
        /// Gate ID.
        id: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the data command.
#[derive(Args)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommand,
}

#[derive(Subcommand)]
pub enum DataCommand {
    /// Write a JSON backup of all customers.
    Export {
        /// Output file (default: gatequote-backup-YYYY-MM-DD.json).
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Replace all customers with a JSON backup.
    Import {
        /// Backup file.
        file: String,
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Delete all stored data.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Show storage location and size.
    Info,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Create a gatequote.toml in the current directory.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration and the configured catalog.
    Validate,
}
