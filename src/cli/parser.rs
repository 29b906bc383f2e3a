use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for carelog
/// Home-care visit records, weekly schedules and monthly reports on SQLite
#[derive(Parser)]
#[command(
    name = "carelog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Home-care visit log: weekly schedules, daily worklists and monthly service records using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Database maintenance
    Db {
        #[arg(long, help = "Apply pending schema migrations")]
        migrate: bool,

        #[arg(long, help = "Run SQLite integrity check")]
        check: bool,

        #[arg(long, help = "Compact the database file")]
        vacuum: bool,

        #[arg(long, help = "Show database statistics")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Manage the service type catalog
    Service {
        #[command(subcommand)]
        action: ServiceCmd,
    },

    /// Manage helpers (caregivers)
    Helper {
        #[command(subcommand)]
        action: HelperCmd,
    },

    /// Manage clients
    Client {
        #[command(subcommand)]
        action: ClientCmd,
    },

    /// Manage the weekly default schedule of clients
    Slot {
        #[command(subcommand)]
        action: SlotCmd,
    },

    /// Log, edit and list visit records
    Record {
        #[command(subcommand)]
        action: RecordCmd,
    },

    /// Worklist of a day: planned slots reconciled with logged visits
    Daily {
        /// Day to show (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Only this client
        #[arg(long)]
        client: Option<i64>,
    },

    /// Monthly planned vs. actual service record
    Performance {
        /// Month (YYYY-MM, default current month)
        #[arg(long)]
        month: Option<String>,

        /// Only this client
        #[arg(long)]
        client: Option<i64>,

        /// Also write the sheet as a PDF (absolute path)
        #[arg(long, value_name = "FILE")]
        pdf: Option<String>,

        /// Overwrite the PDF without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Export visit records in various formats
    Export {
        /// Export format
        #[arg(long, value_enum, value_name = "FORMAT", default_value = "csv")]
        format: ExportFormat,

        /// Output file path (absolute path required)
        #[arg(long, value_name = "FILE")]
        file: String,

        /// Date range to export.
        ///
        /// Supported formats:
        /// - YYYY, YYYY-MM, YYYY-MM-DD
        /// - start:end in one of those formats (e.g. "2025-06:2025-08")
        /// - all (same as omitting the option)
        #[arg(
            long,
            value_name = "RANGE",
            help = "Filter export by year/month/day or a custom range"
        )]
        range: Option<String>,

        /// Only this client
        #[arg(long)]
        client: Option<i64>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Create a backup copy of the database
    Backup {
        /// Destination file path
        #[arg(long, value_name = "FILE", required_unless_present = "auto")]
        file: Option<String>,

        /// Compress the backup (zip)
        #[arg(long, conflicts_with = "auto")]
        compress: bool,

        /// Copy into the configured backup_dir now
        #[arg(long)]
        auto: bool,

        /// Overwrite the destination without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Office settings and care task labels stored in the database
    Settings {
        #[arg(long, help = "List all settings")]
        list: bool,

        #[arg(long, value_name = "KEY=VALUE", help = "Set a value (e.g. office_name=\"Sunrise Care\")")]
        set: Option<String>,

        #[arg(long, value_name = "KEY", help = "Remove a value")]
        unset: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ServiceCmd {
    /// Add a service type
    Add {
        name: String,
        /// Default visit length in minutes
        #[arg(long)]
        minutes: u32,
    },
    /// List active service types
    List,
    /// Rename or change the default length
    Edit {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        minutes: Option<u32>,
    },
    /// Delete (or deactivate, when in use)
    Del {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum HelperCmd {
    /// Add a helper
    Add {
        last: String,
        #[arg(default_value = "")]
        first: String,
        /// Occasional helper, hidden from the regular list
        #[arg(long)]
        guest: bool,
    },
    /// List helpers
    List {
        /// Include guest helpers
        #[arg(long)]
        all: bool,
    },
    /// Rename a helper
    Edit {
        id: i64,
        #[arg(long)]
        last: Option<String>,
        #[arg(long)]
        first: Option<String>,
    },
    /// Delete a helper without visit records
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ClientCmd {
    /// Add a client
    Add {
        last: String,
        #[arg(default_value = "")]
        first: String,
        #[arg(long, default_value = "")]
        gender: String,
        /// Default service type id
        #[arg(long)]
        service: Option<i64>,
        /// How visits are confirmed: stamp or signature
        #[arg(long = "signature-mode", default_value = "stamp")]
        signature_mode: String,
    },
    /// List active clients
    List,
    /// Change client details
    Edit {
        id: i64,
        #[arg(long)]
        last: Option<String>,
        #[arg(long)]
        first: Option<String>,
        #[arg(long)]
        gender: Option<String>,
        #[arg(long, conflicts_with = "no_service")]
        service: Option<i64>,
        /// Clear the default service type
        #[arg(long = "no-service")]
        no_service: bool,
        #[arg(long = "signature-mode")]
        signature_mode: Option<String>,
    },
    /// Delete a client without visit records
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum SlotCmd {
    /// Add a weekly slot
    Add {
        #[arg(long)]
        client: i64,
        #[arg(long)]
        service: i64,
        /// Weekday: sun..sat, full name, or 0-6 (0 = Sunday)
        #[arg(long)]
        day: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM, default start + service minutes)
        #[arg(long)]
        end: Option<String>,
    },
    /// Weekly schedule of a client
    List {
        #[arg(long)]
        client: i64,
    },
    /// Remove a weekly slot
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum RecordCmd {
    /// Log a visit
    Add {
        #[arg(long)]
        client: i64,
        #[arg(long)]
        helper: i64,
        /// Service type id (default: the client's default service)
        #[arg(long)]
        service: Option<i64>,
        /// Visit date (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM, default start + service minutes)
        #[arg(long)]
        end: Option<String>,
        /// Care tasks, comma separated codes (e.g. meal,toilet)
        #[arg(long)]
        tasks: Option<String>,
        #[arg(long)]
        note: Option<String>,
        /// Confirmed with the client's stamp
        #[arg(long, conflicts_with = "signature")]
        stamp: bool,
        /// Confirmed with a signature image file
        #[arg(long, value_name = "IMAGE")]
        signature: Option<String>,
    },
    /// Change fields of a visit
    Edit {
        id: i64,
        #[arg(long)]
        client: Option<i64>,
        #[arg(long)]
        helper: Option<i64>,
        #[arg(long)]
        service: Option<i64>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        tasks: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long, conflicts_with_all = ["signature", "unconfirm"])]
        stamp: bool,
        #[arg(long, value_name = "IMAGE", conflicts_with = "unconfirm")]
        signature: Option<String>,
        /// Remove the confirmation
        #[arg(long)]
        unconfirm: bool,
    },
    /// Delete a visit
    Del {
        id: i64,
        #[arg(long, short = 'y')]
        yes: bool,
    },
    /// List visits, newest first
    List {
        #[arg(long)]
        client: Option<i64>,
        #[arg(long)]
        helper: Option<i64>,
        /// Date or range (same grammar as export --range)
        #[arg(long)]
        range: Option<String>,
    },
}
