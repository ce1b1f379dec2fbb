//! Command line definition

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use shared::models::BookingStatus;
use shared::query::{SortDirection, SortField};

#[derive(Debug, Parser)]
#[command(name = "alo", version, about = "Restaurant dashboard console")]
pub struct Cli {
    /// Restaurant service base URL
    #[arg(long, env = "ALO_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Bearer token
    #[arg(long, env = "ALO_API_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Branch for this call only (defaults to the remembered one)
    #[arg(long, global = true)]
    pub branch: Option<i64>,

    #[arg(long, env = "ALO_LOG_LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Write logs to a daily file in this directory
    #[arg(long, env = "ALO_LOG_DIR", global = true)]
    pub log_dir: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List store branches
    Branches,
    /// Select a branch and remember it
    UseBranch { id: i64 },
    /// List bookings once
    Bookings(BookingFilters),
    /// Keep polling bookings until Ctrl-C
    Watch(BookingFilters),
    /// Show one booking
    Booking { id: String },
    /// Change the status of a booking
    SetStatus { id: String, status: BookingStatus },
    /// Search customers by name, email or phone
    Customers { text: String },
    /// Manage the floors of the active branch
    #[command(subcommand)]
    Floors(FloorCommand),
}

#[derive(Debug, Args)]
pub struct BookingFilters {
    /// Booking day (YYYY-MM-DD), today by default
    #[arg(long, conflicts_with = "any_date")]
    pub date: Option<NaiveDate>,

    /// Do not filter by day
    #[arg(long)]
    pub any_date: bool,

    /// Status to include; repeat for several
    #[arg(long = "status")]
    pub statuses: Vec<BookingStatus>,

    /// Customer id
    #[arg(long)]
    pub customer: Option<String>,

    #[arg(long, default_value = "modifiedDate")]
    pub sort: SortField,

    #[arg(long, default_value = "asc")]
    pub direction: SortDirection,

    /// Rows to fetch (load-more step)
    #[arg(long)]
    pub rows: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum FloorCommand {
    List,
    Create {
        name: String,
        #[arg(long)]
        number: i32,
        #[arg(long)]
        capacity: i32,
    },
    /// Change the given fields of a floor
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        number: Option<i32>,
        #[arg(long)]
        capacity: Option<i32>,
    },
    Delete { id: i64 },
}
