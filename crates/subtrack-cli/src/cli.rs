use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

const MAX_DAYS: i64 = 3650;
const MAX_MONTHS: i64 = 120;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDate(pub String);

impl IsoDate {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

pub fn parse_iso_date(value: &str) -> Result<IsoDate, String> {
    let bytes = value.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && [0usize, 1, 2, 3, 5, 6, 8, 9]
            .iter()
            .all(|index| bytes[*index].is_ascii_digit());
    if !shaped {
        return Err("date must use YYYY-MM-DD format".to_string());
    }

    if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        return Err("date must use valid calendar values".to_string());
    }

    Ok(IsoDate(value.to_string()))
}

pub fn parse_days(value: &str) -> Result<i64, String> {
    parse_bounded(value, MAX_DAYS, "days")
}

pub fn parse_months(value: &str) -> Result<i64, String> {
    parse_bounded(value, MAX_MONTHS, "months")
}

fn parse_bounded(value: &str, max: i64, unit: &str) -> Result<i64, String> {
    let parsed = value
        .trim()
        .parse::<i64>()
        .map_err(|_| format!("{unit} must be a whole number"))?;
    if !(0..=max).contains(&parsed) {
        return Err(format!("{unit} must be between 0 and {max}"));
    }
    Ok(parsed)
}

/// Extended help shown after `subtrack validate --help`.
pub const VALIDATE_AFTER_HELP: &str = "\
Where subscriptions come from:
  1. `--file <path>` (or the PATH argument of `validate`); `-` reads stdin
  2. the SUBTRACK_FILE environment variable
  3. $SUBTRACK_HOME/subscriptions.json (SUBTRACK_HOME defaults to ~/.subtrack)

  Accepted formats:
    JSON - one top-level array of subscription objects
    CSV  - one header row with field names

  JSON example:
  [
    {
      \"name\": \"Netflix\",
      \"cost\": 15.99,
      \"billing_cycle\": \"monthly\",
      \"next_renewal\": \"2024-02-01\",
      \"category\": \"Entertainment\"
    }
  ]

  CSV example:
  name,cost,billing_cycle,next_renewal,category,status
  Netflix,15.99,monthly,2024-02-01,Entertainment,active
  Gym,120,quarterly,2024-03-01,Health,active

Field rules:
  name (required):           display name, non-empty
  cost (required):           non-negative number, charged once per cycle
  billing_cycle (required):  weekly, monthly, quarterly or yearly
                             (exact lowercase; other values, including `Yearly`,
                             are counted as monthly with a warning)
  next_renewal (required):   next charge date, YYYY-MM-DD
                             (`next_renewal_date` is accepted as an alias)
  category (optional):       grouping label; blank means `Other`
  status (optional):         active, cancelled or paused (default active);
                             only active subscriptions are counted
  currency (optional):       ISO code, default USD; amounts are not converted
  vendor, id (optional):     kept for reference

What to do next:
  1. Run `subtrack validate <path>` and fix any reported rows.
  2. Run `subtrack dash --file <path>` for an overview.
";

#[derive(Debug, Parser)]
#[command(
    name = "subtrack",
    version,
    about = "recurring subscription spending calculator",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceArgs {
    /// Subscriptions file (JSON array or CSV); `-` reads stdin
    #[arg(long, value_name = "PATH")]
    pub file: Option<String>,
    /// Date to treat as today (YYYY-MM-DD)
    #[arg(long, value_parser = parse_iso_date)]
    pub as_of: Option<IsoDate>,
    /// Output JSON instead of text
    #[arg(long)]
    pub json: bool,
}

impl SourceArgs {
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    pub fn as_of(&self) -> Option<&str> {
        self.as_of.as_ref().map(IsoDate::as_str)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Total monthly and yearly spend across active subscriptions
    Summary {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Monthly spend grouped by category
    Categories {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Monthly spend grouped by billing cycle
    Cycles {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Subscriptions with monthly and yearly cost and next renewal
    List {
        #[command(flatten)]
        source: SourceArgs,
        /// Keep names containing this text (case-insensitive)
        #[arg(long, value_name = "TEXT")]
        search: Option<String>,
        /// Keep one category; `Other` matches uncategorized rows
        #[arg(long, value_name = "NAME")]
        category: Option<String>,
        /// Row order (default name)
        #[arg(long, value_parser = ["name", "cost", "renewal"])]
        sort: Option<String>,
        /// Include cancelled and paused subscriptions
        #[arg(long)]
        all: bool,
    },
    /// Renewals due within the next N days, soonest first
    Upcoming {
        #[command(flatten)]
        source: SourceArgs,
        /// Window size in days (default 30)
        #[arg(long, value_parser = parse_days)]
        days: Option<i64>,
    },
    /// Month-by-month spend projection
    Forecast {
        #[command(flatten)]
        source: SourceArgs,
        /// Number of months to project (default 12)
        #[arg(long, value_parser = parse_months)]
        months: Option<i64>,
    },
    /// Overview: monthly spend, renewals due soon and category split
    Dash {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Check a subscriptions file and report every row that needs fixes
    #[command(after_help = VALIDATE_AFTER_HELP)]
    Validate {
        /// Subscriptions file; `-` reads stdin
        path: Option<String>,
        /// Output JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Summary { .. } => "summary",
            Self::Categories { .. } => "categories",
            Self::Cycles { .. } => "cycles",
            Self::List { .. } => "list",
            Self::Upcoming { .. } => "upcoming",
            Self::Forecast { .. } => "forecast",
            Self::Dash { .. } => "dash",
            Self::Validate { .. } => "validate",
        }
    }
}

pub fn parse_from<I, T>(itr: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(itr)
}
