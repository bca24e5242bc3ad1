//! CLI argument definitions for Ferrosea.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `events` | Fetch marketplace events for a contract, collection or account |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, ndjson) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--timeout-ms` | env / `10000` | Request timeout in ms |
//! | `--base-url` | env / API root | Override the API root |
//! | `--log-format` | `pretty` | Log output on stderr (pretty, json) |
//!
//! # Examples
//!
//! ```bash
//! ferrosea events --contract 0xb47e3cd837ddf8e4c57f05d70ab865de6e193bbb --event-type successful --limit 5
//! ferrosea events --collection cryptopunks --event-type successful \
//!     --occurred-after 2021-07-30T00:00:00 --occurred-before 2021-08-02T00:00:00
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Ferrosea - typed client for marketplace events
#[derive(Debug, Parser)]
#[command(
    name = "ferrosea",
    author,
    version,
    about = "Query marketplace events with validated filters"
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Request timeout in milliseconds (overrides FERROSEA_TIMEOUT_MS).
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_ms: Option<u64>,

    /// API root URL (overrides FERROSEA_BASE_URL).
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Log line format written to stderr.
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// One JSON event per line.
    Ndjson,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact human-readable lines.
    Pretty,
    /// One JSON object per log line.
    Json,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch events matching the given filters.
    ///
    /// Filters are validated before any request is sent.
    Events(EventsArgs),
}

/// Arguments for the `events` command.
#[derive(Debug, Args)]
pub struct EventsArgs {
    /// NFT contract address whose assets' events are listed.
    #[arg(long = "contract")]
    pub asset_contract_address: Option<String>,

    /// Token id within the contract.
    #[arg(long)]
    pub token_id: Option<String>,

    /// Collection slug.
    #[arg(long = "collection")]
    pub collection_slug: Option<String>,

    /// Account address involved in the events.
    #[arg(long = "account")]
    pub account_address: Option<String>,

    /// Event type: created, successful, cancelled, bid_entered, bid_withdrawn, transfer, approve.
    #[arg(long)]
    pub event_type: String,

    /// Auction type: english, dutch, min-price.
    #[arg(long)]
    pub auction_type: Option<String>,

    /// Restrict to events on the marketplace's own auctions.
    #[arg(long, default_value_t = false)]
    pub only_opensea: bool,

    /// Only events before this time (RFC3339 or YYYY-MM-DDTHH:MM:SS, UTC).
    #[arg(long)]
    pub occurred_before: Option<String>,

    /// Only events after this time (RFC3339 or YYYY-MM-DDTHH:MM:SS, UTC).
    #[arg(long)]
    pub occurred_after: Option<String>,

    /// Number of events to skip.
    #[arg(long, default_value_t = 0)]
    pub offset: u32,

    /// Number of events to return (1-300).
    #[arg(long, default_value_t = 20)]
    pub limit: u32,
}
