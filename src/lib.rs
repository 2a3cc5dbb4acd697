// Skin Appraiser - Core Library
// Exposes the valuation pipeline for the CLI, the interactions server, and tests

pub mod sprite;         // Name Parser
pub mod extractor;      // Record Extractor
pub mod valuation;      // Valuation Resolver
pub mod deduplication;  // Upgrade collapse
pub mod appraisal;      // Valuation Aggregator
pub mod fetch;
pub mod interactions;
pub mod commands;
pub mod telemetry;

#[cfg(feature = "server")]
pub mod signature;
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use sprite::parse_sprite_name;
pub use extractor::{extract_coins, extract_records, OwnershipRecord, ProfilePage};
pub use valuation::{SkinValuer, SuffixRule, Valuation, ValueSource, FALLBACK_VALUE};
pub use deduplication::{collapse_upgrades, CollapseResult, CollapsedBase, DeduplicationFilter};
pub use appraisal::{appraise, format_thousands, skin_total, Appraisal, LineItem, NetWorth};
pub use fetch::{
    fetch_coins, fetch_skins, profile_url, FetchError, HttpFetcher, PageSource,
    DEFAULT_FETCH_TIMEOUT, DEFAULT_PROFILE_BASE_URL,
};
pub use interactions::{CommandData, CommandOption, Interaction, InteractionResponse};
pub use commands::{Appraiser, CommandError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
