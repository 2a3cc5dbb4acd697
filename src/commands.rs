// 🤖 Command handling - Slash commands → one reply string
// Only transport failures reach here as errors; they become replies too

use crate::appraisal::{appraise, Appraisal};
use crate::fetch::{fetch_coins, fetch_skins, profile_url, FetchError, PageSource};
use crate::interactions::CommandData;
use crate::valuation::SkinValuer;
use thiserror::Error;
use tracing::{info, warn};

pub const APPRAISE: &str = "appraise";
pub const OPEN: &str = "open";
pub const USERNAME_OPTION: &str = "username";

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("missing `{0}` option")]
    MissingOption(&'static str),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

// ============================================================================
// APPRAISER
// ============================================================================

/// Appraiser - fetches a player's profile and values it
pub struct Appraiser<S: PageSource> {
    source: S,
    valuer: SkinValuer,
    profile_base_url: String,
}

impl<S: PageSource> Appraiser<S> {
    pub fn new(source: S, valuer: SkinValuer, profile_base_url: impl Into<String>) -> Self {
        Appraiser {
            source,
            valuer,
            profile_base_url: profile_base_url.into(),
        }
    }

    /// Fetch skins and coins concurrently, then value the profile
    pub async fn appraise(&self, username: &str) -> Result<Appraisal, FetchError> {
        let url = profile_url(&self.profile_base_url, username);
        let (raw, coins) = tokio::try_join!(
            fetch_skins(&self.source, &url),
            fetch_coins(&self.source, &url)
        )?;

        let appraisal = appraise(&raw, coins, &self.valuer);
        info!(
            username,
            records = raw.len(),
            kept = appraisal.kept_items().count(),
            coins,
            skin_total = appraisal.net_worth.skin_total,
            "appraisal complete"
        );
        Ok(appraisal)
    }

    /// Run one command and produce its reply
    pub async fn handle(&self, command: &CommandData) -> String {
        match self.run(command).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(command = %command.name, error = %e, "command failed");
                format!("⚠️ Error: {}", e)
            }
        }
    }

    async fn run(&self, command: &CommandData) -> Result<String, CommandError> {
        match command.name.as_str() {
            APPRAISE => {
                let username = command
                    .option_str(USERNAME_OPTION)
                    .ok_or(CommandError::MissingOption(USERNAME_OPTION))?;
                let appraisal = self.appraise(username).await?;
                Ok(appraisal.net_worth.summary(username))
            }
            OPEN => Ok("🔨 The `/open` command isn’t implemented yet.".to_string()),
            other => Ok(format!("⚠️ Unknown command `{}`.", other)),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
