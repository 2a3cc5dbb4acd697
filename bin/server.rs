// Skin Appraiser - Interactions Server
// Receives signed slash-command webhooks and replies with appraisals

use anyhow::{Context, Result};
use clap::Parser;
use skin_appraiser::server::{router, AppState};
use skin_appraiser::signature::RequestVerifier;
use skin_appraiser::{
    telemetry, Appraiser, HttpFetcher, SkinValuer, DEFAULT_FETCH_TIMEOUT, DEFAULT_PROFILE_BASE_URL,
};

#[derive(Parser)]
#[command(name = "appraiser-server")]
#[command(about = "Slash-command webhook server for skin appraisals", version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: u16,

    /// Bind address
    #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    bind: String,

    /// Application public key (hex) used to verify request signatures
    #[arg(long, env = "DISCORD_PUBLIC_KEY")]
    public_key: String,

    /// Profile page prefix the username is appended to
    #[arg(long, env = "PROFILE_BASE_URL", default_value = DEFAULT_PROFILE_BASE_URL)]
    profile_base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let args = Args::parse();

    let verifier = RequestVerifier::from_hex(&args.public_key)
        .context("DISCORD_PUBLIC_KEY is not a usable Ed25519 public key")?;

    let fetcher =
        HttpFetcher::with_timeout(DEFAULT_FETCH_TIMEOUT).context("Failed to build HTTP client")?;

    let valuer = SkinValuer::default();
    tracing::info!(
        suffixes = valuer.suffix_count(),
        specials = valuer.special_count(),
        "valuation tables loaded"
    );

    let app = router(AppState {
        verifier,
        appraiser: Appraiser::new(fetcher, valuer, args.profile_base_url),
    });

    let addr = format!("{}:{}", args.bind, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("Server running on http://{}", addr);
    tracing::info!("Interactions endpoint: POST /interactions");

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;

    Ok(())
}
