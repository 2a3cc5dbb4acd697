use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use skin_appraiser::{
    appraise, format_thousands, telemetry, Appraisal, Appraiser, HttpFetcher, ProfilePage,
    SkinValuer, DEFAULT_FETCH_TIMEOUT, DEFAULT_PROFILE_BASE_URL,
};

#[derive(Parser)]
#[command(name = "skin-appraiser")]
#[command(about = "Appraise a player's coins and skins", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a player's profile and print their net worth
    Appraise {
        username: String,

        /// Profile page prefix the username is appended to
        #[arg(long, env = "PROFILE_BASE_URL", default_value = DEFAULT_PROFILE_BASE_URL)]
        profile_base_url: String,
    },

    /// Itemize a saved profile page without fetching anything
    Inspect {
        file: PathBuf,

        /// Write the breakdown as CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Show the unit value of skin identifiers
    Value {
        #[arg(required = true)]
        identifiers: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    telemetry::init();

    let cli = Cli::parse();

    match cli.command {
        Command::Appraise {
            username,
            profile_base_url,
        } => run_appraise(&username, &profile_base_url).await?,
        Command::Inspect { file, csv } => run_inspect(&file, csv)?,
        Command::Value { identifiers } => run_value(&identifiers),
    }

    Ok(())
}

async fn run_appraise(username: &str, profile_base_url: &str) -> Result<()> {
    let fetcher = HttpFetcher::with_timeout(DEFAULT_FETCH_TIMEOUT)
        .context("Failed to build HTTP client")?;
    let appraiser = Appraiser::new(fetcher, SkinValuer::default(), profile_base_url);

    let appraisal = appraiser
        .appraise(username)
        .await
        .with_context(|| format!("Failed to fetch profile for {}", username))?;

    println!("{}", appraisal.net_worth.summary(username));
    Ok(())
}

fn run_inspect(file: &Path, as_csv: bool) -> Result<()> {
    let html = fs::read_to_string(file)
        .with_context(|| format!("Failed to read profile page: {:?}", file))?;

    let (records, coins) = {
        let page = ProfilePage::parse(&html);
        (page.skin_records(), page.coins())
    };
    let appraisal = appraise(&records, coins, &SkinValuer::default());

    if as_csv {
        write_csv(&appraisal)?;
    } else {
        print_table(&appraisal);
        println!("\n{}", appraisal.net_worth.summary(&file.display().to_string()));
    }

    Ok(())
}

fn write_csv(appraisal: &Appraisal) -> Result<()> {
    let mut writer = csv::Writer::from_writer(io::stdout());
    writer.write_record(["identifier", "count", "unit_value", "subtotal", "kept", "source"])?;

    for item in &appraisal.items {
        writer.write_record([
            item.identifier.clone(),
            item.count.to_string(),
            item.unit_value.to_string(),
            item.subtotal.to_string(),
            item.kept.to_string(),
            item.source.label(),
        ])?;
    }

    writer.flush().context("Failed to write CSV")?;
    Ok(())
}

fn print_table(appraisal: &Appraisal) {
    println!(
        "{:<20} {:>6} {:>10} {:>12}  {}",
        "SKIN", "COUNT", "UNIT", "SUBTOTAL", "RULE"
    );
    println!("{}", "─".repeat(70));

    for item in &appraisal.items {
        let rule = if item.kept {
            item.source.label()
        } else {
            "collapsed into upgrade".to_string()
        };
        println!(
            "{:<20} {:>6} {:>10} {:>12}  {}",
            item.identifier,
            item.count,
            format_thousands(item.unit_value),
            format_thousands(item.subtotal),
            rule
        );
    }
}

fn run_value(identifiers: &[String]) {
    let valuer = SkinValuer::default();

    for id in identifiers {
        let valuation = valuer.resolve(id);
        println!(
            "{:<20} {:>10}  ({})",
            id,
            format_thousands(valuation.value),
            valuation.source.label()
        );
    }
}
