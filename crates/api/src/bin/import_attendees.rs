//! Load a roster CSV into the configured store without going through the API.
//!
//! ```text
//! import-attendees <roster.csv> [--merge]
//! ```
//!
//! Uses the same `STORAGE_BACKEND` / `DATA_DIR` settings as the server.
//! Without `--merge` the roster is replaced.

use anyhow::{bail, Context};
use cafe_api::config::ServerConfig;
use cafe_api::state::open_store;
use cafe_core::roster::parse_roster_csv;
use cafe_db::models::attendee::Attendee;
use cafe_db::repositories::AttendeeRepo;

const USAGE: &str = "usage: import-attendees <roster.csv> [--merge]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cafe_db=info".into()),
        )
        .init();

    let mut path = None;
    let mut merge = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--merge" => merge = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                return Ok(());
            }
            _ if path.is_none() => path = Some(arg),
            _ => bail!("unexpected argument '{arg}'\n{USAGE}"),
        }
    }
    let Some(path) = path else {
        bail!("{USAGE}");
    };

    let text = std::fs::read_to_string(&path).with_context(|| format!("reading {path}"))?;
    let parsed = parse_roster_csv(&text).with_context(|| format!("parsing {path}"))?;

    let config = ServerConfig::from_env();
    let store = open_store(&config)
        .await
        .context("opening the document store")?;

    let imported = parsed.entries.len();
    let attendees: Vec<Attendee> = parsed.entries.into_iter().map(Attendee::from).collect();
    if merge {
        let counts = AttendeeRepo::merge(&store, attendees)
            .await
            .context("merging attendees")?;
        println!(
            "Merged {imported} rows: {} added, {} updated",
            counts.added, counts.updated
        );
    } else {
        AttendeeRepo::replace_all(&store, attendees)
            .await
            .context("writing attendees")?;
        println!("Replaced roster with {imported} attendees");
    }

    for row in &parsed.skipped {
        println!("  skipped line {}: {}", row.line, row.reason);
    }
    let total = AttendeeRepo::count(&store).await.context("counting attendees")?;
    println!("{} skipped, {total} attendees on the roster", parsed.skipped.len());

    Ok(())
}
