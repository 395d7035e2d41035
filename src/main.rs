mod cli;
mod session;

use std::env;
use std::io::{self, Write};

use anyhow::{Context, Result};
use capsule_parser::{build_calendar, parse_schedule, Calendar};
use log::{info, warn};

use crate::cli::Args;
use crate::session::{Credentials, Session};

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "capsule_csv=info,capsule_parser=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

fn prompt_credentials() -> Result<Credentials> {
    print!("Enter your IDUL: ");
    io::stdout().flush()?;

    let mut idul = String::new();
    io::stdin()
        .read_line(&mut idul)
        .context("Failed to read IDUL")?;

    let pin = rpassword::prompt_password("PIN: ").context("Failed to read PIN")?;

    Ok(Credentials {
        idul: idul.trim().to_string(),
        pin,
    })
}

async fn run(args: Args) -> Result<()> {
    let credentials = prompt_credentials()?;
    let mut calendar = Calendar::new(&args.file_name);

    info!("Logging in...");
    let session = Session::new()?;
    session.login(&credentials).await?;
    info!("Successfully logged in");

    let html = session
        .fetch_schedule(args.semester)
        .await
        .context("Failed to fetch the detailed schedule")?;

    info!("Parsing the schedule...");
    let blocks = parse_schedule(&html);
    let failures = build_calendar(&blocks, &mut calendar, args.description);

    if !failures.is_empty() {
        warn!("{} rows could not be read:", failures.len());
        for failure in &failures {
            warn!("  {failure}");
        }
    }

    calendar
        .write_to_file(args.description)
        .with_context(|| format!("Failed to write {}", calendar.file_name().display()))?;

    info!(
        "Wrote {} events from {} courses to {}",
        calendar.len(),
        blocks.len(),
        calendar.file_name().display()
    );

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    run(args).await
}
