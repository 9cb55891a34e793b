use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{self, load_settings_from, normalize_base_url},
    PageController, PageSurface,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse and manage extracurricular activity signups")]
struct Args {
    /// Overrides the API base url from settings.
    #[arg(long)]
    server_url: Option<String>,
    #[arg(long, default_value = config::DEFAULT_SETTINGS_FILE)]
    config: PathBuf,
    /// Print the page markup instead of a text summary.
    #[arg(long)]
    html: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every activity with its roster.
    List,
    /// Sign a participant up for an activity.
    Signup {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
    /// Remove a participant from an activity.
    Remove {
        #[arg(long)]
        activity: String,
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config).context("failed to load settings")?;
    if let Some(url) = &args.server_url {
        settings.api_base_url = normalize_base_url(url).context("invalid --server-url")?;
    }
    info!(api = %settings.api_base_url, "console: using activities api");

    let page = PageController::from_settings(&settings).context("failed to build http client")?;
    page.load_activities().await;

    match args.command.unwrap_or(Command::List) {
        Command::List => {}
        Command::Signup { activity, email } => {
            page.fill_signup_form(email, activity).await;
            page.submit_signup().await;
        }
        Command::Remove { activity, email } => {
            let surface = page.surface().await;
            match surface.find_remove_control(&activity, &email) {
                Some(control) => {
                    page.handle_list_click(control).await;
                }
                None => page.unregister_participant(&activity, &email).await,
            }
        }
    }

    if args.html {
        println!("{}", page.render_html().await);
        return Ok(());
    }

    let banner = page.banner().await;
    if banner.is_visible() {
        println!("[{}] {}", banner.class_name(), banner.text);
    }
    print_summary(&page.surface().await);
    Ok(())
}

fn print_summary(surface: &PageSurface) {
    if surface.activities.is_empty() {
        println!("{}", surface.activities_list().text_content());
        return;
    }

    for activity in &surface.activities {
        println!("{}", activity.name);
        println!("  {}", activity.description);
        println!("  Schedule: {}", activity.schedule);
        println!("  Availability: {} spots left", activity.spots_left());
        if activity.participants.is_empty() {
            println!("  Participants: none yet");
        } else {
            println!("  Participants:");
            for email in &activity.participants {
                println!("    - {email}");
            }
        }
    }
}
