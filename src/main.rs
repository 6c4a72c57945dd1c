mod ai;
mod config;
mod constants;
mod digest;
mod mail;

use anyhow::{Context, Result};
use chrono::Local;
use std::env;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::ai::AnthropicClient;
use crate::config::{ApiKey, Config, MailAccount};
use crate::digest::Digest;
use crate::mail::SmtpClient;

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // Scheduled runs capture stderr, so logs go there and stdout keeps the digest
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_usage() {
    eprintln!(
        r#"ai-news-digest - Daily AI news by email

Usage: ai-news-digest [command]

Commands:
    (none)      Fetch today's digest and email it
    preview     Fetch today's digest and print it without sending
    help        Show this help message

Environment:
    ANTHROPIC_API_KEY     API key for the model
    GMAIL_ADDRESS         Sender address and SMTP username
    GMAIL_APP_PASSWORD    Gmail app password
    TO_EMAIL              Recipient address

Configuration file (optional): ~/.config/ai-news-digest/config.toml
"#
    );
}

async fn fetch_digest(config: &Config, api_key: ApiKey) -> Result<Digest> {
    let today = Local::now().date_naive();
    let client = AnthropicClient::new(api_key, &config.ai)
        .context("Failed to create model API client")?;

    let prompt = ai::prompts::daily_digest(today, config.digest.item_count);
    let text = client
        .search(&prompt)
        .await
        .context("Failed to fetch AI news")?;

    let digest = Digest::new(today, &text);
    tracing::info!(
        lines = digest.len(),
        items = digest.items().count(),
        "Digest parsed"
    );
    if digest.is_empty() {
        tracing::warn!("Model returned an empty digest");
    }
    Ok(digest)
}

async fn run_preview(config: &Config) -> Result<()> {
    let api_key = ApiKey::from_env()?;

    println!("Fetching AI news...");
    let digest = fetch_digest(config, api_key).await?;

    println!("Subject: {}\n", digest.subject());
    println!("{}\n", digest.plain_text());
    println!("{}", digest.html());
    Ok(())
}

async fn run_digest(config: &Config) -> Result<()> {
    // Read every credential up front so a misconfigured run fails before the API call
    let api_key = ApiKey::from_env()?;
    let account = MailAccount::from_env()?;
    let smtp = SmtpClient::new(&config.smtp, &account)?;

    println!("Fetching AI news...");
    let digest = fetch_digest(config, api_key).await?;
    println!("News fetched:\n{}\n", digest.plain_text());

    smtp.send(&digest).await?;
    println!("Email sent to {}!", smtp.recipient());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("help") | Some("--help") | Some("-h") => {
            print_usage();
            Ok(())
        }
        Some("preview") => {
            setup_logging();
            let config = Config::load()?;
            run_preview(&config).await
        }
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            std::process::exit(1);
        }
        None => {
            setup_logging();
            let config = Config::load()?;
            run_digest(&config).await
        }
    }
}
