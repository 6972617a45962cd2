//! chatlens - CLI tool to parse and inspect WhatsApp chat exports
//!
//! Parses an exported `.txt` transcript and prints a summary, the parse
//! statistics, or the full record sequence as JSON.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chatlens_core::{parse_chat_path, Config, DateOrder, ImportOptions, ParseResult};
use clap::Parser;

#[derive(Parser)]
#[command(name = "chatlens")]
#[command(about = "Parse and inspect WhatsApp chat exports")]
#[command(version)]
struct Args {
    /// Path to the exported chat .txt file
    file: PathBuf,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Pin the date ordering instead of inferring it (day-first or month-first)
    #[arg(long)]
    date_order: Option<DateOrder>,

    /// Media placeholder token used by the export (e.g. "image omitted")
    #[arg(long)]
    media_placeholder: Option<String>,

    /// Disable the quoted-reply heuristic
    #[arg(long)]
    no_quote_detection: bool,

    /// Print only the parse statistics
    #[arg(long)]
    stats_only: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging
    let _log_guard =
        chatlens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    // CLI flags override the config file's [import] table
    let mut options: ImportOptions = config.import;
    if args.date_order.is_some() {
        options.date_order = args.date_order;
    }
    if args.media_placeholder.is_some() {
        options.media_placeholder = args.media_placeholder.clone();
    }
    if args.no_quote_detection {
        options.detect_quoted = false;
    }

    tracing::info!(file = %args.file.display(), "Parsing export");

    let result = parse_chat_path(&args.file, &options)
        .with_context(|| format!("failed to parse {}", args.file.display()))?;

    match args.format.as_str() {
        "json" => print_json(&result, args.stats_only)?,
        "text" => print_text(&result, &options, args.stats_only),
        other => anyhow::bail!("unknown format '{}' (expected text or json)", other),
    }

    Ok(())
}

fn print_json(result: &ParseResult, stats_only: bool) -> Result<()> {
    let rendered = if stats_only {
        serde_json::to_string_pretty(&result.stats)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    println!("{}", rendered);
    Ok(())
}

fn print_text(result: &ParseResult, options: &ImportOptions, stats_only: bool) {
    if !stats_only {
        if result.records.is_empty() {
            println!("No messages found.");
        } else {
            let first = result.records.first().map(|r| r.timestamp);
            let last = result.records.last().map(|r| r.timestamp);
            println!("Messages:    {}", result.records.len());
            if let (Some(first), Some(last)) = (first, last) {
                println!("First:       {}", first.format("%Y-%m-%d %H:%M:%S"));
                println!("Last:        {}", last.format("%Y-%m-%d %H:%M:%S"));
            }
            let quoted = result.records.iter().filter(|r| r.is_quoted).count();
            if quoted > 0 {
                println!("With quotes: {}", quoted);
            }
            if let Some(placeholder) = options.media_placeholder.as_deref() {
                let media = result
                    .records
                    .iter()
                    .filter(|r| r.is_media(placeholder))
                    .count();
                println!("Media:       {}", media);
            }
            println!();
        }
    }

    let stats = result.stats;
    println!("Parse statistics:");
    println!("  total_lines:        {}", stats.total_lines);
    println!("  parsed_messages:    {}", stats.parsed_messages);
    println!("  multiline_messages: {}", stats.multiline_messages);
    println!("  inferred_dates:     {}", stats.inferred_dates);
    println!("  ignored_lines:      {}", stats.ignored_lines);
    println!("  quoted_messages:    {}", stats.quoted_messages);
}
