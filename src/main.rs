//! lyricsnap - turn a video link into song lyrics
//!
//! Derives an artist/title guess from video metadata and walks a chain of
//! external lyrics sources until one yields usable text.

mod api;
mod config;
mod core;
mod metadata;
mod models;
mod providers;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::config::LookupSettings;
use crate::core::LyricsResolver;

/// lyricsnap - self-hosted lyrics extraction API
#[derive(Parser, Debug)]
#[command(name = "lyricsnap")]
#[command(version = "1.0.0")]
#[command(about = "Turn a video link into song lyrics")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to a JSON settings file for lookup pacing and timeouts
    #[arg(long)]
    settings: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // initialize logging, keeping dependency chatter down
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},html5ever=error,selectors=error,hyper=warn,reqwest=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("lyricsnap v1.0.0 starting...");

    let settings = LookupSettings::load(args.settings.as_deref())?;
    info!(
        "lookup pacing: api {}ms, scrape {}ms, search {}ms",
        settings.api_delay_ms, settings.scrape_delay_ms, settings.search_delay_ms
    );

    let resolver = web::Data::new(LyricsResolver::from_settings(&settings));

    let addr = format!("{}:{}", args.host, args.port);
    info!("Server listening on http://{}", addr);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(resolver.clone())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}
