use clap::Parser;
use deeni_qa::Language;
use deeni_qa::api::HttpQueryClient;
use deeni_qa::core::config;
use deeni_qa::core::state::App;
use deeni_qa::core::store::{ConfigStore, MemoryConfigStore, TomlConfigStore};
use deeni_qa::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "deeni", about = "Ask questions to a Deeni Q&A server")]
struct Args {
    /// Language to ask in (overrides config and DEENI_LANGUAGE)
    #[arg(short, long, value_enum)]
    language: Option<Language>,

    /// Request timeout in seconds (overrides config and DEENI_REQUEST_TIMEOUT)
    #[arg(short, long)]
    timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to deeni.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("deeni.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}, using defaults", e);
        config::DeeniConfig::default()
    });
    let resolved = config::resolve(&file_config, args.language, args.timeout);

    log::info!(
        "Deeni starting up: language={}, timeout={:?}",
        resolved.language,
        resolved.request_timeout
    );

    let store: Arc<dyn ConfigStore> = match &resolved.prefs_path {
        Some(path) => Arc::new(TomlConfigStore::new(path)),
        None => {
            log::warn!("No home directory, server address will not be saved across restarts");
            Arc::new(MemoryConfigStore::new())
        }
    };

    let app = App::new(store, resolved.language);
    let client = Arc::new(HttpQueryClient::new(resolved.request_timeout));

    tui::run(app, client)
}
