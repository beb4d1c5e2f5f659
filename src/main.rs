use clap::Parser;
use trampo_local::config::cli::OutputFormat;
use trampo_local::presentation::{report, session};
use trampo_local::utils::error::ErrorSeverity;
use trampo_local::utils::logger;
use trampo_local::{CachedSearch, CliArgs, LocalStorage, RadarEngine, RadarPipeline, SerperClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    // 初始化日誌
    if args.log_json {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting trampo-local");

    let settings = match args.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::debug!("Resolved settings: {:?}", settings);

    let client = SerperClient::new(settings.search.clone())?;
    let provider = CachedSearch::new(client, settings.cache_capacity);
    let storage = LocalStorage::new(settings.output_path.clone());
    let filter = settings.filter.clone();
    let pipeline = RadarPipeline::new(provider, storage, settings);
    let engine = RadarEngine::new(pipeline);

    let outcome = match engine.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    };

    match args.format {
        OutputFormat::Text => println!("{}", report::render_text(&outcome.report, args.top)),
        OutputFormat::Json => println!("{}", report::render_json(&outcome.report)?),
    }

    if let Some(path) = &outcome.output_path {
        eprintln!("📁 Relatório salvo em: {}", path);
    }

    if args.interactive {
        let session = session::Session::new(&outcome.report, filter, args.top);
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        session::run_session(engine.pipeline(), session, stdin.lock(), &mut stdout).await?;
    }

    Ok(())
}
