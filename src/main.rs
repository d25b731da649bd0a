use clap::Parser;
use std::sync::Arc;
use swapi_client::adapters::diagnostics::sink_for;
use swapi_client::utils::logger;
use swapi_client::{CliConfig, Orchestrator, StdoutOutput, SwapiClient};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    let settings = match swapi_client::config::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let client = SwapiClient::new(settings.base_url(), sink_for(settings.diagnostics()));
    let orchestrator = Orchestrator::new(Arc::new(client), Arc::new(StdoutOutput))
        .with_max_concurrent(settings.max_concurrent());

    tracing::info!("Fetching person {}", settings.person_id());
    let report = orchestrator.run(settings.person_id()).await;

    match &report.person {
        Some(person) => tracing::info!(
            "✅ {}: planet {}, {}/{} films, {} failed fetches",
            person.name,
            if report.planet_printed { "printed" } else { "missing" },
            report.films_printed,
            report.films_requested,
            report.failures
        ),
        None => tracing::warn!("Person {} could not be fetched", settings.person_id()),
    }
}
