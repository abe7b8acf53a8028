use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use site_reporter_llm::{GeminiProvider, ProviderConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use site_reporter::models::telemetry::IssueDetail;
use site_reporter::services::report;
use site_reporter::{
    AnalysisClient, AppError, AppResult, AuditOrchestrator, AuditReport, AuditState,
    PageSpeedClient, Strategy, TelemetryConfig,
};

#[derive(Parser, Debug)]
#[command(
    name = "site-reporter",
    version,
    about = "Website audit: PageSpeed telemetry plus AI conversion analysis"
)]
struct Cli {
    #[arg(help = "Target page to audit")]
    url: String,
    #[arg(
        long,
        default_value = "General Improvement",
        help = "Conversion goal the analysis is scored against"
    )]
    goal: String,
    #[arg(long, default_value = "mobile", help = "Lighthouse strategy: mobile or desktop")]
    strategy: String,
    #[arg(long, help = "Transport timeout in seconds for each provider call")]
    timeout_secs: Option<u64>,
    #[arg(long, help = "Generative model for the analysis stage")]
    model: Option<String>,
    #[arg(long, help = "Output the report as JSON")]
    json: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let strategy: Strategy = cli.strategy.parse().map_err(AppError::validation)?;
    let timeout = cli.timeout_secs.map(Duration::from_secs);

    let gemini_key = env_key(&["GEMINI_API_KEY", "API_KEY"])
        .ok_or_else(|| AppError::config("GEMINI_API_KEY is not set"))?;
    let psi_key = env_key(&["PSI_API_KEY", "API_KEY"]);
    if psi_key.is_none() {
        tracing::warn!("PSI_API_KEY is not set; the telemetry stage will fail");
    }

    let telemetry = PageSpeedClient::new(TelemetryConfig {
        api_key: psi_key,
        base_url: None,
        strategy,
        timeout,
    });

    let mut provider_config = ProviderConfig {
        api_key: Some(gemini_key),
        timeout,
        ..ProviderConfig::default()
    };
    if let Some(model) = cli.model {
        provider_config.model = model;
    }
    let provider = GeminiProvider::new(provider_config);

    let orchestrator = AuditOrchestrator::new(
        Arc::new(telemetry),
        AnalysisClient::new(Arc::new(provider)),
    );
    orchestrator.start_audit(&cli.url, &cli.goal).await?;

    let report = match orchestrator.state().await {
        AuditState::Complete { telemetry, analysis } => {
            report::compose(&cli.url, &cli.goal, telemetry, analysis)
        }
        state => {
            return Err(AppError::invalid_state(format!(
                "audit ended in unexpected state: {}",
                state
            )));
        }
    };

    if cli.json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| AppError::parse(format!("Failed to serialize report: {}", e)))?;
        println!("{}", rendered);
    } else {
        print_report(&report);
    }
    Ok(())
}

/// First non-empty value among the named environment variables
fn env_key(names: &[&str]) -> Option<String> {
    names.iter().find_map(|name| {
        std::env::var(name)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    })
}

/// Log to stderr so JSON output on stdout stays machine-readable
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("site_reporter=info,warn"))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()
        .ok();
}

fn print_report(report: &AuditReport) {
    println!("Audit report for {}", report.url);
    println!("Goal: {}", report.goal);
    println!("Generated: {}", report.generated_at);
    println!();
    println!("Scores");
    println!("  Performance:    {:>3}/100", report.telemetry.performance_score);
    println!("  Accessibility:  {:>3}/100", report.telemetry.accessibility_score);
    println!("  Best Practices: {:>3}/100", report.telemetry.best_practices_score);
    println!("  SEO:            {:>3}/100", report.telemetry.seo_score);
    println!("  Effectiveness:  {:>3}/100", report.analysis.effectiveness_score);
    println!("  Design:         {:>3}/100", report.analysis.design_score);
    println!();
    println!("Summary");
    println!("  {}", report.analysis.summary);
    println!();
    println!("Effectiveness");
    println!("  {}", report.analysis.effectiveness_reasoning);
    println!();
    println!("Design");
    println!("  {}", report.analysis.design_reasoning);

    if !report.analysis.action_items.is_empty() {
        println!();
        println!("Action items");
        for (index, item) in report.analysis.action_items.iter().enumerate() {
            println!(
                "  {}. [{}] [{}] {}",
                index + 1,
                item.priority,
                item.category,
                item.title
            );
            println!("     {}", item.description);
            println!("     Impact: {}", item.impact);
        }
    }

    print_issues("Performance issues", &report.telemetry.performance_issues);
    print_issues("SEO issues", &report.telemetry.seo_issues);
}

fn print_issues(heading: &str, issues: &[IssueDetail]) {
    if issues.is_empty() {
        return;
    }
    println!();
    println!("{}", heading);
    for issue in issues {
        match &issue.display_value {
            Some(value) => println!("  - {} ({})", issue.title, value),
            None => println!("  - {}", issue.title),
        }
    }
}
