use anyhow::Context;
use clap::Parser;
use legal_pipeline::adapters::nlp_client::NlpServiceClient;
use legal_pipeline::utils::{logger, validation::validate_url};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

const SAMPLE_TEXT: &str = "This employment agreement is entered into between ABC Corporation \
and Mr. John Smith, residing at Mumbai. The employer may terminate the employment for \
breach of the terms with liquidated damages as penalty.";

#[derive(Debug, Parser)]
#[command(name = "service_check")]
#[command(about = "Smoke-tests a running legal NLP service")]
struct CheckConfig {
    /// Base URL of the service, e.g. http://localhost:5000
    #[arg(long, env = "SERVICE_URL", default_value = "http://localhost:5000")]
    base_url: String,

    #[arg(long, default_value = SAMPLE_TEXT)]
    text: String,

    /// Endpoints to POST to, in order
    #[arg(long, value_delimiter = ',', default_value = "classify,extract,analyze")]
    endpoints: Vec<String>,

    /// Also check /analyze_all (combined service only)
    #[arg(long)]
    all: bool,

    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    #[arg(short, long, help = "Enable verbose output")]
    verbose: bool,
}

struct Check {
    name: String,
    outcome: Result<String, String>,
    elapsed: Duration,
}

impl Check {
    fn print(&self) {
        match &self.outcome {
            Ok(summary) => println!(
                "✅ {:<16} {:>6} ms  {}",
                self.name,
                self.elapsed.as_millis(),
                summary
            ),
            Err(reason) => println!(
                "❌ {:<16} {:>6} ms  {}",
                self.name,
                self.elapsed.as_millis(),
                reason
            ),
        }
    }
}

/// One-line summary of a successful body; bodies carrying `error` count as failures.
fn summarize(endpoint: &str, body: &Value) -> Result<String, String> {
    if let Some(error) = body.get("error") {
        return Err(error.as_str().unwrap_or("unknown error").to_string());
    }

    let summary = match endpoint {
        "classify" => format!(
            "{} ({})",
            body["document_type"].as_str().unwrap_or("?"),
            body["confidence"]
        ),
        "extract" => format!(
            "{} entities, types {}",
            body["total_entities"], body["entity_types"]
        ),
        "analyze" => format!(
            "{} clauses, overall risk {}",
            body["total_clauses"],
            body["overall_risk"].as_str().unwrap_or("?")
        ),
        "analyze_all" => {
            let failed: Vec<&str> = ["document_classification", "entity_recognition", "clause_analysis"]
                .into_iter()
                .filter(|key| body[*key].get("error").is_some())
                .collect();
            if !failed.is_empty() {
                return Err(format!("component errors in {}", failed.join(", ")));
            }
            format!("{} words", body["word_count"])
        }
        _ => "ok".to_string(),
    };
    Ok(summary)
}

async fn fetch_health(client: &Client, base_url: &str) -> Result<String, String> {
    let response = client
        .get(NlpServiceClient::endpoint_url(base_url, ""))
        .send()
        .await
        .map_err(|e| format!("request failed: {}", e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(format!("status {}", status.as_u16()));
    }
    let body: Value = response
        .json()
        .await
        .map_err(|e| format!("invalid JSON: {}", e))?;

    let loaded = body["model_loaded"].as_bool().unwrap_or(false);
    let summary = format!(
        "{} (model_loaded: {})",
        body["service"].as_str().unwrap_or("?"),
        loaded
    );
    if loaded {
        Ok(summary)
    } else {
        Err(summary)
    }
}

async fn check_health(client: &Client, base_url: &str) -> Check {
    let started = Instant::now();
    let outcome = fetch_health(client, base_url).await;

    Check {
        name: "GET /".to_string(),
        outcome,
        elapsed: started.elapsed(),
    }
}

async fn check_endpoint(nlp: &NlpServiceClient, base_url: &str, endpoint: &str, text: &str) -> Check {
    let started = Instant::now();
    let body = nlp.call(base_url, endpoint, text).await;
    tracing::debug!("{} → {}", endpoint, body);

    Check {
        name: format!("POST /{}", endpoint),
        outcome: summarize(endpoint, &body),
        elapsed: started.elapsed(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CheckConfig::parse();
    logger::init_cli_logger(config.verbose);

    if let Err(e) = validate_url("base_url", &config.base_url) {
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let timeout = Duration::from_secs(config.timeout_secs);
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")?;
    let nlp = NlpServiceClient::new(timeout).context("failed to build service client")?;

    println!(
        "🔍 Checking {} at {}",
        config.base_url,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );

    let mut checks = vec![check_health(&client, &config.base_url).await];

    let mut endpoints = config.endpoints.clone();
    if config.all {
        endpoints.push("analyze_all".to_string());
    }
    for endpoint in endpoints.iter().map(|e| e.trim().trim_start_matches('/')) {
        checks.push(check_endpoint(&nlp, &config.base_url, endpoint, &config.text).await);
    }

    for check in &checks {
        check.print();
    }

    let failed = checks.iter().filter(|c| c.outcome.is_err()).count();
    let report = json!({ "checks": checks.len(), "failed": failed });
    tracing::info!("Service check finished: {}", report);

    if failed > 0 {
        println!("❌ {} of {} checks failed", failed, checks.len());
        std::process::exit(1);
    }

    println!("✅ All {} checks passed", checks.len());
    Ok(())
}
