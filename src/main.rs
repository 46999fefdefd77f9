use hdb_resale_predictor::config::load_config;
use hdb_resale_predictor::model::{Prediction, RawInputRecord};
use hdb_resale_predictor::normalizer;
use hdb_resale_predictor::predictor::{Predictor, load_model};
use hdb_resale_predictor::utils::format_price;
use serde::Serialize;
use serde_json::{Value, json};
use std::process;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Initialize logging; stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error ({}): {}", config_path, e);
            process::exit(1);
        }
    };

    if let Err(e) = normalizer::verify_tables() {
        error!("Category tables are inconsistent: {}", e);
        process::exit(1);
    }

    let schema = match config.schema.resolve() {
        Ok(s) => Arc::new(s),
        Err(e) => {
            error!("Feature schema error: {}", e);
            process::exit(1);
        }
    };

    let model = match load_model(config.model_kind, &config.model_path) {
        Ok(m) => m,
        Err(e) => {
            error!("Failed to load model: {}", e);
            process::exit(1);
        }
    };

    let predictor = match Predictor::new(schema, config.bounds, model) {
        Ok(p) => Arc::new(p),
        Err(e) => {
            error!("Model does not match feature schema: {}", e);
            process::exit(1);
        }
    };

    info!(
        "Waiting for requests on stdin (schema '{}', one JSON record per line)...",
        predictor.schema().name()
    );
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    let Some(response) = respond(predictor.clone(), &line).await else {
                        continue;
                    };
                    let mut out = response.to_string();
                    out.push('\n');
                    if let Err(e) = stdout.write_all(out.as_bytes()).await {
                        error!("Failed to write response: {}", e);
                        break;
                    }
                    if let Err(e) = stdout.flush().await {
                        error!("Failed to flush response: {}", e);
                        break;
                    }
                }
                Ok(None) => {
                    info!("Input closed, shutting down.");
                    break;
                }
                Err(e) => {
                    error!("Failed to read request: {}", e);
                    break;
                }
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, shutting down.");
                break;
            }
        }
    }
}

#[derive(Serialize)]
struct PredictionLine {
    #[serde(flatten)]
    prediction: Prediction,
    display: String,
}

#[derive(Serialize)]
struct ErrorLine {
    error: String,
    kind: &'static str,
}

/// Response for one input line; blank lines get none.
async fn respond(predictor: Arc<Predictor>, line: &str) -> Option<Value> {
    if line.trim().is_empty() {
        return None;
    }
    Some(handle_request(predictor, line).await)
}

/// Parses one request line and runs the prediction off the async runtime.
async fn handle_request(predictor: Arc<Predictor>, line: &str) -> Value {
    let raw: RawInputRecord = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            warn!("Malformed request: {}", e);
            return json!(ErrorLine {
                error: e.to_string(),
                kind: "malformed_request",
            });
        }
    };

    match tokio::task::spawn_blocking(move || predictor.predict(&raw)).await {
        Ok(Ok(prediction)) => json!(PredictionLine {
            display: format_price(prediction.price),
            prediction,
        }),
        Ok(Err(e)) => json!(ErrorLine {
            error: e.to_string(),
            kind: e.kind(),
        }),
        Err(e) => {
            error!("Inference task failed: {}", e);
            json!(ErrorLine {
                error: format!("inference task failed: {e}"),
                kind: "prediction_failed",
            })
        }
    }
}
