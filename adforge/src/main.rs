#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod progress;

use std::path::Path;
use std::sync::Arc;

use adforge_config::Config;
use adforge_core::{ProviderId, RequestContext};
use adforge_imagegen::{BatchItem, BatchRunner, GeneratedImage, GenerationRequest, ProviderRouter, to_displayable};
use args::Args;
use base64::Engine;
use clap::Parser;
use progress::LogObserver;
use secrecy::SecretString;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = Config::load(&args.config)?;

    tracing::info!(
        config_path = %args.config.display(),
        provider = %args.provider,
        variants = args.angles.len(),
        "starting adforge"
    );

    let api_key = resolve_api_key(args.provider, &config)?;

    let router = Arc::new(ProviderRouter::from_config(&config)?);
    let runner = BatchRunner::from_config(router, &config.batch)?;

    // Set up graceful shutdown
    let cancellation = CancellationToken::new();
    let cancellation_clone = cancellation.clone();

    tokio::spawn(async move {
        shutdown_signal().await;
        cancellation_clone.cancel();
    });

    let context = RequestContext::new()
        .with_cancellation(cancellation)
        .with_observer(Arc::new(LogObserver));

    let shared = GenerationRequest {
        product_name: args.product,
        product_description: args.description,
        audience: args.audience,
        angle: String::new(),
        num_images: args.num_images,
        provider: args.provider,
        api_key,
    };

    let items: Vec<BatchItem> = args.angles.iter().map(|angle| BatchItem::from_angle(angle.as_str())).collect();

    let result = runner.generate_batch(&items, &shared, &context).await?;

    for (label, reason) in &result.failures {
        tracing::warn!(label = %label, reason = %reason, "variant not generated");
    }

    for (label, image) in &result.successes {
        deliver(label, image, args.out_dir.as_deref())?;
    }

    tracing::info!("adforge finished");
    Ok(())
}

/// Credential lookup is caller-side: environment first, config fallback
fn resolve_api_key(provider: ProviderId, config: &Config) -> anyhow::Result<SecretString> {
    let (env_var, config_key) = match provider {
        ProviderId::Fal => ("FAL_KEY", config.providers.fal.as_ref().and_then(|c| c.api_key.clone())),
        ProviderId::Freepik => (
            "FREEPIK_API_KEY",
            config.providers.freepik.as_ref().and_then(|c| c.api_key.clone()),
        ),
    };

    if let Ok(value) = std::env::var(env_var) {
        return Ok(SecretString::from(value));
    }

    config_key.ok_or_else(|| anyhow::anyhow!("no API key for provider '{provider}': set {env_var} or configure providers.{provider}.api_key"))
}

/// Write an inline payload to disk, or print the displayable reference
fn deliver(label: &str, image: &GeneratedImage, out_dir: Option<&Path>) -> anyhow::Result<()> {
    if let (Some(dir), Some(b64)) = (out_dir, image.b64_data.as_ref()) {
        std::fs::create_dir_all(dir)?;

        let bytes = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .map_err(|e| anyhow::anyhow!("image payload for '{label}' is not valid base64: {e}"))?;

        let path = dir.join(format!("{}.png", filename_safe(label)));
        std::fs::write(&path, bytes)?;

        tracing::info!(label = %label, path = %path.display(), "image written");
        return Ok(());
    }

    let displayable = to_displayable(image)?;
    println!("{label}\t{displayable}");
    Ok(())
}

/// Flatten a label into something safe to use as a file name
fn filename_safe(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
        .collect()
}

/// Wait for a shutdown signal (`SIGINT` or `SIGTERM`)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    tracing::info!("shutdown signal received");
}
