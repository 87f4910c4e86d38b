use anyhow::Result;
use dwmstatus::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    let core_count = sampler::cpu::logical_core_count();
    let mut composer = status::StatusComposer::from_config(&app_config, core_count);
    if let Err(e) = composer.network.prime() {
        tracing::warn!(error = %e, operation = "prime_network", "network counters not primed");
    }
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        core_count,
        sink = ?app_config.sink.kind,
        "dwmstatus started"
    );

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let worker_handle = worker::spawn(worker::WorkerDeps {
        composer,
        sink: sink::Sink::from_config(&app_config.sink),
        shutdown_rx,
    });

    #[cfg(unix)]
    {
        let mut sigterm =
            tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())?;
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
    }

    tracing::info!("Received shutdown signal");
    let _ = shutdown_tx.send(());
    let ticks = worker_handle.await?;
    tracing::info!(ticks, "dwmstatus stopped");
    Ok(())
}
