use assistant_service::config::AssistantConfig;
use assistant_service::startup::Application;
use service_core::observability::init_tracing;
use tokio::signal;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = match AssistantConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(std::io::Error::other(format!("Configuration error: {}", e)));
        }
    };

    init_tracing("assistant-service", &config.common.log_level);

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tokio::select! {
        result = app.run_until_stopped() => result,
        _ = shutdown_signal() => Ok(()),
    }
}
