use tokio::signal;
use tracing::warn;

/// 阻塞等待进程终止信号
pub async fn wait_for_shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    warn!("Shutdown signal received, stopping server gracefully...");
}
