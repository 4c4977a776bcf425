//! Graceful shutdown handling.

use tokio_util::sync::CancellationToken;

/// Shuts down the background progress-logging task.
///
/// Signals the task to stop and awaits it so its final line is flushed
/// before the report prints.
pub async fn shutdown_gracefully(
    cancel: CancellationToken,
    logging_task: Option<tokio::task::JoinHandle<()>>,
) {
    cancel.cancel();
    if let Some(logging_task) = logging_task {
        let _ = logging_task.await;
    }
}
