//! Long-polling loop.

use tokio_util::sync::CancellationToken;

use super::handler::Dispatcher;
use crate::config::POLL_ERROR_PAUSE;
use crate::error_handling::ErrorType;
use crate::telegram::ChatTransport;

impl<T: ChatTransport> Dispatcher<T> {
    /// Polls for updates and handles them one at a time until `shutdown` fires.
    ///
    /// A failed poll is logged and retried after a fixed pause. Cancellation is
    /// observed between batches, so the message in flight always completes.
    pub async fn run_polling(&self, poll_timeout_secs: u64, shutdown: CancellationToken) {
        let mut offset: Option<i64> = None;

        loop {
            let polled = tokio::select! {
                _ = shutdown.cancelled() => break,
                polled = self.transport.get_updates(offset, poll_timeout_secs) => polled,
            };

            match polled {
                Ok(updates) => {
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        self.handle_update(&update).await;
                    }
                }
                Err(e) => {
                    log::warn!("Polling for updates failed: {}", e);
                    self.stats.increment_error(ErrorType::UpdatePollError);
                    tokio::select! {
                        _ = shutdown.cancelled() => break,
                        _ = tokio::time::sleep(POLL_ERROR_PAUSE) => {}
                    }
                }
            }
        }

        // Confirm handled updates so they are not redelivered on the next start
        if let Some(offset) = offset {
            if let Err(e) = self.transport.get_updates(Some(offset), 0).await {
                log::debug!("Could not confirm updates before {}: {}", offset, e);
            }
        }
        log::info!("Polling stopped");
    }
}
