//! Deadlines expressed as cancellation tokens

use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Child of `parent` that is also cancelled once `timeout` elapses.
///
/// Must be called from within a Tokio runtime. The timer task exits early
/// when the returned token is cancelled by any other means.
pub fn cancel_after(parent: &CancellationToken, timeout: Duration) -> CancellationToken {
    let token = parent.child_token();
    let timer = token.clone();
    tokio::spawn(async move {
        tokio::select! {
            _ = timer.cancelled() => {}
            _ = tokio::time::sleep(timeout) => timer.cancel(),
        }
    });
    token
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_fires_after_timeout() {
        let parent = CancellationToken::new();
        let token = cancel_after(&parent, Duration::from_millis(200));

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert!(!token.is_cancelled());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(token.is_cancelled());
        assert!(!parent.is_cancelled());
    }

    #[tokio::test]
    async fn test_parent_cancellation_propagates() {
        let parent = CancellationToken::new();
        let token = cancel_after(&parent, Duration::from_secs(3600));
        parent.cancel();
        assert!(token.is_cancelled());
    }
}
