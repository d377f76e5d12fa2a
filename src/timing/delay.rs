//! Cancellable delay
//!
//! Resolves after a duration, or fails with `Cancelled` as soon as the
//! token fires. A token cancelled before the call never starts a timer, so
//! a cancellation requested before a suspension point is never missed.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{DemoError, Result};

/// Sleep for `duration`, observing `token`.
///
/// A zero duration is a valid single yield point and still observes
/// cancellation.
pub async fn delay(duration: Duration, token: &CancellationToken) -> Result<()> {
    if token.is_cancelled() {
        return Err(DemoError::Cancelled);
    }

    tokio::select! {
        _ = token.cancelled() => Err(DemoError::Cancelled),
        _ = tokio::time::sleep(duration) => Ok(()),
    }
}

/// Millisecond convenience wrapper over [`delay`].
pub async fn delay_ms(ms: u64, token: &CancellationToken) -> Result<()> {
    delay(Duration::from_millis(ms), token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_delay_resolves_after_duration() {
        let token = CancellationToken::new();
        let start = Instant::now();
        delay_ms(250, &token).await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_fails_immediately() {
        let token = CancellationToken::new();
        token.cancel();

        let start = Instant::now();
        let err = delay_ms(10_000, &token).await.unwrap_err();
        assert!(err.is_cancelled());
        // No timer was started.
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_mid_delay() {
        let token = CancellationToken::new();
        let child = token.clone();

        let task = tokio::spawn(async move { delay_ms(10_000, &child).await });

        tokio::time::sleep(Duration::from_millis(50)).await;
        token.cancel();

        let err = task.await.unwrap().unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_is_a_yield_point() {
        let token = CancellationToken::new();
        delay_ms(0, &token).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_still_observes_cancellation() {
        let token = CancellationToken::new();
        token.cancel();
        let err = delay_ms(0, &token).await.unwrap_err();
        assert!(err.is_cancelled());
    }
}
