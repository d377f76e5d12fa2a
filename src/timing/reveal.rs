//! Progressive text reveal
//!
//! Reveals a string over a target duration using a monotonic-clock
//! fraction rather than a per-character interval, so total duration is
//! independent of string length. Visible length never decreases, and the
//! full text is written exactly once at the end. Each poll is a
//! cancellation point.

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::domain::ViewHandle;
use crate::error::Result;
use crate::timing::delay_ms;
use crate::view::Presenter;

/// Reveal `full_text` on `el` over `total_duration_ms`, polling every
/// `poll_ms`.
///
/// Empty text or a zero duration writes the full text immediately. On
/// cancellation the partially revealed text is left as-is; the caller's
/// baseline reset clears it.
pub async fn reveal(
    view: &dyn Presenter,
    el: ViewHandle,
    full_text: &str,
    total_duration_ms: u64,
    poll_ms: u64,
    token: &CancellationToken,
) -> Result<()> {
    let chars: Vec<char> = full_text.chars().collect();
    if chars.is_empty() || total_duration_ms == 0 {
        view.set_text(el, full_text);
        return Ok(());
    }

    let start = Instant::now();
    let total_ms = total_duration_ms as f64;
    let mut shown = 0usize;
    view.set_text(el, "");

    while shown < chars.len() {
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        let fraction = (elapsed_ms / total_ms).clamp(0.0, 1.0);
        let next = if fraction >= 1.0 {
            chars.len()
        } else {
            // Never shrink what is already visible.
            shown.max((chars.len() as f64 * fraction).floor() as usize)
        };

        if next != shown {
            let visible: String = chars[..next].iter().collect();
            view.set_text(el, &visible);
            shown = next;
        }
        if shown >= chars.len() {
            break;
        }

        delay_ms(poll_ms, token).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HandleName, HandleResolver};
    use crate::view::{Command, MemoryPresenter};
    use std::time::Duration;
    use tokio::time::Instant;

    fn target(presenter: &MemoryPresenter) -> ViewHandle {
        presenter
            .resolve(HandleName::SuggestionText)
            .expect("demo shell has a suggestion text element")
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_text_is_immediate() {
        let presenter = MemoryPresenter::new();
        let el = target(&presenter);
        let token = CancellationToken::new();

        let start = Instant::now();
        reveal(&presenter, el, "", 500, 30, &token).await.unwrap();
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(presenter.text(HandleName::SuggestionText), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_sets_full_text() {
        let presenter = MemoryPresenter::new();
        let el = target(&presenter);
        let token = CancellationToken::new();

        reveal(&presenter, el, "hello", 0, 30, &token).await.unwrap();
        assert_eq!(presenter.text(HandleName::SuggestionText), "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_total_duration_is_independent_of_length() {
        let presenter = MemoryPresenter::new();
        let el = target(&presenter);
        let token = CancellationToken::new();

        let long_text = "x".repeat(400);
        let start = Instant::now();
        reveal(&presenter, el, &long_text, 300, 30, &token)
            .await
            .unwrap();
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_millis(300));
        // Bounded by duration plus one poll interval.
        assert!(elapsed <= Duration::from_millis(300 + 30 + 1));
        assert_eq!(presenter.text(HandleName::SuggestionText), long_text);
    }

    #[tokio::test(start_paused = true)]
    async fn test_visible_length_is_monotonic_and_full_text_once() {
        let presenter = MemoryPresenter::new();
        let el = target(&presenter);
        let token = CancellationToken::new();

        let text = "the quick brown fox";
        reveal(&presenter, el, text, 200, 30, &token).await.unwrap();

        let lengths: Vec<usize> = presenter
            .commands()
            .iter()
            .filter_map(|c| match c {
                Command::SetText { target, text } if *target == HandleName::SuggestionText => {
                    Some(text.chars().count())
                }
                _ => None,
            })
            .collect();

        assert!(lengths.windows(2).all(|w| w[0] <= w[1]));
        let full = text.chars().count();
        assert_eq!(lengths.iter().filter(|l| **l == full).count(), 1);
        assert_eq!(lengths.last(), Some(&full));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancellation_leaves_partial_text() {
        let presenter = std::sync::Arc::new(MemoryPresenter::new());
        let el = target(&presenter);
        let token = CancellationToken::new();
        let child = token.clone();

        let view = presenter.clone();
        let task = tokio::spawn(async move {
            reveal(&*view, el, "a long enough sentence", 1_000, 30, &child).await
        });

        tokio::time::sleep(Duration::from_millis(400)).await;
        token.cancel();

        let err = task.await.unwrap().unwrap_err();
        assert!(err.is_cancelled());

        let partial = presenter.text(HandleName::SuggestionText);
        assert!(!partial.is_empty());
        assert!(partial.chars().count() < "a long enough sentence".chars().count());
    }

    #[tokio::test(start_paused = true)]
    async fn test_multibyte_text_reveals_on_char_boundaries() {
        let presenter = MemoryPresenter::new();
        let el = target(&presenter);
        let token = CancellationToken::new();

        let text = "héllo wörld — ça va";
        reveal(&presenter, el, text, 150, 30, &token).await.unwrap();
        assert_eq!(presenter.text(HandleName::SuggestionText), text);
    }
}
