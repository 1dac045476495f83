use super::{Browser, NavigationError, NavigationFailure};
use futures::{Stream, StreamExt};
use std::time::Duration;
use tracing::{debug, trace, warn};

/// Bounds for [`navigate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub attempts: u32,
    /// Budget for a single attempt, load & network idle together.
    pub idle_timeout: Duration,
    /// Pause between failed attempts.
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: 4,
            idle_timeout: Duration::from_secs(30),
            backoff: Duration::ZERO,
        }
    }
}

/// Navigate to `url` and wait for the page to settle, retrying up to `policy.attempts` times.
///
/// Returns the attempt that succeeded. Failures are logged & classified, never discarded; on
/// exhaustion the caller decides whether the (possibly stale) page is still worth reading.
pub async fn navigate<B>(
    browser: &mut B,
    url: &str,
    policy: &RetryPolicy,
) -> Result<u32, NavigationError>
where
    B: Browser + ?Sized,
{
    let attempts = policy.attempts.max(1);
    let mut last = NavigationFailure::Other("no attempt made".to_string());

    for attempt in 1..=attempts {
        let time = std::time::Instant::now();
        trace!("navigating to {url}, attempt {attempt}/{attempts}");

        let outcome = tokio::time::timeout(policy.idle_timeout, settle(browser, url))
            .await
            .unwrap_or(Err(NavigationFailure::Timeout(policy.idle_timeout)));

        match outcome {
            Ok(()) => {
                debug!("{url} loaded, {}", crate::time_elapsed(time));
                return Ok(attempt);
            }
            Err(err) => {
                warn!("failed to load {url}, attempt {attempt}/{attempts}, error({err})");
                last = err;
            }
        }

        if attempt < attempts && !policy.backoff.is_zero() {
            tokio::time::sleep(policy.backoff).await;
        }
    }

    Err(NavigationError {
        url: url.to_string(),
        attempts,
        last,
    })
}

async fn settle<B>(browser: &mut B, url: &str) -> Result<(), NavigationFailure>
where
    B: Browser + ?Sized,
{
    browser.goto(url).await?;
    browser.wait_for_network_idle().await
}

/// Resolve once `frame` reports "networkIdle" for a document committed ("init") after `events`
/// began; `events` yields `(frame, lifecycle name)` pairs. Unbounded, callers bound it.
pub async fn until_network_idle<S>(events: S, frame: &str) -> Result<(), NavigationFailure>
where
    S: Stream<Item = (String, String)>,
{
    futures::pin_mut!(events);
    let mut committed = false;

    while let Some((source, name)) = events.next().await {
        if source != frame {
            continue;
        }
        match name.as_str() {
            "init" => committed = true,
            "networkIdle" if committed => return Ok(()),
            _ => trace!("lifecycle event {name}"),
        }
    }

    Err(NavigationFailure::Other(
        "lifecycle events ended before network idle".to_string(),
    ))
}
