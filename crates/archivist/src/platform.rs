//! Platform shims for async timing.
//!
//! The browser has no tokio runtime, so timers go through `gloo-timers`
//! there and through `tokio::time` on native targets.

/// Sleeps for `ms` milliseconds without blocking the UI thread.
pub async fn sleep_ms(ms: u32) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::TimeoutFuture::new(ms).await;

    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(std::time::Duration::from_millis(u64::from(ms))).await;
}
