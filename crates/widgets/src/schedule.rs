//! Host scheduling for animations.
//!
//! Timers and animation frames are awaited through `document::eval`, so the
//! same code runs on web and desktop renderers.

use dioxus::prelude::*;

/// Resolve after `delay_ms` milliseconds.
pub async fn sleep(delay_ms: u32) {
    let mut eval = document::eval(&format!(
        "await new Promise((resolve) => setTimeout(resolve, {delay_ms})); dioxus.send(true);"
    ));
    if let Err(e) = eval.recv::<bool>().await {
        tracing::warn!(error = ?e, delay_ms, "timer callback was not delivered");
    }
}

/// Resolve after the next paint opportunity.
pub async fn next_frame() {
    let mut eval = document::eval(
        "await new Promise((resolve) => requestAnimationFrame(() => resolve())); dioxus.send(true);",
    );
    if let Err(e) = eval.recv::<bool>().await {
        tracing::warn!(error = ?e, "animation frame callback was not delivered");
    }
}
