//! Logging and panic reporting setup.
//!
//! In the browser, panics go to the console via `console_error_panic_hook`
//! and `tracing` events are forwarded with `tracing-wasm`. Native builds
//! (tests, tooling) use a `tracing-subscriber` fmt layer filtered by
//! `RUST_LOG`.

#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
}

#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    // A subscriber may already be installed by the host; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sculpting=info,sculpt_wasm=info".into()),
        )
        .try_init();
}
