// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Shared test-only helpers.

/// Install a `tracing` subscriber that writes through the test harness's
/// captured output, so `tracing::warn!`/`debug!` call sites (retransmit
/// warnings, dropped-fragment logs) are visible with `cargo test -- --nocapture`.
/// Safe to call from multiple tests; only the first call wins.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}
