//! Tokio-backed implementation of the core's delay collaborator.

use std::time::Duration;

use futures::future::BoxFuture;

use papermint_core::time::Timer;

/// Timer driven by the tokio runtime's clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    fn delay(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}
