//! Delay collaborator.
//!
//! The core never sleeps on its own; whoever drives a session supplies a
//! [`Timer`].  Keeping the trait runtime-agnostic (boxed futures, no tokio
//! dependency) lets tests complete delays instantly.

use std::time::Duration;

use futures::future::BoxFuture;

/// Non-blocking timed wait.
pub trait Timer: Send + Sync {
    fn delay(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Timer whose delays complete immediately.  Test collaborator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Timer for NoDelay {
    fn delay(&self, _duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(futures::future::ready(()))
    }
}
