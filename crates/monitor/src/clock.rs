#![forbid(unsafe_code)]

use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::time::Duration;

#[async_trait]
pub trait Clock: Send + Sync {
    /// Wall-clock time used to stamp log lines.
    fn now(&self) -> DateTime<Local>;

    /// Wait between two poll cycles.
    async fn sleep(&self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
