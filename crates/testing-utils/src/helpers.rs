//! Test helper utilities and common testing patterns

use std::future::Future;
use std::time::Duration;

use roster_core::{Channel, Payload};
use roster_infrastructure::MemoryChannel;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// Test environment setup utilities
pub struct TestEnv;

impl TestEnv {
    /// Wait for a condition to be true with timeout
    pub async fn wait_for<F, Fut>(mut condition: F, timeout: Duration) -> bool
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        let start = std::time::Instant::now();

        while start.elapsed() < timeout {
            if condition().await {
                return true;
            }
            sleep(Duration::from_millis(10)).await;
        }

        false
    }
}

/// Runs a simulated worker on its side of the channel
///
/// Every received order is answered with `handler(order)`. The task ends when
/// the dispatcher side goes away and yields the number of orders served.
pub fn spawn_worker<F>(worker_side: MemoryChannel, handler: F) -> JoinHandle<usize>
where
    F: Fn(Payload) -> Payload + Send + 'static,
{
    tokio::spawn(async move {
        let mut served = 0;
        while let Ok(Some(order)) = worker_side.receive().await {
            if worker_side.send(handler(order)).await.is_err() {
                break;
            }
            served += 1;
        }
        served
    })
}
