//! Scene-system connection lifecycle.

use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::{AppError, ObsConfig};
use crate::ports::{SceneClient, SceneClientFactory};

/// Fixed-delay retry applied while the scene system refuses connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ObsConfig) -> Self {
        Self { attempts: config.connect_attempts.max(1), delay: config.retry_delay() }
    }
}

/// Connect, retrying only refused connections. Any other failure is returned immediately.
pub fn connect_with_retry<F: SceneClientFactory + ?Sized>(
    factory: &F,
    policy: RetryPolicy,
) -> Result<Box<dyn SceneClient>, AppError> {
    let mut attempt = 1;
    loop {
        match factory.connect() {
            Ok(client) => {
                debug!(attempt, "connected to scene system");
                return Ok(client);
            }
            Err(err) if err.is_connection_refused() && attempt < policy.attempts => {
                warn!(
                    "{err}; retrying in {}ms (attempt {attempt}/{})",
                    policy.delay.as_millis(),
                    policy.attempts
                );
                thread::sleep(policy.delay);
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// An open scene-system session that disconnects when dropped.
pub struct SceneSession {
    client: Box<dyn SceneClient>,
    closed: bool,
}

impl SceneSession {
    pub fn open<F: SceneClientFactory + ?Sized>(
        factory: &F,
        policy: RetryPolicy,
    ) -> Result<Self, AppError> {
        Ok(Self { client: connect_with_retry(factory, policy)?, closed: false })
    }

    pub fn client(&mut self) -> &mut dyn SceneClient {
        self.client.as_mut()
    }

    /// Disconnect, surfacing the error that dropping would only log.
    pub fn close(mut self) -> Result<(), AppError> {
        self.closed = true;
        self.client.disconnect()
    }
}

impl Drop for SceneSession {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        if let Err(err) = self.client.disconnect() {
            warn!("Failed to disconnect from scene system: {err}");
        }
    }
}
