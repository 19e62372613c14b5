//! Registry availability probe

use std::thread;
use std::time::Duration;

use crate::client::RegistryApi;
use crate::error::{InitError, Result};

/// Probe `api` until it answers, at most `attempts` times with `interval` between tries.
///
/// Returns the 1-based attempt that succeeded. Only reachability is checked:
/// an error status from the registry still counts as available.
pub fn wait_for_registry<A: RegistryApi + ?Sized>(
    api: &A,
    attempts: u32,
    interval: Duration,
) -> Result<u32> {
    for attempt in 1..=attempts {
        match api.ping() {
            Ok(()) => return Ok(attempt),
            Err(e) => {
                tracing::debug!(attempt, error = %e, "registry not reachable yet");
                if attempt < attempts {
                    thread::sleep(interval);
                }
            }
        }
    }

    Err(InitError::RegistryUnavailable { attempts })
}
