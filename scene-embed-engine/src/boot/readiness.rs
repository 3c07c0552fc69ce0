use crate::boot::error::BootError;

/// Poll `probe` every `poll_interval_ms` until it reports the capability as
/// present, failing once the elapsed budget reaches `timeout_ms`. The loop
/// owns its only timer through the awaited sleep, so neither outcome can
/// leave one running.
pub async fn await_capability(
    probe: impl Fn() -> bool,
    sleep: impl AsyncFn(u32),
    timeout_ms: u32,
    poll_interval_ms: u32,
) -> Result<(), BootError> {
    let mut elapsed_ms = 0;
    loop {
        if probe() {
            return Ok(());
        }
        elapsed_ms += poll_interval_ms;
        if elapsed_ms >= timeout_ms {
            return Err(BootError::CapabilityTimeout {
                waited_ms: elapsed_ms,
            });
        }
        sleep(poll_interval_ms).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_resolves_once_the_capability_appears() {
        let checks = Cell::new(0);
        let result = pollster::block_on(await_capability(
            || {
                checks.set(checks.get() + 1);
                checks.get() >= 4
            },
            async |_ms| {},
            10_000,
            100,
        ));
        assert!(result.is_ok());
        assert_eq!(checks.get(), 4);
    }

    #[test]
    fn test_times_out_when_the_capability_never_appears() {
        let err = pollster::block_on(await_capability(|| false, async |_ms| {}, 1000, 100))
            .unwrap_err();
        assert_eq!(err, BootError::CapabilityTimeout { waited_ms: 1000 });
    }

    #[test]
    fn test_immediate_presence_needs_no_sleep() {
        let slept = Cell::new(false);
        let result = pollster::block_on(await_capability(
            || true,
            async |_ms| slept.set(true),
            1000,
            100,
        ));
        assert!(result.is_ok());
        assert!(!slept.get());
    }
}
