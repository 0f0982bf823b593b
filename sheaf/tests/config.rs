use sheaf::{BatchConfig, BatchOptions, ConfigurationError, ShutdownPolicy};
use std::{num::NonZeroUsize, time::Duration};

#[test]
fn test_valid_configurations() {
    let cases = [(10, 10), (0, 10), (10, 0), (1, 0), (0, 1)];
    for (batch_size, timeout_ms) in cases {
        let config = BatchConfig::new(batch_size, timeout_ms).unwrap();
        assert_eq!(config.batch_size(), NonZeroUsize::new(batch_size));
        assert_eq!(
            config.timeout(),
            (timeout_ms > 0).then(|| Duration::from_millis(timeout_ms))
        );
    }
}

#[test]
fn test_both_disabled_always_fails() {
    assert_eq!(
        BatchConfig::new(0, 0),
        Err(ConfigurationError::NoReleaseCondition)
    );
    assert_eq!(
        BatchConfig::try_from(BatchOptions::default()),
        Err(ConfigurationError::NoReleaseCondition)
    );
    assert_eq!(
        BatchConfig::builder().timeout(Duration::ZERO).build(),
        Err(ConfigurationError::NoReleaseCondition)
    );
}

#[test]
fn test_options_carry_shutdown_policy() {
    let config = BatchConfig::try_from(
        BatchOptions::new()
            .with_timeout_ms(5)
            .with_shutdown(ShutdownPolicy::Flush),
    )
    .unwrap();
    assert_eq!(config.shutdown(), ShutdownPolicy::Flush);
}

#[cfg(feature = "serde")]
#[test]
fn test_options_from_json() {
    let options: BatchOptions = serde_json::from_str(
        r#"{ "batch": 10, "timeout": 10, "output": "out", "input": "in", "error": "errors" }"#,
    )
    .unwrap();
    let config = BatchConfig::try_from(&options).unwrap();
    assert_eq!(config.batch_size(), NonZeroUsize::new(10));
    assert_eq!(options.targets().error.as_deref(), Some("errors"));
}
