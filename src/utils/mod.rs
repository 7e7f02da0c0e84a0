use std::time::{Duration, Instant};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LeakTestError {
    #[error("Random source unavailable: {0}")]
    Entropy(String),
    #[error("Request to {endpoint} failed: {message}")]
    Transport {
        endpoint: &'static str,
        message: String,
    },
    #[error("Failed to decode resolver records: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("DNS resolution failed: {0}")]
    DnsResolution(String),
    #[error("Invalid probe identifier: {0}")]
    InvalidProbeId(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LeakTestError>;

pub fn format_duration(duration: Duration) -> String {
    let ms = duration.as_millis();
    if ms < 1000 {
        format!("{ms}ms")
    } else {
        format!("{:.2}s", duration.as_secs_f32())
    }
}

pub async fn measure_time<F, Fut, T>(f: F) -> (Duration, T)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = T>,
{
    let start = Instant::now();
    let result = f().await;
    let duration = start.elapsed();
    (duration, result)
}

/// Number of decimal digits in `number`. Zero has no digits.
pub fn digit_count(mut number: usize) -> usize {
    let mut count = 0;
    while number != 0 {
        number /= 10;
        count += 1;
    }
    count
}

/// Renders `completed/total` with `completed` zero-padded to the width of `total`.
pub fn format_progress(completed: usize, total: usize) -> String {
    format!("{completed:0width$}/{total}", width = digit_count(total))
}
