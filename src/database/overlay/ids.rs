//! Time-based identifiers and timestamps

use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

pub const CONFIG_ID_PREFIX: &str = "cfg";
pub const WIDGET_ID_PREFIX: &str = "wid";

static LAST_NANOS: AtomicI64 = AtomicI64::new(0);

/// Current Unix time in seconds
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

/// Next identifier nanosecond, strictly greater than any handed out before
/// by this process.
fn next_nanos() -> i64 {
    let now = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros().saturating_mul(1000));

    let mut last = LAST_NANOS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last.saturating_add(1));
        match LAST_NANOS.compare_exchange_weak(last, next, Ordering::Relaxed, Ordering::Relaxed) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}

/// Generate `<prefix>_<unix-nanos>`
pub fn generate_id(prefix: &str) -> String {
    format!("{}_{}", prefix, next_nanos())
}

pub fn new_config_id() -> String {
    generate_id(CONFIG_ID_PREFIX)
}

pub fn new_widget_id() -> String {
    generate_id(WIDGET_ID_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_id_format() {
        let id = new_config_id();
        let (prefix, nanos) = id.split_once('_').unwrap();
        assert_eq!(prefix, "cfg");
        assert!(nanos.parse::<i64>().unwrap() > 0);
        assert!(new_widget_id().starts_with("wid_"));
    }

    #[test]
    fn test_ids_unique_in_tight_loop() {
        let ids: HashSet<String> = (0..10_000).map(|_| new_widget_id()).collect();
        assert_eq!(ids.len(), 10_000);
    }

    #[test]
    fn test_ids_unique_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| (0..1000).map(|_| next_nanos()).collect::<Vec<_>>()))
            .collect();
        let mut all = HashSet::new();
        for handle in handles {
            for nanos in handle.join().unwrap() {
                assert!(all.insert(nanos));
            }
        }
    }
}
