/// Get the current time as milliseconds since the Unix epoch.
///
/// Post timestamps are stored in this form so they round-trip through
/// JSON as plain integers.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // 2020-01-01 in epoch millis.
        assert!(now_millis() > 1_577_836_800_000);
    }
}
