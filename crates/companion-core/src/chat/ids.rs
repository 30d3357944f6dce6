use chrono::{DateTime, Utc};

/// Generates time-based ids (`<prefix>_<unix millis>`) that never repeat.
///
/// Two requests inside the same millisecond (or after a clock step back)
/// get the previous value plus one, so ids are strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonotonicIds {
    last: i64,
}

impl MonotonicIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str, now: DateTime<Utc>) -> String {
        let millis = now.timestamp_millis().max(self.last + 1);
        self.last = millis;
        format!("{}_{}", prefix, millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique_within_one_millisecond() {
        let mut ids = MonotonicIds::new();
        let now = Utc::now();
        let first = ids.next("chat", now);
        let second = ids.next("chat", now);
        assert_ne!(first, second);
        assert!(first.starts_with("chat_"));
    }

    #[test]
    fn test_ids_survive_clock_going_backwards() {
        let mut ids = MonotonicIds::new();
        let now = Utc::now();
        let first = ids.next("msg", now);
        let second = ids.next("msg", now - chrono::Duration::seconds(10));
        let parse = |s: &str| s.trim_start_matches("msg_").parse::<i64>().unwrap();
        assert!(parse(&second) > parse(&first));
    }
}
