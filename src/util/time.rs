//! Time utility functions

use chrono::{DateTime, Utc};

/// Get the current UTC timestamp used to stamp newly created records
pub fn now() -> DateTime<Utc> {
  Utc::now()
}

/// Render a timestamp the way it appears on the wire (RFC 3339, microseconds, `Z`)
pub fn to_wire(ts: &DateTime<Utc>) -> String {
  ts.to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_now_is_monotonic_enough() {
    let t1 = now();
    std::thread::sleep(std::time::Duration::from_millis(10));
    let t2 = now();
    assert!(t2 > t1);
  }

  #[test]
  fn test_to_wire_format() {
    let ts = DateTime::parse_from_rfc3339("2026-10-17T09:30:00.123456Z")
      .unwrap()
      .with_timezone(&Utc);
    assert_eq!(to_wire(&ts), "2026-10-17T09:30:00.123456Z");
  }
}
