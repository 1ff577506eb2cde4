//! Compact, URL-safe encoding of a zoom window.
//!
//! Each bound is converted to milliseconds (`value * axis.scale`), rounded and
//! written in base 36; the two bounds are joined with `-`, e.g.
//! `ikd7pc00-kauas5c0`. Decoding divides by the scale of the target axis, so a
//! height-axis key stays meaningful as long as the block time is unchanged.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use super::value_objects::{Axis, ZoomRange};
use crate::domain::errors::{ZoomError, ZoomResult};

const DELIMITER: char = '-';
const RADIX: u32 = 36;
/// Largest integer f64 holds exactly (2^53)
const MAX_EXACT: u64 = 9_007_199_254_740_992;

/// Value Object - encoded zoom window as stored in the query string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoomKey(String);

impl ZoomKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ZoomKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn encode(range: &ZoomRange) -> ZoomKey {
    let axis = range.axis();
    ZoomKey(format!(
        "{}{}{}",
        to_base36(to_ms(range.start(), &axis)),
        DELIMITER,
        to_base36(to_ms(range.end(), &axis))
    ))
}

pub fn decode(key: &str, axis: Axis) -> ZoomResult<ZoomRange> {
    let mut parts = key.split(DELIMITER);
    let (Some(start), Some(end), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ZoomError::invalid_key(key, "expected two bounds separated by '-'"));
    };
    let start_ms = from_base36(key, start)?;
    let end_ms = from_base36(key, end)?;
    if end_ms <= start_ms {
        return Err(ZoomError::invalid_key(key, "end does not follow start"));
    }
    ZoomRange::new(axis.units_from_ms(start_ms as f64), axis.units_from_ms(end_ms as f64), axis)
        .map_err(|e| ZoomError::invalid_key(key, e.to_string()))
}

fn to_ms(value: f64, axis: &Axis) -> u64 {
    let ms = axis.ms_from_units(value).round();
    if ms <= 0.0 {
        0
    } else {
        (ms as u64).min(MAX_EXACT)
    }
}

fn to_base36(mut n: u64) -> String {
    if n == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while n > 0 {
        // Safe: remainder is always < 36
        let digit = std::char::from_digit((n % RADIX as u64) as u32, RADIX).unwrap_or('0');
        digits.push(digit);
        n /= RADIX as u64;
    }
    digits.iter().rev().collect()
}

fn from_base36(key: &str, part: &str) -> ZoomResult<u64> {
    if part.is_empty() {
        return Err(ZoomError::invalid_key(key, "empty bound"));
    }
    let part = part.to_ascii_lowercase();
    if !part.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()) {
        return Err(ZoomError::invalid_key(key, format!("'{}' is not base-36", part)));
    }
    let value = u64::from_str_radix(&part, RADIX)
        .map_err(|e| ZoomError::invalid_key(key, e.to_string()))?;
    if value > MAX_EXACT {
        return Err(ZoomError::invalid_key(key, "bound out of range"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_dashboard_default_key() {
        let range = decode("ikd7pc00-kauas5c0", Axis::time()).unwrap();
        assert_eq!(range.start(), 1_454_889_600_000.0);
        assert_eq!(range.end(), 1_590_883_200_000.0);
    }

    #[test]
    fn encodes_time_range() {
        let range = ZoomRange::new(1_454_889_600_000.0, 1_590_883_200_000.0, Axis::time()).unwrap();
        assert_eq!(encode(&range).as_str(), "ikd7pc00-kauas5c0");
    }

    #[test]
    fn height_keys_carry_block_time() {
        let axis = Axis::height(300_000.0).unwrap();
        let range = ZoomRange::new(1_000.0, 2_500.0, axis).unwrap();
        let key = encode(&range);
        let back = decode(key.as_str(), axis).unwrap();
        assert_eq!((back.start(), back.end()), (1_000.0, 2_500.0));
    }

    #[test]
    fn rejects_malformed_keys() {
        for key in ["", "abc", "a-b-c", "-b2", "a1-", "a1-b_", "+1-2"] {
            assert!(
                matches!(decode(key, Axis::time()), Err(ZoomError::InvalidZoomKey { .. })),
                "{key} should fail"
            );
        }
    }

    #[test]
    fn accepts_uppercase_digits() {
        let range = decode("IKD7PC00-KAUAS5C0", Axis::time()).unwrap();
        assert_eq!((range.start(), range.end()), (1_454_889_600_000.0, 1_590_883_200_000.0));
    }

    #[test]
    fn rejects_inverted_keys() {
        assert!(matches!(decode("b2-a1", Axis::time()), Err(ZoomError::InvalidZoomKey { .. })));
        assert!(matches!(decode("a1-a1", Axis::time()), Err(ZoomError::InvalidZoomKey { .. })));
    }
}
