// Copyright 2024 Lexi Robinson
// Licensed under the EUPL-1.2

//! Input-range checks run synchronously before any I/O, per spec.md
//! §4.I/§7: validation faults never open an endpoint.

use std::time::Duration;

use crate::constants::{MAX_SPEED_PERCENT, MAX_TEMPERATURE_F, MIN_SPEED_PERCENT, MIN_TEMPERATURE_F};
use crate::error::{OmniError, Result};

/// Temperature set-point, in Fahrenheit: 65..=104.
pub fn temperature_f(value: i32) -> Result<i32> {
    if (MIN_TEMPERATURE_F..=MAX_TEMPERATURE_F).contains(&value) {
        Ok(value)
    } else {
        Err(OmniError::validation(format!(
            "temperature {value} out of range {MIN_TEMPERATURE_F}..={MAX_TEMPERATURE_F}"
        )))
    }
}

/// Pump/filter speed, as a percentage: 0..=100.
pub fn speed(value: i32) -> Result<i32> {
    if (MIN_SPEED_PERCENT..=MAX_SPEED_PERCENT).contains(&value) {
        Ok(value)
    } else {
        Err(OmniError::validation(format!("speed {value} out of range {MIN_SPEED_PERCENT}..={MAX_SPEED_PERCENT}")))
    }
}

/// Equipment/pool/bow system id: non-negative.
pub fn system_id(value: i32) -> Result<i32> {
    if value >= 0 {
        Ok(value)
    } else {
        Err(OmniError::validation(format!("system id {value} must be non-negative")))
    }
}

/// Network port: 1..=65535.
pub fn port(value: u16) -> Result<u16> {
    if value == 0 {
        Err(OmniError::validation("port must be in 1..=65535".to_string()))
    } else {
        Ok(value)
    }
}

/// Response timeout: must be a positive duration.
pub fn timeout(value: Duration) -> Result<Duration> {
    if value.is_zero() {
        Err(OmniError::validation("timeout must be greater than zero".to_string()))
    } else {
        Ok(value)
    }
}

/// Controller hostname/address: must not be empty.
pub fn hostname(value: &str) -> Result<&str> {
    if value.trim().is_empty() {
        Err(OmniError::validation("host must not be empty".to_string()))
    } else {
        Ok(value)
    }
}

/// ColorLogic show speed byte: 0..=8.
pub fn light_speed(value: i32) -> Result<i32> {
    if (0..=8).contains(&value) {
        Ok(value)
    } else {
        Err(OmniError::validation(format!("light speed {value} out of range 0..=8")))
    }
}

/// ColorLogic show brightness byte: 0..=4.
pub fn light_brightness(value: i32) -> Result<i32> {
    if (0..=4).contains(&value) {
        Ok(value)
    } else {
        Err(OmniError::validation(format!("light brightness {value} out of range 0..=4")))
    }
}

/// Schedule days-active bitmask: Mon=1..Sun=64, so 0..=127.
pub fn days_active(value: i32) -> Result<i32> {
    if (0..=127).contains(&value) {
        Ok(value)
    } else {
        Err(OmniError::validation(format!("days-active mask {value} out of range 0..=127")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(64, false)]
    #[case(65, true)]
    #[case(104, true)]
    #[case(105, false)]
    fn temperature_boundaries(#[case] value: i32, #[case] expect_ok: bool) {
        assert_eq!(temperature_f(value).is_ok(), expect_ok);
    }

    #[rstest]
    #[case(-1, false)]
    #[case(0, true)]
    #[case(100, true)]
    #[case(101, false)]
    fn speed_boundaries(#[case] value: i32, #[case] expect_ok: bool) {
        assert_eq!(speed(value).is_ok(), expect_ok);
    }

    #[test]
    fn port_rejects_zero() {
        assert!(port(0).is_err());
        assert!(port(10444).is_ok());
    }

    #[test]
    fn timeout_rejects_zero_duration() {
        assert!(timeout(Duration::ZERO).is_err());
        assert!(timeout(Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn hostname_rejects_empty_or_blank() {
        assert!(hostname("").is_err());
        assert!(hostname("   ").is_err());
        assert!(hostname("10.0.0.5").is_ok());
    }

    #[test]
    fn days_active_accepts_all_week_mask() {
        assert!(days_active(127).is_ok());
        assert!(days_active(128).is_err());
    }
}
