//! Setting value validation.

use thermal_raster::DeviceClass;

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
///
/// Empty values are always accepted; they mean "use the default".
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Ok(());
    }
    match key {
        "DEVICE_CLASS" => {
            value.parse::<DeviceClass>()?;
        }
        "TARGET_WIDTH" => validate_int_range(value, 1, 8192)?,
        "TARGET_HEIGHT" => validate_int_range(value, 0, 65535)?,
        "THRESHOLD" | "DITHER_THRESHOLD" => validate_int_range(value, 0, 255)?,
        "LOOKAHEAD" => validate_int_range(value, 0, 16)?,
        "DITHER" | "DEBUG_OUTPUT" => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_values_are_accepted() {
        for key in ["DEVICE_CLASS", "TARGET_WIDTH", "DITHER", "LOOKAHEAD"] {
            assert!(validate_setting(key, "").is_ok(), "{key}");
        }
    }

    #[test]
    fn device_class_must_be_known() {
        assert!(validate_setting("DEVICE_CLASS", "wide").is_ok());
        assert!(validate_setting("DEVICE_CLASS", "2").is_ok());
        assert!(validate_setting("DEVICE_CLASS", "huge").is_err());
    }

    #[test]
    fn widths_and_thresholds_are_range_checked() {
        assert!(validate_setting("TARGET_WIDTH", "384").is_ok());
        assert!(validate_setting("TARGET_WIDTH", "0").is_err());
        assert!(validate_setting("TARGET_WIDTH", "abc").is_err());
        assert!(validate_setting("THRESHOLD", "255").is_ok());
        assert!(validate_setting("THRESHOLD", "256").is_err());
        assert!(validate_setting("DITHER_THRESHOLD", "-1").is_err());
        assert!(validate_setting("LOOKAHEAD", "17").is_err());
    }

    #[test]
    fn booleans_are_strict() {
        assert!(validate_setting("DITHER", "true").is_ok());
        assert!(validate_setting("DEBUG_OUTPUT", "false").is_ok());
        assert!(validate_setting("DITHER", "yes").is_err());
    }

    #[test]
    fn unknown_keys_pass() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }
}
