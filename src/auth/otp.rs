//! Time-based one-time passwords for two-factor login

use crate::{Error, Result};
use totp_rs::{Algorithm, Secret, TOTP};

const DIGITS: usize = 6;
const SKEW: u8 = 1;
const STEP_SECS: u64 = 30;

/// Normalize a base32 secret as typed by users: trimmed, uppercase, unpadded
fn normalize_secret(secret: &str) -> String {
    secret
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '=')
        .collect::<String>()
        .to_ascii_uppercase()
}

fn totp_for(secret: &str) -> Result<TOTP> {
    let bytes = Secret::Encoded(normalize_secret(secret))
        .to_bytes()
        .map_err(|e| Error::totp(format!("Invalid OTP secret: {:?}", e)))?;

    Ok(TOTP::new_unchecked(Algorithm::SHA1, DIGITS, SKEW, STEP_SECS, bytes))
}

/// One-time password for `secret` at the given Unix time
pub fn otp_at(secret: &str, timestamp: u64) -> Result<String> {
    Ok(totp_for(secret)?.generate(timestamp))
}

/// Current one-time password, `None` when no secret is configured
pub fn current_otp(secret: Option<&str>) -> Result<Option<String>> {
    let Some(secret) = secret.filter(|secret| !secret.trim().is_empty()) else {
        return Ok(None);
    };

    let otp = totp_for(secret)?
        .generate_current()
        .map_err(|e| Error::totp(format!("System time error: {}", e)))?;
    Ok(Some(otp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    // "12345678901234567890" in base32
    const RFC_SECRET: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[rstest]
    #[case(59, "287082")]
    #[case(1111111109, "081804")]
    #[case(1234567890, "005924")]
    fn test_otp_at_known_times(#[case] timestamp: u64, #[case] expected: &str) {
        assert_eq!(otp_at(RFC_SECRET, timestamp).unwrap(), expected);
    }

    #[test]
    fn test_secret_is_normalized() {
        let padded = format!("  {}==  ", RFC_SECRET.to_lowercase());
        assert_eq!(otp_at(&padded, 59).unwrap(), "287082");
    }

    #[test]
    fn test_current_otp_without_secret() {
        assert_eq!(current_otp(None).unwrap(), None);
        assert_eq!(current_otp(Some("   ")).unwrap(), None);
    }

    #[test]
    fn test_current_otp_format() {
        let otp = current_otp(Some("JBSWY3DPEHPK3PXP")).unwrap().unwrap();
        assert_eq!(otp.len(), 6);
        assert!(otp.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_invalid_secret() {
        let err = current_otp(Some("not base32!")).unwrap_err();
        assert!(matches!(err, Error::Totp(_)));
    }
}
