use crate::error::{EdgarError, Result};

/// Largest CIK that fits the 10-digit canonical form.
const MAX_CIK: u64 = 9_999_999_999;

/// Normalizes a CIK into the canonical zero-padded 10-digit form used in EDGAR URLs.
///
/// Surrounding whitespace is ignored and leading zeros are accepted, so `"320193"`,
/// `" 0000320193 "` and `"000000320193"` all normalize to `"0000320193"`.
///
/// # Errors
///
/// Returns `EdgarError::InvalidCik` for empty input, anything other than ASCII digits
/// (signs included), or a value that does not fit in 10 digits.
///
/// # Example
///
/// ```
/// use edgar_client::parsing::utils::normalize_cik;
/// assert_eq!(normalize_cik("320193").unwrap(), "0000320193");
/// assert!(normalize_cik("AAPL").is_err());
/// ```
pub fn normalize_cik(cik: &str) -> Result<String> {
    let trimmed = cik.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EdgarError::InvalidCik(cik.to_string()));
    }

    let value = trimmed
        .parse::<u64>()
        .ok()
        .filter(|&value| value <= MAX_CIK)
        .ok_or_else(|| EdgarError::InvalidCik(cik.to_string()))?;

    Ok(format!("{:010}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_to_ten_digits() {
        assert_eq!(normalize_cik("320193").unwrap(), "0000320193");
        assert_eq!(normalize_cik("1").unwrap(), "0000000001");
        assert_eq!(normalize_cik("9999999999").unwrap(), "9999999999");
    }

    #[test]
    fn test_accepts_whitespace_and_extra_leading_zeros() {
        assert_eq!(normalize_cik(" 0000320193\n").unwrap(), "0000320193");
        assert_eq!(normalize_cik("000000320193").unwrap(), "0000320193");
    }

    #[test]
    fn test_rejects_non_numeric() {
        for bad in ["", "   ", "AAPL", "32O193", "-320193", "+320193", "3201.93"] {
            assert!(
                matches!(normalize_cik(bad), Err(EdgarError::InvalidCik(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_rejects_values_wider_than_ten_digits() {
        assert!(matches!(
            normalize_cik("10000000000"),
            Err(EdgarError::InvalidCik(_))
        ));
    }
}
