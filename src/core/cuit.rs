//! CUIT format validation.
//!
//! A CUIT (Clave Única de Identificación Tributaria) is an 11-digit
//! identifier `TT-NNNNNNNN-V` where the last digit is a mod-11 check
//! digit over the first ten.

use std::fmt;

/// Error returned when a CUIT fails format validation.
#[derive(Debug, Clone)]
pub struct CuitFormatError {
    /// The invalid input value.
    pub value: String,
    /// Why the value failed validation.
    pub reason: String,
}

impl fmt::Display for CuitFormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid CUIT '{}': {}", self.value, self.reason)
    }
}

impl std::error::Error for CuitFormatError {}

/// Validate a CUIT by format and check digit (no network call).
///
/// Accepts the bare 11 digits or the dashed `TT-NNNNNNNN-V` form.
/// Returns the numeric CUIT on success.
pub fn validate_cuit(cuit: &str) -> Result<u64, CuitFormatError> {
    let digits: String = cuit.chars().filter(|c| *c != '-').collect();

    if digits.len() != 11 {
        return Err(CuitFormatError {
            value: cuit.into(),
            reason: format!("expected 11 digits, got {}", digits.len()),
        });
    }
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(CuitFormatError {
            value: cuit.into(),
            reason: "contains non-digit characters".into(),
        });
    }

    let nums: Vec<u32> = digits.chars().map(|c| c.to_digit(10).unwrap()).collect();
    let expected = cuit_check_digit(&nums[..10]);
    if nums[10] != expected {
        return Err(CuitFormatError {
            value: cuit.into(),
            reason: format!("check digit mismatch (expected {expected})"),
        });
    }

    // 11 digits always fit in u64
    Ok(digits.parse().unwrap())
}

/// Compute the mod-11 check digit for the first ten CUIT digits.
///
/// Weights 5,4,3,2,7,6,5,4,3,2; remainder 11 maps to 0 and 10 maps to 9
/// (AFIP assigns those CUITs a different prefix in practice).
pub fn cuit_check_digit(first_ten: &[u32]) -> u32 {
    const WEIGHTS: [u32; 10] = [5, 4, 3, 2, 7, 6, 5, 4, 3, 2];
    let sum: u32 = first_ten
        .iter()
        .zip(WEIGHTS.iter())
        .map(|(d, w)| d * w)
        .sum();
    match 11 - (sum % 11) {
        11 => 0,
        10 => 9,
        v => v,
    }
}
