//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Accepted shape: +<country code><10 digits>, with an optional single space
// after the country code, e.g. "+911234567890" or "+91 1234567890".
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\+[1-9]\d{0,3}\s?\d{10}$").unwrap()
});

/// Check whether a phone number matches the accepted format.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Strip the optional formatting space so the number can be dialed.
pub fn dialable(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Mask a phone number for display (e.g., +91****7890).
pub fn mask_phone_number(phone: &str) -> String {
    let normalized = dialable(phone);
    if normalized.len() >= 8 {
        format!(
            "{}****{}",
            &normalized[0..3],
            &normalized[normalized.len() - 4..]
        )
    } else {
        "****".to_string()
    }
}
