//! Password encoding and decoding
//!
//! Encoding walks the UTF-16 code units of the input, adds the running unit
//! index to each emitted value and concatenates the hex digits with no
//! separators and no zero padding. Characters outside the Basic Multilingual
//! Plane are rejected at the string entry point; the unit-level encoder
//! combines surrogate pairs into one supplementary code point before the
//! index is added.
//!
//! Decoding consumes the string two hex digits at a time and subtracts the
//! pair index. It does not reverse the variable-width encoding: a round trip
//! only holds while every encoded unit happens to occupy exactly two digits.

use crate::error::{Result, SiteError};

const HIGH_SURROGATE: std::ops::RangeInclusive<u32> = 0xD800..=0xDBFF;
const LOW_SURROGATE: std::ops::RangeInclusive<u32> = 0xDC00..=0xDFFF;

/// Encode a plain-text password into the legacy hex representation.
///
/// Characters above U+FFFF fail with [`SiteError::InvalidCharacter`], as the
/// legacy encoder rejected them before walking the units.
///
/// # Arguments
/// * `plain` - The plain-text password
///
/// # Returns
/// Uppercase hex string compatible with the `.ste` `pw` attribute
///
/// # Example
/// ```
/// use stecore::codec::encode_password;
///
/// assert_eq!(encode_password("AB").unwrap(), "4143");
/// ```
pub fn encode_password(plain: &str) -> Result<String> {
    if plain.chars().any(|c| u32::from(c) > 0xFFFF) {
        return Err(SiteError::InvalidCharacter);
    }
    encode_utf16_units(plain.encode_utf16())
}

/// Encode a raw UTF-16 code unit sequence.
///
/// [`encode_password`] feeds well-formed UTF-16 through this; the unit-level
/// entry point exists because the legacy encoder was defined over possibly
/// ill-formed UTF-16 strings. A high surrogate followed by anything other
/// than a low surrogate fails with [`SiteError::UnpairedSurrogate`]; a high
/// surrogate at the end of input is dropped, matching the legacy encoder.
pub fn encode_utf16_units<I>(units: I) -> Result<String>
where
    I: IntoIterator<Item = u16>,
{
    let mut output = String::new();
    let mut top: Option<u32> = None;

    for (i, unit) in units.into_iter().enumerate() {
        let current = u32::from(unit);
        let index = i as u32;

        if let Some(high) = top.take() {
            if LOW_SURROGATE.contains(&current) {
                let code_point = 0x10000 + ((high - 0xD800) << 10) + (current - 0xDC00);
                output.push_str(&format!("{:X}", code_point + index));
                continue;
            }
            return Err(SiteError::UnpairedSurrogate);
        }

        if HIGH_SURROGATE.contains(&current) {
            // Folded into the next unit; the index still advances for it.
            top = Some(current);
        } else {
            output.push_str(&format!("{:X}", current + index));
        }
    }

    // A trailing high surrogate is silently dropped, as the legacy encoder did.
    Ok(output)
}

/// Decode a legacy hex-encoded password back into plain text.
///
/// The input must have an even number of hex digits; each two-digit pair is
/// one encoded unit. The legacy decoder silently dropped a trailing half
/// byte and raised on underflow; both become [`SiteError::MalformedInput`]
/// here.
///
/// # Example
/// ```
/// use stecore::codec::decode_password;
///
/// assert_eq!(decode_password("4143").unwrap(), "AB");
/// ```
pub fn decode_password(encoded: &str) -> Result<String> {
    if encoded.is_empty() {
        return Ok(String::new());
    }

    if !encoded.is_ascii() {
        return Err(SiteError::MalformedInput(
            "non-ASCII character in encoded password".to_string(),
        ));
    }

    if encoded.len() % 2 != 0 {
        return Err(SiteError::MalformedInput(
            "odd number of hex digits".to_string(),
        ));
    }

    let mut units: Vec<u16> = Vec::with_capacity(encoded.len() / 2);

    for i in 0..encoded.len() / 2 {
        let pair = &encoded[i * 2..i * 2 + 2];
        let value = u32::from_str_radix(pair, 16).map_err(|_| {
            SiteError::MalformedInput(format!("invalid hex digits \"{pair}\""))
        })?;
        let index = i as u32;

        if value <= 0xFFFF {
            let unit = value.checked_sub(index).ok_or_else(|| {
                SiteError::MalformedInput(format!("unit underflow at pair {i}"))
            })?;
            units.push(unit as u16);
        } else if value <= 0x10FFFF {
            // Unreachable while pairs are two hex digits, but part of the
            // documented decode rules for the format.
            let v = value - 0x10000;
            units.push((0xD800 | (v >> 10)) as u16);
            let low = (0xDC00 | (v & 0x3FF)).checked_sub(index).ok_or_else(|| {
                SiteError::MalformedInput(format!("unit underflow at pair {i}"))
            })?;
            units.push(low as u16);
        } else {
            return Err(SiteError::OutOfRange(value));
        }
    }

    String::from_utf16(&units).map_err(|_| SiteError::InvalidCharacter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_empty() {
        assert_eq!(encode_password("").unwrap(), "");
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(decode_password("").unwrap(), "");
    }

    #[test]
    fn test_encode_known_vector() {
        // 's'+0, 'e'+1, 'c'+2, 'r'+3, 'e'+4, 't'+5
        assert_eq!(encode_password("secret").unwrap(), "736665756979");
    }

    #[test]
    fn test_decode_known_vector() {
        assert_eq!(decode_password("736665756979").unwrap(), "secret");
    }

    #[test]
    fn test_encode_is_uppercase() {
        let encoded = encode_password("zz").unwrap();
        assert_eq!(encoded, "7A7B");
    }

    #[test]
    fn test_decode_accepts_lowercase_hex() {
        assert_eq!(decode_password("7a7b").unwrap(), "zz");
    }

    #[test]
    fn test_encode_rejects_supplementary() {
        let result = encode_password("\u{1D11E}");
        assert!(matches!(result, Err(SiteError::InvalidCharacter)));
    }

    #[test]
    fn test_encode_units_combine_surrogate_pair() {
        // D834 DD1E is U+1D11E; the low surrogate sits at unit index 1, so
        // the emitted value is 0x1D11E + 1.
        assert_eq!(encode_utf16_units([0xD834, 0xDD1E]).unwrap(), "1D11F");
    }

    #[test]
    fn test_encode_units_unpaired_surrogate() {
        let result = encode_utf16_units([0xD800, 0x0041]);
        assert!(matches!(result, Err(SiteError::UnpairedSurrogate)));
    }

    #[test]
    fn test_encode_units_trailing_high_surrogate_dropped() {
        // Legacy encoder quirk: a dangling high surrogate vanishes.
        assert_eq!(encode_utf16_units([0x0041, 0xD800]).unwrap(), "41");
    }

    #[test]
    fn test_decode_odd_length() {
        let result = decode_password("414");
        assert!(matches!(result, Err(SiteError::MalformedInput(_))));
    }

    #[test]
    fn test_decode_non_hex() {
        let result = decode_password("41GZ");
        assert!(matches!(result, Err(SiteError::MalformedInput(_))));
    }

    #[test]
    fn test_decode_non_ascii() {
        let result = decode_password("41\u{100}5");
        assert!(matches!(result, Err(SiteError::MalformedInput(_))));
    }

    #[test]
    fn test_decode_underflow() {
        // Pair value 0x00 at pair index 1 would go negative.
        let result = decode_password("4100");
        assert!(matches!(result, Err(SiteError::MalformedInput(_))));
    }
}
