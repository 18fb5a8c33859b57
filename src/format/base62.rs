//! Compact base-62 integers used inside strategy identifiers.
//!
//! Digits run `0-9`, `A-Z`, `a-z`, most significant first, so `"G8"` is
//! `16 * 62 + 8 = 1000`.

const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

pub fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

/// Returns `None` for empty input, characters outside the alphabet, or
/// values that do not fit in a `u64`.
pub fn decode(encoded: &str) -> Option<u64> {
    if encoded.is_empty() {
        return None;
    }

    encoded.bytes().try_fold(0u64, |acc, c| {
        let digit = digit_value(c)?;
        acc.checked_mul(62)?.checked_add(digit)
    })
}

fn digit_value(c: u8) -> Option<u64> {
    let v = match c {
        b'0'..=b'9' => c - b'0',
        b'A'..=b'Z' => c - b'A' + 10,
        b'a'..=b'z' => c - b'a' + 36,
        _ => return None,
    };
    Some(v as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_values() {
        assert_eq!(decode("G8"), Some(1000));
        assert_eq!(decode("12"), Some(64));
        assert_eq!(decode("1S"), Some(90));
        assert_eq!(decode("RS"), Some(1702));
        assert_eq!(decode("A"), Some(10));
        assert_eq!(decode("z"), Some(61));
        assert_eq!(decode("10"), Some(62));
    }

    #[test]
    fn encode_matches_decode() {
        for value in [0, 1, 9, 61, 62, 1000, 600_000, 10_000_000, u64::MAX] {
            assert_eq!(decode(&encode(value)), Some(value), "value {value}");
        }
        assert_eq!(encode(1000), "G8");
        assert_eq!(encode(0), "0");
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(decode(""), None);
        assert_eq!(decode("1-2"), None);
        assert_eq!(decode("G8 "), None);
        assert_eq!(decode("zzzzzzzzzzzzzzzzzzzz"), None);
    }
}
