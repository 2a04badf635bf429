use crate::error::Error;

/// The radix-64 alphabet, in digit-value order.
///
/// The ordering is a compatibility contract: consumers transport the
/// radix-64 rendering as an opaque token and decode it against this exact
/// alphabet. Note this is not base64; there is no padding and the two
/// symbols are `+` and `-`.
pub(crate) const ALPHABET: &[u8; 64] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz+-";

/// Largest encodable value, kept at 2^53 - 1 so renderings stay
/// interoperable with consumers limited to IEEE 754 safe integers.
pub(crate) const MAX_ENCODABLE: u64 = (1 << 53) - 1;

/// 9 radix-64 digits cover 54 bits, comfortably more than the 52-bit ids.
const MAX_DIGITS: usize = 9;

/// Encode a non-negative integer as a radix-64 string.
///
/// The result uses the minimum number of digits (no leading zero digits);
/// `0` encodes as `"0"`. Fails with [`Error::NumberTooLarge`] for values
/// above 2^53 - 1.
pub fn encode(n: u64) -> Result<String, Error> {
    if n > MAX_ENCODABLE {
        return Err(Error::NumberTooLarge(n));
    }
    Ok(encode_raw(n))
}

/// Encode without the ceiling check, for values already known to fit.
pub(crate) fn encode_raw(n: u64) -> String {
    let mut digits = [0u8; MAX_DIGITS];
    let mut pos = MAX_DIGITS;
    let mut residual = n;
    loop {
        pos -= 1;
        digits[pos] = ALPHABET[(residual % 64) as usize];
        residual /= 64;
        if residual == 0 {
            break;
        }
    }
    // The alphabet is pure ASCII.
    String::from_utf8_lossy(&digits[pos..]).into_owned()
}

/// Decode a radix-64 string back to the integer it encodes.
///
/// Fails with [`Error::EmptyRadix64`] for the empty string,
/// [`Error::InvalidRadix64Digit`] for characters outside the alphabet and
/// [`Error::Radix64TooLong`] for inputs longer than 9 digits.
pub fn decode(s: &str) -> Result<u64, Error> {
    if s.is_empty() {
        return Err(Error::EmptyRadix64);
    }
    if s.len() > MAX_DIGITS {
        return Err(Error::Radix64TooLong(s.len()));
    }
    let mut result: u64 = 0;
    for c in s.chars() {
        let digit = digit_value(c).ok_or(Error::InvalidRadix64Digit(c))?;
        result = result * 64 + digit as u64;
    }
    Ok(result)
}

fn digit_value(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'A'..='Z' => Some(c as u8 - b'A' + 10),
        'a'..='z' => Some(c as u8 - b'a' + 36),
        '+' => Some(62),
        '-' => Some(63),
        _ => None,
    }
}
