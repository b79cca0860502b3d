//! The `Cpf` value type and the gate chain that produces it.
//!
//! A candidate passes, in order: presence, length (after stripping everything that is not an
//! ASCII digit), repeated digits, and both check digits. The first failing gate is reported
//! as a [`Rejection`]; nothing after it runs.

use std::fmt;
use std::str::FromStr;

/// Number of digits in a CPF, check digits included.
pub const CPF_LEN: usize = 11;
/// Number of leading digits the check digits are computed from.
pub const BASE_LEN: usize = 9;

const FIRST_CHECK_WEIGHTS: [u16; BASE_LEN] = [10, 9, 8, 7, 6, 5, 4, 3, 2];
const SECOND_CHECK_WEIGHTS: [u16; BASE_LEN + 1] = [11, 10, 9, 8, 7, 6, 5, 4, 3, 2];

/// Why a candidate is not a CPF. `Display` renders the message returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("no CPF supplied")]
    Missing,

    /// `stripped` is the candidate with whitespace removed, echoed back to the client.
    #[error("must contain exactly 11 digits, you supplied {supplied}")]
    WrongLength { supplied: usize, stripped: String },

    /// All eleven digits are the same; these pass the arithmetic but are never issued.
    #[error("invalid — check the digits and resubmit")]
    RepeatedDigits { formatted: String },

    #[error("invalid — check the digits and resubmit")]
    CheckDigits { formatted: String },
}

impl Rejection {
    /// What the client is shown next to the message: the canonical form once eleven digits
    /// were found, the stripped input for a length failure, nothing when input was missing.
    #[must_use]
    pub fn echo(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::WrongLength { stripped, .. } => Some(stripped),
            Self::RepeatedDigits { formatted } | Self::CheckDigits { formatted } => Some(formatted),
        }
    }

    /// Short name of the failing gate, for structured logs.
    #[must_use]
    pub const fn gate(&self) -> &'static str {
        match self {
            Self::Missing => "presence",
            Self::WrongLength { .. } => "length",
            Self::RepeatedDigits { .. } => "repeated_digits",
            Self::CheckDigits { .. } => "check_digits",
        }
    }
}

/// A structurally valid CPF: eleven digits, not all equal, with correct check digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cpf([u8; CPF_LEN]);

impl Cpf {
    /// Runs `candidate` through every gate.
    ///
    /// Punctuation and whitespace are ignored, so `"529.982.247-25"`, `" 52998224725\n"` and
    /// `"529 982 247 25"` all parse to the same value.
    ///
    /// # Errors
    /// Returns the [`Rejection`] of the first gate that fails.
    ///
    /// # Example
    /// ```rust
    /// use valida_cpf::Cpf;
    ///
    /// let cpf = Cpf::parse("52998224725").unwrap();
    /// assert_eq!(cpf.to_string(), "529.982.247-25");
    /// ```
    pub fn parse(candidate: &str) -> Result<Self, Rejection> {
        if candidate.trim().is_empty() {
            return Err(Rejection::Missing);
        }

        let stripped = strip_whitespace(candidate);
        let digits = ascii_digits(&stripped);

        let Ok(digits) = <[u8; CPF_LEN]>::try_from(digits.as_slice()) else {
            return Err(Rejection::WrongLength { supplied: digits.len(), stripped });
        };

        Self::from_digits(digits)
    }

    /// Runs eleven digit values (`0..=9`, not ASCII) through the repeated-digit and
    /// check-digit gates.
    fn from_digits(digits: [u8; CPF_LEN]) -> Result<Self, Rejection> {
        debug_assert!(digits.iter().all(|d| *d <= 9));

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(Rejection::RepeatedDigits { formatted: format_canonical(&digits) });
        }

        let mut base = [0; BASE_LEN];
        base.copy_from_slice(&digits[..BASE_LEN]);
        if check_digits(&base) != [digits[9], digits[10]] {
            return Err(Rejection::CheckDigits { formatted: format_canonical(&digits) });
        }

        Ok(Self(digits))
    }

    /// Completes nine base digits with their check digits.
    ///
    /// Returns `None` when a value is not a decimal digit or the result would consist of one
    /// repeated digit.
    #[must_use]
    pub fn from_base(base: [u8; BASE_LEN]) -> Option<Self> {
        if base.iter().any(|d| *d > 9) {
            return None;
        }

        let [first, second] = check_digits(&base);
        let mut digits = [0; CPF_LEN];
        digits[..BASE_LEN].copy_from_slice(&base);
        digits[9] = first;
        digits[10] = second;

        Self::from_digits(digits).ok()
    }

    /// Digit values, check digits last.
    #[must_use]
    pub const fn digits(&self) -> &[u8; CPF_LEN] {
        &self.0
    }

    /// The eleven digits without punctuation, e.g. `"52998224725"`.
    #[must_use]
    pub fn unformatted(&self) -> String {
        self.0.iter().map(|d| char::from(b'0' + d)).collect()
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_canonical(&self.0))
    }
}

impl FromStr for Cpf {
    type Err = Rejection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Both check digits for nine base digits.
///
/// The second digit is weighted over the base plus the first check digit.
#[must_use]
pub fn check_digits(base: &[u8; BASE_LEN]) -> [u8; 2] {
    let first = check_digit(base, &FIRST_CHECK_WEIGHTS);

    let mut extended = [0; BASE_LEN + 1];
    extended[..BASE_LEN].copy_from_slice(base);
    extended[BASE_LEN] = first;
    let second = check_digit(&extended, &SECOND_CHECK_WEIGHTS);

    [first, second]
}

/// Weighted sum mod 11: a remainder below 2 yields 0, anything else `11 - remainder`.
fn check_digit(digits: &[u8], weights: &[u16]) -> u8 {
    let sum: u16 = digits.iter().zip(weights).map(|(d, w)| u16::from(*d) * w).sum();
    match u8::try_from(sum % 11) {
        Ok(remainder) if remainder >= 2 => 11 - remainder,
        _ => 0,
    }
}

/// Renders eleven digit values as `DDD.DDD.DDD-DD`.
#[must_use]
pub fn format_canonical(digits: &[u8; CPF_LEN]) -> String {
    let mut out = String::with_capacity(CPF_LEN + 3);
    for (i, d) in digits.iter().enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {},
        }
        out.push(char::from(b'0' + d));
    }
    out
}

/// Removes every whitespace character, line breaks and tabs included.
#[must_use]
fn strip_whitespace(candidate: &str) -> String {
    candidate.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Digit values of the ASCII digits in `s`, in order; everything else is dropped.
fn ascii_digits(s: &str) -> Vec<u8> {
    s.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_digits_match_known_cpfs() {
        assert_eq!(check_digits(&[5, 2, 9, 9, 8, 2, 2, 4, 7]), [2, 5]);
        assert_eq!(check_digits(&[1, 1, 1, 4, 4, 4, 7, 7, 7]), [3, 5]);
    }

    #[test]
    fn low_remainders_give_zero() {
        assert_eq!(check_digit(&[0; BASE_LEN], &FIRST_CHECK_WEIGHTS), 0);
        // 11 * 1 = 11 -> remainder 0 -> 0.
        assert_eq!(check_digit(&[1, 0, 0, 0, 0, 0, 0, 0, 0, 0], &SECOND_CHECK_WEIGHTS), 0);
        // 10 * 1 + 9 * 1 + 2 * 1 = 21 -> remainder 10 -> 1.
        assert_eq!(check_digit(&[1, 1, 0, 0, 0, 0, 0, 0, 1], &FIRST_CHECK_WEIGHTS), 1);
    }

    #[test]
    fn formats_with_dots_and_dash() {
        assert_eq!(format_canonical(&[5, 2, 9, 9, 8, 2, 2, 4, 7, 2, 5]), "529.982.247-25");
    }

    #[test]
    fn strips_every_kind_of_whitespace() {
        assert_eq!(strip_whitespace(" 529.982\t247-25\r\n"), "529.982247-25");
    }

    #[test]
    fn from_base_completes_check_digits() {
        let cpf = Cpf::from_base([5, 2, 9, 9, 8, 2, 2, 4, 7]).expect("valid base");
        assert_eq!(cpf.unformatted(), "52998224725");
    }

    #[test]
    fn from_base_refuses_non_digits_and_repetitions() {
        assert!(Cpf::from_base([5, 2, 9, 9, 8, 2, 2, 4, 10]).is_none());
        // 111111111 completes to 11111111111.
        assert!(Cpf::from_base([1; BASE_LEN]).is_none());
    }

    #[test]
    fn rejection_gates_are_named() {
        assert_eq!(Rejection::Missing.gate(), "presence");
        assert_eq!(
            Rejection::WrongLength { supplied: 3, stripped: "123".to_owned() }.gate(),
            "length"
        );
    }
}
