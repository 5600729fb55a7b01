//! Exact accumulation of number tokens

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Signed, Zero};
use thiserror::Error;

/// A token that is neither an integer nor a decimal number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SumError {
    #[error("could not parse {0:?} as integer")]
    Integer(String),
    #[error("could not parse {0:?} as float")]
    Float(String),
}

/// Tokens (after comma removal) that contribute nothing and are skipped
const IGNORED: [&str; 5] = ["", "0", "0.0", ".0", "0."];

/// Running total of whole and fractional parts
///
/// The fractional total is an integer scaled by `10^scale`, where `scale` is
/// the longest fraction seen so far. Its magnitude stays below one unit: any
/// overflow is carried into `whole` after every addition. The two totals may
/// disagree in sign until [`Accumulator::total`] reconciles them.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    whole: BigInt,
    fraction: BigInt,
    scale: usize,
    saw_fraction: bool,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one token. Commas are ignored; a `.` makes it a decimal.
    pub fn add(&mut self, token: &str) -> Result<(), SumError> {
        let cleaned = token.replace(',', "");
        if IGNORED.iter().any(|zero| cleaned.eq_ignore_ascii_case(zero)) {
            log::debug!("ignoring empty or zero token {token:?}");
            return Ok(());
        }

        if cleaned.contains('.') {
            let (whole, fraction, digits) =
                parse_decimal(&cleaned).ok_or_else(|| SumError::Float(token.to_string()))?;
            log::debug!("decimal + {whole} and {fraction}e-{digits} from {token:?}");
            self.add_decimal(whole, fraction, digits);
        } else {
            let value =
                parse_integer(&cleaned).ok_or_else(|| SumError::Integer(token.to_string()))?;
            log::debug!("int     + {value} from {token:?}");
            self.whole += value;
        }
        log::debug!("        = {self}");
        Ok(())
    }

    fn add_decimal(&mut self, whole: BigInt, fraction: BigInt, digits: usize) {
        self.saw_fraction = true;
        if digits > self.scale {
            self.fraction *= pow10(digits - self.scale);
            self.scale = digits;
        }
        self.whole += whole;
        self.fraction += fraction * pow10(self.scale - digits);

        let unit = pow10(self.scale);
        let carry = &self.fraction / &unit;
        if !carry.is_zero() {
            self.fraction -= &carry * &unit;
            self.whole += carry;
        }
    }

    /// The exact total.
    ///
    /// Integer-only input renders as an integer. Once any decimal was added,
    /// the result carries exactly as many fractional digits as the longest
    /// fraction seen (none, and no `.`, if that is zero).
    pub fn total(&self) -> String {
        if !self.saw_fraction || self.scale == 0 {
            return self.whole.to_string();
        }

        let unit = pow10(self.scale);
        let mut whole = self.whole.clone();
        let mut fraction = self.fraction.clone();
        if whole.is_positive() && fraction.is_negative() {
            whole -= BigInt::one();
            fraction += &unit;
        } else if whole.is_negative() && fraction.is_positive() {
            whole += BigInt::one();
            fraction -= &unit;
        }

        let sign = if whole.is_negative() || fraction.is_negative() {
            "-"
        } else {
            ""
        };
        format!(
            "{sign}{}.{:0>width$}",
            whole.abs(),
            fraction.abs().to_string(),
            width = self.scale
        )
    }
}

impl fmt::Display for Accumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.total())
    }
}

/// Sum every token exactly, failing on the first one that does not parse
pub fn sum<I, S>(values: I) -> Result<String, SumError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut total = Accumulator::new();
    for value in values {
        total.add(value.as_ref())?;
    }
    Ok(total.total())
}

fn pow10(exp: usize) -> BigInt {
    BigInt::from(10u8).pow(exp as u32)
}

fn split_sign(token: &str) -> (Sign, &str) {
    match token.strip_prefix('-') {
        Some(rest) => (Sign::Minus, rest),
        None => (Sign::Plus, token.strip_prefix('+').unwrap_or(token)),
    }
}

/// Digits in `radix`, with single underscores allowed between them
fn parse_digits(digits: &str, radix: u32) -> Option<BigUint> {
    if digits.is_empty() || digits.split('_').any(str::is_empty) {
        return None;
    }
    if !digits.chars().all(|c| c == '_' || c.is_digit(radix)) {
        return None;
    }
    let plain: String = digits.chars().filter(|&c| c != '_').collect();
    BigUint::parse_bytes(plain.as_bytes(), radix)
}

/// Signed integer with an optional `0x`, `0o` or `0b` prefix. A bare leading
/// `0` followed by more digits means octal, and one `_` may follow a prefix.
fn parse_integer(token: &str) -> Option<BigInt> {
    let (sign, rest) = split_sign(token);
    let prefix = rest.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match prefix.as_deref() {
        Some("0x") => (16, &rest[2..]),
        Some("0o") => (8, &rest[2..]),
        Some("0b") => (2, &rest[2..]),
        _ if rest.len() > 1 && rest.starts_with('0') => (8, &rest[1..]),
        _ => return parse_digits(rest, 10).map(|magnitude| BigInt::from_biguint(sign, magnitude)),
    };
    let digits = digits.strip_prefix('_').unwrap_or(digits);
    let magnitude = parse_digits(digits, radix)?;
    Some(BigInt::from_biguint(sign, magnitude))
}

/// Signed decimal split into whole part, fractional digits as an integer, and
/// the number of fractional digits. Both parts carry the token's sign.
///
/// An exponent (`1.5e3`, `2.5E-2`) moves the decimal point before splitting.
fn parse_decimal(token: &str) -> Option<(BigInt, BigInt, usize)> {
    let (sign, rest) = split_sign(token);
    let (mantissa, exponent) = match rest.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i16>().ok()?),
        None => (rest, 0),
    };
    let (whole, fraction) = mantissa.split_once('.')?;
    if fraction.contains('.') || (whole.is_empty() && fraction.is_empty()) {
        return None;
    }

    let whole = if whole.is_empty() {
        BigUint::zero()
    } else {
        parse_digits(whole, 10)?
    };
    let (fraction_value, digits) = if fraction.is_empty() {
        (BigUint::zero(), 0)
    } else {
        let value = parse_digits(fraction, 10)?;
        (value, fraction.chars().filter(|&c| c != '_').count())
    };

    let unit = BigUint::from(10u8).pow(digits as u32);
    let mut scaled = whole * &unit + fraction_value;
    let digits = digits as i64 - i64::from(exponent);
    let digits = if digits < 0 {
        scaled *= BigUint::from(10u8).pow(digits.unsigned_abs() as u32);
        0
    } else {
        digits as usize
    };
    let unit = BigUint::from(10u8).pow(digits as u32);
    Some((
        BigInt::from_biguint(sign, &scaled / &unit),
        BigInt::from_biguint(sign, &scaled % &unit),
        digits,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(values: &[&str], expected: &str) {
        assert_eq!(sum(values).unwrap(), expected, "sum of {values:?}");
    }

    #[test]
    fn test_nothing_sums_to_zero() {
        check(&[], "0");
        check(&[""], "0");
        check(&["0", "0.0", ".0", "0.", "0.0"], "0");
    }

    #[test]
    fn test_single_values() {
        check(&["12345678900987654321"], "12345678900987654321");
        check(&["12,345,678,900,987,654,321"], "12345678900987654321");
        check(&["12_345_678_900_987_654_321"], "12345678900987654321");
        check(&["987_656_789_000_000_000.12"], "987656789000000000.12");
        check(&["42.0000000000123000999"], "42.0000000000123000999");
        check(&["-57"], "-57");
        check(&["-15.7"], "-15.7");
        check(&["-.5"], "-0.5");
        check(&["5."], "5");
    }

    #[test]
    fn test_integer_prefixes() {
        check(&["0x1F", "0o17", "0b101", "-0x10"], "35");
        check(&["0xdead_beef"], "3735928559");
        check(&["0x_ff", "0b_1", "0o_7"], "263");
        check(&["007"], "7");
    }

    #[test]
    fn test_leading_zero_means_octal() {
        check(&["010"], "8");
        check(&["-010", "20"], "12");
        check(&["0_17"], "15");
        assert_eq!(sum(["08"]).unwrap_err(), SumError::Integer("08".into()));
    }

    #[test]
    fn test_decimal_exponents() {
        check(&["1.5e3"], "1500");
        check(&["1.5E3", "0.25"], "1500.25");
        check(&["2.5e-2", "1"], "1.025");
        check(&["-1.25e+1", "0.5"], "-12.0");
        check(&[".5e1"], "5");
        assert_eq!(sum(["1.5e"]).unwrap_err(), SumError::Float("1.5e".into()));
        assert_eq!(sum(["1.5e3.1"]).unwrap_err(), SumError::Float("1.5e3.1".into()));
    }

    #[test]
    fn test_mixed_pairs() {
        check(&["8723413", "42823938291913"], "42823947015326");
        check(&["31387", "0.0000000001"], "31387.0000000001");
        check(&["9000000000000.99", "31387"], "9000000031387.99");
        check(&["0.000000000001294", "123456000000000.5"], "123456000000000.500000000001294");
        check(&["1515151515151515.15", "999999999999.871515"], "1516151515151515.021515");
        check(&["303.000000789", "15.12300000000000055"], "318.12300078900000055");
        check(
            &["0.0000000000001300000000451", "432,100,000,000,000,000,000,000.05"],
            "432100000000000000000000.0500000000001300000000451",
        );
    }

    #[test]
    fn test_signs() {
        check(&["5555", "-10001"], "-4446");
        check(&["-123456", "-975312468"], "-975435924");
        check(&["46581.777", "-14.49"], "46567.287");
        check(&["5,718,222.4", "-11111111111.111"], "-11105392888.711");
        check(&["-87.00012300123", "-9000.000001"], "-9087.00012400123");
        check(&["666333", "-32.0001"], "666300.9999");
        check(&["-666333", "32.0001"], "-666300.9999");
        check(&["32.0001", "-666333"], "-666300.9999");
        check(&["-3.15", "-8"], "-11.15");
        check(&["1.5", "-1.5"], "0.0");
    }

    #[test]
    fn test_three_values() {
        check(&["123", "45600", "7890001"], "7935724");
        check(&["5312", "-1000.55", "43"], "4354.45");
        check(&["77000000000.05", "-7", "8888.404"], "77000008881.454");
        check(&["123.456", "0.00000000000013", "987987987678.991"], "987987987802.44700000000013");
    }

    #[test]
    fn test_keeps_trailing_zeros_of_longest_fraction() {
        let values = vec!["999,999,999,999,999.000000000005"; 1000];
        assert_eq!(sum(&values).unwrap(), "999999999999999000.000000005000");
    }

    #[test]
    fn test_errors_name_original_token() {
        let cases = [
            (vec!["123nope4"], SumError::Integer("123nope4".into())),
            (vec!["87ba.d4"], SumError::Float("87ba.d4".into())),
            (vec!["87.3d4"], SumError::Float("87.3d4".into())),
            (vec!["11", "twelve"], SumError::Integer("twelve".into())),
            (vec!["1", "3.1four1", "3"], SumError::Float("3.1four1".into())),
            (vec!["1.2.3"], SumError::Float("1.2.3".into())),
            (vec!["."], SumError::Float(".".into())),
            (vec!["1__000"], SumError::Integer("1__000".into())),
            (vec!["0x"], SumError::Integer("0x".into())),
        ];
        for (values, expected) in cases {
            assert_eq!(sum(&values).unwrap_err(), expected, "sum of {values:?}");
        }
        assert_eq!(
            SumError::Integer("eleven".into()).to_string(),
            r#"could not parse "eleven" as integer"#
        );
    }

    #[test]
    fn test_accumulator_display_tracks_total() {
        let mut total = Accumulator::new();
        total.add("0.25").unwrap();
        total.add("0.75").unwrap();
        assert_eq!(total.to_string(), "1.00");
        total.add("-2").unwrap();
        assert_eq!(total.to_string(), "-1.00");
    }
}
