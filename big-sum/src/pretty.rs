/// Insert thousands separators into the whole part of a number string.
///
/// A leading `-` is preserved and the fractional part is left alone. Strings
/// of three characters or fewer, strings that already contain a `,`, and
/// strings with more than one `.` come back unchanged.
///
/// ```
/// use big_sum::make_pretty;
///
/// assert_eq!(make_pretty("1234567"), "1,234,567");
/// assert_eq!(make_pretty("12345.678901"), "12,345.678901");
/// assert_eq!(make_pretty("1.2.3"), "1.2.3");
/// ```
pub fn make_pretty(value: &str) -> String {
    if value.len() <= 3 || value.contains(',') || value.matches('.').count() > 1 {
        return value.to_string();
    }

    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (value, None),
    };
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", whole),
    };

    let len = digits.chars().count();
    let mut pretty = String::with_capacity(value.len() + len / 3);
    pretty.push_str(sign);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            pretty.push(',');
        }
        pretty.push(digit);
    }
    if let Some(fraction) = fraction {
        pretty.push('.');
        pretty.push_str(fraction);
    }
    pretty
}
