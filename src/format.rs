pub const PHONE_TEMPLATE: &str = "+# (###) ###-####";
pub const INVALID_PHONE: &str = "Invalid phone number";

/// Fills each `#` in `template` with the next digit of `digits`.
///
/// `format_phone_number("12025550171", PHONE_TEMPLATE)` gives
/// `"+1 (202) 555-0171"`. Too few digits yields [`INVALID_PHONE`]; surplus
/// digits are ignored.
pub fn format_phone_number(digits: &str, template: &str) -> String {
    let mut digits = digits.chars().filter(char::is_ascii_digit);
    let mut short = false;

    let formatted: String = template
        .chars()
        .map(|c| match c {
            '#' => digits.next().unwrap_or_else(|| {
                short = true;
                '#'
            }),
            other => other,
        })
        .collect();

    if short {
        INVALID_PHONE.to_string()
    } else {
        formatted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_a_us_number() {
        assert_eq!(
            format_phone_number("12025550171", PHONE_TEMPLATE),
            "+1 (202) 555-0171"
        );
    }

    #[test]
    fn short_numbers_are_invalid() {
        assert_eq!(format_phone_number("555", PHONE_TEMPLATE), INVALID_PHONE);
    }

    #[test]
    fn non_digits_are_skipped() {
        assert_eq!(format_phone_number("1-202-555-0171", PHONE_TEMPLATE), "+1 (202) 555-0171");
    }
}
