/// Currency helpers for Naira amounts.
///
/// All monetary values in the database are stored in kobo (1 Naira = 100 kobo)
/// to avoid floating-point precision issues. API payloads accept Naira and are
/// converted at the boundary.

pub fn naira_to_kobo(naira: f64) -> i64 {
    (naira * 100.0).round() as i64
}

pub fn kobo_to_naira(kobo: i64) -> f64 {
    kobo as f64 / 100.0
}

pub fn format_kobo_as_naira(kobo: i64) -> String {
    format!("₦{:.2}", kobo_to_naira(kobo))
}

/// Boundary conversion for user-supplied Naira amounts. Callers validate
/// positivity before this point; negative inputs clamp to zero.
pub fn parse_amount_to_kobo(amount: f64) -> i64 {
    naira_to_kobo(amount.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_naira_to_kobo() {
        assert_eq!(naira_to_kobo(100.0), 10000);
        assert_eq!(naira_to_kobo(0.50), 50);
        assert_eq!(naira_to_kobo(20000.0), 2_000_000);
    }

    #[test]
    fn test_kobo_to_naira() {
        assert_eq!(kobo_to_naira(10000), 100.0);
        assert_eq!(kobo_to_naira(2_000_000), 20000.0);
    }

    #[test]
    fn test_format_kobo_as_naira() {
        assert_eq!(format_kobo_as_naira(10000), "₦100.00");
        assert_eq!(format_kobo_as_naira(1_500_000), "₦15000.00");
    }

    #[test]
    fn test_parse_amount_to_kobo() {
        assert_eq!(parse_amount_to_kobo(100.0), 10000);
        assert_eq!(parse_amount_to_kobo(0.0), 0);
        assert_eq!(parse_amount_to_kobo(-5.0), 0);
    }
}
