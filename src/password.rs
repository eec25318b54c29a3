//! Random password generation.
//!
//! Each character is drawn independently: 40% a digit `0-9`, 20% an
//! uppercase letter `A-Y`, 40% a lowercase letter `a-y`. `Z` and `z` are
//! never produced; existing consumers rely on that alphabet, so it stays.
//!
//! [`generate_random_password`] uses the thread-local generator from `rand`,
//! which is seeded once per thread and never reseeded per call.
//! [`generate_random_password_with`] takes any generator, for reproducible
//! output in tests.

use log::debug;
use rand::Rng;

pub const DEFAULT_PASSWORD_LENGTH: usize = 20;
pub const MAX_PASSWORD_LENGTH: usize = 1000;

/// Generates a password of `length` characters.
///
/// A length outside `1..=1000` falls back to [`DEFAULT_PASSWORD_LENGTH`].
///
/// # Examples
///
/// ```rust
/// use tabletext::password::generate_random_password;
///
/// assert_eq!(generate_random_password(10).len(), 10);
/// assert_eq!(generate_random_password(-5).len(), 20);
/// assert_eq!(generate_random_password(2000).len(), 20);
/// ```
#[must_use]
pub fn generate_random_password(length: i64) -> String {
    generate_random_password_with(&mut rand::thread_rng(), length)
}

/// Like [`generate_random_password`], drawing from `rng`.
///
/// # Examples
///
/// ```rust
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use tabletext::password::generate_random_password_with;
///
/// let a = generate_random_password_with(&mut StdRng::seed_from_u64(7), 16);
/// let b = generate_random_password_with(&mut StdRng::seed_from_u64(7), 16);
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn generate_random_password_with<R: Rng>(rng: &mut R, length: i64) -> String {
    let length = match usize::try_from(length) {
        Ok(n) if (1..=MAX_PASSWORD_LENGTH).contains(&n) => n,
        _ => {
            debug!(
                "password length {} out of range, using {}",
                length, DEFAULT_PASSWORD_LENGTH
            );
            DEFAULT_PASSWORD_LENGTH
        }
    };

    (0..length)
        .map(|_| {
            let byte = match rng.gen_range(0..10) {
                0..=3 => rng.gen_range(b'0'..=b'9'),
                4..=5 => rng.gen_range(b'A'..=b'Y'),
                _ => rng.gen_range(b'a'..=b'y'),
            };
            byte as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn in_alphabet(c: char) -> bool {
        c.is_ascii_digit() || ('A'..='Y').contains(&c) || ('a'..='y').contains(&c)
    }

    #[test]
    fn test_length_bounds() {
        assert_eq!(generate_random_password(1).len(), 1);
        assert_eq!(generate_random_password(1000).len(), 1000);
        assert_eq!(generate_random_password(0).len(), DEFAULT_PASSWORD_LENGTH);
        assert_eq!(generate_random_password(1001).len(), DEFAULT_PASSWORD_LENGTH);
        assert_eq!(generate_random_password(i64::MIN).len(), DEFAULT_PASSWORD_LENGTH);
    }

    #[test]
    fn test_alphabet_excludes_z() {
        let mut rng = StdRng::seed_from_u64(42);
        let password = generate_random_password_with(&mut rng, 1000);
        assert!(password.chars().all(in_alphabet));
        assert!(!password.contains('z') && !password.contains('Z'));
    }

    #[test]
    fn test_class_mix_is_roughly_40_20_40() {
        let mut rng = StdRng::seed_from_u64(1);
        let sample: String = (0..20)
            .map(|_| generate_random_password_with(&mut rng, 1000))
            .collect();
        let total = sample.len() as f64;
        let digits = sample.chars().filter(char::is_ascii_digit).count() as f64 / total;
        let upper = sample.chars().filter(char::is_ascii_uppercase).count() as f64 / total;
        let lower = sample.chars().filter(char::is_ascii_lowercase).count() as f64 / total;
        assert!((digits - 0.4).abs() < 0.03, "digits {}", digits);
        assert!((upper - 0.2).abs() < 0.03, "upper {}", upper);
        assert!((lower - 0.4).abs() < 0.03, "lower {}", lower);
    }
}
