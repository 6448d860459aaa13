use anyhow::{Context, Result};
use rand::rngs::{OsRng, StdRng};
use rand::{Rng, SeedableRng, TryRngCore};

const ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Alphanumeric string seeded from the OS RNG, used for generated passwords.
pub fn generate_random_string(length: usize) -> Result<String> {
    let mut seed = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut seed)
        .context("OS random source unavailable")?;
    let mut rng = StdRng::from_seed(seed);

    Ok((0..length)
        .map(|_| ALPHANUMERIC[rng.random_range(0..ALPHANUMERIC.len())] as char)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_alphanumeric_of_requested_length() {
        let value = generate_random_string(12).unwrap();
        assert_eq!(value.len(), 12);
        assert!(value.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_values_differ() {
        assert_ne!(
            generate_random_string(16).unwrap(),
            generate_random_string(16).unwrap()
        );
    }
}
