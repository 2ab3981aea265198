//! Random private-access token generation.

use rand::Rng;

use crate::error::{Error, Result};
use crate::token::registry::TokenRegistry;

/// Characters tokens are drawn from.
pub const TOKEN_ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Token length used when none is configured.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

/// Generates fixed-length uppercase tokens that are not yet in a registry.
///
/// The registry lookup only filters out tokens already recorded when the
/// check runs. Two callers can still draw the same unused token and race to
/// store it, so the store must reject duplicates on insert (see
/// `CollectionStore::insert_collection`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenGenerator {
    length: usize,
    max_retries: Option<u32>,
}

impl Default for TokenGenerator {
    fn default() -> Self {
        Self {
            length: DEFAULT_TOKEN_LENGTH,
            max_retries: None,
        }
    }
}

impl TokenGenerator {
    /// Create a generator for tokens of `length` characters.
    pub fn new(length: usize) -> Result<Self> {
        if length == 0 {
            return Err(Error::InvalidLength(length));
        }
        Ok(Self {
            length,
            max_retries: None,
        })
    }

    /// Limit how many collisions are retried. `None` retries forever.
    pub fn with_max_retries(mut self, max_retries: Option<u32>) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn max_retries(&self) -> Option<u32> {
        self.max_retries
    }

    /// Draw a candidate token without checking the registry.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        (0..self.length)
            .map(|_| TOKEN_ALPHABET[rng.gen_range(0..TOKEN_ALPHABET.len())] as char)
            .collect()
    }

    /// Draw candidates from `rng` until one is absent from `registry`.
    pub fn generate_with<R, T>(&self, rng: &mut R, registry: &T) -> Result<String>
    where
        R: Rng + ?Sized,
        T: TokenRegistry + ?Sized,
    {
        let mut attempts: u32 = 0;
        loop {
            let candidate = self.draw(rng);
            attempts = attempts.saturating_add(1);

            if !registry.token_exists(&candidate)? {
                tracing::debug!("Generated token after {} attempt(s)", attempts);
                return Ok(candidate);
            }

            tracing::debug!("Token collision on attempt {}", attempts);

            if let Some(max_retries) = self.max_retries {
                if attempts > max_retries {
                    tracing::warn!(
                        "Giving up on token generation after {} attempts (length {})",
                        attempts,
                        self.length
                    );
                    return Err(Error::ExhaustedRetries { attempts });
                }
            }
        }
    }

    /// Generate an unused token using the thread-local RNG.
    pub fn generate<T: TokenRegistry + ?Sized>(&self, registry: &T) -> Result<String> {
        self.generate_with(&mut rand::thread_rng(), registry)
    }
}

/// Generate an unused 8-letter token with unbounded retries.
pub fn generate_url_token<T: TokenRegistry + ?Sized>(registry: &T) -> Result<String> {
    TokenGenerator::default().generate(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::collections::HashSet;

    /// Reports a collision for the first `collisions` lookups and records every candidate.
    struct CollidingRegistry {
        collisions: usize,
        seen: RefCell<Vec<String>>,
    }

    impl CollidingRegistry {
        fn new(collisions: usize) -> Self {
            Self {
                collisions,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl TokenRegistry for CollidingRegistry {
        fn token_exists(&self, token: &str) -> Result<bool> {
            let mut seen = self.seen.borrow_mut();
            seen.push(token.to_string());
            Ok(seen.len() <= self.collisions)
        }
    }

    struct FailingRegistry;

    impl TokenRegistry for FailingRegistry {
        fn token_exists(&self, _token: &str) -> Result<bool> {
            Err(Error::Store("unavailable".into()))
        }
    }

    fn is_token(token: &str, length: usize) -> bool {
        token.len() == length && token.chars().all(|c| c.is_ascii_uppercase())
    }

    #[test]
    fn test_tokens_have_requested_length_and_alphabet() {
        let registry: HashSet<String> = HashSet::new();
        for length in [1, 4, 8, 32] {
            let generator = TokenGenerator::new(length).unwrap();
            for _ in 0..20 {
                let token = generator.generate(&registry).unwrap();
                assert!(is_token(&token, length), "bad token {:?}", token);
            }
        }
    }

    #[test]
    fn test_default_url_token() {
        let token = generate_url_token(&HashSet::<String>::new()).unwrap();
        assert!(is_token(&token, DEFAULT_TOKEN_LENGTH));
    }

    #[test]
    fn test_zero_length_is_rejected() {
        assert!(matches!(
            TokenGenerator::new(0),
            Err(Error::InvalidLength(0))
        ));
    }

    #[test]
    fn test_returns_first_draw_without_collisions() {
        let registry = CollidingRegistry::new(0);
        let token = TokenGenerator::default()
            .generate_with(&mut StdRng::seed_from_u64(7), &registry)
            .unwrap();

        let seen = registry.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], token);
    }

    #[test]
    fn test_retries_until_registry_accepts() {
        let registry = CollidingRegistry::new(3);
        let token = TokenGenerator::default()
            .generate_with(&mut StdRng::seed_from_u64(42), &registry)
            .unwrap();

        let seen = registry.seen.borrow();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[3], token);
    }

    #[test]
    fn test_seeded_generation_matches_draw_sequence() {
        let generator = TokenGenerator::new(6).unwrap();
        let mut expected_rng = StdRng::seed_from_u64(99);
        let first = generator.draw(&mut expected_rng);
        let second = generator.draw(&mut expected_rng);

        let taken: HashSet<String> = [first].into_iter().collect();
        let token = generator
            .generate_with(&mut StdRng::seed_from_u64(99), &taken)
            .unwrap();
        assert_eq!(token, second);
    }

    #[test]
    fn test_bounded_retries_exhaust() {
        let registry = CollidingRegistry::new(usize::MAX);
        let result = TokenGenerator::default()
            .with_max_retries(Some(2))
            .generate_with(&mut StdRng::seed_from_u64(1), &registry);

        assert!(matches!(
            result,
            Err(Error::ExhaustedRetries { attempts: 3 })
        ));
        assert_eq!(registry.seen.borrow().len(), 3);
    }

    #[test]
    fn test_bounded_retries_still_succeed_within_bound() {
        let registry = CollidingRegistry::new(2);
        let token = TokenGenerator::default()
            .with_max_retries(Some(2))
            .generate_with(&mut StdRng::seed_from_u64(5), &registry)
            .unwrap();
        assert_eq!(registry.seen.borrow().len(), 3);
        assert!(is_token(&token, DEFAULT_TOKEN_LENGTH));
    }

    #[test]
    fn test_registry_errors_propagate() {
        let result = TokenGenerator::default().generate(&FailingRegistry);
        assert!(matches!(result, Err(Error::Store(_))));
    }
}
