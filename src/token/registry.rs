//! Token existence checks.

use std::collections::{BTreeSet, HashSet};

use crate::error::Result;

/// Answers whether a private-access token is already recorded.
///
/// Implementations backed by real storage may fail, hence the `Result`.
pub trait TokenRegistry {
    fn token_exists(&self, token: &str) -> Result<bool>;
}

impl TokenRegistry for HashSet<String> {
    fn token_exists(&self, token: &str) -> Result<bool> {
        Ok(self.contains(token))
    }
}

impl TokenRegistry for BTreeSet<String> {
    fn token_exists(&self, token: &str) -> Result<bool> {
        Ok(self.contains(token))
    }
}

impl<T: TokenRegistry + ?Sized> TokenRegistry for &T {
    fn token_exists(&self, token: &str) -> Result<bool> {
        (**self).token_exists(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_registries() {
        let hashed: HashSet<String> = ["ABCDEFGH".to_string()].into_iter().collect();
        assert!(hashed.token_exists("ABCDEFGH").unwrap());
        assert!(!hashed.token_exists("ZZZZZZZZ").unwrap());

        let ordered: BTreeSet<String> = ["QWERTYUI".to_string()].into_iter().collect();
        assert!((&ordered).token_exists("QWERTYUI").unwrap());
        assert!(!ordered.token_exists("qwertyui").unwrap());
    }
}
