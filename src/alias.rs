use rand::{Rng, distr::Alphanumeric};

pub const ALIAS_LEN: usize = 6;

/// Draws a random alias from `[A-Za-z0-9]`.
///
/// Collisions are not checked; creating with an alias already in use replaces that record.
#[must_use]
pub fn random_alias() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ALIAS_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn alias_is_six_alphanumerics() {
        for _ in 0..1000 {
            let alias = random_alias();
            assert_eq!(alias.len(), ALIAS_LEN);
            assert!(alias.bytes().all(|b| b.is_ascii_alphanumeric()), "{alias}");
        }
    }

    #[test]
    fn aliases_vary_between_calls() {
        let aliases = (0..100).map(|_| random_alias()).collect::<HashSet<_>>();
        assert!(aliases.len() > 90);
    }
}
