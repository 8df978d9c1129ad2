//! Utilities for generating passwords.

use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};

use crate::{GenerationConfig, GenerationError, Secret};

/// Generate a password from the enabled character classes of `config`.
///
/// One character is drawn from each enabled class first, so every enabled class shows up at least
/// once; the rest, up to `config.length`, is drawn from the union of the enabled alphabets. The
/// whole thing is then shuffled so the guaranteed characters don't sit at fixed positions.
///
/// If `config.length` is less than the number of enabled classes, the result is one character
/// per enabled class, i.e. longer than asked for.
///
/// Note that `rand`'s underlying uniform sampler does the right thing to prevent bias: if it can't
/// generate a value that is within the given range (or really, a multiple of the range), it
/// re-samples.
pub fn generate<R>(rng: &mut R, config: &GenerationConfig) -> Result<Secret, GenerationError>
where
    R: Rng + CryptoRng,
{
    let mut pool = Vec::new();
    let mut password: Vec<char> = Vec::with_capacity(config.length);
    for class in config.enabled_classes() {
        let alphabet = class.alphabet().chars().collect::<Vec<_>>();
        password.extend(alphabet.choose(rng));
        pool.extend(alphabet);
    }
    if pool.is_empty() {
        return Err(GenerationError::NoCharacterClassSelected);
    }
    log::debug!(
        "generating a password: length {}, {} guaranteed characters, pool of {}",
        config.length,
        password.len(),
        pool.len(),
    );

    while password.len() < config.length {
        password.extend(pool.choose(rng));
    }
    password.shuffle(rng);

    Ok(Secret(password.into_iter().collect()))
}

/// [`generate`], drawing from the thread-local CSPRNG.
pub fn generate_password(config: &GenerationConfig) -> Result<Secret, GenerationError> {
    generate(&mut rand::thread_rng(), config)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;
    use crate::CharacterClass;

    fn config(
        length: usize,
        upper: bool,
        lower: bool,
        digits: bool,
        symbols: bool,
    ) -> GenerationConfig {
        GenerationConfig {
            length,
            use_uppercase: upper,
            use_lowercase: lower,
            use_digits: digits,
            use_symbols: symbols,
        }
    }

    fn count_of(password: &Secret, class: CharacterClass) -> usize {
        password
            .as_str()
            .chars()
            .filter(|ch| CharacterClass::of(*ch) == Some(class))
            .count()
    }

    #[test]
    fn one_of_each_at_minimum_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            let password = generate(&mut rng, &config(4, true, true, true, true)).unwrap();
            assert_eq!(password.len(), 4);
            for class in CharacterClass::ALL {
                assert_eq!(count_of(&password, class), 1, "{class} in {:?}", password.as_str());
            }
        }
    }

    #[test]
    fn no_class_selected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(
            generate(&mut rng, &config(20, false, false, false, false)),
            Err(GenerationError::NoCharacterClassSelected)
        );
    }

    #[test]
    fn short_length_keeps_guaranteed_characters() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let password = generate(&mut rng, &config(2, true, true, true, false)).unwrap();
        assert_eq!(password.len(), 3);
        let password = generate(&mut rng, &config(0, false, false, true, false)).unwrap();
        assert_eq!(password.len(), 1);
    }

    #[test]
    fn only_enabled_alphabets_are_used() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let password = generate(&mut rng, &config(32, false, false, true, false)).unwrap();
        assert_eq!(password.len(), 32);
        assert!(password.as_str().chars().all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn guaranteed_characters_are_not_pinned_to_the_front() {
        // Unshuffled, the guaranteed uppercase letter would always come first.
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut positions = std::collections::HashSet::new();
        for _ in 0..100 {
            let password = generate(&mut rng, &config(4, true, false, true, false)).unwrap();
            let first = password.as_str().chars().next().unwrap();
            positions.insert(CharacterClass::of(first));
        }
        assert!(positions.contains(&Some(CharacterClass::Uppercase)));
        assert!(positions.contains(&Some(CharacterClass::Digit)));
    }

    #[test]
    fn thread_rng_path() {
        let password = generate_password(&GenerationConfig::default()).unwrap();
        assert_eq!(password.len(), 8);
        assert!(count_of(&password, CharacterClass::Uppercase) >= 1);
        assert!(count_of(&password, CharacterClass::Lowercase) >= 1);
    }
}
