//! Random password generation with guaranteed character-class coverage, and a heuristic strength
//! score for the options a password is generated from.

mod character_class;
mod config;
pub mod password_generation;
pub mod strength;

pub use character_class::CharacterClass;
pub use config::{GenerationConfig, MAX_LENGTH, MIN_LENGTH};
pub use password_generation::{generate, generate_password};
pub use strength::{score, StrengthResult, StrengthTier};

/// Errors from generating a password.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
pub enum GenerationError {
    #[error("no character class was selected; at least one is required to generate a password")]
    NoCharacterClassSelected,
}

/// A generated password.
///
/// `Debug` does not print the contents, so a `Secret` can sit inside logged structures safely.
#[derive(Clone, Eq, PartialEq)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Number of characters (not bytes) in the password.
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
