use crate::CharacterClass;

/// Shortest length the front end lets a user ask for.
pub const MIN_LENGTH: usize = 4;
/// Longest length the front end lets a user ask for.
pub const MAX_LENGTH: usize = 32;

/// The options a password is generated (and scored) from.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GenerationConfig {
    /// Requested length, in characters. Not validated here; see [`GenerationConfig::clamped`].
    pub length: usize,
    pub use_uppercase: bool,
    pub use_lowercase: bool,
    pub use_digits: bool,
    pub use_symbols: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            length: 8,
            use_uppercase: true,
            use_lowercase: true,
            use_digits: false,
            use_symbols: false,
        }
    }
}

impl GenerationConfig {
    /// This config with its length forced into `MIN_LENGTH..=MAX_LENGTH`.
    pub fn clamped(self) -> GenerationConfig {
        GenerationConfig {
            length: self.length.clamp(MIN_LENGTH, MAX_LENGTH),
            ..self
        }
    }

    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Uppercase => self.use_uppercase,
            CharacterClass::Lowercase => self.use_lowercase,
            CharacterClass::Digit => self.use_digits,
            CharacterClass::Symbol => self.use_symbols,
        }
    }

    pub fn set_enabled(&mut self, class: CharacterClass, enabled: bool) {
        let flag = match class {
            CharacterClass::Uppercase => &mut self.use_uppercase,
            CharacterClass::Lowercase => &mut self.use_lowercase,
            CharacterClass::Digit => &mut self.use_digits,
            CharacterClass::Symbol => &mut self.use_symbols,
        };
        *flag = enabled;
    }

    /// The enabled classes, in pool order.
    pub fn enabled_classes(&self) -> impl Iterator<Item = CharacterClass> + '_ {
        CharacterClass::ALL
            .into_iter()
            .filter(move |class| self.is_enabled(*class))
    }

    /// Whether every class is enabled (the state of a "select all" toggle).
    pub fn all_selected(&self) -> bool {
        CharacterClass::ALL
            .into_iter()
            .all(|class| self.is_enabled(class))
    }

    pub fn select_all(&mut self, enabled: bool) {
        for class in CharacterClass::ALL {
            self.set_enabled(class, enabled);
        }
    }
}
