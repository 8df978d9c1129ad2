use std::fmt;

static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static DIGITS: &str = "0123456789";
static SYMBOLS: &str = "!@#$%^&*()_+~`|}{[]:;?><,./-=";

/// One of the four disjoint alphabets a password may draw from.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum CharacterClass {
    Uppercase,
    Lowercase,
    Digit,
    Symbol,
}

impl CharacterClass {
    /// Every class, in the order their alphabets are concatenated into the pool.
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Uppercase,
        CharacterClass::Lowercase,
        CharacterClass::Digit,
        CharacterClass::Symbol,
    ];

    pub fn alphabet(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => UPPERCASE,
            CharacterClass::Lowercase => LOWERCASE,
            CharacterClass::Digit => DIGITS,
            CharacterClass::Symbol => SYMBOLS,
        }
    }

    /// The class whose alphabet contains `ch`, if any.
    pub fn of(ch: char) -> Option<CharacterClass> {
        Self::ALL
            .into_iter()
            .find(|class| class.alphabet().contains(ch))
    }

    pub fn name(self) -> &'static str {
        match self {
            CharacterClass::Uppercase => "Uppercase",
            CharacterClass::Lowercase => "Lowercase",
            CharacterClass::Digit => "Numbers",
            CharacterClass::Symbol => "Symbols",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
