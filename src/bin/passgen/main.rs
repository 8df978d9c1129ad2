use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use passgen::{CharacterClass, GenerationConfig, GenerationError};

mod clipboard;
mod interactive;
mod settings;
mod table;

#[derive(Parser)]
#[command(about = "Generate random passwords from a choice of character classes.")]
struct Args {
    /// YAML file with default options. Falls back to $PASSGEN_CONFIG (ignored when empty), then
    /// to ~/.config/passgen/config.yaml if it exists.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a password and print it to stdout.
    Generate {
        #[command(flatten)]
        options: ConfigArgs,
        /// Also copy the password to the clipboard.
        #[arg(long)]
        copy: bool,
    },
    /// Show how strong passwords generated with the given options would be.
    Strength {
        #[command(flatten)]
        options: ConfigArgs,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the character classes and their alphabets.
    Classes,
    /// Pick options, generate and copy passwords from a menu. This is the default.
    Interactive {
        #[command(flatten)]
        options: ConfigArgs,
    },
}

#[derive(clap::Args, Default)]
struct ConfigArgs {
    /// Password length; clamped to 4..=32.
    #[arg(long, short)]
    length: Option<usize>,
    /// Include uppercase letters.
    #[arg(long)]
    uppercase: Option<bool>,
    /// Include lowercase letters.
    #[arg(long)]
    lowercase: Option<bool>,
    /// Include digits.
    #[arg(long)]
    digits: Option<bool>,
    /// Include symbols.
    #[arg(long)]
    symbols: Option<bool>,
    /// Include every character class; individual flags still override this.
    #[arg(long)]
    all: bool,
}

impl ConfigArgs {
    fn apply(&self, mut config: GenerationConfig) -> GenerationConfig {
        if self.all {
            config.select_all(true);
        }
        let overrides = [
            (CharacterClass::Uppercase, self.uppercase),
            (CharacterClass::Lowercase, self.lowercase),
            (CharacterClass::Digit, self.digits),
            (CharacterClass::Symbol, self.symbols),
        ];
        for (class, enabled) in overrides {
            if let Some(enabled) = enabled {
                config.set_enabled(class, enabled);
            }
        }
        if let Some(length) = self.length {
            config.length = length;
        }
        clamp_length(config)
    }
}

fn clamp_length(config: GenerationConfig) -> GenerationConfig {
    let clamped = config.clamped();
    if clamped.length != config.length {
        log::warn!(
            "password length {} is out of range; using {}",
            config.length,
            clamped.length
        );
    }
    clamped
}

fn run() -> Result<(), ProgError> {
    let args = Args::parse();
    let settings = settings::load_settings(args.config)?;

    match args.command {
        Some(Command::Generate { options, copy }) => {
            let config = options.apply(settings.generation_config());
            let command = settings.clipboard_command.as_deref();
            let copy_to_clipboard =
                |password: &str| clipboard::send_to_clipboard(password.as_bytes(), command);
            generate(&config, copy.then_some(copy_to_clipboard), io::stdout().lock())?;
        }
        Some(Command::Strength { options, json }) => {
            let config = options.apply(settings.generation_config());
            strength(&config, json, io::stdout().lock())?;
        }
        Some(Command::Classes) => list_classes()?,
        Some(Command::Interactive { options }) => {
            let config = options.apply(settings.generation_config());
            interactive::run_session(config, &settings)?;
        }
        None => {
            let config = ConfigArgs::default().apply(settings.generation_config());
            interactive::run_session(config, &settings)?;
        }
    }

    Ok(())
}

/// Generate a password and write it to `out`, then hand it to `copy` if given.
///
/// Nothing is written or copied when generation fails.
fn generate<F>(
    config: &GenerationConfig,
    copy: Option<F>,
    mut out: impl Write,
) -> Result<(), ProgError>
where
    F: FnOnce(&str) -> anyhow::Result<()>,
{
    let password = passgen::generate_password(config)?;
    writeln!(out, "{}", password.as_str()).context("failed to write the password")?;
    eprintln!("Strength: {}", passgen::score(config).label());
    if let Some(copy) = copy {
        copy(password.as_str())?;
        eprintln!("Copied to the clipboard.");
    }
    Ok(())
}

fn strength(config: &GenerationConfig, json: bool, mut out: impl Write) -> Result<(), ProgError> {
    let result = passgen::score(config);
    if json {
        serde_json::to_writer(&mut out, &result)
            .context("failed to encode the strength as JSON")?;
        writeln!(out).context("failed to write the strength")?;
    } else {
        writeln!(out, "{} ({}/4)", result.label(), result.score)
            .context("failed to write the strength")?;
    }
    Ok(())
}

fn list_classes() -> Result<(), ProgError> {
    struct ClassRow {
        name: &'static str,
        size: String,
        alphabet: &'static str,
    }

    impl table::TableRow for ClassRow {
        const HEADERS: &'static [&'static str] = &["Class", "Size", "Alphabet"];

        fn cell(&self, column: usize) -> &str {
            match column {
                0 => self.name,
                1 => &self.size,
                2 => self.alphabet,
                _ => panic!("no column {column}"),
            }
        }
    }

    let rows = CharacterClass::ALL
        .into_iter()
        .map(|class| ClassRow {
            name: class.name(),
            size: class.alphabet().chars().count().to_string(),
            alphabet: class.alphabet(),
        })
        .collect::<Vec<_>>();
    table::write_table(&rows, std::io::stdout()).context("failed to output table")?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(()) => (),
        Err(ProgError::Other(err)) => {
            eprintln!("Error: {err:#}");
            process::exit(1);
        }
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum ProgError {
    #[error("Please select at least one character type.")]
    NoCharacterClassSelected,
    #[error("The interactive session needs a terminal; try `passgen generate` instead.")]
    NotATerminal,
    #[error(transparent)]
    Other(anyhow::Error),
}

impl From<anyhow::Error> for ProgError {
    fn from(err: anyhow::Error) -> ProgError {
        ProgError::Other(err)
    }
}

impl From<GenerationError> for ProgError {
    fn from(err: GenerationError) -> ProgError {
        match err {
            GenerationError::NoCharacterClassSelected => ProgError::NoCharacterClassSelected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides() {
        let args = ConfigArgs {
            length: Some(64),
            symbols: Some(true),
            uppercase: Some(false),
            ..Default::default()
        };
        let config = args.apply(GenerationConfig::default());
        assert_eq!(config.length, 32);
        assert!(!config.use_uppercase);
        assert!(config.use_lowercase);
        assert!(!config.use_digits);
        assert!(config.use_symbols);
    }

    #[test]
    fn all_then_individual_flags() {
        let args = ConfigArgs {
            all: true,
            digits: Some(false),
            ..Default::default()
        };
        let config = args.apply(GenerationConfig::default());
        assert!(config.use_uppercase && config.use_lowercase && config.use_symbols);
        assert!(!config.use_digits);
        assert_eq!(config.length, 8);
    }

    #[test]
    fn short_lengths_are_raised() {
        let args = ConfigArgs {
            length: Some(1),
            ..Default::default()
        };
        assert_eq!(args.apply(GenerationConfig::default()).length, 4);
    }

    #[test]
    fn parses_subcommands() {
        let args = Args::try_parse_from([
            "passgen", "generate", "--length", "16", "--symbols", "true", "--copy",
        ])
        .unwrap();
        match args.command {
            Some(Command::Generate { options, copy }) => {
                assert!(copy);
                assert_eq!(options.length, Some(16));
                assert_eq!(options.symbols, Some(true));
                assert_eq!(options.digits, None);
            }
            _ => panic!("expected the generate subcommand"),
        }
        let args = Args::try_parse_from(["passgen"]).unwrap();
        assert!(args.command.is_none());
    }

    fn nothing_enabled() -> GenerationConfig {
        let mut config = GenerationConfig::default();
        config.select_all(false);
        config
    }

    #[test]
    fn generate_writes_and_copies_the_same_password() {
        let mut out = Vec::new();
        let mut copied = None;
        let copy = |password: &str| {
            copied = Some(password.to_owned());
            Ok(())
        };
        generate(&GenerationConfig::default(), Some(copy), &mut out).unwrap();
        let printed = String::from_utf8(out).unwrap();
        assert_eq!(printed.trim_end().chars().count(), 8);
        assert_eq!(copied.as_deref(), Some(printed.trim_end()));
    }

    #[test]
    fn no_classes_prints_and_copies_nothing() {
        let mut out = Vec::new();
        let mut copy_called = false;
        let copy = |_: &str| {
            copy_called = true;
            Ok(())
        };
        let err = generate(&nothing_enabled(), Some(copy), &mut out).unwrap_err();
        assert!(matches!(err, ProgError::NoCharacterClassSelected));
        assert!(out.is_empty());
        assert!(!copy_called);
    }

    #[test]
    fn copy_failure_is_reported() {
        let copy = |_: &str| Err(anyhow::anyhow!("no clipboard"));
        let err = generate(&GenerationConfig::default(), Some(copy), io::sink()).unwrap_err();
        assert!(matches!(err, ProgError::Other(_)));
    }

    #[test]
    fn strength_output() {
        let mut config = nothing_enabled();
        config.select_all(true);
        config.length = 12;
        let mut out = Vec::new();
        strength(&config, true, &mut out).unwrap();
        assert_eq!(out, b"{\"score\":4,\"label\":\"Very Strong\"}\n");

        let mut out = Vec::new();
        strength(&GenerationConfig::default(), false, &mut out).unwrap();
        assert_eq!(out, b"Moderate (2/4)\n");
    }

    #[test]
    fn no_classes_is_a_user_facing_error() {
        let err = ProgError::from(GenerationError::NoCharacterClassSelected);
        assert_eq!(err.to_string(), "Please select at least one character type.");
    }
}
