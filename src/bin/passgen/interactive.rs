//! A menu-driven session: toggle character classes, adjust the length, and generate and copy
//! passwords, with the strength of the current options shown after every change.

use std::time::{Duration, Instant};

use anyhow::Context;
use console::{style, Style, Term};
use dialoguer::theme::ColorfulTheme;
use passgen::{
    CharacterClass, GenerationConfig, GenerationError, Secret, StrengthResult, StrengthTier,
};

use crate::settings::Settings;
use crate::ProgError;

const BAR_WIDTH: usize = 24;

/// How long "Copied to clipboard!" stays up after a copy.
const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

/// The "copied" notice. The owner decides what "now" is.
#[derive(Debug, Default)]
pub(crate) struct CopyFeedback {
    visible_until: Option<Instant>,
}

impl CopyFeedback {
    pub fn mark_copied(&mut self, now: Instant) {
        self.visible_until = Some(now + COPIED_FEEDBACK);
    }

    pub fn is_visible(&self, now: Instant) -> bool {
        matches!(self.visible_until, Some(until) if now < until)
    }
}

#[derive(Debug)]
pub(crate) struct WidgetState {
    config: GenerationConfig,
    password: Option<Secret>,
    copied: CopyFeedback,
}

impl WidgetState {
    pub fn new(config: GenerationConfig) -> WidgetState {
        WidgetState {
            config,
            password: None,
            copied: CopyFeedback::default(),
        }
    }

    pub fn strength(&self) -> StrengthResult {
        passgen::score(&self.config)
    }

    /// Replace the current password. On error the previous one, if any, is kept.
    pub fn generate(&mut self) -> Result<(), GenerationError> {
        self.password = Some(passgen::generate_password(&self.config)?);
        Ok(())
    }

    /// Set the length from user input. Unparseable input (or zero) counts as the minimum.
    pub fn set_length(&mut self, input: &str) {
        let length = input
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|&n| n != 0)
            .unwrap_or(passgen::MIN_LENGTH);
        self.config.length = length;
        self.config = self.config.clamped();
    }

    pub fn toggle(&mut self, class: CharacterClass) {
        let enabled = self.config.is_enabled(class);
        self.config.set_enabled(class, !enabled);
    }

    pub fn toggle_all(&mut self) {
        let next = !self.config.all_selected();
        self.config.select_all(next);
    }

    /// Copy the current password with `copy`. Returns whether anything was copied.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn copy<F>(&mut self, copy: F, now: Instant) -> bool
    where
        F: FnOnce(&str) -> anyhow::Result<()>,
    {
        let password = match self.password.as_ref() {
            Some(p) => p,
            None => {
                log::info!("nothing to copy yet");
                return false;
            }
        };
        match copy(password.as_str()) {
            Ok(()) => {
                self.copied.mark_copied(now);
                true
            }
            Err(err) => {
                log::warn!("failed to copy the password: {err:#}");
                false
            }
        }
    }

    fn render(&self, now: Instant) -> String {
        let mut out = String::new();
        let password = match self.password.as_ref() {
            Some(p) => style(p.as_str()).bold().to_string(),
            None => style("Generated password").dim().to_string(),
        };
        out.push_str(&format!("{}\n", password));
        if self.copied.is_visible(now) {
            out.push_str(&format!("{}\n", style("Copied to clipboard!").green()));
        }
        out.push_str(&format!("Password Length: {}\n", self.config.length));
        let strength = self.strength();
        let tier_style = tier_style(strength.tier);
        out.push_str(&format!(
            "[{}] Strength: {}\n",
            tier_style.apply_to(strength_bar(&strength, BAR_WIDTH)),
            tier_style.apply_to(strength.label()),
        ));
        out
    }

    fn menu_items(&self) -> Vec<(MenuAction, String)> {
        let check = |on: bool| if on { "[x]" } else { "[ ]" };
        let mut items = vec![
            (MenuAction::Generate, "Generate".to_owned()),
            (MenuAction::Copy, "Copy".to_owned()),
            (
                MenuAction::SetLength,
                format!("Password Length: {}", self.config.length),
            ),
            (
                MenuAction::ToggleAll,
                format!("{} Select All", check(self.config.all_selected())),
            ),
        ];
        for class in CharacterClass::ALL {
            items.push((
                MenuAction::Toggle(class),
                format!("{} Include {}", check(self.config.is_enabled(class)), class),
            ));
        }
        items.push((MenuAction::Quit, "Quit".to_owned()));
        items
    }
}

#[derive(Debug, Clone, Copy)]
enum MenuAction {
    Generate,
    Copy,
    SetLength,
    ToggleAll,
    Toggle(CharacterClass),
    Quit,
}

/// `width` cells, the first `score / 4` of them filled.
fn strength_bar(strength: &StrengthResult, width: usize) -> String {
    let filled = (strength.fraction() * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&" ".repeat(width - filled));
    bar
}

fn tier_style(tier: StrengthTier) -> Style {
    match tier {
        StrengthTier::VeryWeak => Style::new().red(),
        StrengthTier::Weak => Style::new().color256(208),
        StrengthTier::Moderate => Style::new().yellow(),
        StrengthTier::Strong => Style::new().cyan(),
        StrengthTier::VeryStrong => Style::new().green(),
    }
}

pub(crate) fn run_session(config: GenerationConfig, settings: &Settings) -> Result<(), ProgError> {
    let term = Term::stderr();
    if !term.is_term() {
        return Err(ProgError::NotATerminal);
    }
    let theme = ColorfulTheme::default();
    let mut state = WidgetState::new(config);

    loop {
        term.write_line(&state.render(Instant::now()))
            .context("failed to write to the terminal")?;
        let items = state.menu_items();
        let labels = items.iter().map(|(_, label)| label.as_str()).collect::<Vec<_>>();
        let selection = dialoguer::Select::with_theme(&theme)
            .items(&labels)
            .default(0)
            .interact_on_opt(&term)
            .context("failed to query your selection")?;
        let action = match selection {
            Some(idx) => items[idx].0,
            None => break,
        };

        match action {
            MenuAction::Generate => {
                if let Err(err) = state.generate() {
                    term.write_line(&style(ProgError::from(err)).red().to_string())
                        .context("failed to write to the terminal")?;
                }
            }
            MenuAction::Copy => {
                let command = settings.clipboard_command.as_deref();
                state.copy(
                    |password| crate::clipboard::send_to_clipboard(password.as_bytes(), command),
                    Instant::now(),
                );
            }
            MenuAction::SetLength => {
                let input = dialoguer::Input::<String>::with_theme(&theme)
                    .with_prompt(format!(
                        "Password length ({}-{})",
                        passgen::MIN_LENGTH,
                        passgen::MAX_LENGTH
                    ))
                    .with_initial_text(state.config.length.to_string())
                    .interact_text_on(&term)
                    .context("failed to read the password length")?;
                state.set_length(&input);
            }
            MenuAction::ToggleAll => state.toggle_all(),
            MenuAction::Toggle(class) => state.toggle(class),
            MenuAction::Quit => break,
        }
    }
    Ok(())
}
