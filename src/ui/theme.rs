//! Styles for the catalog menu

use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    /// Menu title line
    pub banner: Style,
    /// The `1.`..`7.` keys in front of menu entries
    pub menu_key: Style,
    /// Separator lines around the menu
    pub rule: Style,
    pub prompt: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    /// Neutral notes such as "No movies found"
    pub note: Style,
}

impl Theme {
    /// Colored when stdout is a terminal, plain otherwise (pipes, tests)
    pub fn detect() -> Self {
        if console::Term::stdout().is_term() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            banner: Style::new().cyan().bold(),
            menu_key: Style::new().yellow(),
            rule: Style::new().bright_black(),
            prompt: Style::new().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            note: Style::new().magenta(),
        }
    }

    pub fn plain() -> Self {
        Self {
            banner: Style::new(),
            menu_key: Style::new(),
            rule: Style::new(),
            prompt: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            note: Style::new(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
