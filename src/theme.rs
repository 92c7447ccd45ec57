//! Светлая/темная тема.
//!
//! Вместо глобального провайдера тема передается явно: каждый рендер получает
//! `ThemeContext`, а смена темы идет через внедренный сеттер.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme: {other}")),
        }
    }
}

pub type ThemeSetter = Arc<dyn Fn(Theme) + Send + Sync>;

#[derive(Clone)]
pub struct ThemeContext {
    theme: Theme,
    setter: ThemeSetter,
}

impl ThemeContext {
    pub fn new(theme: Theme, setter: ThemeSetter) -> Self {
        Self { theme, setter }
    }

    /// Контекст без обратной записи (для рендера вне сессии и тестов).
    pub fn fixed(theme: Theme) -> Self {
        Self::new(theme, Arc::new(|_| {}))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme == Theme::Dark
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        (self.setter)(theme);
    }

    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set(next);
        next
    }

    /// Выбрать класс под текущую тему.
    pub fn pick<'a>(&self, light: &'a str, dark: &'a str) -> &'a str {
        match self.theme {
            Theme::Light => light,
            Theme::Dark => dark,
        }
    }

    pub fn page_bg(&self) -> &'static str {
        self.pick(
            "bg-gradient-to-br from-purple-50 via-pink-50 to-blue-50",
            "bg-gray-900",
        )
    }

    pub fn card_bg(&self) -> &'static str {
        self.pick("bg-white/90", "bg-gray-800/70")
    }

    pub fn text_primary(&self) -> &'static str {
        self.pick("text-gray-900", "text-white")
    }

    pub fn text_secondary(&self) -> &'static str {
        self.pick("text-gray-700", "text-gray-300")
    }

    pub fn input(&self) -> &'static str {
        self.pick(
            "bg-white border-gray-300 text-gray-900",
            "bg-gray-700 border-gray-600 text-white",
        )
    }
}

impl fmt::Debug for ThemeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeContext").field("theme", &self.theme).finish()
    }
}
