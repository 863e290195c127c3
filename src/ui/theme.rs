use colored::{Color, Colorize};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub colors: HashMap<String, ColorConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub foreground: Option<String>,
    pub style: Vec<String>,
}

impl Theme {
    fn from_table(name: &str, table: &[(&str, &str, &[&str])]) -> Self {
        let colors = table
            .iter()
            .map(|(key, fg, styles)| {
                (
                    (*key).to_string(),
                    ColorConfig {
                        foreground: Some((*fg).to_string()),
                        style: styles.iter().map(|s| (*s).to_string()).collect(),
                    },
                )
            })
            .collect();

        Self {
            name: name.to_string(),
            colors,
        }
    }
}

pub struct ThemeManager {
    themes: HashMap<String, Theme>,
    current_theme: String,
}

impl ThemeManager {
    pub fn new() -> Self {
        let mut manager = Self {
            themes: HashMap::new(),
            current_theme: "default".to_string(),
        };

        manager.load_default_themes();
        manager
    }

    pub fn set_theme(&mut self, theme_name: &str) -> bool {
        if self.themes.contains_key(theme_name) {
            self.current_theme = theme_name.to_string();
            true
        } else {
            false
        }
    }

    pub fn current_theme_name(&self) -> &str {
        &self.current_theme
    }

    pub fn apply_style(&self, text: &str, style_name: &str) -> String {
        let Some(color_config) = self
            .themes
            .get(&self.current_theme)
            .and_then(|theme| theme.colors.get(style_name))
        else {
            return text.to_string();
        };

        let mut styled = text.normal();

        if let Some(color) = color_config.foreground.as_deref().and_then(parse_color) {
            styled = styled.color(color);
        }

        for style in &color_config.style {
            styled = match style.as_str() {
                "bold" => styled.bold(),
                "italic" => styled.italic(),
                "underline" => styled.underline(),
                "dimmed" => styled.dimmed(),
                "strikethrough" => styled.strikethrough(),
                _ => styled,
            };
        }

        styled.to_string()
    }

    pub fn list_themes(&self) -> Vec<String> {
        let mut names: Vec<String> = self.themes.keys().cloned().collect();
        names.sort();
        names
    }

    fn load_default_themes(&mut self) {
        let default = Theme::from_table("default", &[
            ("title", "magenta", &["bold"]),
            ("word", "cyan", &["bold"]),
            ("description", "white", &["italic"]),
            ("lives_high", "green", &["bold"]),
            ("lives_medium", "yellow", &["bold"]),
            ("lives_low", "red", &["bold"]),
            ("hint", "yellow", &[]),
            ("timer", "blue", &["bold"]),
            ("key_available", "blue", &["bold"]),
            ("key_used", "bright_black", &["dimmed"]),
            ("key_miss", "red", &["strikethrough"]),
            ("error", "red", &["bold"]),
            ("success", "green", &["bold"]),
            ("warning", "yellow", &["bold"]),
            ("info", "blue", &[]),
            ("separator", "bright_black", &["dimmed"]),
        ]);

        let dark = Theme::from_table("dark", &[
            ("title", "bright_magenta", &["bold"]),
            ("word", "bright_cyan", &["bold"]),
            ("description", "bright_white", &["italic"]),
            ("lives_high", "bright_green", &["bold"]),
            ("lives_medium", "bright_yellow", &["bold"]),
            ("lives_low", "bright_red", &["bold"]),
            ("hint", "bright_yellow", &[]),
            ("timer", "bright_blue", &["bold"]),
            ("key_available", "bright_white", &["bold"]),
            ("key_used", "black", &["dimmed"]),
            ("key_miss", "bright_red", &["strikethrough"]),
            ("error", "bright_red", &["bold"]),
            ("success", "bright_green", &["bold"]),
        ]);

        let light = Theme::from_table("light", &[
            ("title", "blue", &["bold"]),
            ("word", "magenta", &["bold"]),
            ("description", "black", &[]),
            ("key_available", "blue", &[]),
        ]);

        for theme in [default, dark, light] {
            self.themes.insert(theme.name.clone(), theme);
        }
    }
}

impl Default for ThemeManager {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_color(color_name: &str) -> Option<Color> {
    match color_name.to_lowercase().as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        "bright_black" => Some(Color::BrightBlack),
        "bright_red" => Some(Color::BrightRed),
        "bright_green" => Some(Color::BrightGreen),
        "bright_yellow" => Some(Color::BrightYellow),
        "bright_blue" => Some(Color::BrightBlue),
        "bright_magenta" => Some(Color::BrightMagenta),
        "bright_cyan" => Some(Color::BrightCyan),
        "bright_white" => Some(Color::BrightWhite),
        _ => None,
    }
}
