//! Theme commands for Taskora

use crate::error::Result;
use crate::notify::NoticeCenter;
use crate::theme::{Theme, ThemeStore};
use colored::Colorize;

/// Show the current theme and the available rotation
pub fn run_show(themes: &ThemeStore) -> Result<()> {
    let palette = themes.palette();
    println!(
        "{} {}",
        "Current theme:".color(palette.muted),
        themes.current().to_string().color(palette.accent).bold()
    );
    for theme in themes.available() {
        let marker = if *theme == themes.current() { "*" } else { " " };
        println!("  {} {}", marker, theme);
    }
    Ok(())
}

/// Select a theme by name
pub fn run_set(themes: &mut ThemeStore, name: String) -> Result<()> {
    let mut notices = NoticeCenter::new();

    match Theme::parse(&name) {
        Some(theme) => {
            themes.set_theme(theme);
            notices.success(format!("Theme set to {}", theme));
        }
        None => {
            notices.error(format!("Unknown theme: {}", name));
            notices.info(format!(
                "Available: {}",
                themes
                    .available()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
        }
    }

    super::render_notices(&notices.snapshot(), &themes.palette());
    Ok(())
}

/// Advance to the next theme in the rotation
pub fn run_next(themes: &mut ThemeStore) -> Result<()> {
    let next = themes.toggle_theme();
    let mut notices = NoticeCenter::new();
    notices.success(format!("Theme set to {}", next));
    super::render_notices(&notices.snapshot(), &themes.palette());
    Ok(())
}
