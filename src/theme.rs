//! Theme store for Taskora
//!
//! Holds the selected theme name for the lifetime of the process,
//! persists it to its storage slot, and maps each theme to the terminal
//! palette the renderers draw with. Toggling advances through the fixed
//! enumeration and raises a short-lived `changing` flag dependent UI can
//! key off.

use crate::storage::LocalStore;
use colored::Color;
use std::time::{Duration, Instant};

/// Storage slot holding the persisted theme name
const THEME_SLOT: &str = "theme";

/// How long the transient `changing` flag stays raised after a toggle
const THEME_TRANSITION: Duration = Duration::from_millis(300);

/// The fixed set of named themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    MidnightProfessional,
    OceanBreeze,
    LavenderDream,
    ForestZen,
    SunsetWarmth,
    SlateProfessional,
}

/// All themes, in toggle order
pub const AVAILABLE_THEMES: [Theme; 6] = [
    Theme::MidnightProfessional,
    Theme::OceanBreeze,
    Theme::LavenderDream,
    Theme::ForestZen,
    Theme::SunsetWarmth,
    Theme::SlateProfessional,
];

impl Default for Theme {
    fn default() -> Self {
        Theme::MidnightProfessional
    }
}

impl Theme {
    /// Theme name as persisted and displayed
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::MidnightProfessional => "midnight-professional",
            Theme::OceanBreeze => "ocean-breeze",
            Theme::LavenderDream => "lavender-dream",
            Theme::ForestZen => "forest-zen",
            Theme::SunsetWarmth => "sunset-warmth",
            Theme::SlateProfessional => "slate-professional",
        }
    }

    /// Parse a theme name; unknown names yield `None`
    pub fn parse(name: &str) -> Option<Self> {
        AVAILABLE_THEMES.iter().copied().find(|t| t.as_str() == name)
    }

    /// Next theme in the enumeration, wrapping around
    pub fn next(&self) -> Self {
        let index = AVAILABLE_THEMES
            .iter()
            .position(|t| t == self)
            .unwrap_or(0);
        AVAILABLE_THEMES[(index + 1) % AVAILABLE_THEMES.len()]
    }

    /// Terminal palette for this theme
    ///
    /// The CLI counterpart of the presentation class the original client
    /// applied to the document root.
    pub fn palette(&self) -> Palette {
        match self {
            Theme::MidnightProfessional => Palette {
                accent: Color::Blue,
                emphasis: Color::BrightWhite,
                muted: Color::BrightBlack,
            },
            Theme::OceanBreeze => Palette {
                accent: Color::Cyan,
                emphasis: Color::BrightCyan,
                muted: Color::Blue,
            },
            Theme::LavenderDream => Palette {
                accent: Color::Magenta,
                emphasis: Color::BrightMagenta,
                muted: Color::BrightBlack,
            },
            Theme::ForestZen => Palette {
                accent: Color::Green,
                emphasis: Color::BrightGreen,
                muted: Color::BrightBlack,
            },
            Theme::SunsetWarmth => Palette {
                accent: Color::Yellow,
                emphasis: Color::BrightRed,
                muted: Color::Red,
            },
            Theme::SlateProfessional => Palette {
                accent: Color::White,
                emphasis: Color::BrightWhite,
                muted: Color::BrightBlack,
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Colors the renderers draw with under the active theme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Primary accent (headers, selected rows)
    pub accent: Color,
    /// High-emphasis text
    pub emphasis: Color,
    /// De-emphasized text (timestamps, hints)
    pub muted: Color,
}

/// Process-wide selected theme, persisted to its storage slot
///
/// # Examples
///
/// ```
/// use taskora::storage::LocalStore;
/// use taskora::theme::{Theme, ThemeStore};
///
/// let store = LocalStore::with_dir("/tmp/taskora_theme_doc").unwrap();
/// let mut themes = ThemeStore::new(store);
/// themes.set_theme(Theme::ForestZen);
/// assert_eq!(themes.current(), Theme::ForestZen);
/// ```
pub struct ThemeStore {
    store: LocalStore,
    current: Theme,
    changing_until: Option<Instant>,
}

impl ThemeStore {
    /// Create a theme store, initializing from the persisted slot
    ///
    /// Absent or invalid stored names fall back to the default theme.
    pub fn new(store: LocalStore) -> Self {
        let current = store
            .read_slot::<String>(THEME_SLOT)
            .and_then(|name| {
                let parsed = Theme::parse(&name);
                if parsed.is_none() {
                    tracing::warn!("Ignoring unknown persisted theme '{}'", name);
                }
                parsed
            })
            .unwrap_or_default();

        Self {
            store,
            current,
            changing_until: None,
        }
    }

    /// Currently selected theme
    pub fn current(&self) -> Theme {
        self.current
    }

    /// Palette of the currently selected theme
    pub fn palette(&self) -> Palette {
        self.current.palette()
    }

    /// All selectable themes, in toggle order
    pub fn available(&self) -> &'static [Theme] {
        &AVAILABLE_THEMES
    }

    /// Select a theme, persist it, and make its palette current
    pub fn set_theme(&mut self, theme: Theme) {
        self.current = theme;
        if let Err(e) = self.store.write_slot(THEME_SLOT, &theme.as_str().to_string()) {
            tracing::warn!("Failed to persist theme: {}", e);
        }
        tracing::debug!("Theme set to {}", theme);
    }

    /// Advance to the next theme in the enumeration, wrapping around
    ///
    /// Raises the transient `changing` flag for a short fixed duration so
    /// dependent UI can animate the switch.
    pub fn toggle_theme(&mut self) -> Theme {
        self.changing_until = Some(Instant::now() + THEME_TRANSITION);
        let next = self.current.next();
        self.set_theme(next);
        next
    }

    /// Whether a toggle transition is still in progress
    ///
    /// Deadline-based: the flag clears itself once the transition window
    /// has elapsed, and can never fire after the store is gone.
    pub fn is_changing(&self) -> bool {
        match self.changing_until {
            Some(deadline) => Instant::now() < deadline,
            None => false,
        }
    }
}
