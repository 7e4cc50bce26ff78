//! Theme system for the TUI.
//!
//! Semantic color roles mapped to ratatui `Style` values. `ThemeVariant`
//! selects between Dark and Light palettes; `StyleMap` resolves role names
//! to concrete styles for string-keyed lookups.

use ratatui::style::{Color, Modifier, Style};
use std::collections::HashMap;

// ============================================================================
// Theme Variant
// ============================================================================

/// Available theme variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeVariant {
    Dark,
    Light,
}

impl ThemeVariant {
    /// Parse a variant name from a string (case-insensitive).
    pub fn from_str_name(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    /// Build the `ColorPalette` for this variant.
    pub fn palette(self) -> ColorPalette {
        match self {
            Self::Dark => ColorPalette::dark(),
            Self::Light => ColorPalette::light(),
        }
    }

    /// Human-readable name for status display.
    pub fn name(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }
}

// ============================================================================
// Color Palette — semantic roles to Style
// ============================================================================

/// A complete palette mapping every semantic UI role to a `Style`.
#[derive(Debug, Clone)]
pub struct ColorPalette {
    // -- Auth forms --
    pub form_label: Style,
    pub form_field: Style,
    pub form_field_focused: Style,
    pub form_headline: Style,
    pub form_error: Style,
    pub form_link: Style,

    // -- Post list --
    pub post_title: Style,
    pub post_selected: Style,
    pub post_body_preview: Style,
    pub post_meta: Style,

    // -- Details --
    pub details_title: Style,
    pub details_body: Style,
    pub details_meta: Style,
    pub details_error: Style,

    // -- Chrome --
    pub status_bar: Style,
    pub panel_border: Style,
    pub panel_border_focused: Style,
    pub spinner: Style,

    // -- Language modal --
    pub modal_border: Style,
    pub modal_selected: Style,
    pub modal_title: Style,
}

impl ColorPalette {
    fn dark() -> Self {
        Self {
            // Auth forms
            form_label: Style::default().fg(Color::Gray),
            form_field: Style::default(),
            form_field_focused: Style::default().fg(Color::Cyan),
            form_headline: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            form_error: Style::default().fg(Color::Red),
            form_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            // Post list
            post_title: Style::default().add_modifier(Modifier::BOLD),
            post_selected: Style::default().bg(Color::DarkGray).fg(Color::White),
            post_body_preview: Style::default().fg(Color::Gray),
            post_meta: Style::default().fg(Color::DarkGray),

            // Details
            details_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            details_body: Style::default(),
            details_meta: Style::default().fg(Color::DarkGray),
            details_error: Style::default().fg(Color::Red),

            // Chrome
            status_bar: Style::default().bg(Color::DarkGray).fg(Color::White),
            panel_border: Style::default(),
            panel_border_focused: Style::default().fg(Color::Cyan),
            spinner: Style::default().fg(Color::Yellow),

            // Language modal
            modal_border: Style::default().fg(Color::Yellow),
            modal_selected: Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            modal_title: Style::default().add_modifier(Modifier::BOLD),
        }
    }

    /// Light palette — adapted for light terminal backgrounds.
    fn light() -> Self {
        Self {
            // Auth forms
            form_label: Style::default().fg(Color::DarkGray),
            form_field: Style::default().fg(Color::Black),
            form_field_focused: Style::default().fg(Color::Blue),
            form_headline: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            form_error: Style::default().fg(Color::Red),
            form_link: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),

            // Post list
            post_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            post_selected: Style::default().bg(Color::Blue).fg(Color::White),
            post_body_preview: Style::default().fg(Color::DarkGray),
            post_meta: Style::default().fg(Color::DarkGray),

            // Details
            details_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            details_body: Style::default().fg(Color::Black),
            details_meta: Style::default().fg(Color::DarkGray),
            details_error: Style::default().fg(Color::Red),

            // Chrome
            status_bar: Style::default().bg(Color::White).fg(Color::Black),
            panel_border: Style::default().fg(Color::DarkGray),
            panel_border_focused: Style::default().fg(Color::Blue),
            spinner: Style::default().fg(Color::Magenta),

            // Language modal
            modal_border: Style::default().fg(Color::Magenta),
            modal_selected: Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            modal_title: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        }
    }
}

// ============================================================================
// Style Map — string-keyed lookup
// ============================================================================

/// String-keyed style lookup.
///
/// Built from a `ColorPalette`; resolves role names (e.g. `"post_selected"`)
/// to their concrete `Style` at runtime.
#[derive(Debug, Clone)]
pub struct StyleMap {
    map: HashMap<&'static str, Style>,
}

/// All semantic role names, in declaration order.
const ROLE_NAMES: [&str; 21] = [
    "form_label",
    "form_field",
    "form_field_focused",
    "form_headline",
    "form_error",
    "form_link",
    "post_title",
    "post_selected",
    "post_body_preview",
    "post_meta",
    "details_title",
    "details_body",
    "details_meta",
    "details_error",
    "status_bar",
    "panel_border",
    "panel_border_focused",
    "spinner",
    "modal_border",
    "modal_selected",
    "modal_title",
];

impl StyleMap {
    /// Build a `StyleMap` from a `ColorPalette`.
    pub fn from_palette(p: &ColorPalette) -> Self {
        let styles: [Style; 21] = [
            p.form_label,
            p.form_field,
            p.form_field_focused,
            p.form_headline,
            p.form_error,
            p.form_link,
            p.post_title,
            p.post_selected,
            p.post_body_preview,
            p.post_meta,
            p.details_title,
            p.details_body,
            p.details_meta,
            p.details_error,
            p.status_bar,
            p.panel_border,
            p.panel_border_focused,
            p.spinner,
            p.modal_border,
            p.modal_selected,
            p.modal_title,
        ];

        let mut map = HashMap::with_capacity(ROLE_NAMES.len());
        for (name, style) in ROLE_NAMES.iter().zip(styles.iter()) {
            map.insert(*name, *style);
        }

        Self { map }
    }

    /// Resolve a role name to its `Style`. Returns `Style::default()` for unknown roles.
    pub fn resolve(&self, role: &str) -> Style {
        self.map.get(role).copied().unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================
