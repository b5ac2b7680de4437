//! Read-only layout and theme catalogs.
//!
//! The capture and composite core never mutates catalog entries; hosts select them by id.

mod layout;
mod theme;

pub use layout::{Arrangement, Layout, MAX_STRIP_DIMENSION, builtin_layouts};
pub use theme::{Theme, builtin_themes};

use crate::foundation::error::{BoothError, BoothResult};

/// Ordered collection of layouts and themes, looked up by id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Catalog {
    layouts: Vec<Layout>,
    themes: Vec<Theme>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Catalog containing the built-in layouts and themes.
    pub fn builtin() -> Self {
        Self {
            layouts: builtin_layouts(),
            themes: builtin_themes(),
        }
    }

    /// Empty catalog.
    pub fn empty() -> Self {
        Self {
            layouts: Vec::new(),
            themes: Vec::new(),
        }
    }

    /// All layouts in display order.
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// All themes in display order.
    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Look up a layout by id.
    pub fn layout(&self, id: &str) -> BoothResult<&Layout> {
        self.layouts
            .iter()
            .find(|l| l.id == id)
            .ok_or_else(|| BoothError::validation(format!("unknown layout '{id}'")))
    }

    /// Look up a theme by id.
    pub fn theme(&self, id: &str) -> BoothResult<&Theme> {
        self.themes
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| BoothError::validation(format!("unknown theme '{id}'")))
    }

    /// Add a layout, replacing any existing entry with the same id in place.
    pub fn insert_layout(&mut self, layout: Layout) -> BoothResult<()> {
        layout.validate()?;
        match self.layouts.iter_mut().find(|l| l.id == layout.id) {
            Some(slot) => *slot = layout,
            None => self.layouts.push(layout),
        }
        Ok(())
    }

    /// Add a theme, replacing any existing entry with the same id in place.
    pub fn insert_theme(&mut self, theme: Theme) -> BoothResult<()> {
        theme.validate()?;
        match self.themes.iter_mut().find(|t| t.id == theme.id) {
            Some(slot) => *slot = theme,
            None => self.themes.push(theme),
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/catalog.rs"]
mod tests;
