use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8;
use crate::foundation::error::{BoothError, BoothResult};

/// Color scheme for a strip.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Theme {
    /// Stable identifier (e.g. `classic`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// Canvas fill.
    pub background_color: Rgba8,
    /// Outer and per-cell border stroke.
    pub border_color: Rgba8,
    /// Caption fill.
    pub text_color: Rgba8,
}

impl Theme {
    /// Check identifier invariants.
    pub fn validate(&self) -> BoothResult<()> {
        if self.id.trim().is_empty() {
            return Err(BoothError::validation("theme id must be non-empty"));
        }
        Ok(())
    }
}

fn builtin(id: &str, name: &str, background: u32, border: u32, text: u32) -> Theme {
    fn rgb(v: u32) -> Rgba8 {
        Rgba8::rgb((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
    Theme {
        id: id.to_owned(),
        name: name.to_owned(),
        background_color: rgb(background),
        border_color: rgb(border),
        text_color: rgb(text),
    }
}

/// Themes shipped with the crate, in display order.
pub fn builtin_themes() -> Vec<Theme> {
    vec![
        builtin("classic", "Classic Black", 0x000000, 0xffffff, 0xffffff),
        builtin("vibrant", "Vibrant Pink", 0xff006e, 0xffffff, 0xffffff),
        builtin("ocean", "Ocean Blue", 0x0096c7, 0xffffff, 0xffffff),
        builtin("forest", "Forest Green", 0x06a77d, 0xffffff, 0xffffff),
        builtin("sunset", "Sunset Orange", 0xff7b42, 0xffffff, 0xffffff),
        builtin("modern", "Modern White", 0xf8f9fa, 0x333333, 0x333333),
    ]
}
