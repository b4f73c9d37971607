//! Rendering options for counters.

use serde::{Deserialize, Serialize};

/// Largest `perm` drawn with glyphs before falling back to plain numbers.
pub const DEFAULT_PRETTY_MAX_PERM: u32 = 15;

/// How a counter should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Draw glyph tracks instead of `temp/perm` numbers
    pub pretty: bool,
    /// Counters with a larger `perm` are always rendered plain
    pub pretty_max_perm: u32,
}

impl RenderOptions {
    pub fn plain() -> Self {
        Self {
            pretty: false,
            pretty_max_perm: DEFAULT_PRETTY_MAX_PERM,
        }
    }

    pub fn pretty() -> Self {
        Self {
            pretty: true,
            pretty_max_perm: DEFAULT_PRETTY_MAX_PERM,
        }
    }

    pub fn with_pretty_max_perm(mut self, max: u32) -> Self {
        self.pretty_max_perm = max;
        self
    }

    /// Whether a counter with this `perm` gets glyph rendering.
    pub fn draws_glyphs(&self, perm: u32) -> bool {
        self.pretty && perm <= self.pretty_max_perm
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::plain()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glyphs_only_up_to_threshold() {
        let options = RenderOptions::pretty();
        assert!(options.draws_glyphs(15));
        assert!(!options.draws_glyphs(16));
        assert!(!RenderOptions::plain().draws_glyphs(3));
    }

    #[test]
    fn threshold_is_configurable() {
        let options = RenderOptions::pretty().with_pretty_max_perm(20);
        assert!(options.draws_glyphs(20));
    }
}
