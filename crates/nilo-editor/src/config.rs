//! Editor configuration.
//!
//! There is no configuration file and there are no flags. Settings live in
//! a typed struct whose [`Default`] is what ships; callers that need
//! something else build the struct themselves.

use nilo_term::event_loop::LoopConfig;
use nilo_term::input::ctrl_key;

/// The quit key: Ctrl+Q, byte `0x11`.
pub const QUIT_KEY: u8 = ctrl_key(b'q');

/// Everything the editor core can be told.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Byte that ends the session.
    pub quit_key: u8,

    /// Identification line drawn a third of the way down the screen.
    pub welcome: String,

    /// Read timeout and other loop timing.
    pub event_loop: LoopConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            quit_key: QUIT_KEY,
            welcome: format!("Nilo editor -- version {}", env!("CARGO_PKG_VERSION")),
            event_loop: LoopConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn quit_is_ctrl_q() {
        assert_eq!(QUIT_KEY, 0x11);
        assert_eq!(EditorConfig::default().quit_key, 0x11);
    }

    #[test]
    fn welcome_carries_version() {
        let config = EditorConfig::default();
        assert!(config.welcome.starts_with("Nilo editor -- version "));
        assert!(config.welcome.ends_with(env!("CARGO_PKG_VERSION")));
    }
}
