use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Keyboard behaviour flags. Field names follow the JavaScript option object
/// (`preventDefault`, `stopPropagation`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct KeyboardOptions {
    /// Call `preventDefault()` in key handlers, e.g. so Ctrl+T does not open a tab.
    pub prevent_default: bool,
    /// Call `stopPropagation()` in key handlers so parent elements never see the event.
    pub stop_propagation: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MouseOptions {
    /// Suppress the right-click context menu on every element the mouse attaches to.
    pub disable_context_menu: bool,
}

/// Input configuration, usually read from a host's `input.toml`:
///
/// ```toml
/// [keyboard]
/// preventDefault = true
///
/// [mouse]
/// disableContextMenu = true
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub keyboard: KeyboardOptions,
    pub mouse: MouseOptions,
}

impl InputConfig {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let config: InputConfig = toml::from_str(text).context("invalid input configuration")?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = InputConfig::from_toml_str("").unwrap();
        assert_eq!(config, InputConfig::default());
        assert!(!config.keyboard.prevent_default);
        assert!(!config.mouse.disable_context_menu);
    }

    #[test]
    fn test_camel_case_keys() {
        let config = InputConfig::from_toml_str(
            "[keyboard]\npreventDefault = true\nstopPropagation = true\n\n[mouse]\ndisableContextMenu = true\n",
        )
        .unwrap();
        assert!(config.keyboard.prevent_default);
        assert!(config.keyboard.stop_propagation);
        assert!(config.mouse.disable_context_menu);
    }

    #[test]
    fn test_partial_table() {
        let config = InputConfig::from_toml_str("[keyboard]\nstopPropagation = true\n").unwrap();
        assert!(!config.keyboard.prevent_default);
        assert!(config.keyboard.stop_propagation);
    }

    #[test]
    fn test_wrong_type_is_error() {
        let result = InputConfig::from_toml_str("[keyboard]\npreventDefault = \"yes\"\n");
        assert!(result.is_err());
    }
}
