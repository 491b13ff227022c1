#[allow(unused_imports)]
use log::{info, warn};

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::error::{ErrorContext, Result};
use crate::record::Modifiers;

/// What to do when the output file already exists.
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Overwrite {
    /// ask on the terminal before replacing the file
    #[default]
    Ask,
    Always,
    Never,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct HotkeyInput {
    #[serde(default)]
    ctrl: bool,
    #[serde(default)]
    alt: bool,
    #[serde(default)]
    shift: bool,
    #[serde(flatten)]
    other_fields: HashMap<String, toml::Value>,
}

#[derive(Deserialize, Clone, Debug, Default)]
struct ConfigInput {
    hotkey: Option<HotkeyInput>,
    overwrite: Option<Overwrite>,
    #[serde(flatten)]
    other_fields: HashMap<String, toml::Value>,
}

/// Defaults read from a TOML file; command-line flags are combined with these.
///
/// **Example**
///
/// ```toml
/// overwrite = "ask"
///
/// [hotkey]
/// ctrl = true
/// shift = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub modifiers: Modifiers,
    pub overwrite: Overwrite,
}

impl Config {
    pub fn parse(content: &str) -> Result<Config> {
        let input = toml::from_str::<ConfigInput>(content)?;

        // unknown fields are ignored, but worth a warning
        for key in input.other_fields.keys() {
            warn!("The field `{key}` is unrecognized and will be ignored");
        }
        let hotkey = input.hotkey.unwrap_or_default();
        for key in hotkey.other_fields.keys() {
            warn!("The field `hotkey.{key}` is unrecognized and will be ignored");
        }

        return Ok(Config {
            modifiers: Modifiers {
                ctrl: hotkey.ctrl,
                alt: hotkey.alt,
                shift: hotkey.shift,
            },
            overwrite: input.overwrite.unwrap_or_default(),
        });
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Config> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).with_path(path)?;
        let config = Config::parse(&content)
            .with_path(path)
            .with_message("while loading configuration")?;
        info!("loaded configuration from '{}'", path.display());
        return Ok(config);
    }
}
