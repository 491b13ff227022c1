#[allow(unused_imports)]
use log::{debug, info};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{RawError, Result};

/// The code stored for a key name that Notepad++ recognizes but which has no stable
/// code we know how to emit.
pub const UNSUPPORTED: i32 = -2;
/// The code returned for a key name that matches nothing at all.
pub const UNKNOWN: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    pub name: &'static str,
    pub code: i32,
}

const fn key(name: &'static str, code: i32) -> KeyEntry {
    return KeyEntry { name, code };
}

/// Hotkey names accepted by `resolve`, in lookup order. Names are lowercase with spaces
/// written as underscores.
#[rustfmt::skip]
pub const KEY_TABLE: &[KeyEntry] = &[
    key("backspace", 8),
    key("tab", 9),
    key("enter", 13),
    key("esc", 27),
    key("spacebar", 32),
    key("page_up", 33),
    key("page_down", 34),
    key("end", 35),
    key("home", 36),
    key("left", 37),
    key("up", 38),
    key("right", 39),
    key("down", 40),
    key("ins", 45),
    key("del", 46),
    key("numpad_0", 96),
    key("numpad_1", 97),
    key("numpad_2", 98),
    key("numpad_3", 99),
    key("numpad_4", 100),
    key("numpad_5", 101),
    key("numpad_6", 102),
    key("numpad_7", 103),
    key("numpad_8", 104),
    key("numpad_9", 105),

    key("num_*", UNSUPPORTED),
    key("num_+", UNSUPPORTED),
    key("num_-", UNSUPPORTED),
    key("num_.", UNSUPPORTED),
    key("num_/", UNSUPPORTED),

    key("f1", 112),
    key("f2", 113),
    key("f3", 114),
    key("f4", 115),
    key("f5", 116),
    key("f6", 117),
    key("f7", 118),
    key("f8", 119),
    key("f9", 120),
    key("f10", 121),
    key("f11", 122),
    key("f12", 123),

    key("~", UNSUPPORTED),
    key("-", UNSUPPORTED),
    key("=", UNSUPPORTED),
    key("[", UNSUPPORTED),
    key("]", UNSUPPORTED),
    key(";", UNSUPPORTED),
    key("'", UNSUPPORTED),
    key("\\", UNSUPPORTED),
    key(",", UNSUPPORTED),
    key(".", UNSUPPORTED),
    key("/", UNSUPPORTED),
    key("<>", UNSUPPORTED),
];

lazy_static! {
    // single keys Notepad++ identifies by their character code
    static ref CHARACTER_KEY: Regex = Regex::new(r"^[0-9a-z]$").unwrap();
}

fn normalize(name: &str) -> String {
    return name.to_lowercase().replace(' ', "_");
}

/// Resolve a hotkey name to its Notepad++ key code.
///
/// Returns the table's code on the first name match (which may be `UNSUPPORTED`),
/// otherwise the character code of a single digit or lowercase letter, otherwise
/// `UNKNOWN`. The table is consulted before the character fallback.
pub fn resolve(name: &str) -> i32 {
    let normalized = normalize(name);
    if let Some(entry) = KEY_TABLE.iter().find(|entry| entry.name == normalized) {
        debug!("key `{name}` found in key table with code {}", entry.code);
        return entry.code;
    }
    if CHARACTER_KEY.is_match(name) {
        // the regex guarantees exactly one ASCII character
        let code = name.as_bytes()[0] as i32;
        debug!("key `{name}` resolved by character code {code}");
        return code;
    }
    return UNKNOWN;
}

/// The outcome of resolving a key name, as presented to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedKey {
    Code(u32),
    Unknown,
    Unsupported,
}

impl From<i32> for ResolvedKey {
    fn from(code: i32) -> Self {
        return match code {
            UNSUPPORTED => ResolvedKey::Unsupported,
            x if x >= 0 => ResolvedKey::Code(x as u32),
            _ => ResolvedKey::Unknown,
        };
    }
}

impl ResolvedKey {
    pub fn resolve(name: &str) -> Self {
        return resolve(name).into();
    }

    /// The usable key code, or the error describing why there is none.
    pub fn require(self, name: &str) -> Result<u32> {
        return match self {
            ResolvedKey::Code(code) => Ok(code),
            ResolvedKey::Unknown => Err(RawError::UnknownKey(name.to_string()).into()),
            ResolvedKey::Unsupported => Err(RawError::UnsupportedKey(name.to_string()).into()),
        };
    }
}
