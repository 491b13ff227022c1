#[allow(unused_imports)]
use log::{debug, info};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::action::Action;
use crate::error::{ErrorContext, RawError, Result};
use crate::key::ResolvedKey;

/// The modifier keys that must be held together with the hotkey's base key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn union(self, other: Modifiers) -> Modifiers {
        return Modifiers {
            ctrl: self.ctrl || other.ctrl,
            alt: self.alt || other.alt,
            shift: self.shift || other.shift,
        };
    }
}

/// A named macro: the hotkey that triggers it and the keypresses it replays.
///
/// ```xml
/// <Macro name="x" Ctrl="no" Alt="no" Shift="no" Key="97">
///     <Action .../>
/// </Macro>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    pub name: String,
    pub modifiers: Modifiers,
    pub key: u32,
    pub actions: Vec<Action>,
}

impl Macro {
    pub fn new(name: impl Into<String>, modifiers: Modifiers, key: u32) -> Self {
        return Macro {
            name: name.into(),
            modifiers,
            key,
            actions: Vec::new(),
        };
    }

    /// Build the macro replaying the content of `path`, triggered by `key_name` plus
    /// `modifiers`. Fails when the key cannot be resolved or the file cannot be read.
    pub fn from_file(
        path: impl AsRef<Path>,
        name: impl Into<String>,
        modifiers: Modifiers,
        key_name: &str,
    ) -> Result<Macro> {
        let path = path.as_ref();
        let key = ResolvedKey::resolve(key_name).require(key_name)?;
        if !path.is_file() {
            return Err(RawError::MissingInput(path.to_path_buf()).into());
        }
        // the file is closed when the reader drops, before the macro is returned
        let reader = BufReader::new(File::open(path).with_path(path)?);
        let mut result = Macro::new(name, modifiers, key);
        result.append_text(reader).with_path(path)?;
        info!(
            "built macro `{}` with {} actions from '{}'",
            result.name,
            result.actions.len(),
            path.display()
        );
        return Ok(result);
    }

    /// Append one keypress per character read from `reader`, replaying every line
    /// terminator (`\n`, `\r\n` or a lone `\r`) as CR followed by LF.
    pub fn append_text(&mut self, mut reader: impl BufRead) -> Result<()> {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            let mut chars = line.chars().peekable();
            while let Some(c) = chars.next() {
                match c {
                    '\r' => {
                        chars.next_if_eq(&'\n');
                        self.actions.extend(Action::newline());
                    }
                    '\n' => self.actions.extend(Action::newline()),
                    _ => self.actions.push(Action::keypress(c)),
                }
            }
        }
        debug!("macro `{}` now holds {} actions", self.name, self.actions.len());
        return Ok(());
    }
}

/// The root `<Macros>` container of a Notepad++ shortcuts file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Macros {
    pub macros: Vec<Macro>,
}

impl From<Macro> for Macros {
    fn from(value: Macro) -> Self {
        return Macros {
            macros: vec![value],
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CARRIAGE_RETURN, LINE_FEED};
    use std::io::Write;
    use tempfile::NamedTempFile;
    use test_log::test;

    fn payloads(m: &Macro) -> Vec<&str> {
        return m.actions.iter().map(|a| a.s_param.as_str()).collect();
    }

    fn file_with(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        return file;
    }

    #[test]
    fn builds_from_file() {
        let file = file_with(b"Hi\n");
        let result = Macro::from_file(file.path(), "greeting", Modifiers::default(), "a").unwrap();
        assert_eq!(result.name, "greeting");
        assert_eq!(result.key, 97);
        assert_eq!(result.modifiers, Modifiers::default());
        assert_eq!(payloads(&result), vec!["H", "i", CARRIAGE_RETURN, LINE_FEED]);
    }

    #[test]
    fn one_action_per_printable_character() {
        let text = "The quick brown fox: 1 + 2 = 3!";
        let mut result = Macro::new("m", Modifiers::default(), 116);
        result.append_text(text.as_bytes()).unwrap();
        assert_eq!(result.actions.len(), text.chars().count());
        assert_eq!(payloads(&result).concat(), text);
    }

    #[test]
    fn every_line_ending_becomes_cr_lf() {
        for text in ["a\nb", "a\r\nb", "a\rb"] {
            let mut result = Macro::new("m", Modifiers::default(), 97);
            result.append_text(text.as_bytes()).unwrap();
            assert_eq!(
                payloads(&result),
                vec!["a", CARRIAGE_RETURN, LINE_FEED, "b"],
                "input {:?}",
                text
            );
        }
    }

    #[test]
    fn blank_lines_and_trailing_carriage_return() {
        let mut result = Macro::new("m", Modifiers::default(), 97);
        result.append_text("\n\r".as_bytes()).unwrap();
        assert_eq!(
            payloads(&result),
            vec![CARRIAGE_RETURN, LINE_FEED, CARRIAGE_RETURN, LINE_FEED]
        );
    }

    #[test]
    fn repeated_characters_are_kept() {
        let mut result = Macro::new("m", Modifiers::default(), 97);
        result.append_text("zz  z".as_bytes()).unwrap();
        assert_eq!(payloads(&result), vec!["z", "z", " ", " ", "z"]);
    }

    #[test]
    fn empty_file_has_no_actions() {
        let file = file_with(b"");
        let result = Macro::from_file(file.path(), "empty", Modifiers::default(), "F1").unwrap();
        assert!(result.actions.is_empty());
        assert_eq!(result.key, 112);
    }

    #[test]
    fn modifiers_are_kept_verbatim() {
        let file = file_with(b"x");
        let modifiers = Modifiers {
            ctrl: true,
            alt: false,
            shift: true,
        };
        let result = Macro::from_file(file.path(), "m", modifiers, "f2").unwrap();
        assert_eq!(result.modifiers, modifiers);
    }

    #[test]
    fn unresolvable_keys_fail() {
        let file = file_with(b"x");
        let unknown = Macro::from_file(file.path(), "m", Modifiers::default(), "€").unwrap_err();
        assert!(matches!(unknown.raw(), RawError::UnknownKey(_)));
        let unsupported =
            Macro::from_file(file.path(), "m", Modifiers::default(), "num_+").unwrap_err();
        assert!(matches!(unsupported.raw(), RawError::UnsupportedKey(_)));
    }

    #[test]
    fn missing_input_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let result = Macro::from_file(&path, "m", Modifiers::default(), "a").unwrap_err();
        assert!(matches!(result.raw(), RawError::MissingInput(p) if p == &path));
    }

    #[test]
    fn modifier_union() {
        let a = Modifiers {
            ctrl: true,
            ..Modifiers::default()
        };
        let b = Modifiers {
            shift: true,
            ..Modifiers::default()
        };
        assert_eq!(
            a.union(b),
            Modifiers {
                ctrl: true,
                alt: false,
                shift: true
            }
        );
    }
}
