#[allow(unused_imports)]
use log::{debug, info};

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::action::Action;
use crate::error::{ErrorContext, Result};
use crate::record::{Macro, Macros};

//
// ---------------- Pretty Printing ----------------
//

const INDENT: &str = "  ";

/// Generic attribute escaping; this is undone for `&amp;` by `unescape_ampersands`.
fn escape_attribute(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\t' => result.push_str("&#9;"),
            '\n' => result.push_str("&#10;"),
            '\r' => result.push_str("&#13;"),
            _ => result.push(c),
        }
    }
    return result;
}

fn yes_no(flag: bool) -> &'static str {
    return if flag { "yes" } else { "no" };
}

fn start_tag(out: &mut String, depth: usize, tag: &str, attributes: &[(&str, String)]) {
    out.push_str(&INDENT.repeat(depth));
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attribute(value));
        out.push('"');
    }
}

fn write_action(out: &mut String, depth: usize, action: &Action) {
    start_tag(
        out,
        depth,
        "Action",
        &[
            ("type", action.kind.to_string()),
            ("message", action.message.to_string()),
            ("wParam", action.w_param.to_string()),
            ("lParam", action.l_param.to_string()),
            ("sParam", action.s_param.clone()),
        ],
    );
    out.push_str("/>\n");
}

fn write_macro(out: &mut String, depth: usize, record: &Macro) {
    start_tag(
        out,
        depth,
        "Macro",
        &[
            ("name", record.name.clone()),
            ("Ctrl", yes_no(record.modifiers.ctrl).to_string()),
            ("Alt", yes_no(record.modifiers.alt).to_string()),
            ("Shift", yes_no(record.modifiers.shift).to_string()),
            ("Key", record.key.to_string()),
        ],
    );
    if record.actions.is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");
    for action in &record.actions {
        write_action(out, depth + 1, action);
    }
    out.push_str(&INDENT.repeat(depth));
    out.push_str("</Macro>\n");
}

/// Render `macros` as indented XML with generic attribute escaping.
pub fn pretty_print(macros: &Macros) -> String {
    let mut out = String::new();
    if macros.macros.is_empty() {
        out.push_str("<Macros/>\n");
        return out;
    }
    out.push_str("<Macros>\n");
    for record in &macros.macros {
        write_macro(&mut out, 1, record);
    }
    out.push_str("</Macros>\n");
    return out;
}

//
// ---------------- Encoding Corrections ----------------
//

// Payloads already hold intentional character references (`&#x000D;`), which the generic
// escaper turned into `&amp;#x000D;`.
fn unescape_ampersands(xml: &str) -> String {
    return xml.replace("&amp;", "&");
}

// Notepad++ expects plain ASCII; anything else is written as a decimal character reference.
fn encode_ascii(xml: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(xml.len());
    for c in xml.chars() {
        if c.is_ascii() {
            result.push(c as u8);
        } else {
            result.extend_from_slice(format!("&#{};", c as u32).as_bytes());
        }
    }
    return result;
}

/// The exact bytes written for `macros`: pretty XML, with `&amp;` restored to `&` and
/// then every non-ASCII character replaced by a numeric reference, in that order.
pub fn to_xml(macros: &Macros) -> Vec<u8> {
    return encode_ascii(&unescape_ampersands(&pretty_print(macros)));
}

/// Serialize `macros` to `path`, replacing any existing content.
pub fn write_macros(path: impl AsRef<Path>, macros: &Macros) -> Result<()> {
    let path = path.as_ref();
    let bytes = to_xml(macros);
    let mut file = File::create(path).with_path(path)?;
    file.write_all(&bytes).with_path(path)?;
    file.flush().with_path(path)?;
    info!("wrote {} bytes to '{}'", bytes.len(), path.display());
    return Ok(());
}
