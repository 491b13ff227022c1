/// The payload replayed for the carriage-return half of a line break.
pub const CARRIAGE_RETURN: &str = "&#x000D;";
/// The payload replayed for the line-feed half of a line break.
pub const LINE_FEED: &str = "&#x000A;";

// Notepad++ records typed text as a `SCI_REPLACESEL` (2170) message of type 1; the
// numeric parameters are always zero for this kind of action.
const ACTION_TYPE: u32 = 1;
const REPLACE_SELECTION: u32 = 2170;

/// One simulated keypress inside a macro.
///
/// ```xml
/// <Action type="1" message="2170" wParam="0" lParam="0" sParam="x"/>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub kind: u32,
    pub message: u32,
    pub w_param: u32,
    pub l_param: u32,
    pub s_param: String,
}

impl Action {
    fn replay(payload: impl Into<String>) -> Self {
        return Action {
            kind: ACTION_TYPE,
            message: REPLACE_SELECTION,
            w_param: 0,
            l_param: 0,
            s_param: payload.into(),
        };
    }

    pub fn keypress(character: char) -> Self {
        return Action::replay(character);
    }

    /// A line break always replays as CR followed by LF, whatever the host's line ending.
    pub fn newline() -> [Self; 2] {
        return [Action::replay(CARRIAGE_RETURN), Action::replay(LINE_FEED)];
    }
}
