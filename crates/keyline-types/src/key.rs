//! Key codes understood by the command layer.
//!
//! A key is a single byte. Hosts map their native keyboard events onto these
//! values before handing them to the dispatcher.

/// Key-up event. Ignored everywhere; hosts send it so that key release does
/// not fall through to the help listing.
pub const RELEASE: u8 = 0x00;

/// Backspace (`^H`).
pub const BACKSPACE: u8 = 0x08;

/// Enter. Hosts should map `\r` to this value.
pub const ENTER: u8 = b'\n';

/// Escape.
pub const ESC: u8 = 0x1b;

/// Space.
pub const SPACE: u8 = b' ';

/// Delete.
pub const DEL: u8 = 0x7f;

/// Whether `key` erases the previous character.
pub fn is_erase(key: u8) -> bool {
    key == BACKSPACE || key == DEL
}

/// Human-readable name of a key as shown in the help listing.
///
/// Space, Enter and Escape get symbolic names. Any other key is rendered
/// literally, with a trailing `" .."` when the bound command takes a
/// parameter.
pub fn key_name(key: u8, requires_param: bool) -> String {
    match key {
        SPACE => "SPACE".to_string(),
        ENTER => "ENTER".to_string(),
        ESC => "ESC".to_string(),
        _ => {
            let mut name = char::from(key).to_string();
            if requires_param {
                name.push_str(" ..");
            }
            name
        },
    }
}
