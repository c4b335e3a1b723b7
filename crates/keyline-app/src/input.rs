use keyline_terminal::CommandRegistry;
use keyline_types::key;

/// Map a raw console byte to the key code the dispatcher expects.
///
/// Returns `None` for bytes that should not reach the dispatcher at all.
pub fn map_console_byte(byte: u8, previous: Option<u8>) -> Option<u8> {
    match byte {
        b'\r' => Some(key::ENTER),
        // A `\r\n` pair is one Enter.
        b'\n' if previous == Some(b'\r') => None,
        _ => Some(byte),
    }
}

/// Whether a mapped key should reach the dispatcher.
///
/// Cooked-mode terminals end every line with a newline. Outside a session
/// that Enter is dropped unless a command is bound to it.
pub fn should_dispatch(code: u8, registry: &CommandRegistry, session_open: bool) -> bool {
    code != key::ENTER || session_open || registry.find_command(key::ENTER).is_some()
}
