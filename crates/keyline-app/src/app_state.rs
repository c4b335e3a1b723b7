use std::cell::{Cell, RefCell};
use std::time::Instant;

/// Phonebook searched by the `/` command.
pub const CONTACTS: &[(&str, &str)] = &[
    ("alice", "sip:alice@example.com"),
    ("bob", "sip:bob@example.org"),
    ("carol", "sip:carol@example.net"),
    ("dave", "sip:dave@example.com"),
    ("erin", "sip:erin@example.org"),
];

/// State shared with command handlers through the caller context.
pub struct AppState {
    pub started: Instant,
    pub quit: Cell<bool>,
    /// Numbers dialed so far, most recent last.
    pub dialed: RefCell<Vec<String>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
            quit: Cell::new(false),
            dialed: RefCell::new(Vec::new()),
        }
    }
}
