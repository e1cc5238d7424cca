// ABOUTME: Static configuration constants for the REPL and CLI banner

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const PROMPT: &str = "lispy> ";

pub const WELCOME_MESSAGE: &str = "Lispy version 1.0.0";
pub const WELCOME_SUBTITLE: &str = "Press Ctrl+C to interrupt a line, Ctrl+D to exit";
