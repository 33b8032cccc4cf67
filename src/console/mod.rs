mod polyglot_console;

pub use polyglot_console::{PolyglotConsole, UserResult};
