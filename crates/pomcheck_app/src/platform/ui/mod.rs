pub mod console;
pub mod prompt;
pub mod render;
