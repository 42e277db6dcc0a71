pub mod ansi;
pub mod chat_loop;
pub mod renderer;
pub mod theme;
