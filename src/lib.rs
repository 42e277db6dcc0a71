//! Paterm is a terminal-first personal assistant: a fake-terminal chat
//! surface backed by an OpenAI-compatible completion API, with a clock
//! and current-weather widget.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`ui::ansi`] renders strings with embedded SGR color markers into
//!   styled segments; everything shown in the chat area passes through it.
//! - [`core`] owns session state, configuration, and the two one-shot API
//!   clients (chat completions and current weather).
//! - [`commands`] implements the slash commands handled locally by the
//!   chat loop.
//! - [`api`] defines the wire payloads the clients exchange.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`] into [`ui::chat_loop`] for interactive
//! sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
