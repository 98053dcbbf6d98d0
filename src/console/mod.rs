//! Console front end: the interactive menu and one-shot subcommands.

pub mod commands;
pub mod menu;
mod prompt;
mod render;
pub mod view;

pub use menu::run;
