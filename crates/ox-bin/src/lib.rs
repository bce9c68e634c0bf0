//! Headless driver for the hex editing core.
//!
//! `oxhex` opens one file, replays a script of editing commands against it
//! and prints the visible part of the dump together with a status line. It
//! exercises the same `ApplicationState` / dispatcher path an interactive
//! front end would, minus the terminal.

pub mod dump;
pub mod session;

pub use dump::{render_dump, render_status};
pub use session::{ScriptProblem, Session};
