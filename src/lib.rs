//! desktop-automation - mouse and keyboard automation
//!
//! This library backs two front-ends over the same automation primitives:
//! a command-line tool and an MCP (Model Context Protocol) server.
//!
//! ## Features
//!
//! - Instant and smooth (animated) cursor moves
//! - Clicking at screen coordinates
//! - Cursor position queries
//! - Typing text, optionally with a cancellable delay between keystrokes
//!
//! ## Layers
//!
//! - [`validate`]: raw input to typed requests
//! - [`automation`]: `Mouse` and `Keyboard` services
//! - [`backend`]: the OS input seam (enigo, or a recorder for tests)
//! - [`cli`] and [`server`]: the two front-ends

pub mod automation;
pub mod backend;
pub mod cli;
pub mod error;
pub mod server;
pub mod validate;
