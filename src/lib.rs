//! tabtint — keeps the browser chrome color in sync with the active tab.
//!
//! This crate is the background half of a browser extension, run as a
//! native-messaging host. A small rule table maps URL substrings to theme
//! presets; when no rule matches, the page's rendered background color is
//! sampled and a full palette (contrasting border, opposite-color text) is
//! derived from it.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use tabtint::config::Config;
//! use tabtint::dispatcher::Dispatcher;
//! use tabtint::host::stdio::spawn_stdio_host;
//!
//! # async fn example() {
//! let (host, events) = spawn_stdio_host();
//! let dispatcher = Dispatcher::new(host, Arc::new(Config::default()));
//! dispatcher.run(events).await;
//! # }
//! ```

pub mod applicator;
pub mod color;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod host;
pub mod matcher;
pub mod resolver;
pub mod rules;
#[cfg(test)]
pub mod testsupport;
pub mod theme;
