//! Interactive behavior of the Blossoms website, independent of any browser.
//!
//! Each widget is a [`component::Component`] mounted by [`page::Page::load`]
//! against an injected [`document::Document`]; time comes from a virtual
//! [`scheduler::Scheduler`]. [`sim::SimDocument`] and [`runner::Runner`] provide
//! an in-memory page and a frame loop to drive it.

pub mod animation;
pub mod calendar;
pub mod card_stack;
pub mod carousel;
pub mod component;
pub mod config;
pub mod constants;
pub mod document;
pub mod intro;
pub mod page;
pub mod reveal;
pub mod runner;
pub mod scheduler;
pub mod sim;
pub mod state;
pub mod toggle;

pub use config::{Config, PageVariant};
pub use page::Page;
pub use runner::Runner;
pub use sim::SimDocument;
