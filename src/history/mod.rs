//! # Event log reconstruction
//!
//! Turns a PokerNow event log into one [`Ply`] per hand.
//!
//! The pipeline is a single synchronous pass:
//!
//! - [`PokerEvent::parse`] normalizes each raw `<body>,<timestamp>,<order>` line.
//! - [`HistoryParser`] sorts the events by `order` and cuts them into hands at
//!   every `ending hand` line.
//! - [`classify`] finds every [`EventKind`] whose cue appears in a body, and
//!   [`extract`] pulls that kind's payload out of it.
//! - [`Ply::apply`] folds each payload into the hand being built.
//!
//! Any error aborts the whole parse.
mod action;
mod classifier;
mod config;
mod event;
mod extract;
mod parser;
mod ply;

pub use action::{Action, Street};
pub use classifier::{classify, is_hand_boundary, EventKind};
pub use config::ParserConfig;
pub use event::PokerEvent;
pub use extract::{extract, Extracted};
pub use parser::HistoryParser;
pub use ply::Ply;
