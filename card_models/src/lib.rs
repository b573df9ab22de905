//! # Card Models
//!
//! Note-type definitions for Flashdeck. A model lists the fields a fact
//! carries and the templates used to turn a fact into cards. This crate holds
//! no deck state; it is the schema layer that `deck_core` builds on.
//!
//! ## Core Components
//!
//! - **model**: Fields, card templates and the minimal `{{Field}}` renderer
//! - **stock**: The registry of built-in note types ("Basic", "Cloze")
//! - **config**: Deck configuration loaded from TOML

pub mod config;
pub mod errors;
pub mod model;
pub mod stock;

pub use config::*;
pub use errors::*;
pub use model::*;
pub use stock::*;
