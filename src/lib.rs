//! Pokédex card viewer.
//!
//! Loads one page of the PokeAPI catalog into a card grid and resolves an
//! entry's detail and evolution line on demand. The binary wires these
//! modules into a `tui-dispatch` runtime; the library is what tests use.

pub mod action;
pub mod api;
pub mod config;
pub mod display;
pub mod effect;
pub mod error;
pub mod evolution;
pub mod logging;
pub mod reducer;
pub mod resolver;
pub mod sprite;
pub mod sprite_backend;
pub mod state;
pub mod ui;
