//! Data-driven battle content and loaders.
//!
//! This crate reads static content from disk:
//! - Balance tables (TOML) into [`battle_core::BattleConfig`]
//! - Character rosters (RON) built on the four archetypes
//!
//! Loaded values are validated before they are returned, so a front end can
//! hand them to [`battle_core::Battle`] directly.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, Roster, RosterEntry, RosterLoader, StatOverrides};
