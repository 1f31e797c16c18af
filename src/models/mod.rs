//! Data models for the ConnectWise Manage API.
//!
//! This module contains type definitions for tickets, configurations
//! (assets), ticket notes, and the shared reference and patch types.
//! Every field tolerates absence since the `fields` query parameter
//! returns partial records.

mod common;
mod configuration;
mod note;
mod ticket;

pub use common::*;
pub use configuration::*;
pub use note::*;
pub use ticket::*;
