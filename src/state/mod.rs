//! State management module
//!
//! This module handles all application state, including:
//! - The recipe data model and tag parsing (data.rs)
//! - User recipe storage and JSON persistence (library.rs)
//! - The favorites ledger (favorites.rs)
//! - The bundled seed recipes (seed.rs)

pub mod data;
pub mod favorites;
pub mod library;
pub mod seed;
