//! Error Types
//!
//! This module defines the error types used at the edges of the crate.
//!
//! # Overview
//!
//! The animation core never fails loudly: a hover on an untracked leaf or a
//! capture against a missing node simply does nothing. Errors only surface
//! where external input is parsed or validated:
//! - Prefab (model description) loading and validation
//! - Control panel lookups and knob ranges
//! - Configuration and preset files
//!
//! # Usage
//!
//! Fallible APIs return [`Result<T>`] which is an alias for
//! `std::result::Result<T, ApexError>`.
//!
//! ```rust,ignore
//! use apex::errors::Result;
//! use apex::scene::Prefab;
//!
//! fn load_model(path: &str) -> Result<Prefab> {
//!     Prefab::load(path)
//! }
//! ```

use thiserror::Error;

/// The main error type for the showcase crate.
#[derive(Error, Debug)]
pub enum ApexError {
    // ========================================================================
    // Prefab Errors
    // ========================================================================
    /// A prefab refers to a node index that does not exist.
    #[error("Prefab index out of bounds: {context} (index: {index})")]
    PrefabIndexOutOfBounds {
        /// Description of what was being accessed
        context: String,
        /// The invalid index
        index: usize,
    },

    /// A prefab node is reachable twice (shared child or cycle).
    #[error("Prefab node {0} is referenced more than once")]
    PrefabCycle(usize),

    // ========================================================================
    // Control Panel Errors
    // ========================================================================
    /// No control group with this name is registered.
    #[error("Unknown control group: {0}")]
    UnknownControlGroup(String),

    /// The group exists but has no knob with this name.
    #[error("Unknown control: {group}.{knob}")]
    UnknownControl {
        /// Group name
        group: String,
        /// Knob name
        knob: String,
    },

    /// A group with this name is already registered.
    #[error("Control group already registered: {0}")]
    DuplicateControlGroup(String),

    /// Knob range or step is unusable.
    #[error("Invalid knob {name}: {reason}")]
    InvalidKnob {
        /// Knob name
        name: String,
        /// What is wrong with it
        reason: String,
    },

    // ========================================================================
    // I/O & Format Errors
    // ========================================================================
    /// File I/O error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Alias for `Result<T, ApexError>`.
pub type Result<T> = std::result::Result<T, ApexError>;
