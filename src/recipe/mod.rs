//! Recipe composition
//!
//! A migration is described by one rewrite-engine recipe document whose
//! `recipeList` is assembled from pre-authored fragment files. Fragments are
//! identified by [`FragmentId`] only; there is no way to merge a document the
//! catalog does not know about.

pub mod composer;
pub mod document;
pub mod fragment;
pub mod store;

pub use composer::RecipeComposer;
pub use document::{RecipeDocument, RECIPE_LIST_KEY};
pub use fragment::FragmentId;
pub use store::FragmentStore;

use thiserror::Error;

/// File name of the composed document at the workspace root
pub const RECIPE_CONFIG_FILE: &str = "rewrite.yml";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompositionError {
    #[error("Unknown recipe fragment: {0}")]
    UnknownFragment(String),

    #[error("Fragment {fragment} is unavailable: {message}")]
    FragmentUnavailable {
        fragment: FragmentId,
        message: String,
    },

    #[error("Invalid recipe document {origin}: {message}")]
    InvalidDocument { origin: String, message: String },

    #[error("Key '{key}' is missing or not a list in {document}")]
    MissingKey { key: String, document: String },

    #[error("No fragments selected")]
    NothingToCompose,

    #[error("Failed to serialize recipe document: {0}")]
    Serialize(String),
}
