use std::result;
use thiserror::Error;

/// Errors returned by the trees and sets of this crate.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Two values could not be ordered relative to each other.
    #[error("comparison of {left} with {right} failed")]
    Comparison {
        left: &'static str,
        right: &'static str,
    },
    /// A mutation was attempted on a frozen collection.
    #[error("can't modify frozen {0}")]
    Frozen(&'static str),
}

pub type Result<T> = result::Result<T, Error>;
