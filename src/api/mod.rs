//! REST API module.
//!
//! Handlers return the stored records directly as JSON; errors go through [`AppError`].

mod offers;

pub use offers::*;

use serde::Serialize;

use crate::errors::AppError;

/// Acknowledgment body for operations that return no record.
#[derive(Debug, Serialize)]
pub struct Acknowledgment {
    pub success: bool,
}

impl Acknowledgment {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<T, AppError>;
