//! Request handlers.
//!
//! Handlers parse raw request values at the boundary, delegate to
//! `giftreco_core` through the shared [`CatalogSession`], and map errors via
//! [`AppError`].
//!
//! [`CatalogSession`]: crate::session::CatalogSession
//! [`AppError`]: crate::error::AppError

pub mod gifts;
pub mod submissions;
