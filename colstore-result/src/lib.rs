//! Error types and result definitions for the colstore column stores.
//!
//! Every crate in the workspace returns [`Result<T>`], whose error variant is the
//! single [`Error`] enum. Errors are surfaced to the caller as-is; no store
//! retries or swallows a failure internally.
//!
//! # Error Categories
//!
//! - **Arithmetic** ([`Error::Overflow`]): a Sum or Mean total left the native range
//! - **Coercion** ([`Error::TypeConversion`], [`Error::InvalidXml`]): a value or
//!   text cannot be represented in the store's native type
//! - **Capability** ([`Error::UnsupportedAggregate`]): the store cannot compute
//!   the requested aggregate
//! - **Caller bugs** ([`Error::IndexOutOfRange`], [`Error::InvalidArgumentError`])
//! - **Internal errors** ([`Error::Internal`]): violated invariants

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
