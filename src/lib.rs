//! Two traced serverless functions.
//!
//! - [`responder`] answers with a static greeting.
//! - [`invoker`] calls the Responder over HTTP and relays what it got.
//!
//! Both return an [`envelope::Envelope`] on success and an
//! [`error::Failure`] otherwise; a failure still carries a well-formed
//! envelope for the caller.

pub mod config;
pub mod envelope;
pub mod error;
pub mod http;
pub mod invoker;
pub mod request;
pub mod responder;

#[cfg(test)]
pub(crate) mod testing;
