//! Base types and error handling.
//!
//! - [`XhrError`](error::XhrError): the closed set of failures a call settles with
//! - [`ExecutionContext`](context::ExecutionContext): scheme of the hosting page

pub mod context;
pub mod error;

#[cfg(test)]
mod tests;
