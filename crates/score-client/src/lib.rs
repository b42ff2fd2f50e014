//! Score service client for FlashBack
//!
//! This crate fetches high score records from the FlashBack score service.
//! Views depend on the [`ScoreService`] trait so tests and alternative
//! backends can stand in for [`HttpScoreClient`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod error;

pub use client::{HttpScoreClient, ScoreClientConfig, ScoreService};
pub use error::{Result, ScoreClientError};
