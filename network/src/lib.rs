// SPDX-License-Identifier: MIT OR Apache-2.0

//! Yes/No Othello Network - Remote Answer Fetching
//!
//! This crate talks to the boolean-answer web service and runs the
//! background worker that keeps the engine's prefetch cache fed:
//! - HTTP gateway normalizing service replies to [`yesno_core::AnswerOutcome`]
//! - Optional download of the answer's animation payload
//! - A dedicated worker thread owning the tokio runtime for fetch tasks

#![deny(unsafe_code)]
#![deny(clippy::all)]

pub mod gateway;
pub mod image;
pub mod worker;

pub use gateway::{AnswerClient, DEFAULT_ENDPOINT};
pub use worker::{spawn_worker, HttpFetchBackend};
