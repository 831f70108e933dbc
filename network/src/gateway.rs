// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the remote boolean-answer service.
//!
//! One GET per turn, short timeout, no retries. Every failure collapses to
//! [`AnswerOutcome::Unknown`] so the engine can fall back to a coin flip;
//! nothing here ever aborts a match.

use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;
use yesno_core::AnswerOutcome;

/// The public yesno.wtf endpoint
pub const DEFAULT_ENDPOINT: &str = "https://yesno.wtf/api";

/// Answer requests give up after this long
const ANSWER_TIMEOUT: Duration = Duration::from_secs(2);

/// Wire format of a service reply. Anything that fails to parse into this
/// shape counts as an unknown answer.
#[derive(Debug, Deserialize)]
struct ApiReply {
    answer: String,
    #[serde(default)]
    image: Option<String>,
}

/// Client for the answer service. Clones share one connection pool, the
/// same way the original kept a single HTTP session for all turns.
#[derive(Debug, Clone)]
pub struct AnswerClient {
    http: reqwest::Client,
    endpoint: String,
}

impl AnswerClient {
    /// Build a client against `endpoint`
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    /// Fetch one answer. Returns the normalized outcome plus the optional
    /// image locator; any failure becomes `(Unknown, None)`.
    pub async fn fetch(&self) -> (AnswerOutcome, Option<String>) {
        match self.try_fetch().await {
            Ok(reply) => {
                let outcome = AnswerOutcome::parse(&reply.answer);
                tracing::debug!(answer = %reply.answer, ?outcome, "answer received");
                (outcome, reply.image)
            }
            Err(err) => {
                tracing::debug!(error = %err, "answer fetch failed");
                (AnswerOutcome::Unknown, None)
            }
        }
    }

    async fn try_fetch(&self) -> Result<ApiReply> {
        let response = self
            .http
            .get(&self.endpoint)
            .timeout(ANSWER_TIMEOUT)
            .send()
            .await?;
        let reply = response.error_for_status()?.json::<ApiReply>().await?;
        Ok(reply)
    }

    /// The underlying HTTP client, shared with the image download
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }
}
