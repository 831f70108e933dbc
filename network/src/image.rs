// SPDX-License-Identifier: MIT OR Apache-2.0

//! Download of the answer's animation payload.
//!
//! The bytes stay opaque; decoding is the presentation layer's problem.

use std::time::Duration;
use yesno_core::AnimationHandle;

/// Image downloads get twice the answer timeout before giving up
const IMAGE_TIMEOUT: Duration = Duration::from_secs(4);

/// Fetch the animation behind `url`, or `None` on any failure. Failures are
/// cosmetic only, so they are logged and swallowed.
pub async fn fetch_animation(http: &reqwest::Client, url: &str) -> Option<AnimationHandle> {
    match try_fetch(http, url).await {
        Ok(bytes) => Some(AnimationHandle::new(bytes)),
        Err(err) => {
            tracing::debug!(url, error = %err, "animation download failed");
            None
        }
    }
}

async fn try_fetch(http: &reqwest::Client, url: &str) -> anyhow::Result<bytes::Bytes> {
    let response = http.get(url).timeout(IMAGE_TIMEOUT).send().await?;
    let bytes = response.error_for_status()?.bytes().await?;
    Ok(bytes)
}
