//! Document rendering with tiered degrade-and-retry.
//!
//! # Architecture
//! - `ResumeRenderer` is the backend seam; the lopdf implementation lives
//!   in `pdf`, tests drive the retry loop with scripted fakes.
//! - `render_with_retry` walks the reduction policy's tiers, reducing the
//!   record after each renderer failure.
//!
//! Timeouts are terminal. Retrying the same wall-clock budget with
//! slightly less content does not converge, so the caller gets the
//! timeout immediately instead of after N of them.

pub mod pdf;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;

use crate::models::sanitized::SanitizedResume;
use crate::sanitize::reduce::{ReductionPolicy, RenderTier};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("renderer failed: {0}")]
    Renderer(String),
    #[error("rendering timed out after {0}s")]
    Timeout(u64),
}

/// Rendered document bytes plus the tier that produced them.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub tier: RenderTier,
}

/// Layout backend seam.
#[async_trait]
pub trait ResumeRenderer: Send + Sync {
    async fn render(&self, resume: &SanitizedResume) -> Result<Vec<u8>, RenderError>;
}

/// Renders through the policy's tiers until one succeeds.
///
/// Each attempt runs under `timeout_secs`. A renderer failure degrades to
/// the next tier; a timeout (from the clock here or reported by the
/// backend) returns immediately; exhausting every tier surfaces the last
/// renderer error.
pub async fn render_with_retry(
    renderer: &dyn ResumeRenderer,
    policy: &ReductionPolicy,
    resume: &SanitizedResume,
    timeout_secs: u64,
) -> Result<RenderedDocument, RenderError> {
    let budget = Duration::from_secs(timeout_secs);
    let mut last_error = RenderError::Renderer("no render tiers configured".to_string());

    for tier in policy.tiers() {
        let attempt = policy.apply(tier, resume);
        match tokio::time::timeout(budget, renderer.render(&attempt)).await {
            Ok(Ok(bytes)) => return Ok(RenderedDocument { bytes, tier }),
            Ok(Err(RenderError::Timeout(secs))) => {
                warn!(tier = tier.as_str(), "render attempt reported a timeout");
                return Err(RenderError::Timeout(secs));
            }
            Ok(Err(error)) => {
                warn!(tier = tier.as_str(), %error, "render attempt failed, degrading");
                last_error = error;
            }
            Err(_) => {
                warn!(tier = tier.as_str(), timeout_secs, "render attempt timed out");
                return Err(RenderError::Timeout(timeout_secs));
            }
        }
    }

    Err(last_error)
}
