//! Backend trait for scene segmentation.

use async_trait::async_trait;
use dreadboard_core::{SegmentationRequest, SegmentationResponse};
use dreadboard_error::DreadboardResult;

/// A generation service that breaks a text window into scenes.
///
/// Implementations are expected to handle their own transient-error retries
/// and to surface any final failure as an error. They must not try to repair
/// the fidelity of the excerpts they return; the pipeline reconciles
/// approximate output against the real narrative.
#[async_trait]
pub trait SceneGenerator: Send + Sync {
    /// Segment `req.text_window()` into at most `req.batch_size()` scenes.
    async fn segment(&self, req: &SegmentationRequest) -> DreadboardResult<SegmentationResponse>;

    /// Provider name (e.g., "gemini").
    fn provider_name(&self) -> &'static str;

    /// Model identifier used for segmentation.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: SceneGenerator + ?Sized> SceneGenerator for std::sync::Arc<T> {
    async fn segment(&self, req: &SegmentationRequest) -> DreadboardResult<SegmentationResponse> {
        (**self).segment(req).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
