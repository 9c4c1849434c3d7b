//! Batch pipeline: window → generator → reconciliation → completion.

use crate::{BatchOutcome, StoryboardState, decide_completion, reconcile, unconsumed_text};
use dreadboard_core::{ArtStyle, Scene, SegmentationRequest, StoryContext, resolve_style};
use dreadboard_error::{
    ConfigError, DreadboardResult, SegmentationError, SegmentationErrorKind,
};
use dreadboard_interface::SceneGenerator;
use tracing::{debug, info, instrument, warn};

/// Default number of scenes requested per batch.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Compute the next batch for `state` without mutating it.
///
/// Short-circuits without calling the generator when the narrative is
/// already finished or the unconsumed remainder is exhausted. Otherwise one
/// generator call is made; its scenes are renumbered from
/// [`StoryboardState::next_scene_number`], the new cursor is reconciled
/// against the narrative and the completion decision is taken.
///
/// # Errors
///
/// - [`SegmentationErrorKind::InvalidBatchSize`] for a zero batch size
/// - [`SegmentationErrorKind::BatchFailed`] when the generator fails
/// - [`SegmentationErrorKind::ZeroScenes`] when it returns nothing
/// - [`SegmentationErrorKind::NoProgress`] when an unfinished batch does not
///   advance the cursor
///
/// In every error case the caller's state is untouched.
#[instrument(
    skip_all,
    fields(
        provider = generator.provider_name(),
        cursor = state.cursor(),
        narrative_len = state.narrative().len(),
        scenes = state.scenes().len(),
        batch_size = batch_size
    )
)]
pub async fn request_next_batch<G>(
    generator: &G,
    state: &StoryboardState,
    batch_size: usize,
    context: &StoryContext,
    styles: &[ArtStyle],
) -> DreadboardResult<BatchOutcome>
where
    G: SceneGenerator + ?Sized,
{
    if batch_size == 0 {
        return Err(SegmentationError::new(SegmentationErrorKind::InvalidBatchSize(0)).into());
    }

    let narrative = state.narrative();
    if state.is_finished() {
        debug!("Narrative already finished, no batch needed");
        return Ok(BatchOutcome::finished_without_call(narrative.len()));
    }

    let window = unconsumed_text(narrative, state.cursor());
    if window.is_exhausted() {
        info!(
            remaining = window.text().len(),
            "Remaining text exhausted, marking narrative finished"
        );
        return Ok(BatchOutcome::finished_without_call(narrative.len()));
    }

    let style = resolve_style(styles, context.style_id())
        .ok_or_else(|| ConfigError::new("Art style catalog is empty"))?;
    if style.id() != context.style_id() {
        debug!(
            requested = %context.style_id(),
            fallback = %style.id(),
            "Unknown art style, using fallback"
        );
    }

    let start = state.next_scene_number();
    let request = SegmentationRequest::from_context(window.text(), batch_size, start, context);

    let response = generator.segment(&request).await.map_err(|e| {
        warn!(error = %e, "Segmentation backend failed");
        SegmentationError::new(SegmentationErrorKind::BatchFailed(e.to_string()))
    })?;

    let mut generated = response.scenes;
    if generated.is_empty() {
        return Err(SegmentationError::new(SegmentationErrorKind::ZeroScenes(start)).into());
    }
    // Dropped scenes cover text that still needs segmenting, so only the
    // tolerance rule may finish a truncated batch.
    let mut has_more = response.has_more_scenes;
    if generated.len() > batch_size {
        warn!(
            returned = generated.len(),
            batch_size, "Generator exceeded batch size, truncating"
        );
        generated.truncate(batch_size);
        has_more = true;
    }

    let excerpts: Vec<&str> = generated.iter().map(|scene| scene.script.as_str()).collect();
    let reconciled = reconcile(narrative, &window, &excerpts);
    let completion = decide_completion(narrative.len(), reconciled.cursor, has_more);

    if !completion.finished && completion.cursor <= state.cursor() {
        return Err(
            SegmentationError::new(SegmentationErrorKind::NoProgress(state.cursor())).into(),
        );
    }

    let scenes: Vec<Scene> = generated
        .into_iter()
        .enumerate()
        .map(|(index, scene)| Scene::from_generated(start + index, scene, style))
        .collect();

    info!(
        added = scenes.len(),
        method = %reconciled.method,
        new_cursor = completion.cursor,
        finished = completion.finished,
        tokens = response.tokens_used,
        "Segmentation batch reconciled"
    );

    Ok(BatchOutcome {
        scenes,
        new_cursor: completion.cursor,
        new_finished: completion.finished,
        tokens_used: response.tokens_used,
        reconciliation: Some(reconciled.method),
    })
}

/// Drives batches against a single generator and commits them to a state.
#[derive(Debug, Clone)]
pub struct Segmenter<G> {
    generator: G,
    styles: Vec<ArtStyle>,
    batch_size: usize,
}

impl<G: SceneGenerator> Segmenter<G> {
    /// Create a segmenter.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero batch size or an empty style catalog.
    pub fn new(generator: G, styles: Vec<ArtStyle>, batch_size: usize) -> DreadboardResult<Self> {
        if batch_size == 0 {
            return Err(
                SegmentationError::new(SegmentationErrorKind::InvalidBatchSize(batch_size)).into(),
            );
        }
        if styles.is_empty() {
            return Err(ConfigError::new("Art style catalog is empty").into());
        }
        Ok(Self {
            generator,
            styles,
            batch_size,
        })
    }

    /// The wrapped generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Scenes requested per batch.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Run one batch and commit it.
    ///
    /// On error the state is left as it was, apart from clearing the
    /// pending-batch flag.
    ///
    /// # Errors
    ///
    /// Returns [`SegmentationErrorKind::BatchInFlight`] if `state` already
    /// has a pending batch, or any error of [`request_next_batch`].
    pub async fn next_batch(
        &self,
        state: &mut StoryboardState,
        context: &StoryContext,
    ) -> DreadboardResult<BatchOutcome> {
        state.begin_batch()?;
        match request_next_batch(&self.generator, state, self.batch_size, context, &self.styles)
            .await
        {
            Ok(outcome) => {
                state.apply(outcome.clone());
                Ok(outcome)
            }
            Err(e) => {
                state.abort_batch();
                Err(e)
            }
        }
    }

    /// Run batches until the narrative is finished or `max_batches` is reached.
    ///
    /// `on_commit` is called after every committed batch, e.g. to persist the
    /// state. Returns the number of batches that called the generator.
    ///
    /// # Errors
    ///
    /// Stops at the first failing batch or `on_commit` error; batches
    /// committed before it remain in `state`.
    #[instrument(skip_all, fields(max_batches = ?max_batches))]
    pub async fn run_to_completion<F>(
        &self,
        state: &mut StoryboardState,
        context: &StoryContext,
        max_batches: Option<usize>,
        mut on_commit: F,
    ) -> DreadboardResult<usize>
    where
        F: FnMut(&StoryboardState, &BatchOutcome) -> DreadboardResult<()>,
    {
        let mut calls = 0usize;
        while !state.is_finished() {
            if max_batches.is_some_and(|limit| calls >= limit) {
                info!(calls, "Batch limit reached");
                break;
            }
            let outcome = self.next_batch(state, context).await?;
            if !outcome.is_short_circuit() {
                calls += 1;
            }
            on_commit(state, &outcome)?;
        }
        Ok(calls)
    }
}
