//! Batch pipeline behaviour against scripted generators.

mod test_utils;

use dreadboard_error::{GeminiErrorKind, SegmentationErrorKind};
use dreadboard_storyboard::{
    Reconciliation, SegmentationPhase, Segmenter, StoryboardState, request_next_batch,
};
use test_utils::{
    MockResponse, MockSceneGenerator, context, response, segmentation_kind, styles,
};

const NARRATIVE: &str = "A dark night. The wind howled. She ran to the old church at the \
    edge of town, where the bell had not rung in forty years.";

#[tokio::test]
async fn test_exact_match_advances_cursor() -> anyhow::Result<()> {
    let generator =
        MockSceneGenerator::new_success(response(&["A dark night.", "The wind howled."], true));
    let state = StoryboardState::new(NARRATIVE);

    let outcome = request_next_batch(&generator, &state, 5, &context("ink"), &styles()).await?;

    assert_eq!(outcome.new_cursor, 14 + "The wind howled.".len());
    assert_eq!(outcome.new_cursor, 30);
    assert!(!outcome.new_finished);
    assert_eq!(outcome.reconciliation, Some(Reconciliation::Exact));
    assert_eq!(outcome.tokens_used, 42);
    // Shared borrow: nothing committed yet
    assert_eq!(state.cursor(), 0);
    Ok(())
}

#[tokio::test]
async fn test_paraphrase_uses_length_estimate() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&["A storm wind roared"], true));
    let state = StoryboardState::new(NARRATIVE);

    let outcome = request_next_batch(&generator, &state, 5, &context("ink"), &styles()).await?;

    assert_eq!(outcome.new_cursor, "A storm wind roared".len());
    assert_eq!(outcome.reconciliation, Some(Reconciliation::Estimated));
    Ok(())
}

#[tokio::test]
async fn test_near_end_snaps_to_length() -> anyhow::Result<()> {
    let narrative = "The last candle guttered and went out. Dark.";
    let anchor = "The last candle guttered and went out. D";
    assert_eq!(narrative.len() - anchor.len(), 4);
    let generator = MockSceneGenerator::new_success(response(&[anchor], true));
    let state = StoryboardState::new(narrative);

    let outcome = request_next_batch(&generator, &state, 5, &context("ink"), &styles()).await?;

    assert!(outcome.new_finished);
    assert_eq!(outcome.new_cursor, narrative.len());
    Ok(())
}

#[tokio::test]
async fn test_generator_done_finishes_narrative() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&["A dark night."], false));
    let mut state = StoryboardState::new(NARRATIVE);
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    segmenter.next_batch(&mut state, &context("ink")).await?;

    assert!(state.is_finished());
    assert_eq!(state.cursor(), NARRATIVE.len());
    assert_eq!(state.script_progress(), 100.0);
    Ok(())
}

#[tokio::test]
async fn test_zero_scenes_leaves_state_unchanged() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&[], true));
    let mut state = StoryboardState::new(NARRATIVE);
    let before = state.clone();
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    let err = segmenter
        .next_batch(&mut state, &context("ink"))
        .await
        .expect_err("zero scenes is a contract violation");

    assert_eq!(
        segmentation_kind(&err),
        Some(&SegmentationErrorKind::ZeroScenes(1))
    );
    assert_eq!(state, before);
    assert!(!state.is_generating());
    Ok(())
}

#[tokio::test]
async fn test_backend_failure_is_batch_failure() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_error(GeminiErrorKind::HttpError {
        status_code: 503,
        message: "overloaded".to_string(),
    });
    let mut state = StoryboardState::new(NARRATIVE);
    let before = state.clone();
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    let err = segmenter
        .next_batch(&mut state, &context("ink"))
        .await
        .expect_err("backend failure");

    match segmentation_kind(&err) {
        Some(SegmentationErrorKind::BatchFailed(message)) => {
            assert!(message.contains("overloaded"))
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
    assert_eq!(state, before);
    assert!(!state.is_generating());
    Ok(())
}

#[tokio::test]
async fn test_exhausted_remainder_skips_backend() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_sequence(Vec::new());
    let narrative = "Everything that happened. End.";
    let mut state = StoryboardState::new(narrative);
    state.apply(dreadboard_storyboard::BatchOutcome {
        scenes: Vec::new(),
        new_cursor: narrative.len() - 5,
        new_finished: false,
        tokens_used: 0,
        reconciliation: Some(Reconciliation::Exact),
    });
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    let first = segmenter.next_batch(&mut state, &context("ink")).await?;
    let second = segmenter.next_batch(&mut state, &context("ink")).await?;

    assert!(first.is_short_circuit());
    assert!(second.is_short_circuit());
    assert!(state.is_finished());
    assert_eq!(state.cursor(), narrative.len());
    assert_eq!(segmenter.generator().call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_finished_state_short_circuits() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&["A dark night."], false));
    let mut state = StoryboardState::new(NARRATIVE);
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    segmenter.next_batch(&mut state, &context("ink")).await?;
    let again = segmenter.next_batch(&mut state, &context("ink")).await?;

    assert!(again.is_short_circuit());
    assert!(again.scenes.is_empty());
    assert_eq!(segmenter.generator().call_count(), 1);
    assert_eq!(state.scenes().len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_silent_batch_without_progress_is_rejected() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&["", ""], true));
    let mut state = StoryboardState::new(NARRATIVE);
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    let err = segmenter
        .next_batch(&mut state, &context("ink"))
        .await
        .expect_err("no progress");

    assert_eq!(
        segmentation_kind(&err),
        Some(&SegmentationErrorKind::NoProgress(0))
    );
    assert!(state.scenes().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_scenes_are_renumbered_across_batches() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_sequence(vec![
        MockResponse::Success(response(&["A dark night.", "The wind howled."], true)),
        MockResponse::Success(response(&["She ran to the old church"], true)),
    ]);
    let mut state = StoryboardState::new(NARRATIVE);
    let segmenter = Segmenter::new(generator, styles(), 2)?;

    segmenter.next_batch(&mut state, &context("ink")).await?;
    segmenter.next_batch(&mut state, &context("ink")).await?;

    let numbers: Vec<usize> = state.scenes().iter().map(|s| s.scene_number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);

    let requests = segmenter.generator().requests();
    assert_eq!(*requests[0].starting_scene_number(), 1);
    assert_eq!(*requests[1].starting_scene_number(), 3);
    assert_eq!(*requests[1].batch_size(), 2);
    assert!(requests[1].text_window().starts_with("She ran"));
    assert_eq!(state.usage().tokens, 84);
    Ok(())
}

#[tokio::test]
async fn test_oversized_batch_is_truncated() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(
        &["A dark night.", "The wind howled.", "She ran"],
        true,
    ));
    let state = StoryboardState::new(NARRATIVE);

    let outcome = request_next_batch(&generator, &state, 2, &context("ink"), &styles()).await?;

    assert_eq!(outcome.scenes.len(), 2);
    // Anchored on the last kept scene, not the dropped one
    assert_eq!(outcome.new_cursor, 30);
    Ok(())
}

#[tokio::test]
async fn test_truncated_final_batch_does_not_finish() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(
        &[
            "A dark night.",
            "The wind howled.",
            "She ran to the old church at the edge of town, where the bell had not rung in forty years.",
        ],
        false,
    ));
    let mut state = StoryboardState::new(NARRATIVE);

    let outcome = request_next_batch(&generator, &state, 2, &context("ink"), &styles()).await?;

    assert_eq!(outcome.scenes.len(), 2);
    assert!(!outcome.new_finished);
    assert_eq!(outcome.new_cursor, 30);

    state.apply(outcome);
    assert!(!state.is_finished());
    assert_eq!(state.phase(), SegmentationPhase::Processing);
    assert!(state.narrative()[state.cursor()..].trim().starts_with("She ran"));
    Ok(())
}

#[tokio::test]
async fn test_unknown_style_falls_back_to_first() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&["A dark night."], true));
    let state = StoryboardState::new(NARRATIVE);

    let outcome =
        request_next_batch(&generator, &state, 5, &context("watercolor"), &styles()).await?;

    assert_eq!(outcome.scenes[0].style_block, "black ink wash");
    assert!(outcome.scenes[0].full_prompt.starts_with("black ink wash.\n\n"));
    Ok(())
}

#[tokio::test]
async fn test_known_style_is_used() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&["A dark night."], true));
    let state = StoryboardState::new(NARRATIVE);

    let outcome = request_next_batch(&generator, &state, 5, &context("oil"), &styles()).await?;

    assert_eq!(outcome.scenes[0].style_block, "oil painting");
    Ok(())
}

#[tokio::test]
async fn test_pending_batch_rejects_another() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_success(response(&["A dark night."], true));
    let mut state = StoryboardState::new(NARRATIVE);
    state.begin_batch()?;
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    let err = segmenter
        .next_batch(&mut state, &context("ink"))
        .await
        .expect_err("batch in flight");

    assert_eq!(
        segmentation_kind(&err),
        Some(&SegmentationErrorKind::BatchInFlight)
    );
    assert_eq!(segmenter.generator().call_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_zero_batch_size_is_rejected() {
    let generator = MockSceneGenerator::new_sequence(Vec::new());
    let state = StoryboardState::new(NARRATIVE);

    let err = request_next_batch(&generator, &state, 0, &context("ink"), &styles())
        .await
        .expect_err("invalid batch size");

    assert_eq!(
        segmentation_kind(&err),
        Some(&SegmentationErrorKind::InvalidBatchSize(0))
    );
    assert!(Segmenter::new(generator, styles(), 0).is_err());
}

#[tokio::test]
async fn test_new_narrative_resets_progress() -> anyhow::Result<()> {
    let generator = MockSceneGenerator::new_sequence(vec![
        MockResponse::Success(response(&["A dark night."], false)),
        MockResponse::Success(response(&["Morning came."], true)),
    ]);
    let mut state = StoryboardState::new(NARRATIVE);
    let segmenter = Segmenter::new(generator, styles(), 5)?;

    segmenter.next_batch(&mut state, &context("ink")).await?;
    assert!(state.is_finished());

    state.adopt_narrative("Morning came. The birds were silent. Nobody left the house that day.");
    assert_eq!(state.cursor(), 0);
    assert!(!state.is_finished());
    assert!(state.scenes().is_empty());

    segmenter.next_batch(&mut state, &context("ink")).await?;
    assert_eq!(state.scenes()[0].scene_number, 1);
    assert_eq!(state.cursor(), "Morning came.".len());
    Ok(())
}
