//! Segment command handler.

use super::SegmentArgs;
use dreadboard::{
    BatchOutcome, ConfigError, DreadboardConfig, DreadboardResult, GeminiClient, SceneGenerator,
    Segmenter, StateStore, StorageError, StorageErrorKind, StoryContext, StoryContextBuilder,
    StoryboardState,
};
use tracing::{info, instrument};

/// Segment a script with the Gemini backend.
///
/// # Errors
///
/// Returns an error if the script cannot be read, the client cannot be
/// created, or a batch fails. Batches committed before a failure are saved.
#[instrument(skip_all, fields(script = %args.script.display(), state = %args.state.display()))]
pub async fn run_segment(args: &SegmentArgs, config: &DreadboardConfig) -> DreadboardResult<()> {
    let client = GeminiClient::from_config(config)?;
    let state = segment_with(client, args, config).await?;
    print_summary(&state);
    Ok(())
}

/// Segment a script with any generator, persisting state after each batch.
pub(crate) async fn segment_with<G: SceneGenerator>(
    generator: G,
    args: &SegmentArgs,
    config: &DreadboardConfig,
) -> DreadboardResult<StoryboardState> {
    let narrative = std::fs::read_to_string(&args.script).map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            args.script.display(),
            e
        )))
    })?;

    let store = StateStore::new(&args.state);
    let mut state = load_or_adopt(&store, narrative)?;

    let context = story_context(args)?;
    let batch_size = args
        .batch_size
        .unwrap_or(*config.segmentation().batch_size());
    let segmenter = Segmenter::new(generator, config.styles().clone(), batch_size)?;

    let calls = segmenter
        .run_to_completion(
            &mut state,
            &context,
            args.max_batches,
            |state: &StoryboardState, outcome: &BatchOutcome| {
                info!(
                    added = outcome.scenes.len(),
                    total = state.scenes().len(),
                    progress = state.script_progress(),
                    "Batch committed"
                );
                store.save(state)
            },
        )
        .await?;

    store.save(&state)?;
    info!(calls, finished = state.is_finished(), "Segmentation run ended");
    Ok(state)
}

/// Resume saved progress for the same narrative, otherwise start over.
fn load_or_adopt(store: &StateStore, narrative: String) -> DreadboardResult<StoryboardState> {
    match store.load()? {
        Some(saved) if saved.narrative() == narrative => {
            info!(
                cursor = saved.cursor(),
                scenes = saved.scenes().len(),
                "Resuming saved storyboard"
            );
            Ok(saved)
        }
        Some(mut saved) => {
            saved.adopt_narrative(narrative);
            Ok(saved)
        }
        None => Ok(StoryboardState::new(narrative)),
    }
}

fn story_context(args: &SegmentArgs) -> DreadboardResult<StoryContext> {
    Ok(StoryContextBuilder::default()
        .character_description(args.character.clone())
        .style_id(args.style.clone())
        .format(args.format)
        .build()
        .map_err(|e| ConfigError::new(format!("Invalid story context: {}", e)))?)
}

fn print_summary(state: &StoryboardState) {
    println!(
        "{} scenes, {:.1}% of script segmented ({})",
        state.scenes().len(),
        state.script_progress(),
        state.status()
    );
    println!("Tokens used: {}", state.usage().tokens);
}
