//! Status, reset and styles command handlers.

use dreadboard::{DreadboardConfig, DreadboardResult, JsonError, StateStore};
use std::path::Path;

/// Print saved progress, or the whole state as JSON.
pub fn show_status(state_path: &Path, json: bool) -> DreadboardResult<()> {
    let store = StateStore::new(state_path);
    let Some(state) = store.load()? else {
        println!("No saved storyboard at {}", state_path.display());
        return Ok(());
    };

    if json {
        let out = serde_json::to_string_pretty(&state)
            .map_err(|e| JsonError::new(format!("Failed to serialize state: {}", e)))?;
        println!("{}", out);
        return Ok(());
    }

    println!("Status:   {}", state.status());
    println!("Phase:    {}", state.phase());
    println!(
        "Script:   {:.1}% ({} of {} bytes)",
        state.script_progress(),
        state.cursor(),
        state.narrative().len()
    );
    println!("Rendered: {:.1}%", state.render_progress());
    println!(
        "Usage:    {} tokens, {} images, {} audio",
        state.usage().tokens,
        state.usage().images,
        state.usage().audio
    );
    println!();

    for scene in state.scenes() {
        println!("#{:<4} {}", scene.scene_number, scene.spoken_text());
        if !scene.visual_description.is_empty() {
            println!("      [{}]", scene.visual_description);
        }
    }
    Ok(())
}

/// Delete saved progress.
pub fn reset_state(state_path: &Path) -> DreadboardResult<()> {
    let store = StateStore::new(state_path);
    if store.delete()? {
        println!("Deleted {}", state_path.display());
    } else {
        println!("Nothing to delete at {}", state_path.display());
    }
    Ok(())
}

/// Print the art style catalog; the first entry is the fallback.
pub fn list_styles(config: &DreadboardConfig) {
    for (index, style) in config.styles().iter().enumerate() {
        let marker = if index == 0 { " (default)" } else { "" };
        println!("{:<28} {}{}", style.id(), style.name(), marker);
        println!("{:<28} {} - {}", "", style.category(), style.description());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dreadboard::{ArtStyle, BatchOutcome, GeneratedScene, Scene, StoryboardState};

    fn saved_state(path: &Path) -> anyhow::Result<()> {
        let style = ArtStyle::new("ink", "Ink", "test", "Ink wash", "black ink wash");
        let generated = GeneratedScene {
            scene_number: 1,
            visual_description: "A page".to_string(),
            script: "One line.".to_string(),
            editing_tips: String::new(),
        };
        let mut state = StoryboardState::new("One line. Two line.");
        state.apply(BatchOutcome {
            scenes: vec![Scene::from_generated(1, generated, &style)],
            new_cursor: 9,
            new_finished: false,
            tokens_used: 12,
            reconciliation: None,
        });
        StateStore::new(path).save(&state)?;
        Ok(())
    }

    #[test]
    fn status_of_missing_state_is_not_an_error() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        show_status(&dir.path().join("absent.json"), false)?;
        show_status(&dir.path().join("absent.json"), true)?;
        Ok(())
    }

    #[test]
    fn read_only_commands_leave_no_directory() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let parent = dir.path().join("nowhere");
        let path = parent.join("state.json");

        show_status(&path, false)?;
        reset_state(&path)?;
        assert!(!parent.exists());
        Ok(())
    }

    #[test]
    fn status_reads_saved_state() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("state.json");
        saved_state(&path)?;
        show_status(&path, false)?;
        show_status(&path, true)?;
        Ok(())
    }

    #[test]
    fn reset_removes_saved_state() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("state.json");
        saved_state(&path)?;

        reset_state(&path)?;
        assert!(!path.exists());
        // Second reset is a no-op
        reset_state(&path)?;
        Ok(())
    }
}
