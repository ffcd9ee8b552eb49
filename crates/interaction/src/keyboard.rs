//! Keyboard shortcuts.

use cutline_common::config::EditorConfig;
use cutline_edit_engine::{EditorStore, NoOp};

/// Keys the timeline reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    ArrowLeft,
    ArrowRight,
    Space,
    Home,
    End,
    Char(char),
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    /// The key is not bound.
    Ignored,
    /// The key is bound and state changed.
    Handled,
    /// The key is bound but its edit did not apply.
    Skipped(NoOp),
}

/// Maps key presses to transport and edit commands.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardShortcuts {
    step_secs: f64,
}

impl Default for KeyboardShortcuts {
    fn default() -> Self {
        Self::new(&EditorConfig::default())
    }
}

impl KeyboardShortcuts {
    pub fn new(config: &EditorConfig) -> Self {
        Self {
            step_secs: config.keyboard_step_secs,
        }
    }

    pub fn handle(&self, store: &mut EditorStore, key: Key) -> KeyOutcome {
        let project = store.project();
        let (time, duration) = (project.current_time, project.duration);

        match key {
            Key::Delete => match project.selected_clip_id.clone() {
                Some(id) => outcome(store.delete_clip(&id)),
                None => KeyOutcome::Skipped(NoOp::NoSelection),
            },
            Key::ArrowLeft => {
                store.set_playhead((time - self.step_secs).max(0.0));
                KeyOutcome::Handled
            }
            Key::ArrowRight => {
                store.set_playhead((time + self.step_secs).min(duration));
                KeyOutcome::Handled
            }
            Key::Space => {
                store.toggle_playing();
                KeyOutcome::Handled
            }
            Key::Home => {
                store.set_playhead(0.0);
                KeyOutcome::Handled
            }
            Key::End => {
                store.set_playhead(duration);
                KeyOutcome::Handled
            }
            Key::Char('s') | Key::Char('S') => outcome(store.split_clip().map(|_| ())),
            Key::Char(_) => KeyOutcome::Ignored,
        }
    }
}

fn outcome(result: Result<(), NoOp>) -> KeyOutcome {
    match result {
        Ok(()) => KeyOutcome::Handled,
        Err(reason) => KeyOutcome::Skipped(reason),
    }
}
