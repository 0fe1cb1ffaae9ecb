//! Scripted dialogue: an ordered list of lines driven through
//! `Idle -> Revealing(i) -> Completed(i)` by frame time and clicks.

use serde::{Deserialize, Serialize};
use crate::systems::text::{RevealEvent, TextReveal};

/// One line of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self { speaker: speaker.into(), text: text.into() }
    }
}

/// What a click did to the dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    /// Not started yet; nothing happened.
    Ignored,
    /// The revealing line jumped to its full text.
    Skipped,
    /// Moved to the line at this index and began revealing it.
    Advanced(usize),
    /// The last line was already complete. Scenes run their terminal action.
    Finished,
}

pub struct DialogueRunner {
    lines: Vec<DialogueLine>,
    index: usize,
    reveal: TextReveal,
}

impl DialogueRunner {
    pub fn new(lines: Vec<DialogueLine>, speed: f32) -> Self {
        Self {
            lines,
            index: 0,
            reveal: TextReveal::new(speed),
        }
    }

    /// Begin revealing the first line. Returns it, or None for an empty script.
    pub fn start(&mut self) -> Option<&DialogueLine> {
        self.index = 0;
        let line = self.lines.first()?;
        self.reveal.start(&line.text);
        Some(line)
    }

    pub fn update(&mut self, dt: f32) -> Option<RevealEvent> {
        self.reveal.update(dt)
    }

    /// Skip while revealing, advance once complete.
    pub fn click(&mut self) -> DialogueStep {
        if self.reveal.is_playing() {
            self.reveal.skip();
            return DialogueStep::Skipped;
        }
        if !self.reveal.can_proceed() {
            return DialogueStep::Ignored;
        }
        if self.index + 1 < self.lines.len() {
            self.index += 1;
            self.reveal.start(&self.lines[self.index].text);
            DialogueStep::Advanced(self.index)
        } else {
            DialogueStep::Finished
        }
    }

    pub fn current(&self) -> Option<&DialogueLine> {
        self.lines.get(self.index)
    }

    pub fn speaker(&self) -> &str {
        self.current().map(|l| l.speaker.as_str()).unwrap_or("")
    }

    pub fn visible_text(&self) -> &str {
        self.reveal.visible_text()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_revealing(&self) -> bool {
        self.reveal.is_playing()
    }

    pub fn is_line_complete(&self) -> bool {
        self.reveal.can_proceed()
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.reveal.set_speed(speed);
    }

    pub fn reveal(&self) -> &TextReveal {
        &self.reveal
    }

    pub fn reset(&mut self) {
        self.index = 0;
        self.reveal.reset();
    }
}
