//! Editable-field contract.
//!
//! The session only ever talks to text controls through this trait: a
//! textual value, a selection start offset, and a settable selection. Host
//! UIs adapt their single- or multi-line text inputs to it; anything that
//! cannot satisfy the contract (buttons, rich-text regions) simply never
//! reaches the input handler.
//!
//! Offsets are grapheme-cluster offsets, matching the engine.

use unicode_segmentation::UnicodeSegmentation;

use crate::engine::Replacement;

/// A single- or multi-line text input control.
pub trait EditableField {
    /// The field's full text.
    fn value(&self) -> String;

    /// Start of the current selection, as a grapheme offset. For a
    /// collapsed selection this is the caret position.
    fn selection_start(&self) -> usize;

    /// Replaces the field's full text.
    fn set_value(&mut self, text: &str);

    /// Sets the selection range. `start == end` collapses to a caret.
    fn set_selection(&mut self, start: usize, end: usize);

    /// Applies a planned expansion: new text plus collapsed caret.
    fn apply(&mut self, replacement: &Replacement) {
        self.set_value(&replacement.text);
        self.set_selection(replacement.cursor, replacement.cursor);
    }
}

/// In-memory [`EditableField`] used by the CLI and tests.
#[derive(Debug, Clone, Default)]
pub struct TextBuffer {
    text: String,
    selection: (usize, usize),
}

impl TextBuffer {
    /// Creates a buffer with the caret placed after the last grapheme.
    pub fn with_caret_at_end(text: &str) -> Self {
        let end = text.graphemes(true).count();
        Self {
            text: text.to_string(),
            selection: (end, end),
        }
    }

    /// Creates a buffer with a collapsed caret at `caret`.
    pub fn with_caret(text: &str, caret: usize) -> Self {
        Self {
            text: text.to_string(),
            selection: (caret, caret),
        }
    }

    /// The current selection range.
    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }
}

impl EditableField for TextBuffer {
    fn value(&self) -> String {
        self.text.clone()
    }

    fn selection_start(&self) -> usize {
        self.selection.0
    }

    fn set_value(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.selection = (start, end);
    }
}
