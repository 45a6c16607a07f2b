/// Keystroke-level text buffer behind the field. Accepts any character; filtering happens on
/// blur.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct EditBuffer {
    pub value: String, // text buffer
    pub cursor: usize, // in chars, not bytes
}

impl EditBuffer {
    pub fn insert(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.value.insert(at, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_offset(self.cursor);
            self.value.remove(at);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.len();
    }

    pub fn len(&self) -> usize {
        self.value.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the text, keeping the cursor where it was if still within bounds.
    pub fn set(&mut self, value: &str) {
        self.value = value.to_string();
        self.cursor = self.cursor.min(self.len());
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.value
            .char_indices()
            .nth(cursor)
            .map_or(self.value.len(), |(i, _)| i)
    }
}

impl From<String> for EditBuffer {
    fn from(value: String) -> Self {
        let cursor = value.chars().count();
        EditBuffer { value, cursor }
    }
}
