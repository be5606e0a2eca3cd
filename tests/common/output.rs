/// Matches expected fragments of program output in order.
pub struct OutputMatcher {
    original: String,
    position: usize,
}

impl OutputMatcher {
    pub fn new<S: Into<String>>(output: S) -> Self {
        Self {
            original: output.into(),
            position: 0,
        }
    }

    pub fn remainder(&self) -> &str {
        &self.original[self.position..]
    }

    /// Panics unless `text` occurs after the previous match.
    #[track_caller]
    pub fn match_text(&mut self, text: &str) -> &mut Self {
        match self.remainder().find(text) {
            Some(index) => self.position += index + text.len(),
            None => panic!(
                "could not match '{}' in remaining output:\n{}\n",
                text,
                self.remainder()
            ),
        }
        self
    }
}
