//! Scripted terminal typewriter.
//!
//! Two counters walk a fixed script: one selects the line, one the next
//! grapheme within it. Each [`Typewriter::step`] performs exactly one
//! transition and reports which kind, so the caller can schedule the next
//! step with the cadence that kind calls for. Once the script is exhausted
//! the machine is terminal; stepping it again changes nothing.

use unicode_segmentation::UnicodeSegmentation;

/// Outcome of a single typewriter transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeStep {
    /// One grapheme was appended to the current line.
    Typed,
    /// The current line is complete; the next step starts the following line.
    LineBreak,
    /// The whole script has been revealed. Permanent.
    Finished,
}

#[derive(Debug, Clone)]
pub struct Typewriter {
    script: Vec<String>,
    line: usize,
    column: usize,
    revealed: Vec<String>,
}

impl Typewriter {
    #[must_use]
    pub fn new(script: Vec<String>) -> Self {
        Self {
            script,
            line: 0,
            column: 0,
            revealed: Vec::new(),
        }
    }

    /// Advance by one transition.
    pub fn step(&mut self) -> TypeStep {
        let Some(line) = self.script.get(self.line) else {
            return TypeStep::Finished;
        };

        match line.graphemes(true).nth(self.column) {
            Some(grapheme) => {
                // Pads over lines that never typed anything (empty script lines).
                while self.revealed.len() <= self.line {
                    self.revealed.push(String::new());
                }
                self.revealed[self.line].push_str(grapheme);
                self.column += 1;
                TypeStep::Typed
            }
            None => {
                self.line += 1;
                self.column = 0;
                if self.line < self.script.len() {
                    TypeStep::LineBreak
                } else {
                    TypeStep::Finished
                }
            }
        }
    }

    /// Lines revealed so far, the last one possibly partial.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.revealed
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.line >= self.script.len()
    }

    #[must_use]
    pub fn script(&self) -> &[String] {
        &self.script
    }
}
