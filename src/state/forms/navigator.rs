//! Step navigation with skipping of steps that have nothing to show

use super::field::AnswerState;
use super::visibility::visible_count;
use crate::state::schema::Step;

/// Result of moving forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the step at this index
    Moved(usize),
    /// No later step has visible questions
    End,
}

/// Result of moving backward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Retreat {
    Moved(usize),
    /// No earlier step has visible questions; position unchanged
    Stay,
}

/// Cursor over the active step sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepNavigator {
    index: usize,
}

impl StepNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Position on the first step with visible content, or 0 when none has any
    pub fn start(&mut self, steps: &[Step], answers: &AnswerState) {
        self.index = first_visible(steps, answers, 0..steps.len()).unwrap_or(0);
    }

    pub fn current<'a>(&self, steps: &'a [Step]) -> Option<&'a Step> {
        steps.get(self.index)
    }

    pub fn advance(&mut self, steps: &[Step], answers: &AnswerState) -> Advance {
        match first_visible(steps, answers, self.index + 1..steps.len()) {
            Some(next) => {
                tracing::debug!(from = self.index, to = next, "advancing step");
                self.index = next;
                Advance::Moved(next)
            }
            None => Advance::End,
        }
    }

    pub fn retreat(&mut self, steps: &[Step], answers: &AnswerState) -> Retreat {
        let upper = self.index.min(steps.len());
        match first_visible(steps, answers, (0..upper).rev()) {
            Some(prev) => {
                tracing::debug!(from = self.index, to = prev, "retreating step");
                self.index = prev;
                Retreat::Moved(prev)
            }
            None => Retreat::Stay,
        }
    }
}

fn first_visible(
    steps: &[Step],
    answers: &AnswerState,
    mut indices: impl Iterator<Item = usize>,
) -> Option<usize> {
    indices.find(|&idx| visible_count(&steps[idx], answers) > 0)
}
