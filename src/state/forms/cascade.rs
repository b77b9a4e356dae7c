//! Four-level geographic cascade: district -> division -> mandal -> village
//!
//! Each level's option list depends on the selected value of the level above.
//! Changing a level clears every deeper answer and option list, then asks for
//! the next level's options. Responses are only applied if the parent value
//! and language they were requested for are still current.

use super::field::AnswerState;
use crate::state::schema::{ChoiceOption, Language};

/// A hierarchical location level, ordered from coarsest to finest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    District,
    Division,
    Mandal,
    Village,
}

impl Level {
    pub const ALL: [Level; 4] = [
        Level::District,
        Level::Division,
        Level::Mandal,
        Level::Village,
    ];

    pub fn index(self) -> usize {
        match self {
            Level::District => 0,
            Level::Division => 1,
            Level::Mandal => 2,
            Level::Village => 3,
        }
    }

    /// Answer-state key for this level
    pub fn field_id(self) -> &'static str {
        match self {
            Level::District => "district",
            Level::Division => "division",
            Level::Mandal => "mandal",
            Level::Village => "village",
        }
    }

    pub fn from_field_id(id: &str) -> Option<Level> {
        Level::ALL.into_iter().find(|level| level.field_id() == id)
    }

    pub fn parent(self) -> Option<Level> {
        self.index().checked_sub(1).map(|i| Level::ALL[i])
    }

    pub fn child(self) -> Option<Level> {
        Level::ALL.get(self.index() + 1).copied()
    }

    /// Levels strictly below this one
    pub fn deeper(self) -> impl Iterator<Item = Level> {
        Level::ALL.into_iter().skip(self.index() + 1)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field_id())
    }
}

/// A request for one level's option list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceRequest {
    pub level: Level,
    /// Selected code of the parent level; `None` for districts
    pub parent: Option<String>,
    pub language: Language,
}

/// What happened to a choice response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceOutcome {
    Applied,
    /// Parent value or language moved on since the request was made
    Stale,
    /// The provider failed; the previous list is kept
    Failed,
}

#[derive(Debug, Clone, Default)]
struct LevelSlot {
    options: Vec<ChoiceOption>,
    pending: Option<ChoiceRequest>,
}

/// Owned per-level option caches
#[derive(Debug, Clone, Default)]
pub struct LocationCascade {
    slots: [LevelSlot; 4],
}

impl LocationCascade {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self, level: Level) -> &[ChoiceOption] {
        &self.slots[level.index()].options
    }

    /// Outstanding request for `level`, if any
    pub fn pending(&self, level: Level) -> Option<&ChoiceRequest> {
        self.slots[level.index()].pending.as_ref()
    }

    /// Drop every cached list and outstanding request
    pub fn reset(&mut self) {
        self.slots = Default::default();
    }

    /// Request the root (district) list for `language`
    pub fn load_root(&mut self, language: Language) -> ChoiceRequest {
        let request = ChoiceRequest {
            level: Level::District,
            parent: None,
            language,
        };
        self.slots[Level::District.index()].pending = Some(request.clone());
        request
    }

    /// React to `level` taking `new_value` (`None` when cleared).
    ///
    /// Clears deeper answers and option lists in `answers` and returns the
    /// request for the next level, if one is needed. The caller decides
    /// idempotence by comparing against the previous answer.
    pub fn on_level_changed(
        &mut self,
        level: Level,
        new_value: Option<&str>,
        answers: &mut AnswerState,
        language: Language,
    ) -> Option<ChoiceRequest> {
        for deeper in level.deeper() {
            answers.remove(deeper.field_id());
            let slot = &mut self.slots[deeper.index()];
            slot.options.clear();
            slot.pending = None;
        }

        let value = new_value.filter(|v| !v.is_empty())?;
        let child = level.child()?;
        let request = ChoiceRequest {
            level: child,
            parent: Some(value.to_string()),
            language,
        };
        tracing::debug!(level = %child, parent = value, "requesting child options");
        self.slots[child.index()].pending = Some(request.clone());
        Some(request)
    }

    /// Re-request the child list of `level` when it is empty and nothing is in
    /// flight, as after a failed load. `value` is the level's current answer.
    pub fn refetch_child(
        &mut self,
        level: Level,
        value: &str,
        language: Language,
    ) -> Option<ChoiceRequest> {
        let child = level.child()?;
        let slot = &mut self.slots[child.index()];
        if value.is_empty() || slot.pending.is_some() || !slot.options.is_empty() {
            return None;
        }
        let request = ChoiceRequest {
            level: child,
            parent: Some(value.to_string()),
            language,
        };
        tracing::debug!(level = %child, parent = value, "re-requesting child options");
        slot.pending = Some(request.clone());
        Some(request)
    }

    /// Apply a provider response for `request`.
    ///
    /// The response is discarded when the parent's current answer or the
    /// active language no longer match what the request was made for.
    pub fn apply<E: std::fmt::Display>(
        &mut self,
        request: &ChoiceRequest,
        result: Result<Vec<ChoiceOption>, E>,
        answers: &AnswerState,
        language: Language,
    ) -> ChoiceOutcome {
        let current_parent = request
            .level
            .parent()
            .and_then(|parent| answers.single(parent.field_id()));

        if request.language != language || current_parent != request.parent.as_deref() {
            tracing::debug!(
                level = %request.level,
                parent = ?request.parent,
                "discarding stale option list"
            );
            return ChoiceOutcome::Stale;
        }

        let slot = &mut self.slots[request.level.index()];
        if slot.pending.as_ref() == Some(request) {
            slot.pending = None;
        }

        match result {
            Ok(options) => {
                tracing::debug!(level = %request.level, count = options.len(), "options loaded");
                slot.options = options;
                ChoiceOutcome::Applied
            }
            Err(err) => {
                tracing::warn!(level = %request.level, "failed to load options: {err}");
                ChoiceOutcome::Failed
            }
        }
    }
}
