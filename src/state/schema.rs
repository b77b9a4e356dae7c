//! Survey schema model and client-side schema assembly

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::forms::Level;

/// Identifier of the synthesized location step
pub const LOCATION_STEP_ID: &str = "LOCATION";

/// Survey language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Te,
}

impl Language {
    /// Wire code used in `lang=` query parameters
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Te => "te",
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::En => Self::Te,
            Self::Te => Self::En,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Te => "తెలుగు",
        }
    }
}

/// How a question collects its answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputKind {
    #[serde(rename = "dropdown")]
    SingleSelect,
    #[serde(rename = "checkbox")]
    MultiSelectCheckbox,
    #[serde(rename = "chips")]
    MultiSelectChip,
    #[serde(rename = "cards")]
    CardSelect,
    #[serde(rename = "radio", alias = "radioTiles")]
    SingleSelectTile,
}

impl InputKind {
    /// Whether answers for this kind are lists of codes
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::MultiSelectCheckbox | Self::MultiSelectChip)
    }
}

/// A selectable option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub code: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl ChoiceOption {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            icon: None,
        }
    }
}

/// Prerequisite question id -> permitted values. All entries must hold.
pub type VisibilityCondition = BTreeMap<String, Vec<String>>;

/// A single survey question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question_id: String,
    pub label: String,
    pub input_type: InputKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<VisibilityCondition>,
    #[serde(default, rename = "rowGroup", skip_serializing_if = "Option::is_none")]
    pub row_group: Option<String>,
    #[serde(default, rename = "dependsOn", skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<String>,
}

/// An ordered page of questions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub step_id: String,
    pub title: String,
    #[serde(default)]
    pub step_number: usize,
    #[serde(default)]
    pub total_steps: usize,
    #[serde(default)]
    pub questions: Vec<Question>,
}

/// Build the active step sequence from the server schema.
///
/// The location step is prepended and every step is renumbered so ordinals
/// are contiguous from 0 and `total_steps` is the sequence length.
pub fn assemble_steps(server_steps: Vec<Step>, language: Language) -> Vec<Step> {
    let total = server_steps.len() + 1;
    std::iter::once(location_step(language))
        .chain(server_steps)
        .enumerate()
        .map(|(idx, step)| Step {
            step_number: idx,
            total_steps: total,
            ..step
        })
        .collect()
}

fn location_step(language: Language) -> Step {
    let title = match language {
        Language::En => "Location Information",
        Language::Te => "ప్రాంత సమాచారం",
    };

    let questions = Level::ALL
        .iter()
        .map(|level| Question {
            question_id: level.field_id().to_string(),
            label: level_label(*level, language).to_string(),
            input_type: InputKind::SingleSelect,
            required: true,
            options: Vec::new(),
            visible_when: None,
            row_group: Some(
                match level {
                    Level::District | Level::Division => "location-row-1",
                    Level::Mandal | Level::Village => "location-row-2",
                }
                .to_string(),
            ),
            depends_on: level.parent().map(|p| p.field_id().to_string()),
        })
        .collect();

    Step {
        step_id: LOCATION_STEP_ID.to_string(),
        title: title.to_string(),
        step_number: 0,
        total_steps: 0,
        questions,
    }
}

fn level_label(level: Level, language: Language) -> &'static str {
    match (level, language) {
        (Level::District, Language::En) => "District",
        (Level::District, Language::Te) => "జిల్లా",
        (Level::Division, Language::En) => "Revenue Division",
        (Level::Division, Language::Te) => "రెవిన్యూ విభాగం",
        (Level::Mandal, Language::En) => "Mandal",
        (Level::Mandal, Language::Te) => "మండలం",
        (Level::Village, Language::En) => "Village/Town",
        (Level::Village, Language::Te) => "గ్రామం/పట్టణం",
    }
}
