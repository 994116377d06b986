//! Core types for the study engine.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CoreError;

/// Ease factor assigned to every freshly generated card.
pub const DEFAULT_EASE_FACTOR: f64 = 2.5;

/// Rating for a review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again,
    Hard,
    Good,
    Easy,
}

impl Rating {
    /// Every rating, in ascending order of recall quality.
    pub const ALL: [Rating; 4] = [Self::Again, Self::Hard, Self::Good, Self::Easy];

    /// SM-2 quality value (0-5 scale) for this rating.
    pub fn quality(self) -> u8 {
        match self {
            Self::Again => 0,
            Self::Hard => 3,
            Self::Good => 4,
            Self::Easy => 5,
        }
    }

    /// A lapse is a failed recall that breaks the repetition streak.
    pub fn is_lapse(self) -> bool {
        self.quality() < 3
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rating {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "again" => Ok(Self::Again),
            "hard" => Ok(Self::Hard),
            "good" => Ok(Self::Good),
            "easy" => Ok(Self::Easy),
            _ => Err(CoreError::UnknownRating(s.to_string())),
        }
    }
}

/// Audience level requested from the content generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyLevel {
    Elementary,
    HighSchool,
    University,
    Expert,
}

impl DifficultyLevel {
    /// Human-readable label, as embedded in generation prompts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Elementary => "Elementary School",
            Self::HighSchool => "High School",
            Self::University => "University/Professional",
            Self::Expert => "Expert/PhD",
        }
    }
}

impl FromStr for DifficultyLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "elementary" => Ok(Self::Elementary),
            "high_school" | "highschool" => Ok(Self::HighSchool),
            "university" => Ok(Self::University),
            "expert" => Ok(Self::Expert),
            _ => Err(CoreError::UnknownLevel(s.to_string())),
        }
    }
}

/// How cards are presented during a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyMode {
    Flashcard,
    Cloze,
}

impl Default for StudyMode {
    fn default() -> Self {
        Self::Flashcard
    }
}

impl FromStr for StudyMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flashcard" => Ok(Self::Flashcard),
            "cloze" => Ok(Self::Cloze),
            _ => Err(CoreError::UnknownMode(s.to_string())),
        }
    }
}

/// Card scheduling state.
///
/// Records written before a card was ever scheduled may omit any of these
/// fields; they fall back to the defaults of a brand new card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReviewState {
    /// Consecutive successful reviews since the last lapse.
    pub repetition: u32,
    /// Days until the next review.
    pub interval: u32,
    pub ease_factor: f64,
    /// Absent until the first review: such a card is always due.
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub next_review: Option<DateTime<Utc>>,
}

impl Default for ReviewState {
    fn default() -> Self {
        Self {
            repetition: 0,
            interval: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            next_review: None,
        }
    }
}

/// A flashcard together with its scheduling state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub topic: String,
    pub question: String,
    /// May carry lightweight HTML markup; opaque to the engine.
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloze_text: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_inverse: bool,
    #[serde(flatten)]
    pub state: ReviewState,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Card {
    /// Create a never-reviewed card with a fresh identifier.
    pub fn new(
        topic: impl Into<String>,
        question: impl Into<String>,
        answer: impl Into<String>,
        cloze_text: Option<String>,
    ) -> Self {
        Self {
            id: format!("card-{}", Uuid::new_v4()),
            topic: topic.into(),
            question: question.into(),
            answer: answer.into(),
            cloze_text,
            is_inverse: false,
            state: ReviewState::default(),
        }
    }

    /// The same fact asked in the opposite direction (answer first).
    ///
    /// Cloze text is dropped: it embeds the answer and makes no sense once
    /// the sides are swapped.
    pub fn inverted(&self) -> Self {
        Self {
            id: format!("{}_inv", self.id),
            topic: self.topic.clone(),
            question: self.answer.clone(),
            answer: self.question.clone(),
            cloze_text: None,
            is_inverse: true,
            state: ReviewState::default(),
        }
    }

    /// Whether the card should be offered for review at `now`.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        match self.state.next_review {
            None => true,
            Some(next) => next <= now,
        }
    }
}
