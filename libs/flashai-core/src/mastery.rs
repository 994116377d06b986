//! Gamified mastery score and progression tiers.

use serde::Serialize;

use crate::types::Card;

/// A named score bracket; `max` is exclusive and `None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    pub title: &'static str,
    pub min: u64,
    pub max: Option<u64>,
}

/// Progression tiers in ascending order.
pub const TIERS: [Tier; 4] = [
    Tier {
        title: "Synaptic Beginner",
        min: 0,
        max: Some(500),
    },
    Tier {
        title: "Focused Student",
        min: 500,
        max: Some(2000),
    },
    Tier {
        title: "Memory Architect",
        min: 2000,
        max: Some(5000),
    },
    Tier {
        title: "Neuroplasticity Master",
        min: 5000,
        max: None,
    },
];

/// Shown as the next level once the top tier is reached.
pub const TERMINAL_TITLE: &str = "Living Legend";

/// Progression derived from the whole library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserLevelInfo {
    pub score: u64,
    pub level_title: &'static str,
    pub next_level_title: &'static str,
    pub min_score: u64,
    pub next_level_score: u64,
    /// Position within the current tier, 0-100.
    pub progress_percent: f64,
}

/// Points a card is worth at the given interval (days).
pub fn points_for_interval(interval: u32) -> u32 {
    match interval {
        0 => 0,
        1..=6 => 10,
        7..=21 => 50,
        _ => 150,
    }
}

/// Sum of every card's points.
pub fn score<'a, I>(cards: I) -> u64
where
    I: IntoIterator<Item = &'a Card>,
{
    cards
        .into_iter()
        .map(|card| u64::from(points_for_interval(card.state.interval)))
        .sum()
}

/// Tier and progress for a score.
pub fn level_info(score: u64) -> UserLevelInfo {
    let index = TIERS
        .iter()
        .position(|tier| score >= tier.min && tier.max.map_or(true, |max| score < max))
        .unwrap_or(TIERS.len() - 1);
    let tier = TIERS[index];

    let (progress_percent, next_level_score) = match tier.max {
        Some(max) => {
            let progress = (score - tier.min) as f64 / (max - tier.min) as f64;
            (progress.clamp(0.0, 1.0) * 100.0, max)
        }
        None => (100.0, score),
    };

    UserLevelInfo {
        score,
        level_title: tier.title,
        next_level_title: TIERS.get(index + 1).map_or(TERMINAL_TITLE, |next| next.title),
        min_score: tier.min,
        next_level_score,
        progress_percent,
    }
}
