//! Test data builders.

use chrono::{DateTime, Duration, Utc};
use flashai_core::Card;
use flashai_study::GeneratedCard;

/// `count` generated question/answer pairs with cloze text.
pub fn generated(count: usize) -> Vec<GeneratedCard> {
    (1..=count)
        .map(|i| GeneratedCard {
            question: format!("Question {i}?"),
            answer: format!("<b>Answer {i}.</b><br><br><ul><li>detail</li></ul>"),
            cloze_text: Some(format!("Answer ____ {i}.")),
        })
        .collect()
}

/// A stored card for `topic` with the given schedule.
pub fn card(id: &str, topic: &str, interval: u32, next_review: Option<DateTime<Utc>>) -> Card {
    let mut card = Card::new(topic, format!("{id}?"), format!("{id}!"), None);
    card.id = id.to_string();
    card.state.interval = interval;
    card.state.repetition = u32::from(interval > 0);
    card.state.next_review = next_review;
    card
}

/// A card that is not due for another `days` days.
pub fn scheduled_in(id: &str, topic: &str, days: i64) -> Card {
    card(id, topic, days as u32, Some(Utc::now() + Duration::days(days)))
}
