//! Study session tests over an in-memory SQLite library.

mod common;

use chrono::{Duration, Utc};
use flashai_core::{DifficultyLevel, Rating, StudyMode};
use flashai_study::store::LIBRARY_NAMESPACE;
use flashai_study::{GenerationError, GenerationRequest, Session, SessionError, SqliteStore};
use pretty_assertions::assert_eq;

use common::{fixtures, ReadOnlyStore, ScriptedGenerator};

fn session(generator: ScriptedGenerator) -> Session<SqliteStore, ScriptedGenerator> {
    Session::new(SqliteStore::open_in_memory().unwrap(), generator)
}

fn request(count: usize) -> GenerationRequest {
    GenerationRequest::new("Cell Biology", DifficultyLevel::University).with_count(count)
}

#[tokio::test]
async fn generated_cards_are_saved_and_queued() {
    let mut session = session(ScriptedGenerator::returning(fixtures::generated(5)));

    let queued = session
        .start_generated(request(3), StudyMode::Cloze, false)
        .await
        .unwrap()
        .to_vec();

    assert_eq!(queued.len(), 3);
    assert_eq!(session.mode(), StudyMode::Cloze);
    assert_eq!(session.remaining(), 3);
    assert_eq!(session.card_store().load().unwrap(), queued);
    assert!(queued.iter().all(|c| c.topic == "Cell Biology"));
    assert!(queued.iter().all(|c| c.state.next_review.is_none()));
    assert_eq!(
        session.generator().last_request(),
        Some(request(3))
    );
}

#[tokio::test]
async fn bidirectional_flashcards_are_inverted() {
    let mut session = session(ScriptedGenerator::returning(fixtures::generated(2)));

    let queued = session
        .start_generated(request(2), StudyMode::Flashcard, true)
        .await
        .unwrap()
        .to_vec();

    assert!(queued.iter().all(|c| c.is_inverse && c.id.ends_with("_inv")));
    assert!(queued.iter().all(|c| c.cloze_text.is_none()));
    assert!(queued[0].question.starts_with("<b>Answer 1."));
    assert_eq!(queued[0].answer, "Question 1?");
    assert_eq!(session.card_store().count(), 2);
}

#[tokio::test]
async fn bidirectional_is_ignored_in_cloze_mode() {
    let mut session = session(ScriptedGenerator::returning(fixtures::generated(2)));

    let queued = session
        .start_generated(request(2), StudyMode::Cloze, true)
        .await
        .unwrap()
        .to_vec();

    assert!(queued.iter().all(|c| !c.is_inverse));
    assert!(queued.iter().all(|c| c.cloze_text.is_some()));
}

#[tokio::test]
async fn generation_failure_saves_nothing() {
    let mut session = session(ScriptedGenerator::failing());

    let err = session
        .start_generated(request(5), StudyMode::Flashcard, false)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::Api { status: 403, .. })
    ));
    assert!(matches!(session.library(), Err(SessionError::EmptyLibrary)));
    assert!(session.current().is_none());
}

#[tokio::test]
async fn invalid_request_never_reaches_generator() {
    let mut session = session(ScriptedGenerator::returning(fixtures::generated(1)));

    let err = session
        .start_generated(
            GenerationRequest::new("  ", DifficultyLevel::Expert),
            StudyMode::Flashcard,
            false,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SessionError::Generation(GenerationError::InvalidRequest(_))
    ));
    assert_eq!(session.generator().calls(), 0);
}

#[tokio::test]
async fn rating_reschedules_saves_and_counts() {
    let mut session = session(ScriptedGenerator::returning(fixtures::generated(2)));
    session
        .start_generated(request(2), StudyMode::Flashcard, false)
        .await
        .unwrap();

    let preview = session.preview().unwrap();
    assert_eq!(preview[2].rating, Rating::Good);
    assert_eq!(preview[2].points, 10);

    let first = session.rate(Rating::Good).unwrap();
    assert_eq!(first.card.state.interval, 3);
    assert_eq!(first.card.state.repetition, 1);
    assert_eq!(first.points, 10);
    assert!(!first.finished);

    let second = session.rate(Rating::Easy).unwrap();
    assert_eq!(second.card.state.interval, 7);
    assert_eq!(second.points, 50);
    assert!(second.finished);

    assert!(matches!(
        session.rate(Rating::Good),
        Err(SessionError::NoActiveCard)
    ));

    // Persisted timestamps are millisecond precision, compare the schedule.
    let library: Vec<(String, u32, u32)> = session
        .card_store()
        .load()
        .unwrap()
        .into_iter()
        .map(|c| (c.id, c.state.interval, c.state.repetition))
        .collect();
    assert_eq!(
        library,
        vec![
            (first.card.id.clone(), 3, 1),
            (second.card.id.clone(), 7, 1),
        ]
    );

    let stat = session.stats_for_topic("  cell biology");
    assert_eq!((stat.good, stat.easy, stat.total_answered), (1, 1, 2));
    assert_eq!(session.top_topics(5), vec!["cell biology".to_string()]);

    let summary = session.summary();
    assert_eq!(summary.reviewed(), 2);
    assert_eq!((summary.good, summary.easy), (1, 1));

    assert_eq!(session.score(), 60);
    assert_eq!(session.level_info().level_title, "Synaptic Beginner");
}

#[tokio::test]
async fn lapsed_card_is_due_again_for_interleaving() {
    let mut session = session(ScriptedGenerator::returning(fixtures::generated(1)));
    session
        .start_generated(request(1), StudyMode::Flashcard, false)
        .await
        .unwrap();

    let outcome = session.rate(Rating::Again).unwrap();
    assert_eq!(outcome.card.state.interval, 0);
    assert_eq!(outcome.card.state.repetition, 0);
    assert_eq!(outcome.points, 0);
    assert_eq!(session.global_stats().wrong, 1);

    let queued = session.start_interleaved().unwrap().to_vec();
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].id, outcome.card.id);
    assert_eq!(session.summary().reviewed(), 0);
}

#[test]
fn interleaved_session_needs_due_cards() {
    let mut session = session(ScriptedGenerator::failing());
    session
        .card_store()
        .upsert_many(&[fixtures::scheduled_in("later", "rust", 4)])
        .unwrap();

    assert!(matches!(
        session.start_interleaved(),
        Err(SessionError::NothingDue)
    ));
}

#[test]
fn interleaved_session_spans_topics_up_to_limit() {
    let mut session = session(ScriptedGenerator::failing()).with_session_limit(3);
    let past = Some(Utc::now() - Duration::days(1));
    let cards = vec![
        fixtures::card("r1", "rust", 3, past),
        fixtures::card("r2", "rust", 3, None),
        fixtures::card("g1", "go", 6, past),
        fixtures::card("z1", "zig", 14, past),
        fixtures::scheduled_in("future", "zig", 10),
    ];
    session.card_store().upsert_many(&cards).unwrap();

    let queued = session.start_interleaved().unwrap().to_vec();

    assert_eq!(queued.len(), 3);
    assert!(queued.iter().all(|c| c.id != "future"));
    assert_eq!(session.mode(), StudyMode::Flashcard);
}

#[test]
fn write_failures_do_not_stop_the_session() {
    let due = fixtures::card("stuck", "history", 0, None);
    let store = ReadOnlyStore::seeded(
        LIBRARY_NAMESPACE,
        &serde_json::to_string(&vec![due.clone()]).unwrap(),
    );
    let mut session = Session::new(store, ScriptedGenerator::failing());

    session.start_interleaved().unwrap();
    let outcome = session.rate(Rating::Hard).unwrap();

    assert_eq!(outcome.card.state.interval, 1);
    assert!(outcome.finished);
    assert_eq!(session.queue()[0], outcome.card);
    assert_eq!(session.summary().hard, 1);
    // Nothing reached the store.
    assert_eq!(session.card_store().load().unwrap(), vec![due]);
    assert_eq!(session.stats_for_topic("history").total_answered, 0);
}

#[test]
fn empty_library_scores_zero() {
    let session = session(ScriptedGenerator::failing());

    let info = session.level_info();

    assert_eq!(session.score(), 0);
    assert_eq!(info.level_title, "Synaptic Beginner");
    assert_eq!(info.progress_percent, 0.0);
    assert!(matches!(session.library(), Err(SessionError::EmptyLibrary)));
}

#[test]
fn score_reads_whole_library() {
    let session = session(ScriptedGenerator::failing());
    let cards: Vec<_> = (0..12)
        .map(|i| fixtures::scheduled_in(&format!("m{i}"), "math", 30))
        .collect();
    session.card_store().upsert_many(&cards).unwrap();

    let info = session.level_info();

    assert_eq!(session.score(), 1800);
    assert_eq!(info.level_title, "Focused Student");
    assert_eq!(info.next_level_title, "Memory Architect");
    assert!((info.progress_percent - 86.666_666).abs() < 1e-3);
}
