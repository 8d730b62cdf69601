use chrono::NaiveDate;

use super::*;

fn question(options: &[&str], correct: &[usize]) -> Question {
    Question {
        topic: "capitals".to_owned(),
        question_text: "Pick one".to_owned(),
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_answer_indices: correct.to_vec(),
    }
}

fn draft(question_count: usize) -> QuizDraft {
    QuizDraft {
        title: "Geo".to_owned(),
        category: "Geography".to_owned(),
        points_per_question: 1,
        questions: (0..question_count)
            .map(|_| question(&["a", "b"], &[0]))
            .collect(),
    }
}

#[test]
fn quiz_id_rejects_path_characters() {
    assert!(QuizId::parse("aB3xY9").is_ok());
    assert!(QuizId::parse("../etc").is_err());
    assert!(QuizId::parse("").is_err());
    assert!(QuizId::parse("a b").is_err());
}

#[test]
fn total_points_follows_question_count() {
    let created_at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();
    let id = QuizId::parse("abc123").unwrap();
    let quiz = Quiz::new(id, draft(4), 3, 7, "alice", created_at).unwrap();
    assert_eq!(quiz.total_points(), 12);
    assert_eq!(quiz.metadata.total_points, quiz.questions.len() as u32 * 3);
}

#[test]
fn validate_rejects_short_question_sets() {
    assert!(draft(9).validate(10).is_err());
    assert!(draft(0).validate(1).is_err());
}

#[test]
fn validate_truncates_surplus_questions() {
    let draft = draft(12).validate(10).unwrap();
    assert_eq!(draft.questions.len(), 10);
}

#[test]
fn validate_rejects_out_of_range_answers() {
    let mut draft = draft(2);
    draft.questions[1] = question(&["a", "b"], &[2]);
    match draft.validate(2) {
        Err(Error::InvalidGeneratedContent(_)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn validate_rejects_single_option_questions() {
    let mut draft = draft(2);
    draft.questions[0] = question(&["a"], &[0]);
    assert!(draft.validate(2).is_err());
}

#[test]
fn validate_rejects_missing_correct_answer() {
    let mut draft = draft(2);
    draft.questions[0] = question(&["a", "b"], &[]);
    assert!(draft.validate(2).is_err());
}

#[test]
fn reads_historical_key_names() {
    let json = r#"{
        "title": "Geo",
        "category": "Geography",
        "points_per_mcq": 2,
        "question_options": [
            { "topic": "t", "question_text": "q", "options": ["a", "b"], "answers": [1] }
        ],
        "metadata": {
            "id": "abc123",
            "created_at": "2024-05-01T12:00:00.123456",
            "creator_id": 911971063,
            "creator_username": null,
            "total_points": 2
        }
    }"#;
    let quiz: Quiz = serde_json::from_str(json).unwrap();
    assert_eq!(quiz.points_per_question, 2);
    assert_eq!(quiz.questions[0].correct_answer_indices, vec![1]);
    assert_eq!(quiz.metadata.creator_display_name, "");
    assert_eq!(quiz.id().as_str(), "abc123");
}

#[test]
fn generated_draft_defaults_point_weight() {
    let json = r#"{ "title": "Geo", "question_options": [] }"#;
    let draft: QuizDraft = serde_json::from_str(json).unwrap();
    assert_eq!(draft.points_per_question, 1);
    assert_eq!(draft.category, "");
}

#[test]
fn displayed_answer_is_first_accepted_option() {
    let question = question(&["a", "b", "c"], &[2, 0]);
    assert_eq!(question.displayed_answer(), "c");
    assert!(question.is_answer_correct(0));
    assert!(question.is_answer_correct(2));
    assert!(!question.is_answer_correct(1));
}

#[test]
fn total_points_must_fit() {
    assert_eq!(Quiz::checked_total_points(10, 3), Some(30));
    assert_eq!(Quiz::checked_total_points(10, 2_147_483_648), None);
    let created_at = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .unwrap();
    let id = QuizId::parse("big1").unwrap();
    match Quiz::new(id, draft(4), u32::MAX, 7, "alice", created_at) {
        Err(Error::InvalidGeneratedContent(_)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}
