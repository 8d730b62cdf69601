use super::*;
use crate::output::ProgressLine;
use crate::quiz::taking::AnswerRecord;
use crate::quiz::{Outcome, Question, QuizId};

#[test]
fn preview_shows_correct_option() {
    let message = interpret_message(&Message::Preview {
        index: 0,
        total: 3,
        question: Question {
            topic: "Capitals".to_owned(),
            question_text: "Capital of France?".to_owned(),
            options: vec!["Paris".into(), "Rome".into()],
            correct_answer_indices: vec![0],
        },
    });
    assert!(message.starts_with("**Question 1/3**"));
    assert!(message.contains("2. Rome"));
    assert!(message.contains("Correct: **Paris**"));
}

#[test]
fn question_prompt_is_one_based() {
    let message = interpret_message(&Message::QuestionBegins {
        index: 1,
        total: 2,
        question_text: "Highest mountain?".to_owned(),
        options: vec!["K2".into(), "Everest".into()],
    });
    assert!(message.contains("**Question 2/2**"));
    assert!(message.contains("1. K2"));
    assert!(message.contains("`!answer 2 option-number`"));
}

#[test]
fn results_list_mistakes() {
    let message = interpret_message(&Message::QuizResults(Outcome {
        quiz_id: QuizId::parse("abc123").unwrap(),
        title: "Geo".to_owned(),
        score: 1,
        total_points: 2,
        answers: vec![
            AnswerRecord {
                question_text: "Capital of France?".to_owned(),
                chosen_option: "Paris".to_owned(),
                correct_option_display: "Paris".to_owned(),
                points_awarded: 1,
            },
            AnswerRecord {
                question_text: "Highest mountain?".to_owned(),
                chosen_option: "K2".to_owned(),
                correct_option_display: "Everest".to_owned(),
                points_awarded: 0,
            },
        ],
    }));
    assert!(message.contains("Your score: 1/2 (50.0%)"));
    assert!(message.contains("✅ Capital of France? - Paris"));
    assert!(message.contains("❌ Highest mountain? - K2 (correct: Everest)"));
}

#[test]
fn progress_with_vanished_quiz() {
    let message = interpret_message(&Message::Progress(vec![ProgressLine {
        quiz_id: QuizId::parse("gone1").unwrap(),
        title: "gone1".to_owned(),
        score: 3,
        total_points: None,
    }]));
    assert!(message.contains("gone1: 3/?"));
}
