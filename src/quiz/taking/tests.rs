use tempfile::TempDir;

use super::*;
use crate::quiz::authoring::AuthoringSession;
use crate::quiz::definition::QuizDraft;
use crate::store::IdentifierAllocator;

const USER_ID: u64 = 7;

struct Context {
    _dir: TempDir,
    quizzes: QuizRepository,
    progress: ProgressRepository,
    quiz_id: QuizId,
}

impl Context {
    fn begin(&self) -> TakingSession {
        TakingSession::begin(&self.quizzes, &self.quiz_id, USER_ID, "bob").unwrap()
    }
}

struct ContextBuilder {
    questions: Vec<Question>,
    points_per_question: u32,
}

impl ContextBuilder {
    fn new() -> Self {
        ContextBuilder {
            questions: vec![],
            points_per_question: 1,
        }
    }

    fn question(mut self, options: &[&str], correct: &[usize]) -> Self {
        self.questions.push(Question {
            topic: "geography".to_owned(),
            question_text: format!("Question {}", self.questions.len() + 1),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_answer_indices: correct.to_vec(),
        });
        self
    }

    fn points_per_question(mut self, points: u32) -> Self {
        self.points_per_question = points;
        self
    }

    fn build(self) -> Context {
        let dir = TempDir::new().unwrap();
        let quizzes = QuizRepository::open(&dir.path().join("quizzes")).unwrap();
        let progress = ProgressRepository::open(&dir.path().join("progress")).unwrap();
        let mut authoring = AuthoringSession::new();
        authoring
            .start(QuizDraft {
                title: "Geo".to_owned(),
                category: "Geography".to_owned(),
                points_per_question: self.points_per_question,
                questions: self.questions,
            })
            .unwrap();
        let quiz_id = authoring
            .publish(
                &quizzes,
                &IdentifierAllocator::new(6),
                1,
                "alice",
                self.points_per_question,
            )
            .unwrap();
        Context {
            _dir: dir,
            quizzes,
            progress,
            quiz_id,
        }
    }
}

fn two_question_quiz() -> Context {
    ContextBuilder::new()
        .question(&["a", "b"], &[0])
        .question(&["a", "b"], &[0])
        .build()
}

#[test]
fn geo_scenario() {
    let ctx = two_question_quiz();
    assert_eq!(ctx.quizzes.get(&ctx.quiz_id).unwrap().metadata.total_points, 2);

    let mut session = ctx.begin();
    match session.submit_answer(&ctx.progress, 0, 0).unwrap() {
        Submission::Answered(record) => assert_eq!(record.points_awarded, 1),
        other => panic!("unexpected submission: {:?}", other),
    }
    match session.submit_answer(&ctx.progress, 1, 1).unwrap() {
        Submission::Finished(outcome) => {
            assert_eq!(outcome.score, 1);
            assert_eq!(outcome.total_points, 2);
            assert!((outcome.percentage() - 50.0).abs() < f64::EPSILON);
            assert_eq!(outcome.answers.len(), 2);
            assert_eq!(outcome.answers[1].chosen_option, "b");
            assert_eq!(outcome.answers[1].correct_option_display, "a");
            assert_eq!(outcome.answers[1].points_awarded, 0);
        }
        other => panic!("unexpected submission: {:?}", other),
    }
}

#[test]
fn all_correct_answers_score_total_points() {
    let ctx = ContextBuilder::new()
        .question(&["a", "b", "c"], &[2])
        .question(&["a", "b", "c"], &[0, 1])
        .question(&["a", "b"], &[1])
        .points_per_question(4)
        .build();
    let mut session = ctx.begin();
    session.submit_answer(&ctx.progress, 0, 2).unwrap();
    session.submit_answer(&ctx.progress, 1, 1).unwrap();
    match session.submit_answer(&ctx.progress, 2, 1).unwrap() {
        Submission::Finished(outcome) => {
            assert_eq!(outcome.score, 12);
            assert_eq!(outcome.score, outcome.total_points);
        }
        other => panic!("unexpected submission: {:?}", other),
    }
}

#[test]
fn all_wrong_answers_score_nothing() {
    let ctx = two_question_quiz();
    let mut session = ctx.begin();
    session.submit_answer(&ctx.progress, 0, 1).unwrap();
    match session.submit_answer(&ctx.progress, 1, 1).unwrap() {
        Submission::Finished(outcome) => assert_eq!(outcome.score, 0),
        other => panic!("unexpected submission: {:?}", other),
    }
}

#[test]
fn stale_answers_are_ignored() {
    let ctx = two_question_quiz();
    let mut session = ctx.begin();
    session.submit_answer(&ctx.progress, 0, 0).unwrap();
    assert_eq!(session.score(), 1);

    for question_index in &[0, 2, 5] {
        assert_eq!(
            session
                .submit_answer(&ctx.progress, *question_index, 0)
                .unwrap(),
            Submission::Ignored
        );
        assert_eq!(session.score(), 1);
        assert_eq!(session.current_index(), 1);
    }
}

#[test]
fn unknown_options_are_ignored() {
    let ctx = two_question_quiz();
    let mut session = ctx.begin();
    assert_eq!(
        session.submit_answer(&ctx.progress, 0, 9).unwrap(),
        Submission::Ignored
    );
    assert_eq!(session.current_index(), 0);
}

#[test]
fn finishing_records_progress() {
    let ctx = two_question_quiz();
    let mut session = ctx.begin();
    session.submit_answer(&ctx.progress, 0, 0).unwrap();
    session.submit_answer(&ctx.progress, 1, 0).unwrap();

    let record = ctx.progress.get(USER_ID).unwrap();
    assert_eq!(record.display_name, "bob");
    let completion = &record.completions[&ctx.quiz_id];
    assert_eq!(completion.score, 2);
    assert_eq!(completion.title.as_deref(), Some("Geo"));
}

#[test]
fn finished_session_cannot_continue() {
    let ctx = two_question_quiz();
    let mut session = ctx.begin();
    session.submit_answer(&ctx.progress, 0, 0).unwrap();
    session.submit_answer(&ctx.progress, 1, 0).unwrap();
    assert!(session.is_finished());
    assert!(session.current_question().is_none());
    match session.submit_answer(&ctx.progress, 2, 0) {
        Err(Error::InvalidSessionState(_)) => (),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn abandoned_run_leaves_no_trace() {
    let ctx = two_question_quiz();
    let mut session = ctx.begin();
    session.submit_answer(&ctx.progress, 0, 0).unwrap();
    drop(session);
    assert!(ctx.progress.get(USER_ID).unwrap_err().is_not_found());
}

#[test]
fn retake_overwrites_previous_score() {
    let ctx = two_question_quiz();
    let mut first = ctx.begin();
    first.submit_answer(&ctx.progress, 0, 0).unwrap();
    first.submit_answer(&ctx.progress, 1, 0).unwrap();

    let mut second = ctx.begin();
    second.submit_answer(&ctx.progress, 0, 1).unwrap();
    second.submit_answer(&ctx.progress, 1, 1).unwrap();

    let record = ctx.progress.get(USER_ID).unwrap();
    assert_eq!(record.completions.len(), 1);
    assert_eq!(record.completions[&ctx.quiz_id].score, 0);
}

#[test]
fn begin_requires_existing_quiz() {
    let ctx = two_question_quiz();
    let missing = QuizId::parse("missing").unwrap();
    let result = TakingSession::begin(&ctx.quizzes, &missing, USER_ID, "bob");
    assert!(result.unwrap_err().is_not_found());
}
