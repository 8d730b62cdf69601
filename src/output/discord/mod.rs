use crate::output::{Message, QuizSummary};

#[cfg(test)]
mod tests;

fn list_quizzes(header: &str, quizzes: &[QuizSummary]) -> String {
    let mut message = header.to_owned();
    for quiz in quizzes {
        message += &format!(
            "\n- **{}** ({}, {} questions) - `!take {}`",
            quiz.title, quiz.category, quiz.question_count, quiz.id
        );
    }
    message
}

pub fn interpret_message(message: &Message) -> String {
    use Message::*;
    match message {
        Welcome => "Hi! I create quizzes on any topic and let others take them.\n\n**📋 Commands**\n- `!newquiz topic` create a quiz\n- `!myquizzes` quizzes you created\n- `!quizzes` take a quiz\n- `!progress` your results\n- `!stats` statistics (admin)".into(),
        Generating(topic) => format!("⌛ Generating a quiz about **{}**...", topic),
        Preview { index, total, question } => {
            let mut message = format!("**Question {}/{}**\n\n{}\n\nOptions:", index + 1, total, question.question_text);
            for (position, option) in question.options.iter().enumerate() {
                message += &format!("\n{}. {}", position + 1, option);
            }
            message += &format!("\n\nCorrect: **{}**", question.displayed_answer());
            message += "\n\nUse `!prev` and `!next` to browse, `!publish` to publish or `!cancel` to discard.";
            message
        }
        QuizPublished { id, title } => format!("✅ **{}** is published! ID: `{}`\nAnyone can take it with `!take {}`", title, id, id),
        AuthoringCancelled => "❌ Quiz creation cancelled.".into(),
        NoDraft => "There is no quiz draft in progress. Use `!newquiz topic` to create one.".into(),
        MyQuizzes(quizzes) => list_quizzes("Your quizzes:", quizzes),
        NoQuizzesCreated => "You have not created any quizzes yet.".into(),
        AvailableQuizzes(quizzes) => list_quizzes("Pick a quiz:", quizzes),
        NoQuizzesAvailable => "No quizzes are available yet.".into(),
        QuestionBegins { index, total, question_text, options } => {
            let mut message = format!("**Question {}/{}**\n\n{}\n", index + 1, total, question_text);
            for (position, option) in options.iter().enumerate() {
                message += &format!("\n{}. {}", position + 1, option);
            }
            message += &format!("\n\nAnswer with `!answer {} option-number`", index + 1);
            message
        }
        QuizResults(outcome) => {
            let mut message = format!(
                "🏁 Quiz finished: **{}**\n\nYour score: {}/{} ({:.1}%)\n",
                outcome.title,
                outcome.score,
                outcome.total_points,
                outcome.percentage()
            );
            for answer in &outcome.answers {
                if answer.points_awarded > 0 {
                    message += &format!("\n✅ {} - {}", answer.question_text, answer.chosen_option);
                } else {
                    message += &format!(
                        "\n❌ {} - {} (correct: {})",
                        answer.question_text, answer.chosen_option, answer.correct_option_display
                    );
                }
            }
            message
        }
        NoActiveQuiz => "You are not taking a quiz right now. Use `!quizzes` to pick one.".into(),
        Progress(lines) => {
            let mut message = "📈 Your progress:\n".to_owned();
            for line in lines {
                let total = line
                    .total_points
                    .map(|t| t.to_string())
                    .unwrap_or_else(|| "?".to_owned());
                message += &format!("\n{}: {}/{}", line.title, line.score, total);
            }
            message
        }
        NoProgress => "You have not completed any quizzes yet.".into(),
        StatisticsReady(_) => "📊 Statistics for your quizzes".into(),
        NoStatistics => "Nobody has taken your quizzes yet.".into(),
        AdminOnly => "Only the administrator can use this command.".into(),
        Failure(reason) => format!("❌ Error: {}", reason),
    }
}
