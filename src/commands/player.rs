use anyhow::{anyhow, Context, Result};
use serenity::{
    client::Context as SerenityContext,
    framework::standard::macros::{command, group},
    framework::standard::{Args, CommandResult},
    model::channel::Message,
};

use crate::commands::*;

const USAGE_ANSWER: &'static str = "Usage: `!answer question-number option-number`";

#[group]
#[commands(start, quizzes, take, answer, progress)]
struct Player;

#[command]
fn start(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    deliver(ctx, msg, &OutputMessage::Welcome);
    Ok(())
}

#[command]
fn quizzes(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    let quizmaster = get_quizmaster(ctx);
    let message = quizmaster.list_all_quizzes();
    deliver(ctx, msg, &message);
    Ok(())
}

#[command]
fn take(ctx: &mut SerenityContext, msg: &Message, args: Args) -> CommandResult {
    let result = || -> Result<()> {
        let quiz_id = args.rest().trim();
        if quiz_id.is_empty() {
            return Err(anyhow!("Usage: `!take quiz-id`"));
        }
        let quizmaster = get_quizmaster(ctx);
        let message = quizmaster.start_taking(msg.author.id.0, &msg.author.name, quiz_id);
        deliver(ctx, msg, &message);
        Ok(())
    }();
    report(ctx, msg, result)
}

#[command]
fn answer(ctx: &mut SerenityContext, msg: &Message, mut args: Args) -> CommandResult {
    let result = || -> Result<()> {
        let question = args.single::<usize>().context(USAGE_ANSWER)?;
        let option = args.single::<usize>().context(USAGE_ANSWER)?;
        let (question, option) = match (question.checked_sub(1), option.checked_sub(1)) {
            (Some(question), Some(option)) => (question, option),
            _ => return Err(anyhow!(USAGE_ANSWER)),
        };
        let quizmaster = get_quizmaster(ctx);
        if let Some(message) = quizmaster.submit_answer(msg.author.id.0, question, option) {
            deliver(ctx, msg, &message);
        }
        Ok(())
    }();
    report(ctx, msg, result)
}

#[command]
fn progress(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    let quizmaster = get_quizmaster(ctx);
    let message = quizmaster.get_progress(msg.author.id.0);
    deliver(ctx, msg, &message);
    Ok(())
}
