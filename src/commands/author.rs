use anyhow::{anyhow, Context, Result};
use serenity::{
    client::Context as SerenityContext,
    framework::standard::macros::{command, group},
    framework::standard::{Args, CommandResult},
    model::channel::Message,
};

use crate::commands::*;
use crate::quiz::Direction;

#[group]
#[commands(newquiz, next, prev, publish, cancel, myquizzes)]
struct Author;

#[command]
fn newquiz(ctx: &mut SerenityContext, msg: &Message, args: Args) -> CommandResult {
    let result = || -> Result<()> {
        let topic = args.rest().trim();
        if topic.is_empty() {
            return Err(anyhow!("Usage: `!newquiz topic`"));
        }
        let quizmaster = get_quizmaster(ctx);
        deliver(ctx, msg, &OutputMessage::Generating(topic.to_owned()));
        let message = quizmaster.start_authoring(msg.author.id.0, topic);
        deliver(ctx, msg, &message);
        Ok(())
    }();
    report(ctx, msg, result)
}

#[command]
fn next(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    let quizmaster = get_quizmaster(ctx);
    let message = quizmaster.navigate_preview(msg.author.id.0, Direction::Forward);
    deliver(ctx, msg, &message);
    Ok(())
}

#[command]
fn prev(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    let quizmaster = get_quizmaster(ctx);
    let message = quizmaster.navigate_preview(msg.author.id.0, Direction::Backward);
    deliver(ctx, msg, &message);
    Ok(())
}

#[command]
fn publish(ctx: &mut SerenityContext, msg: &Message, args: Args) -> CommandResult {
    let result = || -> Result<()> {
        let points = match args.rest().trim() {
            "" => None,
            points => Some(
                points
                    .parse::<u32>()
                    .context("Points per question must be a positive number")?,
            ),
        };
        let quizmaster = get_quizmaster(ctx);
        let message = quizmaster.publish(msg.author.id.0, &msg.author.name, points);
        deliver(ctx, msg, &message);
        Ok(())
    }();
    report(ctx, msg, result)
}

#[command]
fn cancel(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    let quizmaster = get_quizmaster(ctx);
    let message = quizmaster.cancel_authoring(msg.author.id.0);
    deliver(ctx, msg, &message);
    Ok(())
}

#[command]
fn myquizzes(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    let quizmaster = get_quizmaster(ctx);
    let message = quizmaster.list_my_quizzes(msg.author.id.0);
    deliver(ctx, msg, &message);
    Ok(())
}
