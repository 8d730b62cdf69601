use serenity::{
    client::Context as SerenityContext,
    framework::standard::macros::{command, group},
    framework::standard::CommandResult,
    model::channel::Message,
};

use crate::commands::*;

#[group]
#[commands(stats)]
struct Admin;

#[command]
fn stats(ctx: &mut SerenityContext, msg: &Message) -> CommandResult {
    let quizmaster = get_quizmaster(ctx);
    let message = quizmaster.get_statistics(msg.author.id.0);
    deliver(ctx, msg, &message);
    Ok(())
}
