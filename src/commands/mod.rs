use anyhow::Result;
use log::{error, warn};
use serenity::{
    client::Context as SerenityContext,
    framework::standard::{CommandError, CommandResult},
    model::channel::Message,
    prelude::TypeMapKey,
    Result as SerenityResult,
};
use std::sync::Arc;

use crate::output::discord::interpret_message;
use crate::output::Message as OutputMessage;
use crate::quizmaster::Quizmaster;

pub mod admin;
pub mod author;
pub mod player;

pub struct QuizmasterKey;

impl TypeMapKey for QuizmasterKey {
    type Value = Arc<Quizmaster>;
}

fn get_quizmaster(ctx: &SerenityContext) -> Arc<Quizmaster> {
    ctx.data
        .read()
        .get::<QuizmasterKey>()
        .cloned()
        .expect("Expected Quizmaster in ShareMap.")
}

fn check_msg(result: SerenityResult<Message>) {
    if let Err(why) = result {
        warn!("Error sending message: {:?}", why);
    }
}

fn deliver(ctx: &SerenityContext, msg: &Message, message: &OutputMessage) {
    let text = interpret_message(message);
    match message {
        OutputMessage::StatisticsReady(path) => check_msg(msg.channel_id.send_files(
            &ctx.http,
            vec![path.as_path()],
            |m| m.content(text),
        )),
        _ => check_msg(msg.channel_id.say(&ctx.http, text)),
    }
}

fn report(ctx: &SerenityContext, msg: &Message, result: Result<()>) -> CommandResult {
    if let Err(e) = result {
        error!("{:#}", e);
        check_msg(msg.reply(&ctx.http, format!("{}", e)));
        return Err(CommandError(e.to_string()));
    }
    Ok(())
}
