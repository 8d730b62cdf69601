use anyhow::{anyhow, Context as _, Result};
use log::{error, info};
use serenity::{
    client::{Client, Context, EventHandler},
    framework::StandardFramework,
    model::gateway::Ready,
};
use std::{env, sync::Arc};

mod commands;
mod config;
mod error;
mod generator;
mod output;
mod quiz;
mod quizmaster;
mod session;
mod statistics;
mod store;

use crate::commands::QuizmasterKey;
use crate::config::Settings;
use crate::generator::GenApiGenerator;
use crate::quizmaster::Quizmaster;
use crate::session::InMemorySessions;

struct Handler;

impl EventHandler for Handler {
    fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

fn run() -> Result<()> {
    let settings = Settings::from_env()?;
    let token = env::var("DISCORD_TOKEN").context("Expected DISCORD_TOKEN in the environment")?;

    let generator = GenApiGenerator::new(&settings)?;
    let quizmaster = Quizmaster::new(
        settings,
        Box::new(generator),
        Arc::new(InMemorySessions::default()),
    )
    .context("Could not open the quiz store")?;

    let mut client =
        Client::new(&token, Handler).map_err(|e| anyhow!("Could not create client: {:?}", e))?;
    {
        let mut data = client.data.write();
        data.insert::<QuizmasterKey>(Arc::new(quizmaster));
    }

    client.with_framework(
        StandardFramework::new()
            .configure(|c| c.prefix("!"))
            .group(&commands::author::AUTHOR_GROUP)
            .group(&commands::player::PLAYER_GROUP)
            .group(&commands::admin::ADMIN_GROUP),
    );

    client
        .start()
        .map_err(|e| anyhow!("Client ended: {:?}", e))
}

fn main() {
    dotenv::dotenv().ok();
    pretty_env_logger::init();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
