extern crate shelfnotes;

use std::sync::Arc;

use log::{error, info};
use tokio::io::{AsyncBufReadExt, BufReader};

use shelfnotes::api::{BooksCatalog, CommentsClient};
use shelfnotes::catalog::Origin;
use shelfnotes::command::{Command, HELP};
use shelfnotes::config::Config;
use shelfnotes::models::Genre;
use shelfnotes::session::Session;
use shelfnotes::view;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cfg = Config::from_env()?;
    let catalog = Arc::new(BooksCatalog::new(&cfg)?);
    let comments = Arc::new(CommentsClient::new(&cfg)?);

    info!("catalog at {}", cfg.catalog_base_url);
    info!("comments at {}", cfg.comments_base_url);

    let (mut session, mut replies) = Session::new(&cfg, catalog, comments);
    session.select_genre(Genre::default());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", HELP);

    loop {
        tokio::select! {
            Some(reply) = replies.recv() => {
                session.on_catalog_reply(reply);
                print!("{}", view::render(&session));
            }
            line = lines.next_line() => {
                let line = match line? {
                    Some(line) => line,
                    None => break,
                };

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(err) => {
                        println!("{}", err);
                        continue;
                    }
                };

                match run(&mut session, command).await {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(err) => {
                        error!("{:#}", err);
                        println!("{}", err);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Runs one command; `false` means the user wants out.
async fn run(session: &mut Session, command: Command) -> anyhow::Result<bool> {
    match command {
        Command::Genre(genre) => {
            session.select_genre(genre);
            println!("loading {}...", genre.label());
            return Ok(true);
        }
        Command::Open(id) => {
            session.toggle(&id, Origin::Card).await;
        }
        Command::Text(body) => session.set_draft_text(body)?,
        Command::Rate(value) => session.set_draft_rating(value)?,
        Command::Send => session.submit().await?,
        Command::Delete(id) => session.delete(&id).await?,
        Command::Show => {}
        Command::Help => {
            println!("{}", HELP);
            return Ok(true);
        }
        Command::Quit => return Ok(false),
    }

    print!("{}", view::render(session));

    Ok(true)
}
