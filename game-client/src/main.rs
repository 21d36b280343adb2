use std::sync::Arc;

use game_client::{
    ClientError,
    command::{Command, HELP_TEXT},
    config::Config,
    dictionary::DictionaryValidator,
    open_store,
    render::{TerminalRenderer, format_keyboard, format_stats},
    session::{GameSession, Key},
};
use game_core::WordBank;
use game_persistence::HistoryRepository;
use game_types::{COLS, GameError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Config::new()).await {
        tracing::error!("word-guess exited with an error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), ClientError> {
    info!("Starting word-guess with {:?}", config);

    let word_bank = Arc::new(WordBank::standard());
    info!("Loaded {} known words", word_bank.known_word_count());
    let store = open_store(&config).await?;
    let history = Arc::new(HistoryRepository::new(store));
    let validator = Arc::new(DictionaryValidator::from_config(word_bank.clone(), &config));
    info!("Checking unknown words against {} dictionary providers", validator.provider_count());

    let mut session = GameSession::new(history, validator, word_bank).await?;
    session.add_handler(Box::new(TerminalRenderer::new(std::io::stdout())));

    println!("{}", session.stats().await.summary_line());
    session.announce();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Help => println!("{}", HELP_TEXT),
            Command::Stats => {
                let stats = session.stats().await;
                println!("{}\n{}", stats.summary_line(), format_stats(&stats));
            }
            Command::Unknown(command) => println!("Unknown command {}. Type :help for help.", command),
            Command::NewGame => {
                session.new_game().await?;
            }
            Command::Enter => {
                if session.round().status().is_over() {
                    session.handle_key(Key::Enter).await?;
                } else {
                    println!("Word must be {} letters.", COLS);
                }
            }
            Command::Guess(word) => {
                if word.chars().count() == COLS && !session.round().status().is_over() {
                    println!("Checking dictionary...");
                }
                match session.submit_word(&word).await {
                    Ok(event) => {
                        println!("{}", format_keyboard(session.round().keyboard()));
                        if event.finished_record().is_some() {
                            let stats = session.stats().await;
                            println!("{}\n{}", stats.summary_line(), format_stats(&stats));
                        }
                    }
                    Err(GameError::IncompleteGuess { expected }) => println!("Word must be {} letters.", expected),
                    Err(GameError::NotInDictionary { .. }) => println!("Not in dictionary."),
                    Err(GameError::InvalidInput { .. }) => println!("Letters only, please."),
                    Err(GameError::RoundOver) => println!("This round is over. Press Enter for a new game."),
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    info!("Goodbye");
    Ok(())
}
