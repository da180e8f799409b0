extern crate checkers_core;

use checkers_core::config::Config;
use checkers_core::game::Game;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Settings file from CHECKERS_SETTINGS, a quick seeded game otherwise
    let config = match env::var("CHECKERS_SETTINGS") {
        Ok(path) => Config::load(&path).unwrap_or_else(|err| {
            eprintln!("{}: {}", path, err);
            std::process::exit(1);
        }),
        Err(_) => Config::from_json(
            r#"{ "Bot": { "WhiteBotLevel": 3, "BlackBotLevel": 2, "NoRandom": true },
                 "Game": { "MaxNumTurns": 80 } }"#,
        )
        .expect("built-in settings are valid"),
    };

    // Let the engine play both sides
    let mut game = Game::from_config(&config);
    match game.run() {
        Ok(result) => {
            println!("{}", game.board().current());
            println!("Result after {} turns: {:?}", game.turn(), result);
        }
        Err(err) => {
            eprintln!("game aborted: {}", err);
            std::process::exit(1);
        }
    }
}
