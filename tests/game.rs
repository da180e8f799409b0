//! The turn controller driven through the public API.

use checkers_core::board::{Side, Snapshot, Square};
use checkers_core::config::Config;
use checkers_core::error::CheckersError;
use checkers_core::game::{Game, GameResult};
use checkers_core::moves::Move;
use std::fs;

fn human_vs_bot(max_turns: usize) -> Game {
    let config = Config::from_json(&format!(
        r#"{{ "Bot": {{ "IsWhiteBot": false, "IsBlackBot": true, "BlackBotLevel": 2, "NoRandom": true }},
             "Game": {{ "MaxNumTurns": {max_turns} }} }}"#
    ))
    .expect("valid settings");
    Game::from_config(&config)
}

#[test]
fn human_and_bot_take_turns_until_the_game_ends() {
    let mut game = human_vs_bot(30);

    while game.result().is_none() {
        if game.is_bot(game.side_to_move()) {
            game.play_bot_turn().expect("bot turn");
        } else {
            let mv = *game.legal_moves().iter().next().expect("a legal move");
            game.play_move(mv).expect("legal move");
        }
    }

    assert!(game.turn() <= 30);
    assert!(matches!(game.play_bot_turn(), Err(CheckersError::GameOver)));
}

#[test]
fn undo_returns_the_move_to_the_human() {
    let mut game = human_vs_bot(100);
    let opening = Move::new(Square::new(5, 2), Square::new(4, 3));
    game.play_move(opening).expect("legal move");
    game.play_bot_turn().expect("bot turn");

    game.undo_turn();

    assert_eq!(game.side_to_move(), Side::White);
    assert_eq!(game.board().current(), &Snapshot::initial());
    game.play_move(opening).expect("the same move is legal again");
    assert_eq!(game.side_to_move(), Side::Black);
}

#[test]
fn illegal_human_move_is_rejected() {
    let mut game = human_vs_bot(100);
    let backwards = Move::new(Square::new(5, 2), Square::new(6, 3));

    let result = game.play_move(backwards);

    assert!(matches!(result, Err(CheckersError::IllegalMove { .. })));
    assert_eq!(game.turn(), 0);
}

#[test]
fn settings_file_drives_the_game() {
    let path = std::env::temp_dir().join(format!("checkers-settings-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{ "Bot": { "IsWhiteBot": true, "IsBlackBot": true, "WhiteBotLevel": 1, "BlackBotLevel": 1,
                     "NoRandom": true },
             "Game": { "MaxNumTurns": 6 } }"#,
    )
    .expect("temp file is writable");

    let config = Config::load(&path).expect("settings load");
    fs::remove_file(&path).ok();
    let mut game = Game::from_config(&config);

    assert!(game.is_bot(Side::White) && game.is_bot(Side::Black));
    let result = game.run().expect("self-play");
    assert_eq!(result, GameResult::Draw);
    assert_eq!(game.turn(), 6);
}
