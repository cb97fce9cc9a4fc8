//! AI 自对弈
//!
//! 运行方式:
//! ```bash
//! RUST_LOG=debug cargo run -p tablut-ai --example self_play -- [步数上限] [配置JSON]
//! ```

use tablut_ai::{AiConfig, AiPlayer, Controller, Player};
use tablut_core::{Board, Move, Side};
use tracing_subscriber::EnvFilter;

/// 本地对局：报告的走法直接落子并记录棋谱
struct LocalGame {
    board: Board,
    transcript: Vec<Move>,
}

impl Controller for LocalGame {
    fn board(&self) -> &Board {
        &self.board
    }

    fn report_move(&mut self, mv: Move) {
        self.board.make_move(mv);
        self.transcript.push(mv);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let limit: u32 = match args.next() {
        Some(text) => text.parse()?,
        None => 50,
    };
    let config = match args.next() {
        Some(json) => AiConfig::from_json(&json)?,
        None => AiConfig::default(),
    };

    let mut board = Board::new();
    board.set_move_limit(limit)?;
    let mut game = LocalGame {
        board,
        transcript: Vec::new(),
    };

    let mut black = AiPlayer::new(Side::Black, config.clone());
    let mut white = AiPlayer::new(Side::White, config);

    while game.board.winner().is_none() {
        let player: &mut dyn Player = match game.board.turn() {
            Side::Black => &mut black,
            Side::White => &mut white,
        };
        if player.my_move(&mut game).is_none() {
            println!("{} has no move", game.board.turn());
            break;
        }
    }

    println!("{}", game.board);
    let moves: Vec<String> = game.transcript.iter().map(Move::to_string).collect();
    println!("Moves: {}", moves.join(" "));
    match (game.board.winner(), game.board.win_reason()) {
        (Some(side), Some(reason)) => println!("{} wins ({:?}) after {} moves", side, reason, game.board.move_count()),
        _ => println!("No result after {} moves", game.board.move_count()),
    }
    Ok(())
}
