//! Tablut AI 引擎
//!
//! 包含:
//! - 棋局评估函数（子力差，胜局饱和分值）
//! - Minimax + Alpha-Beta 搜索
//! - 玩家与对局控制接口

mod evaluate;
mod player;
mod search;

pub use evaluate::{Evaluator, INFTY, WINNING_VALUE};
pub use player::{AiPlayer, Controller, Player};
pub use search::{AiConfig, AiEngine, Difficulty};
