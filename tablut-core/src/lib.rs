//! Tablut 规则引擎
//!
//! 包含:
//! - 格子、方向、棋子、走法等核心数据结构
//! - 走法生成和合法性检查
//! - 吃子判定（夹吃、王座敌对、国王包围）
//! - 胜负判定、撤销、重复局面检测
//! - 走法文本表示法与 FEN 风格局面格式

mod board;
mod capture;
mod constants;
mod error;
mod fen;
mod moves;
mod notation;
mod piece;
mod square;

pub use board::{Board, WinReason};
pub use constants::*;
pub use error::{Result, TablutError};
pub use fen::{Fen, INITIAL_FEN};
pub use moves::{Move, MoveGenerator};
pub use notation::Notation;
pub use piece::{Piece, Side};
pub use square::{Direction, Square};
