//! 错误类型定义

use thiserror::Error;

use crate::moves::Move;

/// 规则引擎错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TablutError {
    /// 走法文本格式错误
    #[error("Invalid move format '{text}': {reason}")]
    InvalidMoveFormat { text: String, reason: String },

    /// 无效的格子
    #[error("Invalid square: {text}")]
    InvalidSquare { text: String },

    /// 当前局面下不合法的走法
    #[error("Illegal move: {mv}")]
    IllegalMove { mv: Move },

    /// 游戏已结束
    #[error("Game is already over")]
    GameOver,

    /// 步数上限小于已走步数
    #[error("Move limit {limit} is too small: {move_count} moves already made")]
    MoveLimitTooSmall { limit: u32, move_count: u32 },

    /// 无效的 FEN 字符串
    #[error("Invalid FEN string: {reason}")]
    InvalidFen { reason: String },

    /// 反序列化得到的棋盘状态不一致
    #[error("Invalid board state: {reason}")]
    InvalidBoard { reason: String },
}

/// 规则引擎操作结果类型
pub type Result<T> = std::result::Result<T, TablutError>;
