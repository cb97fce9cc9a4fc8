//! 棋局评估函数

use tablut_core::{Board, Side};

/// 胜局分值（白方为正，黑方为负），大于任何子力差
pub const WINNING_VALUE: i32 = i32::MAX - 20;

/// 大于任何局面分值
pub const INFTY: i32 = i32::MAX;

/// 评估器
pub struct Evaluator;

impl Evaluator {
    /// 静态评估（白方视角，正值对白方有利）
    ///
    /// 已分胜负时返回 ±[`WINNING_VALUE`]，否则为子力差。
    pub fn static_score(board: &Board) -> i32 {
        match board.winner() {
            Some(side) => side.sense() * WINNING_VALUE,
            None => Self::evaluate_material(board),
        }
    }

    /// 子力差：白方棋子数（含国王）减去黑方棋子数
    pub fn evaluate_material(board: &Board) -> i32 {
        let white = board.pieces(Side::White).len() as i32;
        let black = board.pieces(Side::Black).len() as i32;
        white - black
    }
}
