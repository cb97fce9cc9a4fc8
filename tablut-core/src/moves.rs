//! 走法生成和验证

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::TablutError;
use crate::notation::Notation;
use crate::piece::Side;
use crate::square::Square;

/// 走法：起点与终点
///
/// 只表达几何，不含任何合法性信息；斜向等非直线走法可以构造，
/// 但会在合法性检查时被拒绝。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 起始格
    pub from: Square,
    /// 目标格
    pub to: Square,
}

impl Move {
    /// 创建新走法
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to }
    }

    /// 是否为直线走法
    pub fn is_rook_move(&self) -> bool {
        self.from.is_rook_move(self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Notation::format(self))
    }
}

impl FromStr for Move {
    type Err = TablutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Notation::parse(text)
    }
}

/// 走法生成器
///
/// 枚举时只检查占据与路径是否畅通，不检查轮到哪一方走；
/// 轮次检查由 [`MoveGenerator::is_legal`] 单独负责。
/// 这样搜索可以为任意一方枚举走法。
pub struct MoveGenerator;

impl MoveGenerator {
    /// from-to 是否为畅通的直线走法：终点为空且途经格子全部为空
    pub fn is_unblocked_move(board: &Board, from: Square, to: Square) -> bool {
        if !from.is_rook_move(to) || !board.get(to).is_empty() {
            return false;
        }
        from.squares_between(to)
            .iter()
            .all(|&sq| board.get(sq).is_empty())
    }

    /// from 上的棋子是否属于当前走子方
    pub fn is_legal_from(board: &Board, from: Square) -> bool {
        board.get(from).belongs_to(board.turn())
    }

    /// from-to 在当前局面下是否合法
    pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
        Self::is_legal_from(board, from)
            && board.get(to).is_empty()
            && Self::is_unblocked_move(board, from, to)
    }

    /// 生成 side 的全部走法（国王算作白方），忽略当前轮次
    ///
    /// 顺序固定：起点按行优先，同一起点的终点也按行优先。
    pub fn legal_moves(board: &Board, side: Side) -> Vec<Move> {
        let mut moves = Vec::with_capacity(128);
        for from in Square::all().filter(|&sq| board.get(sq).belongs_to(side)) {
            for to in Square::all() {
                if Self::is_unblocked_move(board, from, to) {
                    moves.push(Move::new(from, to));
                }
            }
        }
        moves
    }

    /// side 是否至少有一个走法
    pub fn has_move(board: &Board, side: Side) -> bool {
        Square::all()
            .filter(|&sq| board.get(sq).belongs_to(side))
            .any(|from| {
                Square::all().any(|to| Self::is_unblocked_move(board, from, to))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fen::Fen;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_initial_black_moves() {
        let board = Board::new();
        let moves = MoveGenerator::legal_moves(&board, Side::Black);

        // 攻方开局共 80 种走法
        assert_eq!(moves.len(), 80);

        assert!(!moves.contains(&mv("e8-7")));
        assert!(!moves.contains(&mv("e7-8")));
        assert!(moves.contains(&mv("f9-i")));
        assert!(moves.contains(&mv("h5-1")));
    }

    #[test]
    fn test_initial_white_moves_include_king_only_when_free() {
        let board = Board::new();
        let moves = MoveGenerator::legal_moves(&board, Side::White);
        // 国王被四个守方棋子围住，没有走法
        assert!(moves.iter().all(|m| m.from != sq("e5")));
        assert!(!moves.is_empty());
    }

    #[test]
    fn test_moves_after_play() {
        let mut board = Board::new();
        for text in ["a4-3", "e4-f", "b5-3", "e5-4", "b3-5"] {
            board.make_move(mv(text));
        }

        let moves = MoveGenerator::legal_moves(&board, Side::Black);
        assert_eq!(board.turn(), Side::Black);
        assert!(!moves.contains(&mv("d4-3")));
        // c5 上是守方棋子
        assert!(!moves.contains(&mv("b5-c")));
        assert!(moves.contains(&mv("b5-4")));
        assert!(moves.contains(&mv("a3-2")));
    }

    #[test]
    fn test_generated_moves_are_unblocked() {
        let board = Fen::parse("3BBB3/4B4/9/B3W3B/BB1WK1WBB/B3W3B/9/4B4/3BBB3 w").unwrap();
        for side in [Side::White, Side::Black] {
            for m in MoveGenerator::legal_moves(&board, side) {
                assert!(MoveGenerator::is_unblocked_move(&board, m.from, m.to));
                assert!(m.is_rook_move());
                assert!(board.get(m.to).is_empty());
                for &between in m.from.squares_between(m.to) {
                    assert!(board.get(between).is_empty(), "{} jumps over {}", m, between);
                }
            }
        }
    }

    #[test]
    fn test_enumeration_order_is_row_major() {
        let board = Board::new();
        let moves = MoveGenerator::legal_moves(&board, Side::Black);
        let keys: Vec<(usize, usize)> = moves
            .iter()
            .map(|m| (m.from.index(), m.to.index()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_is_legal_checks_turn() {
        let board = Board::new();
        // 黑方先走
        assert!(MoveGenerator::is_legal(&board, sq("a4"), sq("a3")));
        assert!(!MoveGenerator::is_legal(&board, sq("e3"), sq("c3")));
        // 枚举时不检查轮次
        assert!(MoveGenerator::legal_moves(&board, Side::White).contains(&mv("e3-c")));
    }

    #[test]
    fn test_blocked_and_diagonal_moves() {
        let board = Board::new();
        assert!(!MoveGenerator::is_unblocked_move(&board, sq("a4"), sq("a4")));
        assert!(!MoveGenerator::is_unblocked_move(&board, sq("a4"), sq("b3")));
        // a5 挡住 a4 向北
        assert!(!MoveGenerator::is_unblocked_move(&board, sq("a4"), sq("a7")));
        // 终点被占
        assert!(!MoveGenerator::is_unblocked_move(&board, sq("d9"), sq("e9")));
    }

    #[test]
    fn test_has_move() {
        assert!(MoveGenerator::has_move(&Board::new(), Side::Black));
        assert!(MoveGenerator::has_move(&Board::new(), Side::White));

        // 被困死的白方
        let board = Fen::parse("KB7/B8/9/9/9/9/9/9/9 w").unwrap();
        assert!(!MoveGenerator::has_move(&board, Side::White));
        assert!(MoveGenerator::has_move(&board, Side::Black));
    }
}
