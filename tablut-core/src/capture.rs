//! 吃子判定
//!
//! 只判定，不修改棋盘：给出刚落子的格子，返回应当被移除的棋子位置。
//!
//! - 夹吃：落子相邻的敌方棋子，若其另一侧的格子对它"敌对"则被吃
//! - 王座：空置时对双方都敌对；国王坐镇时视作守方，
//!   但王座四周已有三个攻方棋子时，对守方棋子转为敌对
//! - 国王在王座或其四周时，须四面敌对才会被吃（空王座算敌对）；
//!   在其他位置则与普通棋子一样被夹吃

use crate::board::Board;
use crate::constants::THRONE_RING;
use crate::piece::{Piece, Side};
use crate::square::{Direction, Square};

/// 计算落子于 `to` 后被吃掉的棋子，按方向顺序返回
pub(crate) fn captures(board: &Board, to: Square) -> Vec<Square> {
    let mover = match board.get(to).side() {
        Some(side) => side,
        None => return Vec::new(),
    };

    let mut victims = Vec::new();
    for dir in Direction::ORTHOGONAL {
        let Some(neighbor) = to.neighbor(dir) else {
            continue;
        };
        let victim = board.get(neighbor);
        match victim.side() {
            Some(side) if side != mover => {}
            _ => continue,
        }

        let captured = if victim == Piece::King && neighbor.near_throne() {
            is_encircled(board, neighbor)
        } else {
            neighbor
                .neighbor(dir)
                .is_some_and(|far| is_hostile(board, far, victim))
        };

        if captured {
            victims.push(neighbor);
        }
    }
    victims
}

/// 国王四面是否全部敌对
pub(crate) fn is_encircled(board: &Board, king: Square) -> bool {
    Direction::ORTHOGONAL.iter().all(|&dir| {
        king.neighbor(dir)
            .is_some_and(|sq| is_hostile(board, sq, Piece::King))
    })
}

/// 格子 sq 对棋子 victim 是否敌对
fn is_hostile(board: &Board, sq: Square, victim: Piece) -> bool {
    let occupant = board.get(sq);
    if sq.is_throne() {
        match occupant {
            Piece::Empty => return true,
            Piece::King if victim == Piece::White => {
                return attackers_around_throne(board) == 3;
            }
            _ => {}
        }
    }
    match (occupant.side(), victim.side()) {
        (Some(a), Some(b)) => a != b,
        _ => false,
    }
}

/// 王座四周的攻方棋子数
fn attackers_around_throne(board: &Board) -> usize {
    THRONE_RING
        .iter()
        .filter(|&&sq| board.get(sq).belongs_to(Side::Black))
        .count()
}
