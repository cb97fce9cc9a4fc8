//! 棋子与阵营定义

use std::fmt;

use serde::{Deserialize, Serialize};

/// 阵营
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// 守方（白方，护送国王）
    White,
    /// 攻方（黑方，先手）
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 局面编码与棋盘显示所用字符
    pub fn to_char(&self) -> char {
        match self {
            Side::White => 'W',
            Side::Black => 'B',
        }
    }

    /// 从字符解析（大小写均可）
    pub fn from_char(c: char) -> Option<Side> {
        match c {
            'w' | 'W' => Some(Side::White),
            'b' | 'B' => Some(Side::Black),
            _ => None,
        }
    }

    /// 该方在白方视角下的符号：白方 +1，黑方 -1
    pub fn sense(&self) -> i32 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// 格子上的占据者
///
/// 国王在走子和归属上算作白方，但在吃子和逃脱规则中需要单独区分，
/// 所以凡是判断"是否为某方棋子"的地方都必须经过 [`Piece::side`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Piece {
    #[default]
    Empty,
    White,
    Black,
    King,
}

impl Piece {
    /// 所属阵营，空格返回 `None`
    pub fn side(&self) -> Option<Side> {
        match self {
            Piece::Empty => None,
            Piece::White | Piece::King => Some(Side::White),
            Piece::Black => Some(Side::Black),
        }
    }

    /// 是否属于 side
    pub fn belongs_to(&self, side: Side) -> bool {
        self.side() == Some(side)
    }

    pub fn is_empty(&self) -> bool {
        *self == Piece::Empty
    }

    /// 棋盘显示与局面编码所用字符
    pub fn to_char(&self) -> char {
        match self {
            Piece::Empty => '-',
            Piece::White => 'W',
            Piece::Black => 'B',
            Piece::King => 'K',
        }
    }

    /// 从字符解析
    pub fn from_char(c: char) -> Option<Piece> {
        match c {
            '-' => Some(Piece::Empty),
            'W' => Some(Piece::White),
            'B' => Some(Piece::Black),
            'K' => Some(Piece::King),
            _ => None,
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
