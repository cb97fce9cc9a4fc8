//! 棋盘格子与方向
//!
//! 格子一经创建不可变，坐标越界时返回 `None` 而不是错误。
//! 每个格子在四个直线方向上的"车线"（途经格子序列）预先计算，
//! 走法合法性检查直接查表，不再重复计算几何关系。

use std::fmt;
use std::str::FromStr;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::constants::{BOARD_SIZE, SQUARE_COUNT, THRONE};
use crate::error::TablutError;

/// 八个罗盘方向（北为行号增大的方向）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    /// 四个直线方向，顺序与车线表一致
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// 列、行偏移量
    pub fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (0, 1),
            Direction::NorthEast => (1, 1),
            Direction::East => (1, 0),
            Direction::SouthEast => (1, -1),
            Direction::South => (0, -1),
            Direction::SouthWest => (-1, -1),
            Direction::West => (-1, 0),
            Direction::NorthWest => (-1, 1),
        }
    }

    fn rook_index(self) -> Option<usize> {
        match self {
            Direction::North => Some(0),
            Direction::East => Some(1),
            Direction::South => Some(2),
            Direction::West => Some(3),
            _ => None,
        }
    }
}

/// 棋盘格子
///
/// 内部只保存线性索引 `row * 9 + col`，因此按索引排序即为行优先顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Square {
    index: u8,
}

lazy_static! {
    /// 车线表：`ROOK_LINES[index][dir]` 为从该格出发沿 dir 方向由近及远的所有格子
    static ref ROOK_LINES: Vec<[Vec<Square>; 4]> = Square::all()
        .map(|from| {
            Direction::ORTHOGONAL.map(|dir| {
                let mut line = Vec::with_capacity(BOARD_SIZE - 1);
                let mut current = from;
                while let Some(next) = current.neighbor(dir) {
                    line.push(next);
                    current = next;
                }
                line
            })
        })
        .collect();
}

impl Square {
    /// 创建格子（不检查边界，内部使用）
    pub const fn new_unchecked(col: u8, row: u8) -> Self {
        Self {
            index: row * BOARD_SIZE as u8 + col,
        }
    }

    /// 按坐标取格子，越界返回 `None`
    pub fn at(col: u8, row: u8) -> Option<Self> {
        if (col as usize) < BOARD_SIZE && (row as usize) < BOARD_SIZE {
            Some(Self::new_unchecked(col, row))
        } else {
            None
        }
    }

    /// 从线性索引转换
    pub fn from_index(index: usize) -> Option<Self> {
        if index < SQUARE_COUNT {
            Some(Self { index: index as u8 })
        } else {
            None
        }
    }

    /// 按行优先顺序遍历全部 81 个格子
    pub fn all() -> impl Iterator<Item = Square> {
        (0..SQUARE_COUNT as u8).map(|index| Square { index })
    }

    /// 线性索引
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// 列 (0-8，对应 a-i)
    pub fn col(self) -> u8 {
        self.index % BOARD_SIZE as u8
    }

    /// 行 (0-8，对应 1-9)
    pub fn row(self) -> u8 {
        self.index / BOARD_SIZE as u8
    }

    /// 获取偏移后的格子
    pub fn offset(self, dcol: i8, drow: i8) -> Option<Square> {
        self.shift(i16::from(dcol), i16::from(drow))
    }

    fn shift(self, dcol: i16, drow: i16) -> Option<Square> {
        let col = u8::try_from(i16::from(self.col()) + dcol).ok()?;
        let row = u8::try_from(i16::from(self.row()) + drow).ok()?;
        Square::at(col, row)
    }

    /// 相邻格子
    pub fn neighbor(self, dir: Direction) -> Option<Square> {
        let (dcol, drow) = dir.delta();
        self.offset(dcol, drow)
    }

    /// 沿 dir 方向走 steps 步后的格子
    pub fn rook_move(self, dir: Direction, steps: u8) -> Option<Square> {
        let (dcol, drow) = dir.delta();
        let steps = i16::from(steps);
        self.shift(i16::from(dcol) * steps, i16::from(drow) * steps)
    }

    /// 同行或同列且不是同一格
    pub fn is_rook_move(self, other: Square) -> bool {
        self != other && (self.col() == other.col() || self.row() == other.row())
    }

    /// 与 other 正交相邻
    pub fn is_adjacent(self, other: Square) -> bool {
        self.is_rook_move(other) && self.distance(other) == 1
    }

    /// 从本格看 other 所在的罗盘方向；同一格返回 `None`
    pub fn direction(self, other: Square) -> Option<Direction> {
        let dcol = (other.col() as i8 - self.col() as i8).signum();
        let drow = (other.row() as i8 - self.row() as i8).signum();
        match (dcol, drow) {
            (0, 1) => Some(Direction::North),
            (1, 1) => Some(Direction::NorthEast),
            (1, 0) => Some(Direction::East),
            (1, -1) => Some(Direction::SouthEast),
            (0, -1) => Some(Direction::South),
            (-1, -1) => Some(Direction::SouthWest),
            (-1, 0) => Some(Direction::West),
            (-1, 1) => Some(Direction::NorthWest),
            _ => None,
        }
    }

    /// 曼哈顿距离
    pub fn distance(self, other: Square) -> u8 {
        self.col().abs_diff(other.col()) + self.row().abs_diff(other.row())
    }

    /// 同一直线上恰好相隔两格时，返回中间的格子
    pub fn between(self, other: Square) -> Option<Square> {
        if !self.is_rook_move(other) || self.distance(other) != 2 {
            return None;
        }
        Square::at(
            (self.col() + other.col()) / 2,
            (self.row() + other.row()) / 2,
        )
    }

    /// 沿 dir 方向的车线（由近及远）；斜向为空
    pub fn rook_line(self, dir: Direction) -> &'static [Square] {
        match dir.rook_index() {
            Some(i) => &ROOK_LINES[self.index()][i],
            None => &[],
        }
    }

    /// 严格位于本格与 other 之间的格子；不在同一直线时为空
    pub fn squares_between(self, other: Square) -> &'static [Square] {
        if !self.is_rook_move(other) {
            return &[];
        }
        match self.direction(other) {
            Some(dir) => {
                let steps = self.distance(other) as usize;
                &self.rook_line(dir)[..steps - 1]
            }
            None => &[],
        }
    }

    /// 是否位于棋盘边缘
    pub fn is_edge(self) -> bool {
        let last = BOARD_SIZE as u8 - 1;
        self.col() == 0 || self.col() == last || self.row() == 0 || self.row() == last
    }

    /// 是否为王座
    pub fn is_throne(self) -> bool {
        self == THRONE
    }

    /// 是否为王座四周的格子
    pub fn is_throne_ring(self) -> bool {
        self.is_adjacent(THRONE)
    }

    /// 王座及其四周，国王在此区域需四面包围才会被吃
    pub fn near_throne(self) -> bool {
        self.is_throne() || self.is_throne_ring()
    }
}

impl TryFrom<u8> for Square {
    type Error = TablutError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Square::from_index(index as usize).ok_or_else(|| TablutError::InvalidSquare {
            text: index.to_string(),
        })
    }
}

impl From<Square> for u8 {
    fn from(square: Square) -> u8 {
        square.index
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col()) as char, self.row() + 1)
    }
}

impl FromStr for Square {
    type Err = TablutError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || TablutError::InvalidSquare {
            text: text.to_string(),
        };
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(invalid());
        }
        let col = bytes[0].wrapping_sub(b'a');
        let row = bytes[1].wrapping_sub(b'1');
        Square::at(col, row).ok_or_else(invalid)
    }
}
