//! FEN 风格的局面表示
//!
//! 格式：`<棋盘> <走子方>`
//!
//! - 棋盘从第 9 行到第 1 行，以 `/` 分隔
//! - `B` 攻方，`W` 守方，`K` 国王，数字表示连续空格
//! - 走子方 `b` 或 `w`，省略时为攻方
//!
//! 示例（初始局面）：
//! `3BBB3/4B4/4W4/B3W3B/BBWWKWWBB/B3W3B/4W4/4B4/3BBB3 b`

use std::str::FromStr;

use crate::board::Board;
use crate::constants::{BOARD_SIZE, SQUARE_COUNT};
use crate::error::TablutError;
use crate::piece::{Piece, Side};
use crate::square::Square;

/// 初始局面 FEN
pub const INITIAL_FEN: &str = "3BBB3/4B4/4W4/B3W3B/BBWWKWWBB/B3W3B/4W4/4B4/3BBB3 b";

/// FEN 格式处理
pub struct Fen;

impl Fen {
    /// 解析 FEN 字符串为棋盘
    pub fn parse(fen: &str) -> Result<Board, TablutError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.is_empty() {
            return Err(Self::invalid("Empty FEN string"));
        }

        let squares = Self::parse_squares(parts[0])?;

        let turn = match parts.get(1) {
            Some(text) => {
                let mut chars = text.chars();
                match (chars.next().and_then(Side::from_char), chars.next()) {
                    (Some(side), None) => side,
                    _ => return Err(Self::invalid(&format!("Unknown side to move '{}'", text))),
                }
            }
            None => Side::Black,
        };

        if parts.len() > 2 {
            return Err(Self::invalid("Unexpected trailing fields"));
        }

        Ok(Board::from_position(squares, turn))
    }

    /// 解析棋盘部分
    fn parse_squares(board_str: &str) -> Result<Vec<Piece>, TablutError> {
        let mut squares = vec![Piece::Empty; SQUARE_COUNT];
        let rows: Vec<&str> = board_str.split('/').collect();

        if rows.len() != BOARD_SIZE {
            return Err(Self::invalid(&format!(
                "Expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut kings = 0;
        // FEN 从上到下是第 9 行到第 1 行
        for (row_idx, row_str) in rows.iter().enumerate() {
            let row = (BOARD_SIZE - 1 - row_idx) as u8;
            let mut col = 0usize;

            for c in row_str.chars() {
                if let Some(skip) = c.to_digit(10).filter(|&d| d > 0) {
                    col += skip as usize;
                    continue;
                }
                let piece = match Piece::from_char(c) {
                    Some(piece) if !piece.is_empty() => piece,
                    _ => return Err(Self::invalid(&format!("Invalid piece character '{}'", c))),
                };
                if col >= BOARD_SIZE {
                    return Err(Self::invalid(&format!("Row {} is too long", row + 1)));
                }
                if piece == Piece::King {
                    kings += 1;
                }
                squares[Square::new_unchecked(col as u8, row).index()] = piece;
                col += 1;
            }

            if col != BOARD_SIZE {
                return Err(Self::invalid(&format!(
                    "Row {} has {} columns, expected {}",
                    row + 1,
                    col,
                    BOARD_SIZE
                )));
            }
        }

        if kings != 1 {
            return Err(Self::invalid(&format!("Expected exactly one king, got {}", kings)));
        }

        Ok(squares)
    }

    /// 将棋盘转换为 FEN 字符串
    pub fn format(board: &Board) -> String {
        let mut rows = Vec::with_capacity(BOARD_SIZE);
        for row in (0..BOARD_SIZE as u8).rev() {
            let mut row_str = String::new();
            let mut empty = 0;
            for col in 0..BOARD_SIZE as u8 {
                let piece = board.get(Square::new_unchecked(col, row));
                if piece.is_empty() {
                    empty += 1;
                } else {
                    if empty > 0 {
                        row_str.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row_str.push(piece.to_char());
                }
            }
            if empty > 0 {
                row_str.push_str(&empty.to_string());
            }
            rows.push(row_str);
        }
        format!("{} {}", rows.join("/"), board.turn().to_char().to_ascii_lowercase())
    }

    fn invalid(reason: &str) -> TablutError {
        TablutError::InvalidFen {
            reason: reason.to_string(),
        }
    }
}

impl FromStr for Board {
    type Err = TablutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Fen::parse(s)
    }
}
