//! 走法文本表示法
//!
//! 格式：`<起点列><起点行>-<终点>`
//! - 列用字母 a-i，行用数字 1-9
//! - 横走时终点只写新的列字母，竖走时只写新的行数字，例如 `e4-f`、`a4-3`
//! - 也接受完整写法 `e4-f4`；非直线走法总是以完整写法输出

use crate::error::TablutError;
use crate::moves::Move;
use crate::square::Square;

/// 走法表示法
pub struct Notation;

impl Notation {
    /// 将走法转换为文本
    pub fn format(mv: &Move) -> String {
        let (from, to) = (mv.from, mv.to);
        if from.row() == to.row() && from.col() != to.col() {
            format!("{}-{}", from, Self::col_char(to.col()))
        } else if from.col() == to.col() && from.row() != to.row() {
            format!("{}-{}", from, Self::row_char(to.row()))
        } else {
            format!("{}-{}", from, to)
        }
    }

    /// 解析走法文本
    ///
    /// 只做语法检查；终点与起点相同等几何问题留给合法性检查。
    pub fn parse(text: &str) -> Result<Move, TablutError> {
        let invalid = |reason: &str| TablutError::InvalidMoveFormat {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = text.trim();
        let (from_text, to_text) = trimmed
            .split_once('-')
            .ok_or_else(|| invalid("missing '-'"))?;

        let from: Square = from_text
            .parse()
            .map_err(|_| invalid("origin must be a column a-i followed by a row 1-9"))?;

        let to = match to_text.len() {
            1 => {
                let c = to_text.as_bytes()[0];
                let to = match c {
                    b'a'..=b'i' => Square::at(c - b'a', from.row()),
                    b'1'..=b'9' => Square::at(from.col(), c - b'1'),
                    _ => None,
                };
                to.ok_or_else(|| invalid("destination must be a column a-i or a row 1-9"))?
            }
            2 => to_text
                .parse()
                .map_err(|_| invalid("destination square out of range"))?,
            _ => return Err(invalid("wrong length")),
        };

        Ok(Move::new(from, to))
    }

    fn col_char(col: u8) -> char {
        (b'a' + col) as char
    }

    fn row_char(row: u8) -> char {
        (b'1' + row) as char
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(text: &str) -> Square {
        text.parse().unwrap()
    }

    #[test]
    fn test_parse_short_forms() {
        assert_eq!(Notation::parse("e4-f").unwrap(), Move::new(sq("e4"), sq("f4")));
        assert_eq!(Notation::parse("a4-3").unwrap(), Move::new(sq("a4"), sq("a3")));
        assert_eq!(Notation::parse("i9-1").unwrap(), Move::new(sq("i9"), sq("i1")));
    }

    #[test]
    fn test_parse_full_form() {
        assert_eq!(Notation::parse("e4-f4").unwrap(), Move::new(sq("e4"), sq("f4")));
        // 非直线几何在语法层面接受
        assert_eq!(Notation::parse("a1-b2").unwrap(), Move::new(sq("a1"), sq("b2")));
    }

    #[test]
    fn test_format() {
        assert_eq!(Notation::format(&Move::new(sq("e4"), sq("f4"))), "e4-f");
        assert_eq!(Notation::format(&Move::new(sq("a4"), sq("a3"))), "a4-3");
        assert_eq!(Notation::format(&Move::new(sq("a1"), sq("b2"))), "a1-b2");
        assert_eq!(Notation::format(&Move::new(sq("a1"), sq("a1"))), "a1-a1");
    }

    #[test]
    fn test_format_parse_agree_for_all_rook_moves() {
        for from in Square::all() {
            for to in Square::all().filter(|&to| from.is_rook_move(to)) {
                let mv = Move::new(from, to);
                assert_eq!(Notation::parse(&Notation::format(&mv)).unwrap(), mv);
            }
        }
    }

    #[test]
    fn test_malformed_input() {
        for text in ["", "e4", "e4f", "e4-", "e4-j", "e4-0", "z4-5", "e0-5", "e4-f10", "e4--f"] {
            let err = Notation::parse(text).unwrap_err();
            assert!(
                matches!(err, TablutError::InvalidMoveFormat { .. }),
                "{} should be a format error, got {:?}",
                text,
                err
            );
        }
    }

    #[test]
    fn test_move_from_str() {
        let mv: Move = "h5-6".parse().unwrap();
        assert_eq!(mv.to_string(), "h5-6");
    }
}
