//! 棋盘状态
//!
//! 棋盘只通过 [`Board::make_move`] 和 [`Board::undo`] 修改。
//! 每步走法记录为一个撤销单元（按顺序回写的格子/棋子对），
//! 撤销时原样回写，不需要重新推导吃子几何。

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::capture;
use crate::constants::{INITIAL_ATTACKERS, INITIAL_DEFENDERS, SQUARE_COUNT, BOARD_SIZE, THRONE};
use crate::error::{Result, TablutError};
use crate::moves::{Move, MoveGenerator};
use crate::piece::{Piece, Side};
use crate::square::Square;

/// 终局原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WinReason {
    /// 国王到达边缘
    KingEscaped,
    /// 国王被吃
    KingCaptured,
    /// 局面重复，判走出重复局面的一方负
    Repetition,
    /// 达到步数上限
    MoveLimit,
    /// 无子可动
    NoMoves,
}

/// 一步走法的撤销记录
type UndoUnit = Vec<(Square, Piece)>;

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardState")]
pub struct Board {
    /// 9x9 棋盘，索引为 row * 9 + col
    squares: Vec<Piece>,
    /// 当前走子方
    turn: Side,
    /// 已走且未被撤销的步数
    move_count: u32,
    /// 每方步数上限，0 表示不限
    move_limit: u32,
    /// 胜方
    winner: Option<Side>,
    /// 终局原因
    win_reason: Option<WinReason>,
    /// 当前局面是否为重复局面
    repeated: bool,
    /// 局面编码历史，包含初始局面
    history: Vec<String>,
    /// 撤销栈
    undo_stack: Vec<UndoUnit>,
}

/// 反序列化时的未校验形式
#[derive(Deserialize)]
struct BoardState {
    squares: Vec<Piece>,
    turn: Side,
    move_count: u32,
    move_limit: u32,
    winner: Option<Side>,
    win_reason: Option<WinReason>,
    repeated: bool,
    history: Vec<String>,
    undo_stack: Vec<UndoUnit>,
}

impl TryFrom<BoardState> for Board {
    type Error = TablutError;

    fn try_from(state: BoardState) -> Result<Self> {
        let invalid = |reason: String| TablutError::InvalidBoard { reason };
        if state.squares.len() != SQUARE_COUNT {
            return Err(invalid(format!(
                "expected {} squares, got {}",
                SQUARE_COUNT,
                state.squares.len()
            )));
        }
        let kings = state.squares.iter().filter(|&&p| p == Piece::King).count();
        if kings > 1 {
            return Err(invalid(format!("{} kings on the board", kings)));
        }
        if state.history.iter().any(|entry| entry.chars().count() != SQUARE_COUNT + 1) {
            return Err(invalid("malformed history entry".to_string()));
        }
        if state.undo_stack.len() as u64 > u64::from(state.move_count) {
            return Err(invalid(format!(
                "{} undo records for {} moves",
                state.undo_stack.len(),
                state.move_count
            )));
        }

        Ok(Self {
            squares: state.squares,
            turn: state.turn,
            move_count: state.move_count,
            move_limit: state.move_limit,
            winner: state.winner,
            win_reason: state.win_reason,
            repeated: state.repeated,
            history: state.history,
            undo_stack: state.undo_stack,
        })
    }
}

impl Board {
    /// 创建初始棋盘，攻方先走
    pub fn new() -> Self {
        let mut squares = vec![Piece::Empty; SQUARE_COUNT];
        for sq in INITIAL_ATTACKERS {
            squares[sq.index()] = Piece::Black;
        }
        for sq in INITIAL_DEFENDERS {
            squares[sq.index()] = Piece::White;
        }
        squares[THRONE.index()] = Piece::King;
        Self::from_position(squares, Side::Black)
    }

    /// 从给定摆放创建棋盘，历史从当前局面开始
    pub(crate) fn from_position(squares: Vec<Piece>, turn: Side) -> Self {
        debug_assert_eq!(squares.len(), SQUARE_COUNT);
        let mut board = Self {
            squares,
            turn,
            move_count: 0,
            move_limit: 0,
            winner: None,
            win_reason: None,
            repeated: false,
            history: Vec::new(),
            undo_stack: Vec::new(),
        };
        board.history.push(board.encoded());
        board
    }

    /// 重置为初始局面
    pub fn init(&mut self) {
        *self = Self::new();
    }

    /// 复制 model 的全部状态
    pub fn copy_from(&mut self, model: &Board) {
        self.clone_from(model);
    }

    /// 设置步数上限（每方 n 步）
    pub fn set_move_limit(&mut self, n: u32) -> Result<()> {
        if n > 0 && 2 * u64::from(n) <= u64::from(self.move_count) {
            return Err(TablutError::MoveLimitTooSmall {
                limit: n,
                move_count: self.move_count,
            });
        }
        self.move_limit = n;
        Ok(())
    }

    pub fn move_limit(&self) -> u32 {
        self.move_limit
    }

    /// 当前走子方
    pub fn turn(&self) -> Side {
        self.turn
    }

    /// 胜方，尚未分出胜负时为 `None`
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn win_reason(&self) -> Option<WinReason> {
        self.win_reason
    }

    /// 当前局面是否为重复局面
    pub fn repeated_position(&self) -> bool {
        self.repeated
    }

    /// 已走且未被撤销的步数
    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    /// 国王位置，被吃后为 `None`
    pub fn king_position(&self) -> Option<Square> {
        Square::all().find(|&sq| self.get(sq) == Piece::King)
    }

    /// 获取指定格子的棋子
    pub fn get(&self, sq: Square) -> Piece {
        self.squares[sq.index()]
    }

    /// 按坐标获取棋子，越界返回 `None`
    pub fn get_at(&self, col: u8, row: u8) -> Option<Piece> {
        Square::at(col, row).map(|sq| self.get(sq))
    }

    /// 摆放棋子（用于布局，不记录撤销）
    pub fn put(&mut self, piece: Piece, sq: Square) {
        self.set(sq, piece);
        let encoded = self.encoded();
        if let Some(last) = self.history.last_mut() {
            *last = encoded;
        }
    }

    fn set(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.index()] = piece;
    }

    /// 获取指定阵营的所有棋子（国王算作白方）
    pub fn pieces(&self, side: Side) -> Vec<(Square, Piece)> {
        Square::all()
            .map(|sq| (sq, self.get(sq)))
            .filter(|(_, piece)| piece.belongs_to(side))
            .collect()
    }

    /// from-to 是否为畅通的直线走法
    pub fn is_unblocked_move(&self, from: Square, to: Square) -> bool {
        MoveGenerator::is_unblocked_move(self, from, to)
    }

    /// from 是否为当前走子方的棋子
    pub fn is_legal_from(&self, from: Square) -> bool {
        MoveGenerator::is_legal_from(self, from)
    }

    /// from-to 是否合法
    pub fn is_legal(&self, from: Square, to: Square) -> bool {
        MoveGenerator::is_legal(self, from, to)
    }

    /// 走法是否合法
    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.is_legal(mv.from, mv.to)
    }

    /// side 的全部走法，忽略当前轮次
    pub fn legal_moves(&self, side: Side) -> Vec<Move> {
        MoveGenerator::legal_moves(self, side)
    }

    /// side 是否有走法
    pub fn has_move(&self, side: Side) -> bool {
        MoveGenerator::has_move(self, side)
    }

    /// 执行走法
    ///
    /// # Panics
    ///
    /// 走法不合法时 panic；调用方必须先用 [`Board::is_legal_move`] 或
    /// [`Board::legal_moves`] 过滤。需要可恢复错误时使用 [`Board::try_make_move`]。
    pub fn make_move(&mut self, mv: Move) {
        let Move { from, to } = mv;
        assert!(self.is_legal(from, to), "illegal move {} for {}", mv, self.turn);

        let mover = self.turn;
        if self.move_limit > 0
            && u64::from(self.move_count) + 1 == 2 * u64::from(self.move_limit)
        {
            self.declare_winner(mover.opponent(), WinReason::MoveLimit);
        }
        if !self.has_move(mover) {
            self.declare_winner(mover.opponent(), WinReason::NoMoves);
        }

        let piece = self.get(from);
        let mut unit: UndoUnit = vec![(from, piece), (to, Piece::Empty)];
        self.set(from, Piece::Empty);
        self.set(to, piece);
        self.turn = mover.opponent();
        self.move_count += 1;
        trace!("{} plays {}", mover, mv);

        for victim in capture::captures(self, to) {
            let captured = self.get(victim);
            debug!("{} captures {} at {}", mv, captured, victim);
            unit.push((victim, captured));
            self.set(victim, Piece::Empty);
        }
        self.undo_stack.push(unit);

        match self.king_position() {
            None => self.declare_winner(Side::Black, WinReason::KingCaptured),
            Some(king) if king.is_edge() => {
                self.declare_winner(Side::White, WinReason::KingEscaped)
            }
            Some(_) => {}
        }

        let encoded = self.encoded();
        if self.history.contains(&encoded) {
            debug!("position after {} repeats an earlier one", mv);
            self.repeated = true;
            self.declare_winner(self.turn, WinReason::Repetition);
        }
        self.history.push(encoded);
    }

    /// 校验后执行走法
    pub fn try_make_move(&mut self, mv: Move) -> Result<()> {
        if self.winner.is_some() {
            return Err(TablutError::GameOver);
        }
        if !self.is_legal_move(mv) {
            return Err(TablutError::IllegalMove { mv });
        }
        self.make_move(mv);
        Ok(())
    }

    /// 已有结果时保留先判定的结果
    fn declare_winner(&mut self, side: Side, reason: WinReason) {
        if self.winner.is_none() {
            debug!("{} wins: {:?}", side, reason);
            self.winner = Some(side);
            self.win_reason = Some(reason);
        }
    }

    /// 撤销一步；初始局面或撤销记录已清空时无效果
    ///
    /// 胜负结果不会被撤销。
    pub fn undo(&mut self) {
        if self.move_count == 0 {
            return;
        }
        let Some(unit) = self.undo_stack.pop() else {
            return;
        };
        for (sq, piece) in unit {
            self.set(sq, piece);
        }
        self.turn = self.turn.opponent();
        self.move_count -= 1;
        self.history.pop();
        self.repeated = false;
    }

    /// 清空局面历史和撤销记录，不影响当前局面和胜负
    pub fn clear_undo(&mut self) {
        self.history.clear();
        self.undo_stack.clear();
    }

    /// 局面编码：走子方字符 + 按索引顺序的每格棋子字符
    pub(crate) fn encoded(&self) -> String {
        let mut result = String::with_capacity(SQUARE_COUNT + 1);
        result.push(self.turn.to_char());
        result.extend(self.squares.iter().map(Piece::to_char));
        result
    }

    /// 局面历史长度
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// 文本棋盘；coordinates 为真时在左侧标行号、底部标列字母
    pub fn render(&self, coordinates: bool) -> String {
        let mut out = String::new();
        for row in (0..BOARD_SIZE as u8).rev() {
            if coordinates {
                out.push_str(&format!("{:2}", row + 1));
            } else {
                out.push_str("  ");
            }
            for col in 0..BOARD_SIZE as u8 {
                out.push(' ');
                out.push(self.get(Square::new_unchecked(col, row)).to_char());
            }
            out.push('\n');
        }
        if coordinates {
            out.push_str("  ");
            for c in 'a'..='i' {
                out.push(' ');
                out.push(c);
            }
            out.push('\n');
        }
        out
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(true))
    }
}
