//! 玩家与对局控制接口
//!
//! 控制器持有权威棋盘，玩家只读取棋盘并通过控制器报告走法。

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tablut_core::{Board, Move, Side};
use tracing::{info, warn};

use crate::search::{AiConfig, AiEngine};

/// 对局控制器
pub trait Controller {
    /// 当前棋盘
    fn board(&self) -> &Board;

    /// 报告一步已选定的走法
    fn report_move(&mut self, mv: Move);
}

/// 玩家
pub trait Player {
    /// 执棋方
    fn side(&self) -> Side;

    /// 是否由人操作
    fn is_manual(&self) -> bool;

    /// 选择走法并报告给控制器，返回走法文本；无法走子时返回 `None`
    fn my_move(&mut self, controller: &mut dyn Controller) -> Option<String>;
}

/// AI 玩家
pub struct AiPlayer<R = ChaCha8Rng> {
    side: Side,
    engine: AiEngine<R>,
}

impl AiPlayer<ChaCha8Rng> {
    pub fn new(side: Side, config: AiConfig) -> Self {
        Self::with_engine(side, AiEngine::new(config))
    }
}

impl<R: Rng> AiPlayer<R> {
    pub fn with_engine(side: Side, engine: AiEngine<R>) -> Self {
        Self { side, engine }
    }

    pub fn engine(&self) -> &AiEngine<R> {
        &self.engine
    }
}

impl<R: Rng> Player for AiPlayer<R> {
    fn side(&self) -> Side {
        self.side
    }

    fn is_manual(&self) -> bool {
        false
    }

    fn my_move(&mut self, controller: &mut dyn Controller) -> Option<String> {
        let board = controller.board();
        if board.turn() != self.side {
            warn!("{} AI asked to move on {}'s turn", self.side, board.turn());
            return None;
        }

        let mv = self.engine.find_move(board)?;
        info!("{} AI plays {}", self.side, mv);
        controller.report_move(mv);
        Some(mv.to_string())
    }
}
