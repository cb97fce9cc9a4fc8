//! 搜索引擎
//!
//! 实现 Minimax + Alpha-Beta 剪枝。
//! 每个分支在棋盘副本上走子，不修改调用方持有的棋盘。
//! 分值相同时保留按枚举顺序最后扫描到的走法；
//! 边界恰好被满足时以小概率提前结束扫描，使走法带有少量随机性。

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tablut_core::{Board, Move, Side};
use tracing::debug;

use crate::evaluate::{Evaluator, INFTY};

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    /// 简单：depth=1
    Easy,
    /// 中等：depth=2
    Medium,
    /// 困难：depth=3
    Hard,
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiConfig {
    pub difficulty: Difficulty,
    pub max_depth: u8,
    /// 边界恰好满足时提前结束扫描的概率
    pub random_break_chance: f64,
    /// 随机数种子，`None` 时从系统熵初始化
    pub seed: Option<u64>,
}

impl AiConfig {
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        let max_depth = match difficulty {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        };
        Self {
            difficulty,
            max_depth,
            random_break_chance: 0.001,
            seed: None,
        }
    }

    /// 从 JSON 读取配置
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 关闭随机提前结束，走法完全确定
    pub fn deterministic(mut self) -> Self {
        self.random_break_chance = 0.0;
        self
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::from_difficulty(Difficulty::Easy)
    }
}

/// AI 引擎
pub struct AiEngine<R = ChaCha8Rng> {
    config: AiConfig,
    rng: R,
    nodes_searched: u64,
    last_found_move: Option<Move>,
}

impl AiEngine<ChaCha8Rng> {
    /// 创建新的 AI 引擎
    pub fn new(config: AiConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    /// 从难度创建
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self::new(AiConfig::from_difficulty(difficulty))
    }
}

impl<R: Rng> AiEngine<R> {
    /// 使用指定随机源创建
    pub fn with_rng(config: AiConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            nodes_searched: 0,
            last_found_move: None,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// 为当前走子方搜索走法
    ///
    /// 已分胜负或无子可动时返回 `None`。
    pub fn find_move(&mut self, board: &Board) -> Option<Move> {
        self.nodes_searched = 0;
        self.last_found_move = None;

        if board.winner().is_some() || !board.has_move(board.turn()) {
            return None;
        }

        let work = board.clone();
        let depth = self.max_depth(&work);
        let score = self.search(&work, depth, true, work.turn(), -INFTY, INFTY);

        debug!(
            "search for {}: depth={}, nodes={}, score={}, move={:?}",
            work.turn(),
            depth,
            self.nodes_searched,
            score,
            self.last_found_move.map(|mv| mv.to_string())
        );
        self.last_found_move
    }

    /// 搜索深度策略
    fn max_depth(&self, _board: &Board) -> u8 {
        self.config.max_depth.max(1)
    }

    /// Alpha-Beta 搜索，返回白方视角的分值
    ///
    /// side 为白方时取最大值，为黑方时取最小值；save_move 为真时记录最佳走法。
    fn search(
        &mut self,
        board: &Board,
        depth: u8,
        save_move: bool,
        side: Side,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 || board.winner().is_some() || !board.has_move(side) {
            return Evaluator::static_score(board);
        }

        let maximizing = side.sense() > 0;
        let mut best = if maximizing { -INFTY } else { INFTY };

        for mv in board.legal_moves(side) {
            if !board.is_legal_move(mv) {
                continue;
            }
            let mut next = board.clone();
            next.make_move(mv);
            let response = self.search(&next, depth - 1, false, side.opponent(), alpha, beta);

            if maximizing {
                if response >= best {
                    best = response;
                    if save_move {
                        self.last_found_move = Some(mv);
                    }
                    alpha = alpha.max(best);
                    if best >= beta && (best > beta || self.early_break()) {
                        break;
                    }
                }
            } else if response <= best {
                best = response;
                if save_move {
                    self.last_found_move = Some(mv);
                }
                beta = beta.min(best);
                if best <= alpha && (best < alpha || self.early_break()) {
                    break;
                }
            }
        }

        best
    }

    fn early_break(&mut self) -> bool {
        let chance = self.config.random_break_chance.clamp(0.0, 1.0);
        chance > 0.0 && self.rng.gen_bool(chance)
    }

    /// 获取搜索的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablut_core::Fen;

    fn mv(text: &str) -> Move {
        text.parse().unwrap()
    }

    fn engine(difficulty: Difficulty) -> AiEngine {
        AiEngine::new(AiConfig::from_difficulty(difficulty).deterministic())
    }

    #[test]
    fn test_search_initial_position() {
        let board = Board::new();
        let mut engine = engine(Difficulty::Easy);

        let found = engine.find_move(&board).unwrap();
        assert!(board.is_legal_move(found));
        // 根节点加 80 个子节点
        assert_eq!(engine.nodes_searched(), 81);
    }

    #[test]
    fn test_search_does_not_touch_board() {
        let board = Board::new();
        let before = board.clone();
        engine(Difficulty::Medium).find_move(&board);
        assert_eq!(board, before);
    }

    #[test]
    fn test_king_takes_the_escape() {
        let board = Fen::parse("9/9/9/9/4K4/9/9/B8/9 w").unwrap();
        let found = engine(Difficulty::Easy).find_move(&board).unwrap();
        // 四个逃脱走法分值相同，取枚举顺序中最后一个
        assert_eq!(found, mv("e5-9"));
    }

    #[test]
    fn test_black_captures_king() {
        let board = Fen::parse("9/9/9/4B4/3BKB3/B8/9/9/9 b").unwrap();
        let found = engine(Difficulty::Easy).find_move(&board).unwrap();
        assert_eq!(found, mv("a4-e"));
    }

    #[test]
    fn test_prefers_material() {
        let board = Fen::parse("9/9/9/4W4/3WKW3/4B4/W8/9/9 w").unwrap();
        let found = engine(Difficulty::Easy).find_move(&board).unwrap();
        assert_eq!(found, mv("a3-e"));
    }

    #[test]
    fn test_deeper_search_returns_legal_move() {
        let board = Fen::parse("9/9/9/4W4/3WKW3/4B4/W8/9/9 w").unwrap();
        let mut engine = engine(Difficulty::Medium);
        let found = engine.find_move(&board).unwrap();
        assert!(board.is_legal_move(found));
        assert!(engine.nodes_searched() > 1);
    }

    #[test]
    fn test_no_move_for_decided_game() {
        let mut board = Fen::parse("9/9/9/9/4K4/9/9/B8/9 w").unwrap();
        board.make_move(mv("e5-9"));
        assert_eq!(engine(Difficulty::Easy).find_move(&board), None);
    }

    #[test]
    fn test_no_move_when_stuck() {
        let board = Fen::parse("KB7/B8/9/9/9/9/9/9/9 w").unwrap();
        assert_eq!(engine(Difficulty::Easy).find_move(&board), None);
    }

    #[test]
    fn test_seeded_engines_agree() {
        let board = Board::new();
        let config = AiConfig {
            seed: Some(7),
            random_break_chance: 0.5,
            ..AiConfig::from_difficulty(Difficulty::Medium)
        };
        let a = AiEngine::new(config.clone()).find_move(&board);
        let b = AiEngine::new(config).find_move(&board);
        assert_eq!(a, b);
    }

    #[test]
    fn test_difficulty_config() {
        let easy = AiConfig::from_difficulty(Difficulty::Easy);
        assert_eq!(easy.max_depth, 1);
        assert_eq!(easy, AiConfig::default());

        let medium = AiConfig::from_difficulty(Difficulty::Medium);
        assert_eq!(medium.max_depth, 2);

        let hard = AiConfig::from_difficulty(Difficulty::Hard);
        assert_eq!(hard.max_depth, 3);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{"difficulty":"Medium","max_depth":2,"random_break_chance":0.0,"seed":42}"#;
        let config = AiConfig::from_json(json).unwrap();
        assert_eq!(config.difficulty, Difficulty::Medium);
        assert_eq!(config.seed, Some(42));
        assert!(AiConfig::from_json("{}").is_err());
    }
}
