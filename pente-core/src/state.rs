//! 游戏状态

use serde::{Deserialize, Serialize};

use crate::board::{Board, Move, Player};
use crate::constants::{
    DEFAULT_BOARD_SIZE, DEFAULT_CAPTURES_TO_WIN, DEFAULT_FRONTIER_RADIUS, DEFAULT_RUN_LEN_TO_WIN,
};
use crate::error::Result;
use crate::patterns::{RunAnalysis, RunAnalyzer};
use crate::rules::Rules;

/// 落子范围规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementRule {
    /// 整个棋盘的空位均可落子（小棋盘变体）
    FullBoard,
    /// 只允许在已有棋子 radius 格内的空位落子（生长变体，约束分支因子）
    NearStones { radius: u8 },
}

impl Default for PlacementRule {
    fn default() -> Self {
        PlacementRule::NearStones {
            radius: DEFAULT_FRONTIER_RADIUS,
        }
    }
}

/// 对局参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// 棋盘边长
    pub board_size: u8,
    /// 获胜所需吃子对数
    pub captures_to_win: u32,
    /// 获胜所需连子长度
    pub run_len_to_win: u8,
    /// 落子范围规则
    pub placement: PlacementRule,
}

impl GameConfig {
    /// 创建对局参数（使用默认落子范围规则）
    pub fn new(board_size: u8, captures_to_win: u32, run_len_to_win: u8) -> Self {
        Self {
            board_size,
            captures_to_win,
            run_len_to_win,
            placement: PlacementRule::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(
            DEFAULT_BOARD_SIZE,
            DEFAULT_CAPTURES_TO_WIN,
            DEFAULT_RUN_LEN_TO_WIN,
        )
    }
}

/// 游戏状态
///
/// 每次落子通过 [`GameState::generate_successor`] 产生一个新的独立状态，
/// 前驱状态永不被修改，因此搜索的各分支可以安全地并行持有各自的状态。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// 棋盘
    pub board: Board,
    /// 轮到行动的玩家索引（0 或 1）
    pub turn: usize,
    /// 双方已吃子对数，按玩家索引存放
    captures: [u32; 2],
    /// 对局参数
    pub config: GameConfig,
}

impl GameState {
    /// 创建新对局：空棋盘、零吃子、玩家 1 先行
    pub fn new(config: GameConfig) -> Self {
        Self {
            board: Board::empty(config.board_size),
            turn: 0,
            captures: [0, 0],
            config,
        }
    }

    /// 指定玩家的吃子对数
    pub fn num_captures(&self, player: Player) -> u32 {
        self.captures[player.index()]
    }

    /// 指定玩家的棋子数
    pub fn num_pieces(&self, player: Player) -> usize {
        self.board.num_stones(player)
    }

    pub(crate) fn add_captures(&mut self, player: Player, pairs: u32) {
        self.captures[player.index()] += pairs;
    }

    /// 双方连子分析（按需重新计算，不缓存）
    pub fn run_lengths(&self) -> RunAnalysis {
        RunAnalyzer::analyze(&self.board)
    }

    /// 指定智能体的合法落子，终局状态返回空列表
    pub fn legal_moves(&self, agent_index: usize) -> Result<Vec<Move>> {
        Rules::legal_moves(self, agent_index)
    }

    /// 应用落子产生后继状态；self 保持不变
    pub fn generate_successor(&self, agent_index: usize, mv: Move) -> Result<GameState> {
        Rules::generate_successor(self, agent_index, mv)
    }

    /// 玩家 1 是否获胜：吃子达到阈值、连子达到长度，
    /// 或轮到玩家 2 行动却无处可落
    pub fn is_win(&self) -> bool {
        if self.captures[Player::One.index()] >= self.config.captures_to_win {
            return true;
        }
        if RunAnalyzer::max_run(&self.board, Player::One) >= self.config.run_len_to_win {
            return true;
        }
        self.turn == 1 && Rules::placements(self).is_empty()
    }

    /// 玩家 1 是否落败（与 [`GameState::is_win`] 对称）
    pub fn is_lose(&self) -> bool {
        if self.captures[Player::Two.index()] >= self.config.captures_to_win {
            return true;
        }
        if RunAnalyzer::max_run(&self.board, Player::Two) >= self.config.run_len_to_win {
            return true;
        }
        self.turn == 0 && Rules::placements(self).is_empty()
    }

    /// 是否为终局状态
    pub fn is_terminal(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}
