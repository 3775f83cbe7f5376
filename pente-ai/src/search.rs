//! 搜索智能体
//!
//! 实现 Minimax、Alpha-Beta 剪枝与 Expectimax 三种深度受限对抗搜索。
//!
//! 搜索为单线程同步深度优先递归；每个分支持有自己克隆出的
//! [`GameState`]，分支之间不共享可变状态。内部搜索值统一为
//! "搜索方自身效用"：玩家 1 相对评估值乘以搜索方符号（执玩家 1 为
//! +1，执玩家 2 为 -1），因此搜索方所在槽位总是 Maximizer。
//!
//! 深度约定：每满一轮（所有槽位各行动一次、递归绕回槽位 0 时）
//! 递减一次，三种智能体保持一致，保证 Alpha-Beta 与 Minimax 的
//! 根节点值可直接比较。

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use pente_core::{GameError, GameState, Move, Player, Result, Rules};

use crate::evaluate::Evaluator;

/// 对局中的智能体槽位数（双人游戏）
const NUM_AGENTS: usize = 2;

/// 搜索节点上的智能体角色，按槽位解析一次，不在递归中从索引重推导
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// 最大化搜索方自身效用
    Maximizer,
    /// 对抗性最小化
    Minimizer,
    /// 均匀随机对手：取所有后继的期望值
    AveragingMinimizer,
}

/// 搜索配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SearchConfig {
    /// 搜索深度（每满一轮递减一次；0 按 1 处理）
    pub depth: u8,
    /// 根节点同分随机决胜所用的 RNG 种子；None 时取熵源
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// 指定深度的配置
    pub fn with_depth(depth: u8) -> Self {
        Self { depth, seed: None }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 2,
            seed: None,
        }
    }
}

/// 智能体契约：给定当前状态返回一步落子
///
/// 仅当不存在合法落子时返回 `Ok(None)`。搜索内部构造出非法后继
/// 属于程序错误，以 `Err` 形式向上传播并终止搜索。
pub trait Agent {
    fn choose_move(&mut self, state: &GameState) -> Result<Option<Move>>;

    /// 智能体所执玩家的索引
    fn index(&self) -> usize;
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// 搜索方自身效用的符号
fn utility_sign(player: Player) -> f64 {
    match player {
        Player::One => 1.0,
        Player::Two => -1.0,
    }
}

/// 为搜索方与对手分配槽位角色
fn assign_roles(player: Player, opponent_role: Role) -> [Role; NUM_AGENTS] {
    let mut roles = [Role::Maximizer; NUM_AGENTS];
    roles[player.opponent().index()] = opponent_role;
    roles
}

/// 下一个递归槽位；绕回槽位 0 时深度递减
fn next_slot(agent_idx: usize, depth: u8) -> (usize, u8) {
    if agent_idx + 1 == NUM_AGENTS {
        (0, depth - 1)
    } else {
        (agent_idx + 1, depth)
    }
}

/// 在同分的最优落子中均匀随机决胜，避免固定首选带来的可利用性
fn pick_best(scored: &[(Move, f64)], rng: &mut ChaCha8Rng) -> Option<Move> {
    let best = scored
        .iter()
        .map(|&(_, score)| score)
        .fold(f64::NEG_INFINITY, f64::max);
    let candidates: Vec<Move> = scored
        .iter()
        .filter(|&&(_, score)| score == best)
        .map(|&(mv, _)| mv)
        .collect();
    candidates.choose(rng).copied()
}

/// 角色驱动的深度受限递归（Minimax 与 Expectimax 共用树形）
struct TreeSearch<'a> {
    roles: [Role; NUM_AGENTS],
    evaluator: &'a Evaluator,
    sign: f64,
    nodes_searched: u64,
}

impl TreeSearch<'_> {
    fn utility(&self, state: &GameState) -> f64 {
        self.sign * self.evaluator.evaluate(state)
    }

    fn value(&mut self, state: &GameState, agent_idx: usize, depth: u8) -> Result<f64> {
        self.nodes_searched += 1;

        let role = *self
            .roles
            .get(agent_idx)
            .ok_or(GameError::UnknownAgent { index: agent_idx })?;
        let moves = Rules::legal_moves(state, agent_idx)?;

        if state.is_win() || state.is_lose() || moves.is_empty() || depth == 0 {
            return Ok(self.utility(state));
        }

        let (next_idx, next_depth) = next_slot(agent_idx, depth);
        match role {
            Role::Maximizer => {
                let mut best = f64::NEG_INFINITY;
                for mv in moves {
                    let successor = state.generate_successor(agent_idx, mv)?;
                    best = best.max(self.value(&successor, next_idx, next_depth)?);
                }
                Ok(best)
            }
            Role::Minimizer => {
                let mut worst = f64::INFINITY;
                for mv in moves {
                    let successor = state.generate_successor(agent_idx, mv)?;
                    worst = worst.min(self.value(&successor, next_idx, next_depth)?);
                }
                Ok(worst)
            }
            Role::AveragingMinimizer => {
                let count = moves.len() as f64;
                let mut total = 0.0;
                for mv in moves {
                    let successor = state.generate_successor(agent_idx, mv)?;
                    total += self.value(&successor, next_idx, next_depth)?;
                }
                Ok(total / count)
            }
        }
    }
}

/// 带 (alpha, beta) 窗口的深度受限递归
///
/// Maximizer 在 `beta <= value` 时剪掉剩余兄弟节点，Minimizer 在
/// `value <= alpha` 时剪掉。剪枝只减少访问节点数，不改变返回值。
struct AlphaBetaSearch<'a> {
    roles: [Role; NUM_AGENTS],
    evaluator: &'a Evaluator,
    sign: f64,
    nodes_searched: u64,
}

impl AlphaBetaSearch<'_> {
    fn utility(&self, state: &GameState) -> f64 {
        self.sign * self.evaluator.evaluate(state)
    }

    fn value(
        &mut self,
        state: &GameState,
        agent_idx: usize,
        depth: u8,
        mut alpha: f64,
        mut beta: f64,
    ) -> Result<f64> {
        self.nodes_searched += 1;

        let role = *self
            .roles
            .get(agent_idx)
            .ok_or(GameError::UnknownAgent { index: agent_idx })?;
        let moves = Rules::legal_moves(state, agent_idx)?;

        if state.is_win() || state.is_lose() || moves.is_empty() || depth == 0 {
            return Ok(self.utility(state));
        }

        let (next_idx, next_depth) = next_slot(agent_idx, depth);
        match role {
            Role::Maximizer => {
                let mut value = f64::NEG_INFINITY;
                for mv in moves {
                    let successor = state.generate_successor(agent_idx, mv)?;
                    value = value.max(self.value(&successor, next_idx, next_depth, alpha, beta)?);
                    if beta <= value {
                        break;
                    }
                    alpha = alpha.max(value);
                }
                Ok(value)
            }
            Role::Minimizer => {
                let mut value = f64::INFINITY;
                for mv in moves {
                    let successor = state.generate_successor(agent_idx, mv)?;
                    value = value.min(self.value(&successor, next_idx, next_depth, alpha, beta)?);
                    if value <= alpha {
                        break;
                    }
                    beta = beta.min(value);
                }
                Ok(value)
            }
            // Alpha-Beta 的槽位只允许 max/min 划分
            Role::AveragingMinimizer => Err(GameError::UnknownAgent { index: agent_idx }),
        }
    }
}

/// Minimax 智能体
pub struct MinimaxAgent {
    player: Player,
    config: SearchConfig,
    evaluator: Evaluator,
    rng: ChaCha8Rng,
    nodes_searched: u64,
}

impl MinimaxAgent {
    /// 创建 Minimax 智能体
    pub fn new(player: Player, config: SearchConfig, evaluator: Evaluator) -> Self {
        let rng = make_rng(config.seed);
        Self {
            player,
            config,
            evaluator,
            rng,
            nodes_searched: 0,
        }
    }

    /// 对根节点的每个合法落子计算搜索值（搜索方自身效用）
    pub fn score_moves(&mut self, state: &GameState) -> Result<Vec<(Move, f64)>> {
        let moves = Rules::legal_moves(state, self.index())?;
        let mut search = TreeSearch {
            roles: assign_roles(self.player, Role::Minimizer),
            evaluator: &self.evaluator,
            sign: utility_sign(self.player),
            nodes_searched: 0,
        };

        let depth = self.config.depth.max(1);
        let (next_idx, next_depth) = next_slot(self.index(), depth);
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let successor = state.generate_successor(self.index(), mv)?;
            scored.push((mv, search.value(&successor, next_idx, next_depth)?));
        }

        self.nodes_searched = search.nodes_searched;
        Ok(scored)
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Agent for MinimaxAgent {
    fn choose_move(&mut self, state: &GameState) -> Result<Option<Move>> {
        let scored = self.score_moves(state)?;
        if scored.is_empty() {
            return Ok(None);
        }
        let choice = pick_best(&scored, &mut self.rng);
        debug!(
            nodes = self.nodes_searched,
            ?choice,
            "minimax search complete"
        );
        Ok(choice)
    }

    fn index(&self) -> usize {
        self.player.index()
    }
}

/// Alpha-Beta 剪枝智能体
///
/// 树形与 Minimax 完全一致；根节点的每个子节点使用全窗口搜索，
/// 因此根节点值与 Minimax 相等，同分落子的随机决胜也不受剪枝影响。
pub struct AlphaBetaAgent {
    player: Player,
    config: SearchConfig,
    evaluator: Evaluator,
    rng: ChaCha8Rng,
    nodes_searched: u64,
}

impl AlphaBetaAgent {
    /// 创建 Alpha-Beta 智能体
    pub fn new(player: Player, config: SearchConfig, evaluator: Evaluator) -> Self {
        let rng = make_rng(config.seed);
        Self {
            player,
            config,
            evaluator,
            rng,
            nodes_searched: 0,
        }
    }

    /// 对根节点的每个合法落子计算搜索值（搜索方自身效用）
    pub fn score_moves(&mut self, state: &GameState) -> Result<Vec<(Move, f64)>> {
        let moves = Rules::legal_moves(state, self.index())?;
        let mut search = AlphaBetaSearch {
            roles: assign_roles(self.player, Role::Minimizer),
            evaluator: &self.evaluator,
            sign: utility_sign(self.player),
            nodes_searched: 0,
        };

        let depth = self.config.depth.max(1);
        let (next_idx, next_depth) = next_slot(self.index(), depth);
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let successor = state.generate_successor(self.index(), mv)?;
            let value = search.value(
                &successor,
                next_idx,
                next_depth,
                f64::NEG_INFINITY,
                f64::INFINITY,
            )?;
            scored.push((mv, value));
        }

        self.nodes_searched = search.nodes_searched;
        Ok(scored)
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Agent for AlphaBetaAgent {
    fn choose_move(&mut self, state: &GameState) -> Result<Option<Move>> {
        let scored = self.score_moves(state)?;
        if scored.is_empty() {
            return Ok(None);
        }
        let choice = pick_best(&scored, &mut self.rng);
        debug!(
            nodes = self.nodes_searched,
            ?choice,
            "alpha-beta search complete"
        );
        Ok(choice)
    }

    fn index(&self) -> usize {
        self.player.index()
    }
}

/// Expectimax 智能体：对手建模为在合法落子中均匀随机选择
pub struct ExpectimaxAgent {
    player: Player,
    config: SearchConfig,
    evaluator: Evaluator,
    rng: ChaCha8Rng,
    nodes_searched: u64,
}

impl ExpectimaxAgent {
    /// 创建 Expectimax 智能体
    pub fn new(player: Player, config: SearchConfig, evaluator: Evaluator) -> Self {
        let rng = make_rng(config.seed);
        Self {
            player,
            config,
            evaluator,
            rng,
            nodes_searched: 0,
        }
    }

    /// 对根节点的每个合法落子计算搜索值（搜索方自身效用）
    pub fn score_moves(&mut self, state: &GameState) -> Result<Vec<(Move, f64)>> {
        let moves = Rules::legal_moves(state, self.index())?;
        let mut search = TreeSearch {
            roles: assign_roles(self.player, Role::AveragingMinimizer),
            evaluator: &self.evaluator,
            sign: utility_sign(self.player),
            nodes_searched: 0,
        };

        let depth = self.config.depth.max(1);
        let (next_idx, next_depth) = next_slot(self.index(), depth);
        let mut scored = Vec::with_capacity(moves.len());
        for mv in moves {
            let successor = state.generate_successor(self.index(), mv)?;
            scored.push((mv, search.value(&successor, next_idx, next_depth)?));
        }

        self.nodes_searched = search.nodes_searched;
        Ok(scored)
    }

    /// 上一次搜索访问的节点数
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }
}

impl Agent for ExpectimaxAgent {
    fn choose_move(&mut self, state: &GameState) -> Result<Option<Move>> {
        let scored = self.score_moves(state)?;
        if scored.is_empty() {
            return Ok(None);
        }
        let choice = pick_best(&scored, &mut self.rng);
        debug!(
            nodes = self.nodes_searched,
            ?choice,
            "expectimax search complete"
        );
        Ok(choice)
    }

    fn index(&self) -> usize {
        self.player.index()
    }
}

/// 随机智能体：在合法落子中均匀随机选择
pub struct RandomAgent {
    player: Player,
    rng: ChaCha8Rng,
}

impl RandomAgent {
    /// 创建随机智能体
    pub fn new(player: Player, seed: Option<u64>) -> Self {
        Self {
            player,
            rng: make_rng(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn choose_move(&mut self, state: &GameState) -> Result<Option<Move>> {
        let moves = Rules::legal_moves(state, self.index())?;
        Ok(moves.choose(&mut self.rng).copied())
    }

    fn index(&self) -> usize {
        self.player.index()
    }
}
