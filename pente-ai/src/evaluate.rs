//! 局面评估函数

use serde::{Deserialize, Serialize};

use pente_core::{GameState, Player, Protection};

/// 特征权重配置（玩家 1 视角）
///
/// 玩家 2 的同构特征一律取玩家 1 权重的相反数，因此评估结果是
/// 零和的玩家 1 相对效用。权重作为显式配置传入评估器而非全局
/// 状态，便于用替换权重做确定性测试。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureWeights {
    /// 终局胜利奖励，压倒其他一切特征
    pub win_reward: f64,
    /// 终局失败惩罚
    pub loss_penalty: f64,
    /// 每颗棋子的权重
    pub piece: f64,
    /// 每对吃子的权重
    pub capture: f64,
    /// 两端被堵的二连
    pub doubles_protected: f64,
    /// 两端被堵的三连
    pub triples_protected: f64,
    /// 两端被堵的四连
    pub quadruples_protected: f64,
    /// 单端被堵的二连
    pub doubles_half_protected: f64,
    /// 单端被堵的三连
    pub triples_half_protected: f64,
    /// 单端被堵的四连
    pub quadruples_half_protected: f64,
    /// 两端开放的二连
    pub doubles_unprotected: f64,
    /// 两端开放的三连
    pub triples_unprotected: f64,
    /// 两端开放的四连
    pub quadruples_unprotected: f64,
}

impl Default for FeatureWeights {
    fn default() -> Self {
        // 权重随连子长度和暴露程度（开放 > 半开放 > 被堵）单调增大，
        // 反映差一手成型的连子的战术紧迫性
        Self {
            win_reward: 1000.0,
            loss_penalty: -1000.0,
            piece: 1.0,
            capture: 30.0,
            doubles_protected: 2.0,
            triples_protected: 3.0,
            quadruples_protected: 4.0,
            doubles_half_protected: 3.0,
            triples_half_protected: 4.0,
            quadruples_half_protected: 7.0,
            doubles_unprotected: 4.0,
            triples_unprotected: 20.0,
            quadruples_unprotected: 100.0,
        }
    }
}

impl FeatureWeights {
    /// 指定长度与保护状态的连子权重（长度 2..=4 以外为 0）
    fn run_weight(&self, length: u8, protection: Protection) -> f64 {
        match (length, protection) {
            (2, Protection::Protected) => self.doubles_protected,
            (3, Protection::Protected) => self.triples_protected,
            (4, Protection::Protected) => self.quadruples_protected,
            (2, Protection::HalfProtected) => self.doubles_half_protected,
            (3, Protection::HalfProtected) => self.triples_half_protected,
            (4, Protection::HalfProtected) => self.quadruples_half_protected,
            (2, Protection::Unprotected) => self.doubles_unprotected,
            (3, Protection::Unprotected) => self.triples_unprotected,
            (4, Protection::Unprotected) => self.quadruples_unprotected,
            _ => 0.0,
        }
    }
}

const RUN_LENGTHS: [u8; 3] = [2, 3, 4];
const PROTECTIONS: [Protection; 3] = [
    Protection::Protected,
    Protection::HalfProtected,
    Protection::Unprotected,
];

/// 评估器：将局面特征向量与固定权重做点积
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    weights: FeatureWeights,
}

impl Evaluator {
    /// 用指定权重创建评估器
    pub fn new(weights: FeatureWeights) -> Self {
        Self { weights }
    }

    /// 当前权重
    pub fn weights(&self) -> &FeatureWeights {
        &self.weights
    }

    /// 评估局面（玩家 1 视角，正值对玩家 1 有利）
    ///
    /// 终局固定奖励优先于一切特征加权；否则对双方的棋子数、
    /// 吃子数与按保护状态分桶的连子数求加权和。
    pub fn evaluate(&self, state: &GameState) -> f64 {
        if state.is_win() {
            return self.weights.win_reward;
        }
        if state.is_lose() {
            return self.weights.loss_penalty;
        }

        let analysis = state.run_lengths();
        let mut score = 0.0;

        for player in [Player::One, Player::Two] {
            let sign = match player {
                Player::One => 1.0,
                Player::Two => -1.0,
            };

            score += sign * self.weights.piece * state.num_pieces(player) as f64;
            score += sign * self.weights.capture * state.num_captures(player) as f64;

            let buckets = analysis.player(player);
            for length in RUN_LENGTHS {
                for protection in PROTECTIONS {
                    let count = buckets.count_with(length, protection) as f64;
                    score += sign * self.weights.run_weight(length, protection) * count;
                }
            }
        }

        score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pente_core::{GameConfig, GameState, PlacementRule, Position};

    fn empty_state(size: u8) -> GameState {
        GameState::new(GameConfig {
            board_size: size,
            captures_to_win: 5,
            run_len_to_win: 5,
            placement: PlacementRule::FullBoard,
        })
    }

    #[test]
    fn test_empty_board_is_balanced() {
        let evaluator = Evaluator::default();
        assert_eq!(evaluator.evaluate(&empty_state(9)), 0.0);
    }

    #[test]
    fn test_terminal_reward_dominates_features() {
        let evaluator = Evaluator::default();

        // 玩家 1 五连获胜：无论玩家 2 有多少特征，返回固定奖励
        let mut state = empty_state(9);
        for x in 0..5 {
            state.board.place(Position::new_unchecked(x, 0), Player::One);
        }
        for x in 0..4 {
            state.board.place(Position::new_unchecked(x, 8), Player::Two);
        }
        assert_eq!(evaluator.evaluate(&state), 1000.0);

        let mut state = empty_state(9);
        for y in 0..5 {
            state.board.place(Position::new_unchecked(0, y), Player::Two);
        }
        assert_eq!(evaluator.evaluate(&state), -1000.0);
    }

    #[test]
    fn test_symmetry_swap_negates_score() {
        let evaluator = Evaluator::default();

        let mut state = empty_state(9);
        state.board.place(Position::new_unchecked(2, 2), Player::One);
        state.board.place(Position::new_unchecked(3, 2), Player::One);
        state.board.place(Position::new_unchecked(6, 6), Player::Two);

        let mut swapped = empty_state(9);
        swapped.board.place(Position::new_unchecked(2, 2), Player::Two);
        swapped.board.place(Position::new_unchecked(3, 2), Player::Two);
        swapped.board.place(Position::new_unchecked(6, 6), Player::One);

        let score = evaluator.evaluate(&state);
        assert!(score > 0.0);
        assert_eq!(evaluator.evaluate(&swapped), -score);
    }

    #[test]
    fn test_captures_are_weighted() {
        let evaluator = Evaluator::default();

        let base = empty_state(9);
        let mut state = base.clone();
        state.board.place(Position::new_unchecked(1, 1), Player::One);
        state.board.place(Position::new_unchecked(2, 1), Player::Two);
        state.board.place(Position::new_unchecked(3, 1), Player::Two);
        state.turn = 0;

        // 吃掉一对：+30（吃子）+1（新棋子）+2（对方两子没了）再加连子项变化
        let before = evaluator.evaluate(&state);
        let after = evaluator.evaluate(&state.generate_successor(0, pente_core::Move::new(4, 1)).unwrap());
        assert!(after > before + 30.0);
    }

    #[test]
    fn test_exposure_ordering() {
        let evaluator = Evaluator::default();
        let w = evaluator.weights();

        // 暴露程度：开放 > 半开放 > 被堵
        assert!(w.quadruples_unprotected > w.quadruples_half_protected);
        assert!(w.quadruples_half_protected > w.quadruples_protected);
        assert!(w.triples_unprotected > w.triples_half_protected);
        assert!(w.triples_half_protected > w.triples_protected);
        assert!(w.doubles_unprotected > w.doubles_half_protected);
        assert!(w.doubles_half_protected > w.doubles_protected);

        // 长度：四连 > 三连 > 二连
        assert!(w.quadruples_unprotected > w.triples_unprotected);
        assert!(w.triples_unprotected > w.doubles_unprotected);
    }

    #[test]
    fn test_alternate_weights_change_score() {
        let mut weights = FeatureWeights::default();
        weights.piece = 10.0;
        let evaluator = Evaluator::new(weights);

        let mut state = empty_state(9);
        state.board.place(Position::new_unchecked(4, 4), Player::One);
        assert_eq!(evaluator.evaluate(&state), 10.0);
    }
}
