//! Pente AI 引擎
//!
//! 包含:
//! - 多特征局面评估函数（显式权重配置）
//! - Minimax / Alpha-Beta / Expectimax 深度受限搜索智能体
//! - 随机智能体与 Agent 契约

mod evaluate;
mod search;

pub use evaluate::{Evaluator, FeatureWeights};
pub use search::{
    Agent, AlphaBetaAgent, ExpectimaxAgent, MinimaxAgent, RandomAgent, Role, SearchConfig,
};
