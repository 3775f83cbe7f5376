//! Pente 核心规则引擎
//!
//! 包含:
//! - 玩家、坐标、落子、棋盘等核心数据结构
//! - 规则引擎（合法落子枚举、落子应用、吃子检测）
//! - 胜负判定
//! - 连子分析（长度计算与保护状态分类）
//! - 错误类型定义

mod board;
mod constants;
mod error;
mod patterns;
mod rules;
mod state;

pub use board::{Board, Move, Player, Position};
pub use constants::*;
pub use error::{GameError, Result};
pub use patterns::{Protection, Run, RunAnalysis, RunAnalyzer, RunBuckets};
pub use rules::Rules;
pub use state::{GameConfig, GameState, PlacementRule};
