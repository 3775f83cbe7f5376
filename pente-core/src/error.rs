//! 错误类型定义

use thiserror::Error;

/// 游戏规则错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// 落点越界
    #[error("Invalid move: position ({x}, {y}) is out of bounds")]
    OutOfBounds { x: i16, y: i16 },

    /// 落点已有棋子
    #[error("Invalid move: position ({x}, {y}) is already occupied")]
    Occupied { x: u8, y: u8 },

    /// 对局已结束，无法产生后继状态
    #[error("Game is already over")]
    GameOver,

    /// 未知的智能体索引（配置错误，不可恢复）
    #[error("Unknown agent index: {index}")]
    UnknownAgent { index: usize },
}

impl GameError {
    /// 是否属于非法落子（在根节点可恢复：驱动层重新提示输入即可，
    /// 因为 `generate_successor` 从不修改其输入状态）
    pub fn is_invalid_move(&self) -> bool {
        matches!(
            self,
            Self::OutOfBounds { .. } | Self::Occupied { .. } | Self::GameOver
        )
    }
}

/// 核心操作结果类型
pub type Result<T> = std::result::Result<T, GameError>;
