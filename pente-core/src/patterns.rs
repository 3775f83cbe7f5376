//! 连子分析：计算每个玩家沿各轴方向的连子长度并分类保护状态

use serde::{Deserialize, Serialize};

use crate::board::{Board, Player, Position};
use crate::constants::AXIS_DIRECTIONS;

/// 连子两端的保护状态
///
/// 棋盘边界视同对方棋子：贴边的一端按"被堵住"处理。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protection {
    /// 两端都被堵住（对方棋子或棋盘边界）
    Protected,
    /// 恰有一端被堵住
    HalfProtected,
    /// 两端都是空位
    Unprotected,
}

/// 一条连子：同一玩家沿一个轴方向的极大连续序列
///
/// 连子是派生数据，每次从棋盘按需重新计算，不做缓存。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub player: Player,
    pub length: u8,
    pub protection: Protection,
}

/// 单个玩家的连子长度多重集，按保护状态分桶
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunBuckets {
    /// 全部连子长度
    pub all: Vec<u8>,
    /// 两端被堵的连子长度
    pub protected: Vec<u8>,
    /// 单端被堵的连子长度
    pub half_protected: Vec<u8>,
    /// 两端开放的连子长度
    pub unprotected: Vec<u8>,
}

impl RunBuckets {
    fn push(&mut self, run: &Run) {
        self.all.push(run.length);
        match run.protection {
            Protection::Protected => self.protected.push(run.length),
            Protection::HalfProtected => self.half_protected.push(run.length),
            Protection::Unprotected => self.unprotected.push(run.length),
        }
    }

    /// 指定长度的连子总数
    pub fn count(&self, length: u8) -> usize {
        self.all.iter().filter(|&&len| len == length).count()
    }

    /// 指定长度与保护状态的连子数
    pub fn count_with(&self, length: u8, protection: Protection) -> usize {
        let bucket = match protection {
            Protection::Protected => &self.protected,
            Protection::HalfProtected => &self.half_protected,
            Protection::Unprotected => &self.unprotected,
        };
        bucket.iter().filter(|&&len| len == length).count()
    }

    /// 最长连子长度（无连子返回 0）
    pub fn max_len(&self) -> u8 {
        self.all.iter().copied().max().unwrap_or(0)
    }

    /// 校验分类桶对全体连子构成精确划分；分类器出 bug 时在调试构建下立刻失败
    fn assert_partitioned(&self) {
        for &len in &self.all {
            debug_assert_eq!(
                self.count(len),
                self.count_with(len, Protection::Protected)
                    + self.count_with(len, Protection::HalfProtected)
                    + self.count_with(len, Protection::Unprotected),
                "run buckets out of sync for length {len}"
            );
        }
    }
}

/// 双方的连子分析结果
#[derive(Debug, Clone, Default)]
pub struct RunAnalysis {
    buckets: [RunBuckets; 2],
}

impl RunAnalysis {
    /// 指定玩家的连子长度桶
    pub fn player(&self, player: Player) -> &RunBuckets {
        &self.buckets[player.index()]
    }
}

/// 连子分析器
pub struct RunAnalyzer;

impl RunAnalyzer {
    /// 扫描整个棋盘，收集双方的所有极大连子并按保护状态分桶
    pub fn analyze(board: &Board) -> RunAnalysis {
        let mut analysis = RunAnalysis::default();
        for run in Self::runs(board) {
            analysis.buckets[run.player.index()].push(&run);
        }
        for buckets in &analysis.buckets {
            buckets.assert_partitioned();
        }
        analysis
    }

    /// 枚举所有极大连子
    ///
    /// 每条连子只在其起点（沿该轴反方向没有同方棋子的棋子）统计一次。
    pub fn runs(board: &Board) -> Vec<Run> {
        let size = board.size();
        let mut runs = Vec::new();

        for (start, player) in board.stones() {
            for (dx, dy) in AXIS_DIRECTIONS {
                if !Self::is_run_start(board, start, player, dx, dy) {
                    continue;
                }

                let mut length = 1u8;
                let mut end = start;
                while let Some(next) = end.offset(dx, dy, size) {
                    if board.get(next) != Some(player) {
                        break;
                    }
                    length += 1;
                    end = next;
                }

                let blocked_before = Self::end_blocked(board, start, -dx, -dy, player);
                let blocked_after = Self::end_blocked(board, end, dx, dy, player);
                let protection = match (blocked_before, blocked_after) {
                    (true, true) => Protection::Protected,
                    (false, false) => Protection::Unprotected,
                    _ => Protection::HalfProtected,
                };

                runs.push(Run {
                    player,
                    length,
                    protection,
                });
            }
        }

        runs
    }

    /// 指定玩家的最长连子长度（胜负判定用的快速路径，不做保护分类）
    pub fn max_run(board: &Board, player: Player) -> u8 {
        let size = board.size();
        let mut best = 0u8;

        for (start, p) in board.stones() {
            if p != player {
                continue;
            }
            for (dx, dy) in AXIS_DIRECTIONS {
                if !Self::is_run_start(board, start, player, dx, dy) {
                    continue;
                }
                let mut length = 1u8;
                let mut end = start;
                while let Some(next) = end.offset(dx, dy, size) {
                    if board.get(next) != Some(player) {
                        break;
                    }
                    length += 1;
                    end = next;
                }
                best = best.max(length);
            }
        }

        best
    }

    fn is_run_start(board: &Board, pos: Position, player: Player, dx: i8, dy: i8) -> bool {
        match pos.offset(-dx, -dy, board.size()) {
            Some(prev) => board.get(prev) != Some(player),
            None => true,
        }
    }

    /// 连子端点外一格是否被堵：对方棋子或棋盘边界
    fn end_blocked(board: &Board, end: Position, dx: i8, dy: i8, player: Player) -> bool {
        match end.offset(dx, dy, board.size()) {
            None => true,
            Some(pos) => board.get(pos) == Some(player.opponent()),
        }
    }
}
