//! 棋盘与基础类型

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// 玩家
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    /// 玩家 1（先手）
    One,
    /// 玩家 2（后手）
    Two,
}

impl Player {
    /// 获取对方玩家
    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 智能体索引（玩家 1 为 0，玩家 2 为 1）
    pub fn index(&self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }

    /// 从智能体索引解析
    pub fn from_index(index: usize) -> Option<Player> {
        match index {
            0 => Some(Player::One),
            1 => Some(Player::Two),
            _ => None,
        }
    }

    /// 获取棋子显示字符
    pub fn display_char(&self) -> char {
        match self {
            Player::One => '1',
            Player::Two => '2',
        }
    }
}

/// 棋盘坐标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// 列
    pub x: u8,
    /// 行
    pub y: u8,
}

impl Position {
    /// 创建新坐标，越界返回 None
    pub fn new(x: u8, y: u8, board_size: u8) -> Option<Self> {
        if x < board_size && y < board_size {
            Some(Self { x, y })
        } else {
            None
        }
    }

    /// 创建新坐标（不检查边界，内部使用）
    pub const fn new_unchecked(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 检查坐标是否在棋盘内
    pub fn is_valid(&self, board_size: u8) -> bool {
        self.x < board_size && self.y < board_size
    }

    /// 获取偏移后的坐标，越界返回 None
    pub fn offset(&self, dx: i8, dy: i8, board_size: u8) -> Option<Position> {
        let new_x = self.x as i16 + dx as i16;
        let new_y = self.y as i16 + dy as i16;
        if new_x >= 0 && new_x < board_size as i16 && new_y >= 0 && new_y < board_size as i16 {
            Some(Position {
                x: new_x as u8,
                y: new_y as u8,
            })
        } else {
            None
        }
    }
}

// 行优先排序（先比较 y，再比较 x），保证稀疏遍历顺序确定、搜索可复现
impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 落子动作：一个整数坐标对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// 列
    pub x: u8,
    /// 行
    pub y: u8,
}

impl Move {
    /// 创建新落子
    pub fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    /// 对应的棋盘坐标（未经边界检查）
    pub fn position(&self) -> Position {
        Position::new_unchecked(self.x, self.y)
    }
}

impl From<Position> for Move {
    fn from(pos: Position) -> Self {
        Self { x: pos.x, y: pos.y }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 棋盘：稀疏存储，只记录被触及过的格子，其余格子默认为空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    /// 棋盘边长
    size: u8,
    /// 已落子的格子
    stones: BTreeMap<Position, Player>,
    /// 被显式标记为可寻址的空格（生长变体的落子边界；
    /// 被吃掉的棋子清空后格子保留在此集合中）
    frontier: BTreeSet<Position>,
}

impl Board {
    /// 创建空棋盘
    pub fn empty(size: u8) -> Self {
        Self {
            size,
            stones: BTreeMap::new(),
            frontier: BTreeSet::new(),
        }
    }

    /// 棋盘边长
    pub fn size(&self) -> u8 {
        self.size
    }

    /// 获取指定格子的占用者，空格返回 None
    pub fn get(&self, pos: Position) -> Option<Player> {
        self.stones.get(&pos).copied()
    }

    /// 指定格子是否为空
    pub fn is_empty_cell(&self, pos: Position) -> bool {
        !self.stones.contains_key(&pos)
    }

    /// 落子（不检查规则）
    pub fn place(&mut self, pos: Position, player: Player) {
        if pos.is_valid(self.size) {
            self.stones.insert(pos, player);
            self.frontier.remove(&pos);
        }
    }

    /// 取走棋子；格子保留为可寻址空位
    pub fn remove(&mut self, pos: Position) {
        if self.stones.remove(&pos).is_some() {
            self.frontier.insert(pos);
        }
    }

    /// 遍历所有棋子（行优先顺序）
    pub fn stones(&self) -> impl Iterator<Item = (Position, Player)> + '_ {
        self.stones.iter().map(|(pos, player)| (*pos, *player))
    }

    /// 指定玩家的棋子数
    pub fn num_stones(&self, player: Player) -> usize {
        self.stones.values().filter(|&&p| p == player).count()
    }

    /// 棋盘上的棋子总数
    pub fn total_stones(&self) -> usize {
        self.stones.len()
    }

    /// 将 center 周围 radius 格内（切比雪夫距离）的空格标记为可寻址
    pub fn mark_frontier(&mut self, center: Position, radius: u8) {
        let r = radius as i8;
        for dy in -r..=r {
            for dx in -r..=r {
                if let Some(pos) = center.offset(dx, dy, self.size) {
                    if self.is_empty_cell(pos) {
                        self.frontier.insert(pos);
                    }
                }
            }
        }
    }

    /// 可寻址的空格（行优先顺序）
    pub fn frontier_empty_cells(&self) -> Vec<Position> {
        self.frontier
            .iter()
            .copied()
            .filter(|pos| self.is_empty_cell(*pos))
            .collect()
    }

    /// 整个棋盘上的所有空格（行优先顺序）
    pub fn all_empty_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for y in 0..self.size {
            for x in 0..self.size {
                let pos = Position::new_unchecked(x, y);
                if self.is_empty_cell(pos) {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}
