//! 核心常量定义

/// 默认棋盘大小（标准 Pente 为 19 路）
pub const DEFAULT_BOARD_SIZE: u8 = 19;

/// 默认获胜所需吃子对数
pub const DEFAULT_CAPTURES_TO_WIN: u32 = 5;

/// 默认获胜所需连子长度
pub const DEFAULT_RUN_LEN_TO_WIN: u8 = 5;

/// 生长变体的可落子半径：合法落点为已有棋子周围该距离内的空位
pub const DEFAULT_FRONTIER_RADIUS: u8 = 2;

/// 吃子检测使用的 8 个罗盘方向
pub const COMPASS_DIRECTIONS: [(i8, i8); 8] = [
    (1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
];

/// 连子分析使用的 4 个无向轴方向
pub const AXIS_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (1, 1), (0, 1), (-1, 1)];
