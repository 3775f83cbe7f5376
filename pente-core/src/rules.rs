//! 规则引擎：合法落子枚举、落子应用与吃子检测

use tracing::trace;

use crate::board::{Board, Move, Player, Position};
use crate::constants::COMPASS_DIRECTIONS;
use crate::error::{GameError, Result};
use crate::state::{GameState, PlacementRule};

/// 规则引擎
pub struct Rules;

impl Rules {
    /// 当前可落子的所有空位（行优先顺序，不考虑终局判定）
    ///
    /// 生长变体下空棋盘的第一手可落在任意位置。
    pub fn placements(state: &GameState) -> Vec<Move> {
        let board = &state.board;
        let cells = match state.config.placement {
            PlacementRule::FullBoard => board.all_empty_cells(),
            PlacementRule::NearStones { .. } => {
                if board.total_stones() == 0 {
                    board.all_empty_cells()
                } else {
                    board.frontier_empty_cells()
                }
            }
        };
        cells.into_iter().map(Move::from).collect()
    }

    /// 指定智能体的合法落子；终局状态返回空列表
    pub fn legal_moves(state: &GameState, agent_index: usize) -> Result<Vec<Move>> {
        Player::from_index(agent_index)
            .ok_or(GameError::UnknownAgent { index: agent_index })?;
        if state.is_terminal() {
            return Ok(Vec::new());
        }
        Ok(Self::placements(state))
    }

    /// 应用落子，返回新的后继状态；前驱状态保持不变
    ///
    /// 依次执行：放置棋子、8 方向吃子检测、清空被吃棋子并累加吃子对数、
    /// （生长变体）扩展可寻址边界、切换行动方。
    pub fn generate_successor(
        state: &GameState,
        agent_index: usize,
        mv: Move,
    ) -> Result<GameState> {
        let player = Player::from_index(agent_index)
            .ok_or(GameError::UnknownAgent { index: agent_index })?;
        if state.is_terminal() {
            return Err(GameError::GameOver);
        }
        let size = state.board.size();
        let pos = Position::new(mv.x, mv.y, size).ok_or(GameError::OutOfBounds {
            x: mv.x as i16,
            y: mv.y as i16,
        })?;
        if !state.board.is_empty_cell(pos) {
            return Err(GameError::Occupied { x: mv.x, y: mv.y });
        }

        let mut next = state.clone();
        next.board.place(pos, player);

        let pairs = Self::execute_captures(&mut next.board, pos, player);
        if pairs > 0 {
            next.add_captures(player, pairs);
            trace!(?player, x = mv.x, y = mv.y, pairs, "capture");
        }

        if let PlacementRule::NearStones { radius } = next.config.placement {
            next.board.mark_frontier(pos, radius);
        }
        next.turn = 1 - agent_index;
        Ok(next)
    }

    /// 吃子检测：8 个罗盘方向独立检查 `[对方, 对方, 己方]` 模式
    ///
    /// 每个命中的方向清空一对对方棋子并计 1 对；任一探测点越界则
    /// 直接跳过该方向。返回吃掉的对数。
    fn execute_captures(board: &mut Board, pos: Position, player: Player) -> u32 {
        let opponent = player.opponent();
        let size = board.size();
        let mut pairs = 0;

        for (dx, dy) in COMPASS_DIRECTIONS {
            let (Some(p1), Some(p2), Some(p3)) = (
                pos.offset(dx, dy, size),
                pos.offset(dx * 2, dy * 2, size),
                pos.offset(dx * 3, dy * 3, size),
            ) else {
                continue;
            };

            if board.get(p1) == Some(opponent)
                && board.get(p2) == Some(opponent)
                && board.get(p3) == Some(player)
            {
                board.remove(p1);
                board.remove(p2);
                pairs += 1;
            }
        }

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::GameConfig;

    fn full_board_state(size: u8) -> GameState {
        GameState::new(GameConfig {
            board_size: size,
            captures_to_win: 5,
            run_len_to_win: 5,
            placement: PlacementRule::FullBoard,
        })
    }

    fn growth_state(size: u8) -> GameState {
        GameState::new(GameConfig {
            board_size: size,
            captures_to_win: 5,
            run_len_to_win: 5,
            placement: PlacementRule::NearStones { radius: 2 },
        })
    }

    #[test]
    fn test_legal_moves_full_board() {
        let state = full_board_state(5);
        let moves = Rules::legal_moves(&state, 0).unwrap();
        assert_eq!(moves.len(), 25);
        // 行优先顺序
        assert_eq!(moves[0], Move::new(0, 0));
        assert_eq!(moves[1], Move::new(1, 0));
        assert_eq!(moves[5], Move::new(0, 1));
    }

    #[test]
    fn test_legal_moves_growth_variant() {
        let state = growth_state(19);
        // 空棋盘：第一手可落任意位置
        assert_eq!(Rules::legal_moves(&state, 0).unwrap().len(), 361);

        let state = state.generate_successor(0, Move::new(9, 9)).unwrap();
        // 之后只能落在已有棋子 2 格内
        let moves = Rules::legal_moves(&state, 1).unwrap();
        assert_eq!(moves.len(), 24);
        assert!(moves.contains(&Move::new(7, 7)));
        assert!(!moves.contains(&Move::new(0, 0)));
    }

    #[test]
    fn test_unknown_agent() {
        let state = full_board_state(5);
        assert_eq!(
            Rules::legal_moves(&state, 2),
            Err(GameError::UnknownAgent { index: 2 })
        );
        assert_eq!(
            Rules::generate_successor(&state, 7, Move::new(0, 0)),
            Err(GameError::UnknownAgent { index: 7 })
        );
    }

    #[test]
    fn test_successor_rejects_occupied_and_out_of_bounds() {
        let state = full_board_state(5);
        let state = state.generate_successor(0, Move::new(2, 2)).unwrap();

        let err = state.generate_successor(1, Move::new(2, 2)).unwrap_err();
        assert_eq!(err, GameError::Occupied { x: 2, y: 2 });
        assert!(err.is_invalid_move());

        let err = state.generate_successor(1, Move::new(5, 0)).unwrap_err();
        assert_eq!(err, GameError::OutOfBounds { x: 5, y: 0 });
    }

    #[test]
    fn test_successor_rejects_terminal_state() {
        let mut state = full_board_state(9);
        for x in 0..5 {
            state
                .board
                .place(Position::new_unchecked(x, 0), Player::One);
        }
        assert!(state.is_win());
        assert_eq!(
            state.generate_successor(1, Move::new(0, 5)),
            Err(GameError::GameOver)
        );
    }

    #[test]
    fn test_successor_leaves_predecessor_unchanged() {
        let state = full_board_state(5);
        let next = state.generate_successor(0, Move::new(1, 1)).unwrap();

        assert_eq!(state.board.total_stones(), 0);
        assert_eq!(state.turn, 0);
        assert_eq!(next.board.get(Position::new_unchecked(1, 1)), Some(Player::One));
        assert_eq!(next.turn, 1);
    }

    #[test]
    fn test_simple_capture() {
        // 场景：(1,1)=P1, (2,1)=P2, (3,1)=P2，P1 落 (4,1)
        let mut state = full_board_state(9);
        state.board.place(Position::new_unchecked(1, 1), Player::One);
        state.board.place(Position::new_unchecked(2, 1), Player::Two);
        state.board.place(Position::new_unchecked(3, 1), Player::Two);
        state.turn = 0;

        let next = state.generate_successor(0, Move::new(4, 1)).unwrap();

        assert!(next.board.is_empty_cell(Position::new_unchecked(2, 1)));
        assert!(next.board.is_empty_cell(Position::new_unchecked(3, 1)));
        assert_eq!(next.num_captures(Player::One), 1);
        assert_eq!(next.num_captures(Player::Two), 0);
        assert_eq!(next.num_pieces(Player::Two), 0);
    }

    #[test]
    fn test_capture_by_player_two() {
        let mut state = full_board_state(9);
        state.board.place(Position::new_unchecked(0, 0), Player::Two);
        state.board.place(Position::new_unchecked(1, 1), Player::One);
        state.board.place(Position::new_unchecked(2, 2), Player::One);
        state.turn = 1;

        let next = state.generate_successor(1, Move::new(3, 3)).unwrap();
        assert_eq!(next.num_captures(Player::Two), 1);
        assert!(next.board.is_empty_cell(Position::new_unchecked(1, 1)));
        assert!(next.board.is_empty_cell(Position::new_unchecked(2, 2)));
    }

    #[test]
    fn test_multi_direction_captures_accumulate() {
        // 落点两侧各有一对可吃的对方棋子
        let mut state = full_board_state(9);
        state.board.place(Position::new_unchecked(0, 4), Player::One);
        state.board.place(Position::new_unchecked(1, 4), Player::Two);
        state.board.place(Position::new_unchecked(2, 4), Player::Two);
        state.board.place(Position::new_unchecked(4, 4), Player::Two);
        state.board.place(Position::new_unchecked(5, 4), Player::Two);
        state.board.place(Position::new_unchecked(6, 4), Player::One);
        state.turn = 0;

        let next = state.generate_successor(0, Move::new(3, 4)).unwrap();
        assert_eq!(next.num_captures(Player::One), 2);
        assert_eq!(next.num_pieces(Player::Two), 0);
    }

    #[test]
    fn test_no_capture_of_three() {
        // 三连不可吃：模式必须恰好为 [对方, 对方, 己方]
        let mut state = full_board_state(9);
        state.board.place(Position::new_unchecked(1, 0), Player::Two);
        state.board.place(Position::new_unchecked(2, 0), Player::Two);
        state.board.place(Position::new_unchecked(3, 0), Player::Two);
        state.board.place(Position::new_unchecked(4, 0), Player::One);
        state.turn = 0;

        let next = state.generate_successor(0, Move::new(0, 0)).unwrap();
        assert_eq!(next.num_captures(Player::One), 0);
        assert_eq!(next.num_pieces(Player::Two), 3);
    }

    #[test]
    fn test_capture_probe_out_of_bounds_is_skipped() {
        // 探测点越过棋盘边缘时该方向直接放弃，不报错
        let mut state = full_board_state(5);
        state.board.place(Position::new_unchecked(0, 0), Player::Two);
        state.board.place(Position::new_unchecked(1, 0), Player::Two);
        state.turn = 0;

        let next = state.generate_successor(0, Move::new(2, 0)).unwrap();
        assert_eq!(next.num_captures(Player::One), 0);
        assert_eq!(next.num_pieces(Player::Two), 2);
    }

    #[test]
    fn test_captured_cells_stay_addressable() {
        // 被吃掉的格子在生长变体下仍是合法落点
        let mut state = growth_state(9);
        state.board.place(Position::new_unchecked(1, 1), Player::One);
        state.board.place(Position::new_unchecked(2, 1), Player::Two);
        state.board.place(Position::new_unchecked(3, 1), Player::Two);
        state.turn = 0;

        let next = state.generate_successor(0, Move::new(4, 1)).unwrap();
        let moves = Rules::legal_moves(&next, 1).unwrap();
        assert!(moves.contains(&Move::new(2, 1)));
        assert!(moves.contains(&Move::new(3, 1)));
    }
}
