//! 棋盘文本渲染

use pente_core::{GameState, Position};

/// 渲染棋盘为文本网格：空位 `-|-`，棋子为玩家编号
pub fn render(state: &GameState) -> String {
    let size = state.board.size();
    let mut out = String::from(" _ ");
    for x in 0..size {
        push_label(&mut out, x);
    }
    out.push('\n');

    for y in 0..size {
        push_label(&mut out, y);
        for x in 0..size {
            match state.board.get(Position::new_unchecked(x, y)) {
                None => out.push_str("-|-"),
                Some(player) => {
                    out.push(' ');
                    out.push(player.display_char());
                    out.push(' ');
                }
            }
        }
        out.push('\n');
    }

    out
}

fn push_label(out: &mut String, index: u8) {
    if index < 10 {
        out.push_str(&format!(" {index} "));
    } else {
        out.push_str(&format!(" {index}"));
    }
}
