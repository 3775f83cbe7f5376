//! 人类玩家：命令行输入与确认

use std::io::{self, BufRead, Write};

use pente_ai::Agent;
use pente_core::{GameState, Move, Player, Result};

/// 人类智能体：提示输入 "x, y" 并要求确认
pub struct HumanAgent {
    player: Player,
}

impl HumanAgent {
    pub fn new(player: Player) -> Self {
        Self { player }
    }

    /// 读取一行输入；EOF 或 IO 错误返回 None
    fn read_line(&self) -> Option<String> {
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn prompt(&self, text: &str) -> Option<String> {
        print!("{text}");
        let _ = io::stdout().flush();
        self.read_line()
    }
}

impl Agent for HumanAgent {
    fn choose_move(&mut self, _state: &GameState) -> Result<Option<Move>> {
        loop {
            let Some(text) = self.prompt("input a move as 'x, y': ") else {
                return Ok(None);
            };

            let parts: Vec<&str> = text.split(',').collect();
            if parts.len() != 2 {
                println!("input failed\n");
                continue;
            }
            let (Ok(x), Ok(y)) = (parts[0].trim().parse::<u8>(), parts[1].trim().parse::<u8>())
            else {
                println!("input failed\n");
                continue;
            };

            let Some(confirm) = self.prompt(&format!("confirm ({x}, {y}) (y/n): ")) else {
                return Ok(None);
            };
            match confirm.as_str() {
                "y" => return Ok(Some(Move::new(x, y))),
                "n" => continue,
                _ => println!("input 'y' or 'n' please.\n"),
            }
        }
    }

    fn index(&self) -> usize {
        self.player.index()
    }
}
