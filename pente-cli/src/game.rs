//! 对局驱动：轮流向智能体索取落子并应用

use std::time::Instant;

use anyhow::{bail, Result};
use tracing::info;

use pente_ai::Agent;
use pente_core::GameState;

use crate::render::render;

/// 对局驱动
pub struct Game {
    state: GameState,
    agents: Vec<Box<dyn Agent>>,
}

impl Game {
    pub fn new(state: GameState, agents: Vec<Box<dyn Agent>>) -> Self {
        Self { state, agents }
    }

    /// 运行一局：交替询问智能体，直到终局
    pub fn run(&mut self) -> Result<()> {
        let mut agent_index = 0usize;
        let mut num_moves = 0u32;

        loop {
            println!("{}", render(&self.state));

            let started = Instant::now();
            let Some(mv) = self.agents[agent_index].choose_move(&self.state)? else {
                bail!("agent {agent_index} returned no move");
            };
            info!(
                agent_index,
                %mv,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "move chosen"
            );

            match self.state.generate_successor(agent_index, mv) {
                Ok(next) => {
                    self.state = next;
                    num_moves += 1;
                    agent_index = 1 - agent_index;
                }
                // 根节点的非法落子可恢复：状态未被修改，重新询问即可
                Err(err) if err.is_invalid_move() => {
                    println!("invalid move: {err}\n");
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            if self.state.is_win() {
                println!("{}", render(&self.state));
                println!("Player 1 wins!");
                break;
            }
            if self.state.is_lose() {
                println!("{}", render(&self.state));
                println!("Player 2 wins!");
                break;
            }
        }

        info!(num_moves, "game over");
        Ok(())
    }
}
