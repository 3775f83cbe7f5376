//! Pente 命令行对战入口

mod game;
mod human;
mod render;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pente_ai::{
    Agent, AlphaBetaAgent, Evaluator, ExpectimaxAgent, FeatureWeights, MinimaxAgent, RandomAgent,
    SearchConfig,
};
use pente_core::{GameConfig, GameState, PlacementRule, Player};

use crate::game::Game;
use crate::human::HumanAgent;

/// 智能体类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AgentKind {
    Human,
    Random,
    Minimax,
    AlphaBeta,
    Expectimax,
}

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "pente", about = "Pente 命令行对战")]
struct Args {
    /// 棋盘边长（至少为 1）
    #[arg(
        long,
        default_value_t = pente_core::DEFAULT_BOARD_SIZE,
        value_parser = clap::value_parser!(u8).range(1..)
    )]
    board_size: u8,

    /// 获胜所需吃子对数
    #[arg(long, default_value_t = pente_core::DEFAULT_CAPTURES_TO_WIN)]
    captures_to_win: u32,

    /// 获胜所需连子长度
    #[arg(long, default_value_t = pente_core::DEFAULT_RUN_LEN_TO_WIN)]
    run_len_to_win: u8,

    /// 允许在整个棋盘落子（默认只能落在已有棋子附近）
    #[arg(long)]
    full_board: bool,

    /// 玩家 1 的智能体
    #[arg(long, value_enum, default_value_t = AgentKind::Human)]
    player1: AgentKind,

    /// 玩家 2 的智能体
    #[arg(long, value_enum, default_value_t = AgentKind::AlphaBeta)]
    player2: AgentKind,

    /// 搜索深度（每满一轮递减一次）
    #[arg(long, default_value_t = 2)]
    depth: u8,

    /// RNG 种子（缺省时取熵源）
    #[arg(long)]
    seed: Option<u64>,

    /// 评估权重 JSON 文件（缺省使用内置权重）
    #[arg(long)]
    weights: Option<std::path::PathBuf>,
}

fn build_agent(
    kind: AgentKind,
    player: Player,
    args: &Args,
    weights: &FeatureWeights,
) -> Box<dyn Agent> {
    let config = SearchConfig {
        depth: args.depth,
        seed: args.seed,
    };
    let evaluator = Evaluator::new(weights.clone());
    match kind {
        AgentKind::Human => Box::new(HumanAgent::new(player)),
        AgentKind::Random => Box::new(RandomAgent::new(player, args.seed)),
        AgentKind::Minimax => Box::new(MinimaxAgent::new(player, config, evaluator)),
        AgentKind::AlphaBeta => Box::new(AlphaBetaAgent::new(player, config, evaluator)),
        AgentKind::Expectimax => Box::new(ExpectimaxAgent::new(player, config, evaluator)),
    }
}

fn main() -> Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pente_cli=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let weights = match &args.weights {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => FeatureWeights::default(),
    };

    let placement = if args.full_board {
        PlacementRule::FullBoard
    } else {
        PlacementRule::default()
    };
    let config = GameConfig {
        board_size: args.board_size,
        captures_to_win: args.captures_to_win,
        run_len_to_win: args.run_len_to_win,
        placement,
    };

    let agents = vec![
        build_agent(args.player1, Player::One, &args, &weights),
        build_agent(args.player2, Player::Two, &args, &weights),
    ];

    let mut game = Game::new(GameState::new(config), agents);
    game.run()
}
