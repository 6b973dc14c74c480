// Headless controller run.
// Usage: chess_controller [pvp|pvb|bvp|bvb] [--replay e2e4,e7e5,..] [--ticks N]
// Set RUST_LOG=debug to follow every submission.

use chess_controller::config::{ControllerConfig, GameMode};
use chess_controller::engine::StandardEngine;
use chess_controller::game_repr::Color;
use chess_controller::orchestrator::Orchestrator;
use std::process::ExitCode;

struct Args {
    mode: GameMode,
    replay: Vec<String>,
    ticks: u32,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args { mode: GameMode::BothAutomated, replay: Vec::new(), ticks: 200 };
    let mut iter = std::env::args().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--replay" => {
                let list = iter.next().ok_or("--replay needs a comma separated move list")?;
                args.replay = list.split(',').filter(|m| !m.is_empty()).map(str::to_string).collect();
            }
            "--ticks" => {
                let value = iter.next().ok_or("--ticks needs a number")?;
                args.ticks = value.parse().map_err(|_| format!("invalid tick count `{}`", value))?;
            }
            other => args.mode = other.parse().map_err(|e| format!("{}", e))?,
        }
    }
    Ok(args)
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{}", message);
            eprintln!("usage: chess_controller [pvp|pvb|bvp|bvb] [--replay m1,m2,..] [--ticks N]");
            return ExitCode::FAILURE;
        }
    };

    let config = ControllerConfig {
        orientation: args.mode.human_color().unwrap_or(Color::White),
        ..ControllerConfig::with_mode(args.mode)
    };
    let dt = config.tick_interval();
    let mut orchestrator = match Orchestrator::new(StandardEngine::new(), config) {
        Ok(orchestrator) => orchestrator.with_replay(args.replay),
        Err(err) => {
            eprintln!("invalid configuration: {}", err);
            return ExitCode::FAILURE;
        }
    };

    println!("Mode: {}", args.mode.short_name());
    for _ in 0..args.ticks {
        let report = orchestrator.tick(dt);
        if let Some(step) = &report.replayed {
            println!("{:>3}. {} (replay) -> {:?}", orchestrator.turn().move_count(), step.notation, step.outcome);
        }
        if let Some(played) = &report.automated {
            println!("{:>3}. {} -> {:?}", orchestrator.turn().move_count(), played.mv, played.outcome);
        }
        if !orchestrator.status().is_playing() {
            break;
        }
    }

    if let Some(halt) = orchestrator.replay().halt() {
        println!("Replay halted: {:?}", halt);
    }
    println!("Status: {:?}", orchestrator.status());
    println!("Position: {}", orchestrator.engine().fen());
    ExitCode::SUCCESS
}
