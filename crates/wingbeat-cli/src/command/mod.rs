use clap::{Parser, Subcommand};

use self::{play::PlayArg, train::TrainArg, watch::WatchArg};

mod play;
mod sim_app;
mod train;
mod watch;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Train a flap policy with the genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Watch a population evolve live in the terminal
    Watch(#[clap(flatten)] WatchArg),
    /// Replay a trained policy model
    Play(#[clap(flatten)] PlayArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Watch(WatchArg::default())) {
        Mode::Train(arg) => train::run(&arg)?,
        Mode::Watch(arg) => watch::run(&arg)?,
        Mode::Play(arg) => play::run(&arg)?,
    }
    Ok(())
}
