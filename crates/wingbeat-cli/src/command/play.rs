use std::path::PathBuf;

use wingbeat_engine::SimConfig;

use crate::{command::sim_app::SimApp, model::PolicyModel, tui::Tui};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Path to the policy model file (JSON format)
    model_path: PathBuf,
    /// Run the simulation faster than real time
    #[clap(long, default_value_t = false)]
    turbo: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { model_path, turbo } = arg;

    let model = PolicyModel::open(model_path)?;
    let policy = model.to_policy()?;
    // No tick budget here: a good policy gets to fly until it crashes.
    let config = SimConfig::default();

    let mut app = SimApp::exhibit(config, policy).turbo(*turbo);
    Tui::new().run(&mut app)
}
