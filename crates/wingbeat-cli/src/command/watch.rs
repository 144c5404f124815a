use wingbeat_training::genetic::Population;

use crate::{
    command::{sim_app::SimApp, train},
    tui::Tui,
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct WatchArg {
    /// Run the simulation faster than real time
    #[clap(long, default_value_t = false)]
    turbo: bool,
}

pub(crate) fn run(arg: &WatchArg) -> anyhow::Result<()> {
    let WatchArg { turbo } = arg;

    let mut rng = rand::rng();
    let population = Population::random(
        train::HIDDEN_SIZE,
        train::POPULATION_COUNT,
        &mut rng,
        train::MAX_WEIGHT,
    );
    let config = train::training_config();

    let mut app = SimApp::evolve(config, population).turbo(*turbo);
    Tui::new().run(&mut app)
}
