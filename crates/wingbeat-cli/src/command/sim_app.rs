use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::Stylize as _,
    text::Line,
    widgets::{Block, Paragraph},
};
use wingbeat_engine::{GenerationSession, SimConfig};
use wingbeat_policy::FeedForwardPolicy;
use wingbeat_stats::descriptive::DescriptiveStats;
use wingbeat_training::genetic::Population;

use crate::{
    command::train,
    tui::{App, Tui},
    view::FlockView,
};

const FPS: f64 = 60.0;
const TURBO_TICK_RATE: f64 = 600.0;

/// What the app seats into each generation.
#[derive(Debug)]
enum FlightMode {
    /// A whole population, evolved between generations.
    Evolve { population: Population },
    /// A single trained policy, respawned between generations.
    Exhibit { policy: FeedForwardPolicy },
}

/// Interactive flock viewer.
///
/// Runs one session per generation at the configured tick rate; when
/// the session ends the next generation starts immediately.
#[derive(Debug)]
pub struct SimApp {
    config: SimConfig,
    session: GenerationSession<FeedForwardPolicy>,
    mode: FlightMode,
    generation: u32,
    best_fitness: Option<f32>,
    paused: bool,
    turbo: bool,
    should_exit: bool,
}

impl SimApp {
    pub fn evolve(config: SimConfig, population: Population) -> Self {
        let session = GenerationSession::new(config.clone(), population.policies(), 0);
        Self {
            config,
            session,
            mode: FlightMode::Evolve { population },
            generation: 0,
            best_fitness: None,
            paused: false,
            turbo: false,
            should_exit: false,
        }
    }

    pub fn exhibit(config: SimConfig, policy: FeedForwardPolicy) -> Self {
        let session = GenerationSession::new(config.clone(), vec![policy.clone()], 0);
        Self {
            config,
            session,
            mode: FlightMode::Exhibit { policy },
            generation: 0,
            best_fitness: None,
            paused: false,
            turbo: false,
            should_exit: false,
        }
    }

    pub fn turbo(self, turbo: bool) -> Self {
        Self { turbo, ..self }
    }

    fn next_generation(&mut self) {
        self.generation += 1;
        let totals = self.session.final_fitness().to_vec();
        if let Some(stats) = DescriptiveStats::new(totals.iter().copied()) {
            self.best_fitness = Some(self.best_fitness.map_or(stats.max, |b| b.max(stats.max)));
        }

        match &mut self.mode {
            FlightMode::Evolve { population } => {
                population.record_fitness(&totals);
                let phase = train::EvolutionPhase::from_generation(self.generation);
                let evolver = train::evolver_by_phase(phase);
                *population = evolver.evolve(population);
                self.session = GenerationSession::new(
                    self.config.clone(),
                    population.policies(),
                    self.generation,
                );
            }
            FlightMode::Exhibit { policy } => {
                self.session = GenerationSession::new(
                    self.config.clone(),
                    vec![policy.clone()],
                    self.generation,
                );
            }
        }
    }

    fn apply_tick_rate(&self, tui: &mut Tui) {
        let rate = if self.turbo {
            TURBO_TICK_RATE
        } else {
            self.config.tick_rate
        };
        tui.set_tick_rate(rate);
    }
}

impl App for SimApp {
    fn init(&mut self, tui: &mut Tui) {
        tui.set_frame_rate(FPS);
        self.apply_tick_rate(tui);
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn handle_event(&mut self, tui: &mut Tui, event: Event) {
        if let Event::Key(key) = event
            && key.kind == KeyEventKind::Press
        {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_exit = true,
                KeyCode::Char('p' | ' ') => self.paused = !self.paused,
                KeyCode::Char('t') => {
                    self.turbo = !self.turbo;
                    self.apply_tick_rate(tui);
                }
                _ => {}
            }
        }
    }

    fn update(&mut self, _tui: &mut Tui) {
        if self.paused {
            return;
        }
        if self.session.state().is_running() {
            self.session.tick();
        } else {
            self.next_generation();
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let [field_area, sidebar] =
            Layout::horizontal([Constraint::Min(40), Constraint::Length(26)]).areas(frame.area());

        let state = self.session.frame_state();
        let view =
            FlockView::new(&state, &self.config).block(Block::bordered().title("wingbeat"));
        frame.render_widget(view, field_area);

        let mode = match &self.mode {
            FlightMode::Evolve { .. } => "evolve",
            FlightMode::Exhibit { .. } => "exhibit",
        };
        let mut lines = vec![
            Line::from(format!("Mode:       {mode}")),
            Line::from(format!("Generation: {}", state.generation)),
            Line::from(format!("Score:      {}", state.score)),
            Line::from(format!("Alive:      {}", self.session.alive_count())),
            Line::from(format!("Ticks:      {}", state.ticks)),
        ];
        if let Some(best) = self.best_fitness {
            lines.push(Line::from(format!("Best:       {best:.2}")));
        }
        lines.push(Line::from(""));
        lines.push(Line::from("[q] quit  [p] pause"));
        lines.push(Line::from("[t] turbo"));
        if self.paused {
            lines.push(Line::from("PAUSED".bold()));
        }
        frame.render_widget(
            Paragraph::new(lines).block(Block::bordered().title("Status")),
            sidebar,
        );
    }
}
