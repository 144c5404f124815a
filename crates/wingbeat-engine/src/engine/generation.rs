use rand::Rng as _;

use crate::{
    core::{Bird, Floor, Pipe},
    engine::{
        BirdFrame, DecisionPolicy, FrameState, GapSampler, GapSeed, PipeFrame, RenderSink,
        SimConfig, StopSignal,
    },
};

/// Lifecycle of one generation's evaluation loop.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionState {
    /// Ticks are being processed.
    Running,
    /// Terminal: every bird has been eliminated.
    Extinct,
    /// Terminal: cancelled externally or the tick budget ran out. The
    /// driver must not read this as "population failed".
    Stopped,
}

/// One bird paired with its decision policy and fitness accumulator.
///
/// Keeping the three together in a single record makes elimination one
/// operation on one collection; there is no index alignment to violate.
#[derive(Debug)]
struct BirdRecord<P> {
    bird: Bird,
    policy: P,
    fitness: f32,
    /// Index of this bird in the starting population; fitness totals are
    /// reported in slot order.
    slot: usize,
}

/// One generation of the evaluation loop.
///
/// Drives all live birds against a shared pipe course until the
/// population is extinct, the tick budget runs out, or an external stop
/// fires. Fitness accounting: +`survival_reward` per live tick,
/// +`clearance_reward` to every survivor when the lead bird clears a
/// pipe, -`collision_penalty` on impact.
#[derive(Debug)]
pub struct GenerationSession<P> {
    config: SimConfig,
    birds: Vec<BirdRecord<P>>,
    pipes: Vec<Pipe>,
    floor: Floor,
    gaps: GapSampler,
    score: u32,
    ticks: u64,
    generation: u32,
    state: SessionState,
    final_fitness: Vec<f32>,
}

impl<P> GenerationSession<P>
where
    P: DecisionPolicy,
{
    /// Starts a generation with a random gap seed.
    ///
    /// `generation` is owned by the driver and only echoed into frame
    /// snapshots.
    #[must_use]
    pub fn new(config: SimConfig, policies: Vec<P>, generation: u32) -> Self {
        Self::with_seed(config, policies, generation, rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for a reproducible
    /// pipe course.
    #[must_use]
    pub fn with_seed(config: SimConfig, policies: Vec<P>, generation: u32, seed: GapSeed) -> Self {
        let mut gaps = GapSampler::with_seed(seed);
        let birds: Vec<_> = policies
            .into_iter()
            .enumerate()
            .map(|(slot, policy)| BirdRecord {
                bird: Bird::new(&config),
                policy,
                fitness: 0.0,
                slot,
            })
            .collect();
        let state = if birds.is_empty() {
            SessionState::Extinct
        } else {
            SessionState::Running
        };
        let final_fitness = vec![0.0; birds.len()];
        let first_gap = gaps.sample_gap_top(&config);
        let pipes = vec![Pipe::new(config.pipe_spawn_x, first_gap, &config)];
        let floor = Floor::new(&config);
        Self {
            config,
            birds,
            pipes,
            floor,
            gaps,
            score: 0,
            ticks: 0,
            generation,
            state,
            final_fitness,
        }
    }

    #[must_use]
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[must_use]
    pub fn alive_count(&self) -> usize {
        self.birds.len()
    }

    /// Per-bird fitness totals in starting-population order.
    ///
    /// Entries for eliminated birds are final as soon as the bird is
    /// removed; entries for survivors are flushed when the session
    /// reaches a terminal state.
    #[must_use]
    pub fn final_fitness(&self) -> &[f32] {
        &self.final_fitness
    }

    /// Cancels the generation. Fitness already accumulated is kept; no
    /// further fitness mutation happens.
    pub fn stop(&mut self) {
        if self.state.is_running() {
            self.flush_survivor_fitness();
            self.state = SessionState::Stopped;
        }
    }

    /// Runs ticks until a terminal state, polling `stop` once per tick
    /// and emitting a frame snapshot to `sink` after each tick.
    ///
    /// Pacing is the caller's concern; this loop runs as fast as it can.
    pub fn run<S, R>(&mut self, stop: &mut S, sink: &mut R) -> SessionState
    where
        S: StopSignal,
        R: RenderSink,
    {
        while self.state.is_running() {
            if stop.poll_stop() {
                self.stop();
                break;
            }
            self.tick();
            sink.render(&self.frame_state());
        }
        self.state.clone()
    }

    /// Advances the whole simulation by one tick. No-op unless running.
    pub fn tick(&mut self) {
        if !self.state.is_running() {
            return;
        }
        self.ticks += 1;

        // All birds share a fixed x, so the first live record is the
        // lead bird.
        let lead_x = self.birds[0].bird.x();

        // 1. The pipe every bird observes: the nearest one the lead bird
        // has not yet fully passed, else the next.
        let target = usize::from(
            self.pipes.len() > 1 && lead_x > self.pipes[0].x() + self.config.pipe_width,
        );
        let (gap_top, gap_bottom) = {
            let pipe = &self.pipes[target];
            (pipe.gap_top(), pipe.gap_bottom())
        };

        // 2. Decide, advance kinematics, accrue the survival reward,
        // apply the impulse.
        for record in &mut self.birds {
            let observation = crate::engine::Observation {
                bird_y: record.bird.y(),
                gap_top_distance: (record.bird.y() - gap_top).abs(),
                gap_bottom_distance: (record.bird.y() - gap_bottom).abs(),
            };
            let output = record.policy.decide(&observation);
            record.bird.advance_tick(&self.config);
            record.fitness += self.config.survival_reward;
            if output > self.config.flap_threshold {
                record.bird.flap(&self.config);
            }
        }

        // 3. Collisions and clearance. Removal is deferred: eliminations
        // are collected here and applied once, so iteration order cannot
        // skip birds or penalize the same collision twice.
        let mut hit = vec![false; self.birds.len()];
        let mut clearance = false;
        for pipe in &mut self.pipes {
            for (i, record) in self.birds.iter_mut().enumerate() {
                if !hit[i] && pipe.collides_with(&record.bird, &self.config) {
                    hit[i] = true;
                    record.fitness -= self.config.collision_penalty;
                }
            }
            if !pipe.passed() && pipe.x() < lead_x {
                pipe.mark_passed();
                clearance = true;
            }
        }
        self.remove_marked(&hit);

        // 4. Off-screen removal resolves after collisions for this tick;
        // survivors scroll left.
        let config = &self.config;
        self.pipes.retain(|pipe| !pipe.is_off_screen(config));
        for pipe in &mut self.pipes {
            pipe.advance_tick(&self.config);
        }

        // 5. A clearance rewards every bird still alive, bumps the
        // score once, and spawns exactly one replacement pipe.
        if clearance {
            for record in &mut self.birds {
                record.fitness += self.config.clearance_reward;
            }
            self.score += 1;
            let gap_top = self.gaps.sample_gap_top(&self.config);
            self.pipes
                .push(Pipe::new(self.config.pipe_spawn_x, gap_top, &self.config));
        }

        // 6. Floor/ceiling violations. No fitness side effect.
        let out_of_bounds: Vec<bool> = self
            .birds
            .iter()
            .map(|record| record.bird.is_out_of_bounds(&self.config))
            .collect();
        self.remove_marked(&out_of_bounds);

        // 7. Cosmetic floor scroll.
        self.floor.advance_tick(&self.config);

        // 8. Frame emission happens in the caller via frame_state().

        // 9. Terminal transitions.
        if self.birds.is_empty() {
            self.state = SessionState::Extinct;
        } else if let Some(budget) = self.config.tick_budget
            && self.ticks >= budget
        {
            self.flush_survivor_fitness();
            self.state = SessionState::Stopped;
        }
    }

    /// Read-only drawable snapshot of the current tick.
    #[must_use]
    pub fn frame_state(&self) -> FrameState {
        FrameState {
            birds: self
                .birds
                .iter()
                .map(|record| BirdFrame {
                    x: record.bird.x(),
                    y: record.bird.y(),
                    tilt: record.bird.tilt(),
                    frame_index: record.bird.frame_index(),
                })
                .collect(),
            pipes: self
                .pipes
                .iter()
                .map(|pipe| PipeFrame {
                    x: pipe.x(),
                    gap_top: pipe.gap_top(),
                    gap_bottom: pipe.gap_bottom(),
                })
                .collect(),
            floor_y: self.floor.y(),
            floor_x1: self.floor.x1(),
            floor_x2: self.floor.x2(),
            score: self.score,
            generation: self.generation,
            ticks: self.ticks,
        }
    }

    /// Removes every record whose mark is set, recording its final
    /// fitness under its slot. `marks` is aligned with the current live
    /// order.
    fn remove_marked(&mut self, marks: &[bool]) {
        debug_assert_eq!(marks.len(), self.birds.len());
        let final_fitness = &mut self.final_fitness;
        let mut index = 0;
        self.birds.retain(|record| {
            let keep = !marks[index];
            if !keep {
                final_fitness[record.slot] = record.fitness;
            }
            index += 1;
            keep
        });
    }

    fn flush_survivor_fitness(&mut self) {
        for record in &self.birds {
            self.final_fitness[record.slot] = record.fitness;
        }
    }
}
