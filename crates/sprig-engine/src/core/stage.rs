use crate::config::EngineConfig;
use crate::error::Result;
use crate::input::{InputEvent, InputState, SceneEvent};
use crate::logging::init_logging;
use crate::scene::Scene;
use crate::surface::DrawingSurface;
use crate::time::{FrameClock, FrameTick, TimerId, TimerQueue};
use crate::tree::NodeId;

/// Scene plus the per-loop state around it: input tracking, timers and the
/// frame clock.
///
/// Frame order in [`step`](Self::step): timers, then update, then draw.
#[derive(Debug)]
pub struct Stage<D = ()> {
    scene: Scene<D>,
    input: InputState,
    timers: TimerQueue<Scene<D>>,
    clock: FrameClock,
    config: EngineConfig,
    running: bool,
    last_tick: Option<FrameTick>,
    // Reused between input events.
    pending: Vec<SceneEvent>,
}

impl<D: Default> Stage<D> {
    /// Builds the stage and initializes logging from `config.logging`
    /// (a no-op when logging is already set up).
    pub fn new(config: EngineConfig) -> Self {
        init_logging(config.logging.clone());
        Self {
            scene: Scene::with_config(config.scene),
            input: InputState::new(&config.input),
            timers: TimerQueue::new(),
            clock: FrameClock::new(),
            config,
            running: false,
            last_tick: None,
            pending: Vec::new(),
        }
    }
}

impl<D> Stage<D> {
    #[inline]
    pub fn scene(&self) -> &Scene<D> {
        &self.scene
    }

    #[inline]
    pub fn scene_mut(&mut self) -> &mut Scene<D> {
        &mut self.scene
    }

    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Timing of the last executed step.
    #[inline]
    pub fn last_tick(&self) -> Option<FrameTick> {
        self.last_tick
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.clock.fps()
    }

    /// Starts stepping. The first step after a start has a zero interval and
    /// restarts `elapsed_msec`.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.clock.reset();
            log::debug!("Stage: started");
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("Stage: stopped");
        }
    }

    // ── timers ────────────────────────────────────────────────────────────

    /// See [`TimerQueue::add_timer`]. Callbacks receive the scene.
    pub fn add_timer(
        &mut self,
        timeout_sec: f32,
        repeat: bool,
        callback: impl FnMut(TimerId, &mut Scene<D>) -> Result<()> + 'static,
    ) -> TimerId {
        self.timers.add_timer(timeout_sec, repeat, callback)
    }

    pub fn remove_timer(&mut self, id: TimerId) -> bool {
        self.timers.remove_timer(id)
    }

    // ── frame ─────────────────────────────────────────────────────────────

    /// Runs one frame at the host timestamp `timestamp_msec`.
    ///
    /// Returns `Ok(None)` without touching anything while stopped. The first
    /// error from a timer callback or listener aborts the rest of the frame.
    pub fn step(&mut self, timestamp_msec: f64, surface: &mut dyn DrawingSurface) -> Result<Option<FrameTick>> {
        if !self.running {
            return Ok(None);
        }

        let tick = self.clock.tick_at(timestamp_msec);
        self.last_tick = Some(tick);

        self.timers.tick(tick.interval_sec, &mut self.scene)?;
        self.scene.update(tick.elapsed_msec, tick.interval_sec)?;
        self.scene.draw(surface)?;

        Ok(Some(tick))
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Converts a raw input event into scene events and dispatches them in
    /// order. Returns every receiving sprite, in delivery order.
    ///
    /// Input is processed whether or not the stage is running.
    pub fn handle_input(&mut self, ev: &InputEvent) -> Result<Vec<NodeId>> {
        let mut events = std::mem::take(&mut self.pending);
        self.input.apply_event(ev, &mut events);

        let mut delivered = Vec::new();
        let mut res = Ok(());
        for scene_ev in events.drain(..) {
            match self.scene.dispatch(scene_ev) {
                Ok(ids) => delivered.extend(ids),
                Err(err) => {
                    res = Err(err);
                    break;
                }
            }
        }

        events.clear();
        self.pending = events;
        res.map(|()| delivered)
    }
}
