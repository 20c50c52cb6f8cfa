use crate::foundation::core::FrameIndex;
use crate::playback::clock::FrameClock;
use crate::render::draw::{ONION_ALPHA, compose_frame};
use crate::render::surface::DrawSurface;
use crate::scene::model::Scene;
use std::time::Duration;

/// Playback state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlayState {
    /// Not advancing; ticks are ignored.
    #[default]
    Paused,
    /// Advancing one frame per clock interval.
    Playing {
        /// Wrap from the last frame to the first instead of stopping.
        looping: bool,
    },
}

/// Handle returned by [`PlaybackEngine::on_frame`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Engine configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlaybackOpts {
    /// Draw the neighbouring frames behind the current one.
    pub onion_skin: bool,
    /// Opacity of the onion-skin neighbours.
    pub onion_alpha: f64,
}

impl Default for PlaybackOpts {
    fn default() -> Self {
        Self {
            onion_skin: false,
            onion_alpha: ONION_ALPHA,
        }
    }
}

type FrameListener = Box<dyn FnMut(FrameIndex)>;

/// Owns one scene and one drawing surface and plays the scene back.
///
/// The engine is driven entirely from outside: call [`PlaybackEngine::tick`] from the render
/// loop with the time elapsed since the previous call. Every frame change redraws the surface
/// and then notifies the listeners, inside the call that caused it.
pub struct PlaybackEngine<S: DrawSurface> {
    scene: Scene,
    surface: S,
    state: PlayState,
    current: FrameIndex,
    onion_skin: bool,
    onion_alpha: f64,
    clock: FrameClock,
    listeners: Vec<(ListenerId, FrameListener)>,
    next_listener: u64,
}

impl<S: DrawSurface> PlaybackEngine<S> {
    /// Paused engine showing frame 0.
    pub fn new(scene: Scene, surface: S, opts: PlaybackOpts) -> Self {
        let mut engine = Self {
            scene,
            surface,
            state: PlayState::Paused,
            current: FrameIndex::FIRST,
            onion_skin: opts.onion_skin,
            onion_alpha: opts.onion_alpha,
            clock: FrameClock::default(),
            listeners: Vec::new(),
            next_listener: 0,
        };
        engine.redraw();
        engine
    }

    /// Start playing. While already playing only the loop flag is updated.
    pub fn play(&mut self, looping: bool) {
        if let PlayState::Paused = self.state {
            self.clock.reset();
            tracing::debug!(frame = %self.current, looping, "play");
        }
        self.state = PlayState::Playing { looping };
    }

    /// Stop advancing. Time accumulated so far is discarded.
    pub fn pause(&mut self) {
        if let PlayState::Playing { .. } = self.state {
            tracing::debug!(frame = %self.current, "pause");
        }
        self.state = PlayState::Paused;
        self.clock.reset();
    }

    /// Jump to `index` clamped into the timeline, redraw, and notify.
    ///
    /// The play state is unchanged.
    pub fn goto(&mut self, index: i64) {
        self.current = FrameIndex::clamp_to_scene(index);
        self.redraw();
        self.notify();
    }

    /// [`PlaybackEngine::goto`] relative to the current frame.
    pub fn step(&mut self, delta: i64) {
        let current = i64::try_from(self.current.0).unwrap_or(i64::MAX);
        self.goto(current.saturating_add(delta));
    }

    /// Replace the scene and rewind to frame 0. The onion-skin setting and play state carry
    /// over.
    pub fn set_scene(&mut self, scene: Scene) {
        self.scene = scene;
        self.current = FrameIndex::FIRST;
        self.clock.reset();
        tracing::debug!("scene replaced");
        self.redraw();
        self.notify();
    }

    /// Toggle onion-skinning and redraw the current frame.
    pub fn set_onion_skin(&mut self, enabled: bool) {
        self.onion_skin = enabled;
        self.redraw();
    }

    /// Register a listener called with the new index on every frame change.
    pub fn on_frame(&mut self, listener: impl FnMut(FrameIndex) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener. Returns `false` if `id` was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// Feed `elapsed` render-loop time and advance as many frames as it pays for.
    ///
    /// Returns the number of frame changes. Ignored while paused. Without looping, playback
    /// pauses on reaching the last frame and any remaining time is dropped.
    pub fn tick(&mut self, elapsed: Duration) -> usize {
        let PlayState::Playing { looping } = self.state else {
            return 0;
        };

        self.clock.accumulate(elapsed);
        let mut advanced = 0;
        while self.clock.take_frame() {
            self.current = match self.current.next() {
                Some(next) => next,
                None if looping => FrameIndex::FIRST,
                None => {
                    self.finish();
                    break;
                }
            };
            self.redraw();
            self.notify();
            advanced += 1;

            if !looping && self.current.is_last() {
                self.finish();
                break;
            }
        }
        advanced
    }

    fn finish(&mut self) {
        self.state = PlayState::Paused;
        self.clock.reset();
        tracing::debug!(frame = %self.current, "reached last frame");
    }

    fn redraw(&mut self) {
        compose_frame(
            &mut self.surface,
            &self.scene,
            self.current,
            self.onion_skin,
            self.onion_alpha,
        );
    }

    fn notify(&mut self) {
        let frame = self.current;
        for (_, listener) in &mut self.listeners {
            listener(frame);
        }
    }

    /// Index of the frame on the surface.
    pub fn current_frame(&self) -> FrameIndex {
        self.current
    }

    /// Whether ticks currently advance the timeline.
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlayState::Playing { .. })
    }

    /// Current play state.
    pub fn state(&self) -> PlayState {
        self.state
    }

    /// Whether onion-skinning is on.
    pub fn onion_skin(&self) -> bool {
        self.onion_skin
    }

    /// The loaded scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The drawing surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The drawing surface, mutably.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the engine, returning its surface.
    pub fn into_surface(self) -> S {
        self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/engine.rs"]
mod tests;
