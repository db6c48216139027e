use crate::clock::{AnimationClock, TimeSource};
use crate::projection::{Projection, ViewportState};
use crate::surface::Scene;

/// Milliseconds to shader time. Slow enough that the map drifts rather than spins.
pub const DEFAULT_TIME_SCALE: f64 = 7e-5;

/// Everything a draw needs, owned by the frame driver.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderContext {
    viewport: ViewportState,
    projection: Projection,
    pub scene: Scene,
}

impl RenderContext {
    pub fn new(viewport: ViewportState, scene: Scene) -> Self {
        Self {
            viewport,
            projection: Projection::from_viewport(viewport),
            scene,
        }
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Recompute the projection for a new viewport size. The scene is untouched.
    pub fn resize(&mut self, width: u32, height: u32) {
        let viewport = ViewportState::new(width, height);
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.projection = Projection::from_viewport(viewport);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            top = self.projection.top,
            "projection recomputed"
        );
    }
}

/// Something that can draw the scene through a projection.
pub trait DrawTarget {
    fn draw(&mut self, scene: &Scene, projection: &Projection);
}

/// Asks the host for one more frame tick.
pub trait FrameScheduler {
    fn request_next_frame(&mut self);
}

/// Outcome of one frame step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub elapsed_ms: u64,
    pub delta_ms: u64,
    pub time: f32,
}

/// Per-frame loop: clock → `time` uniform → draw → reschedule.
///
/// A driver only exists in the running state; `start` is the one transition
/// out of "uninitialized" and captures the clock's start time.
#[derive(Debug)]
pub struct FrameDriver<T: TimeSource> {
    clock: AnimationClock<T>,
    context: RenderContext,
    time_scale: f64,
    frame_index: u64,
}

impl<T: TimeSource> FrameDriver<T> {
    pub fn start(context: RenderContext, source: T) -> Self {
        Self::with_time_scale(context, source, DEFAULT_TIME_SCALE)
    }

    pub fn with_time_scale(context: RenderContext, source: T, time_scale: f64) -> Self {
        tracing::info!(
            shader_set = %context.scene.surface().material.shader_set(),
            time_scale,
            "frame driver started"
        );
        Self {
            clock: AnimationClock::start(source),
            context,
            time_scale,
            frame_index: 0,
        }
    }

    pub fn context(&self) -> &RenderContext {
        &self.context
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.context.resize(width, height);
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }

    /// Advance the clock and write the `time` uniform without drawing.
    pub fn update(&mut self) -> FrameReport {
        let tick = self.clock.tick();
        let time = (tick.elapsed_ms as f64 * self.time_scale) as f32;
        self.context.scene.surface_mut().material.set_time(time);

        let report = FrameReport {
            frame_index: self.frame_index,
            elapsed_ms: tick.elapsed_ms,
            delta_ms: tick.delta_ms,
            time,
        };
        self.frame_index += 1;
        report
    }

    /// Run one full frame and request the next one.
    pub fn step<D, S>(&mut self, target: &mut D, scheduler: &mut S) -> FrameReport
    where
        D: DrawTarget + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        let report = self.update();
        target.draw(&self.context.scene, &self.context.projection);
        scheduler.request_next_frame();
        tracing::trace!(
            frame = report.frame_index,
            elapsed_ms = report.elapsed_ms,
            delta_ms = report.delta_ms,
            time = report.time,
            "frame"
        );
        report
    }

    /// Step until `stop` returns true for a frame's report. Returns the last report.
    pub fn run_until<D, S, F>(
        &mut self,
        target: &mut D,
        scheduler: &mut S,
        mut stop: F,
    ) -> FrameReport
    where
        D: DrawTarget + ?Sized,
        S: FrameScheduler + ?Sized,
        F: FnMut(&FrameReport) -> bool,
    {
        loop {
            let report = self.step(target, scheduler);
            if stop(&report) {
                return report;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualTimeSource;
    use crate::material::{Material, ShaderSetId, TextureBinding, WrapMode};
    use crate::surface::create_surface;

    #[derive(Default)]
    struct CountingScheduler {
        requests: u32,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_next_frame(&mut self) {
            self.requests += 1;
        }
    }

    #[derive(Default)]
    struct RecordingTarget {
        times: Vec<f32>,
        tops: Vec<f32>,
    }

    impl DrawTarget for RecordingTarget {
        fn draw(&mut self, scene: &Scene, projection: &Projection) {
            self.times.push(scene.surface().material.time());
            self.tops.push(projection.top);
        }
    }

    fn context() -> RenderContext {
        let material = Material::new(ShaderSetId::Nodd, TextureBinding::world_map("map.jpg"));
        RenderContext::new(
            ViewportState::new(1920, 1080),
            Scene::with_surface(create_surface(material)),
        )
    }

    #[test]
    fn time_uniform_scaling() {
        let source = ManualTimeSource::new();
        let mut driver = FrameDriver::start(context(), &source);
        assert_eq!(driver.update().time, 0.0);
        source.set_millis(1000);
        assert_eq!(driver.update().time, 0.07);
    }

    #[test]
    fn two_frames_scenario() {
        let source = ManualTimeSource::new();
        let mut driver = FrameDriver::start(context(), &source);
        let mut target = RecordingTarget::default();
        let mut scheduler = CountingScheduler::default();

        source.set_millis(500);
        let first = driver.step(&mut target, &mut scheduler);
        source.set_millis(1600);
        let second = driver.step(&mut target, &mut scheduler);

        assert_eq!(first.time, 0.035);
        assert_eq!(second.delta_ms, 1100);
        assert_eq!(second.time, 0.112);
        assert_eq!(target.times, vec![0.035, 0.112]);
        assert_eq!(scheduler.requests, 2);
    }

    #[test]
    fn time_is_monotonic() {
        let source = ManualTimeSource::new();
        let mut driver = FrameDriver::start(context(), &source);
        let mut last = driver.update().time;
        for step in [0, 1, 16, 17, 33, 0, 250, 1_000_000] {
            source.advance(std::time::Duration::from_millis(step));
            let time = driver.update().time;
            assert!(time >= last);
            last = time;
        }
    }

    #[test]
    fn frames_leave_rotation_and_wrap_alone() {
        let source = ManualTimeSource::new();
        let mut driver = FrameDriver::start(context(), &source);
        let rotation = driver.context().scene.surface().rotation();
        let mut target = RecordingTarget::default();
        let mut scheduler = CountingScheduler::default();

        for _ in 0..100 {
            source.advance(std::time::Duration::from_millis(16));
            driver.step(&mut target, &mut scheduler);
        }

        let surface = driver.context().scene.surface();
        assert_eq!(surface.rotation(), rotation);
        assert_eq!(surface.material.uniforms().map_texture().wrap().u, WrapMode::Repeat);
        assert_eq!(driver.frame_count(), 100);
    }

    #[test]
    fn run_until_stops_on_predicate() {
        let source = ManualTimeSource::new();
        let mut driver = FrameDriver::start(context(), &source);
        let mut target = RecordingTarget::default();
        let mut scheduler = CountingScheduler::default();

        let last = driver.run_until(&mut target, &mut scheduler, |report| {
            source.advance(std::time::Duration::from_millis(10));
            report.frame_index == 4
        });

        assert_eq!(last.frame_index, 4);
        assert_eq!(last.elapsed_ms, 40);
        assert_eq!(target.times.len(), 5);
        assert_eq!(scheduler.requests, 5);
    }

    #[test]
    fn resize_updates_projection_for_next_draw() {
        let source = ManualTimeSource::new();
        let mut driver = FrameDriver::start(context(), &source);
        let mut target = RecordingTarget::default();
        let mut scheduler = CountingScheduler::default();

        driver.step(&mut target, &mut scheduler);
        driver.resize(1000, 1000);
        driver.step(&mut target, &mut scheduler);

        assert_eq!(target.tops, vec![-0.5625, -1.0]);
        assert_eq!(driver.context().viewport(), ViewportState::new(1000, 1000));
    }

    #[test]
    fn custom_time_scale() {
        let source = ManualTimeSource::new();
        let mut driver = FrameDriver::with_time_scale(context(), &source, 1e-3);
        source.set_millis(2500);
        assert_eq!(driver.update().time, 2.5);
    }
}
