use crate::coords::ViewportMapping;

/// Which sprites a pointer event is delivered to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum HitPolicy {
    /// Every sprite whose shape contains the point, in draw order. Overlapping
    /// sprites all receive the event.
    #[default]
    TestAll,
    /// Only the topmost hit: sprites are tested in reverse draw order and the
    /// first hit wins.
    TopmostOnly,
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SceneConfig {
    pub hit_policy: HitPolicy,
    /// Viewport to canvas mapping applied to incoming pointer positions.
    pub viewport: ViewportMapping,
}

impl SceneConfig {
    pub fn with_hit_policy(mut self, hit_policy: HitPolicy) -> Self {
        self.hit_policy = hit_policy;
        self
    }

    pub fn with_viewport(mut self, viewport: ViewportMapping) -> Self {
        self.viewport = viewport;
        self
    }
}
