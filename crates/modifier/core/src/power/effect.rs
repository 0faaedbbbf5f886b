/// Behavior attached to a [`Power`](super::Power).
///
/// Only [`on_use`](PowerEffect::on_use) is required. The active and passive
/// hooks run only when the definition declares that sub-phase; each `update`
/// hook runs once per frame while its sub-phase is live, before the frame's
/// timer advance, so the frame that ends a sub-phase still sees one update.
pub trait PowerEffect {
    /// World state the hooks mutate (attribute stacks, an event sink, ...).
    type Context;

    /// Fired exactly once per successful release. `level` is at least 1.
    fn on_use(&mut self, ctx: &mut Self::Context, level: u8);

    fn on_active_start(&mut self, _ctx: &mut Self::Context, _level: u8) {}

    fn on_active_update(&mut self, _ctx: &mut Self::Context, _dt: f32) {}

    fn on_active_end(&mut self, _ctx: &mut Self::Context) {}

    fn on_passive_start(&mut self, _ctx: &mut Self::Context, _level: u8) {}

    fn on_passive_update(&mut self, _ctx: &mut Self::Context, _dt: f32) {}

    fn on_passive_end(&mut self, _ctx: &mut Self::Context) {}
}
