//! End-of-run report logged per actor.
use modifier_core::{AttributeKind, Capability};
use runtime::Runtime;
use strum::IntoEnumIterator;
use tracing::info;

pub fn log_actors(runtime: &Runtime) {
    for actor in runtime.actors() {
        let attributes: Vec<String> = AttributeKind::iter()
            .map(|kind| format!("{kind}={:.2}", actor.attribute(kind)))
            .collect();
        let disabled: Vec<Capability> = actor.stats().capabilities.disabled().collect();
        let powers: Vec<String> = actor
            .powers()
            .iter()
            .map(|p| format!("{}:{}", p.name(), p.phase()))
            .collect();

        info!(
            actor = %actor.id(),
            name = actor.name(),
            attributes = %attributes.join(" "),
            disabled = ?disabled,
            powers = %powers.join(" "),
            "actor summary"
        );
    }
}
