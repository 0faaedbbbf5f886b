use std::fs;
use std::path::Path;

use modifier_content::{ConfigLoader, ContentFactory, PowerLoader, ScenarioLoader};
use modifier_core::{AttributeKind, Capability};
use runtime::{ActorId, Command, PowerKind, RuntimeConfig};
use tempfile::TempDir;

const POWERS: &str = r#"[
    (
        name: "dash",
        charge_time: 0.5,
        cooldown: 1.0,
    ),
    (
        name: "overdrive",
        charge_time: 1.0,
        charge_levels: [0.5, 1.0],
        cooldown: 4.0,
        cooldown_on_discard: true,
        active_duration: Some(2.0),
        passive_duration: Some(3.0),
    ),
]"#;

const SCENARIO: &str = r#"(
    name: "duel",
    duration: Some(3.0),
    actors: [
        (
            name: "knight",
            base: [(move_speed, 4.0)],
            powers: [
                (kind: speed_burst, source: Inline((name: "dash", charge_time: 0.5, cooldown: 1.0))),
            ],
            melee: Some((wind_up: 0.5, strike: 0.25, recover: 0.5)),
        ),
        (
            name: "sentry",
            detection: Some((fill_secs: 0.5)),
        ),
    ],
    commands: [
        (at: 0.0, command: StartCharge(actor: 0, power: "dash")),
        (at: 0.5, command: Release(actor: 0, power: "dash")),
        (at: 1.0, command: Disable(actor: 0, capability: jump, key: "dialogue")),
        (at: 1.0, command: SetTargetVisible(actor: 1, visible: true)),
    ],
)"#;

fn write(dir: &Path, name: &str, content: &str) {
    if let Some(parent) = dir.join(name).parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(dir.join(name), content).unwrap();
}

#[test]
fn loads_power_catalog() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "powers.ron", POWERS);

    let powers = PowerLoader::load(&dir.path().join("powers.ron")).unwrap();
    assert_eq!(powers.len(), 2);
    assert_eq!(powers[0].charge_levels, vec![1.0]);
    assert!(!powers[0].cooldown_on_discard);
    assert_eq!(powers[1].active_duration, Some(2.0));
    assert_eq!(powers[1].max_level(), 2);
}

#[test]
fn rejects_invalid_power_definitions() {
    let bad_levels = r#"[(name: "bolt", charge_time: 1.0, charge_levels: [0.8, 0.2], cooldown: 1.0)]"#;
    let err = PowerLoader::parse(bad_levels).unwrap_err();
    assert!(err.to_string().contains("bolt"));

    let duplicate = r#"[
        (name: "dash", charge_time: 0.5, cooldown: 1.0),
        (name: "dash", charge_time: 0.2, cooldown: 1.0),
    ]"#;
    assert!(PowerLoader::parse(duplicate).is_err());
}

#[test]
fn loads_scenario_with_defaults() {
    let scenario = ScenarioLoader::parse(SCENARIO).unwrap();

    assert_eq!(scenario.name, "duel");
    assert_eq!(scenario.length(), 3.0);
    assert_eq!(scenario.actors[0].base, vec![(AttributeKind::MoveSpeed, 4.0)]);
    assert_eq!(scenario.actors[0].powers[0].kind, PowerKind::SpeedBurst);
    assert_eq!(scenario.actors[1].detection.map(|d| d.drain_secs), Some(1.0));
    assert_eq!(
        scenario.commands[2].command,
        Command::Disable {
            actor: ActorId(0),
            capability: Capability::Jump,
            key: "dialogue".into(),
        }
    );
}

#[test]
fn scenario_errors_name_the_file() {
    let dir = TempDir::new().unwrap();
    let broken = SCENARIO.replace("actor: 1,", "actor: 7,");
    write(dir.path(), "broken.ron", &broken);

    let path = dir.path().join("broken.ron");
    let err = ScenarioLoader::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("broken.ron"));
}

#[test]
fn missing_file_reports_path() {
    let err = ScenarioLoader::load(Path::new("/definitely/not/here.ron")).unwrap_err();
    assert!(err.to_string().contains("/definitely/not/here.ron"));
}

#[test]
fn config_fills_missing_keys() {
    let config = ConfigLoader::parse("frame_rate = 30\n").unwrap();
    assert_eq!(
        config,
        RuntimeConfig {
            frame_rate: 30,
            ..RuntimeConfig::default()
        }
    );
    assert!(ConfigLoader::parse("frame_rate = 0\n").is_err());
    assert!(ConfigLoader::parse("frame_rate = \"fast\"\n").is_err());
}

#[test]
fn factory_loads_directory_layout() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "powers.ron", POWERS);
    write(dir.path(), "scenarios/duel.ron", SCENARIO);

    let factory = ContentFactory::new(dir.path());
    assert_eq!(factory.load_config().unwrap(), RuntimeConfig::default());
    assert_eq!(factory.load_powers().unwrap().len(), 2);

    let scenario = factory.load_scenario("duel").unwrap();
    let mut rt = scenario.build_runtime(factory.load_config().unwrap()).unwrap();
    assert_eq!(rt.actors().len(), 2);
    assert_eq!(
        rt.actor(ActorId(0)).unwrap().attribute(AttributeKind::MoveSpeed),
        4.0
    );
    rt.step(0.25);

    write(dir.path(), "config.toml", "event_warn_threshold = 8\n");
    assert_eq!(factory.load_config().unwrap().event_warn_threshold, 8);
}

#[test]
fn shipped_data_files_load() {
    let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../data");
    let factory = ContentFactory::new(&data);

    assert_eq!(factory.load_config().unwrap(), RuntimeConfig::default());
    assert_eq!(factory.load_powers().unwrap().len(), 3);

    let scenario = factory.load_scenario("duel").unwrap();
    assert!(!scenario.uses_catalog());
    let config = factory.load_config().unwrap();
    let frames = scenario.frame_count(config.frame_rate);
    let dt = config.frame_dt();
    let mut rt = scenario.build_runtime(config).unwrap();
    let mut player = runtime::ScenarioPlayer::new(&scenario);
    for _ in 0..frames {
        player.advance(&mut rt, dt);
    }
    assert!(player.is_exhausted());
}

const CATALOG_SCENARIO: &str = r#"(
    name: "catalog",
    actors: [
        (
            name: "berserker",
            powers: [(kind: overdrive, source: Catalog("overdrive"))],
        ),
    ],
)"#;

#[test]
fn factory_resolves_catalog_powers() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "powers.ron", POWERS);
    write(dir.path(), "scenarios/catalog.ron", CATALOG_SCENARIO);

    let scenario = ContentFactory::new(dir.path()).load_scenario("catalog").unwrap();
    assert!(!scenario.uses_catalog());

    let rt = scenario.build_runtime(RuntimeConfig::default()).unwrap();
    let power = &rt.actor(ActorId(0)).unwrap().powers()[0];
    assert_eq!(power.definition().cooldown, 4.0);
    assert_eq!(power.definition().passive_duration, Some(3.0));
}

#[test]
fn missing_catalog_entry_names_the_scenario() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "powers.ron",
        r#"[(name: "dash", charge_time: 0.5, cooldown: 1.0)]"#,
    );
    write(dir.path(), "scenarios/catalog.ron", CATALOG_SCENARIO);

    let err = ContentFactory::new(dir.path())
        .load_scenario("catalog")
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("catalog.ron"), "{message}");
    assert!(message.contains("overdrive"), "{message}");
}
