use toolcraft_assets::registry_from_files;
use toolcraft_core::{RegistryKey, SimTick};
use toolcraft_mining::{calculate_damage, ticks_to_break, BreakSession, BreakStatus, PlayerState};
use toolcraft_testkit::record_tick_trace;

#[test]
fn iron_pickaxe_breaks_stone_in_eight_ticks() {
    let registry = registry_from_files::<&str>(&[]).expect("builtin registry");
    let stone = registry
        .resolve_block(&RegistryKey::native("stone").unwrap())
        .unwrap();
    let pickaxe = registry
        .resolve_tool(&RegistryKey::native("iron_pickaxe").unwrap())
        .unwrap();

    let damage = calculate_damage(&PlayerState::survival(), stone, pickaxe);
    assert_eq!(ticks_to_break(damage), Some(8));

    let report = record_tick_trace(
        "stone_iron_pickaxe",
        100,
        BreakSession::new(SimTick::ZERO, damage),
        |_, session| session.tick() == BreakStatus::Broken,
        |_, session| session.is_broken(),
    );
    assert_eq!(report.frames.len(), 9);
    assert!(report.frames[..8].iter().all(|frame| !frame.snapshot));
    assert!(report.frames[8].snapshot);
}
