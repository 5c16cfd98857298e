use battle_core::{Archetype, Battle, RngRolls, Side, TurnManager};

#[test]
fn equal_speed_coin_flip_is_roughly_fair() {
    const TRIALS: u64 = 4_000;

    let side_one_first = (0..TRIALS)
        .filter(|&seed| {
            let mut battle = Battle::new(
                Archetype::Fire.build("Left").unwrap(),
                Archetype::Fire.build("Right").unwrap(),
                RngRolls::seeded(seed),
            );
            battle.start().unwrap() == Side::One
        })
        .count() as f64;

    let ratio = side_one_first / TRIALS as f64;
    assert!((0.45..=0.55).contains(&ratio), "side one opened {ratio:.3} of the time");
}

#[test]
fn first_mover_is_not_reevaluated() {
    let mut rng = RngRolls::seeded(11);
    let mut battle = Battle::new(
        Archetype::Water.build_default().unwrap(),
        Archetype::Earth.build_default().unwrap(),
        &mut rng,
    );
    assert_eq!(battle.start(), Ok(Side::One));

    // Earth guards every turn.
    for _ in 0..3 {
        battle.execute_action(0).unwrap();
        battle.end_turn().unwrap();
        battle.execute_action(1).unwrap();
        battle.end_turn().unwrap();
        assert_eq!(battle.current_actor().unwrap().name(), "Marin");
    }
    assert_eq!(battle.first_mover(), Some(Side::One));
    assert_eq!(battle.turn_count(), 4);
}

#[test]
fn faster_side_never_flips() {
    let mut rng = RngRolls::seeded(3);
    for _ in 0..100 {
        assert_eq!(TurnManager::determine_first_mover(35, 12, &mut rng), Side::One);
        assert_eq!(TurnManager::determine_first_mover(12, 35, &mut rng), Side::Two);
    }
}
