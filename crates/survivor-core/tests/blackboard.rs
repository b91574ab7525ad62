use survivor_core::{BbKey, Blackboard, BlackboardError};

const ENERGY: BbKey<f32> = BbKey::new("Energy");
const ENERGY_AS_INT: BbKey<i32> = BbKey::new("Energy");
const LABEL: BbKey<String> = BbKey::new("Behavior");

#[test]
fn get_after_add_returns_the_added_value() {
    let mut bb = Blackboard::new();
    bb.add(ENERGY, 7.5).unwrap();
    bb.add(LABEL, "Wander".to_string()).unwrap();

    assert_eq!(bb.get(ENERGY).copied(), Ok(7.5));
    assert_eq!(bb.get(LABEL).map(|s| s.as_str()), Ok("Wander"));
    assert_eq!(bb.len(), 2);
}

#[test]
fn add_rejects_duplicate_key() {
    let mut bb = Blackboard::new();
    bb.add(ENERGY, 1.0).unwrap();

    assert_eq!(
        bb.add(ENERGY, 2.0),
        Err(BlackboardError::DuplicateKey("Energy"))
    );
    assert_eq!(bb.get(ENERGY).copied(), Ok(1.0));
}

#[test]
fn mismatched_type_fails_without_touching_output_or_store() {
    let mut bb = Blackboard::new();
    bb.add(ENERGY, 3.0).unwrap();

    let mut out = -1;
    match bb.get(ENERGY_AS_INT) {
        Ok(v) => out = *v,
        Err(err) => assert!(err.is_missing_fact()),
    }
    assert_eq!(out, -1);

    assert!(matches!(
        bb.change(ENERGY_AS_INT, 9),
        Err(BlackboardError::TypeMismatch { key: "Energy", .. })
    ));
    assert_eq!(bb.get(ENERGY).copied(), Ok(3.0));
    assert!(!bb.contains(ENERGY_AS_INT));
    assert!(bb.contains(ENERGY));
}

#[test]
fn change_overwrites_existing_and_rejects_absent_key() {
    let mut bb = Blackboard::new();
    assert_eq!(
        bb.change(ENERGY, 2.0),
        Err(BlackboardError::MissingKey("Energy"))
    );
    assert!(bb.is_empty());

    bb.add(ENERGY, 2.0).unwrap();
    bb.change(ENERGY, 4.0).unwrap();
    assert_eq!(bb.get(ENERGY).copied(), Ok(4.0));

    *bb.get_mut(ENERGY).unwrap() += 1.0;
    assert_eq!(bb.get(ENERGY).copied(), Ok(5.0));
}

#[test]
fn key_names_are_sorted_and_stable() {
    let mut bb = Blackboard::new();
    bb.add(LABEL, String::new()).unwrap();
    bb.add(ENERGY, 0.0).unwrap();

    assert_eq!(bb.key_names().collect::<Vec<_>>(), vec!["Behavior", "Energy"]);
    assert!(bb.contains_name("Behavior"));
    assert!(!bb.contains_name("Target"));
}
