use super::*;

#[test]
fn same_seed_same_sequence() {
    let mut a = SeededRandom::new(123);
    let mut b = SeededRandom::new(123);
    for _ in 0..32 {
        assert_eq!(a.next(), b.next());
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = SeededRandom::new(1);
    let mut b = SeededRandom::new(2);
    let xs: Vec<f64> = (0..8).map(|_| a.next()).collect();
    let ys: Vec<f64> = (0..8).map(|_| b.next()).collect();
    assert_ne!(xs, ys);
}

#[test]
fn next_and_range_stay_in_bounds() {
    let mut rng = SeededRandom::new(7);
    for _ in 0..1000 {
        let v = rng.next();
        assert!((0.0..1.0).contains(&v));
        let r = rng.range(-0.5, 0.5);
        assert!((-0.5..0.5).contains(&r));
    }
}

#[test]
fn int_is_inclusive_and_covers_both_ends() {
    let mut rng = SeededRandom::new(99);
    let mut seen = [false; 4];
    for _ in 0..500 {
        let v = rng.int(-1, 2);
        assert!((-1..=2).contains(&v));
        seen[(v + 1) as usize] = true;
    }
    assert!(seen.iter().all(|s| *s));
    assert_eq!(rng.int(5, 5), 5);
    assert_eq!(rng.int(5, 1), 5);
}

#[test]
fn choice_signals_empty() {
    let mut rng = SeededRandom::new(0);
    let empty: [u8; 0] = [];
    assert_eq!(rng.choice(&empty), None);
    let items = ["a", "b", "c"];
    let picked = rng.choice(&items).unwrap();
    assert!(items.contains(picked));
}
