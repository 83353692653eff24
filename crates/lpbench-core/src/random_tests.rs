//! Tests for seeded data generation

use super::random::*;

#[test]
fn test_same_seed_same_data() {
    let a = randn(&mut seeded_rng(7), 4, 5);
    let b = randn(&mut seeded_rng(7), 4, 5);
    assert_eq!(a, b);
}

#[test]
fn test_different_seed_different_data() {
    let a = randn(&mut seeded_rng(1), 4, 4);
    let b = randn(&mut seeded_rng(2), 4, 4);
    assert_ne!(a, b);
}

#[test]
fn test_abs_randn_is_positive() {
    let a = abs_randn(&mut seeded_rng(3), 20, 10, 1e-6);
    assert_eq!(a.shape(), (20, 10));
    assert!(a.min().unwrap() >= 1e-6);
}

#[test]
fn test_randn_has_both_signs() {
    let a = randn(&mut seeded_rng(3), 20, 20);
    assert!(a.min().unwrap() < 0.0);
    assert!(a.max().unwrap() > 0.0);
}

#[test]
fn test_rademacher_entries() {
    let mut rng = seeded_rng(11);
    let mut z = vec![0.0; 64];
    rademacher(&mut rng, &mut z);
    assert!(z.iter().all(|&v| v == 1.0 || v == -1.0));
    assert!(z.iter().any(|&v| v == 1.0));
    assert!(z.iter().any(|&v| v == -1.0));
}
