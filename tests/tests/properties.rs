use keyscan_algorithms::ec::{named, Curve, KeyVerifier, Point, PrecomputedTable};
use keyscan_api::ProgramPoint;
use keyscan_scanner::Scanner;
use num_bigint::BigUint;
use proptest::prelude::*;
use std::sync::OnceLock;

fn secp256k1() -> &'static (Curve, PrecomputedTable) {
    static TABLE: OnceLock<(Curve, PrecomputedTable)> = OnceLock::new();
    TABLE.get_or_init(|| {
        let (curve, g) = named::secp256k1().unwrap();
        let table = PrecomputedTable::build(&curve, &g);
        (curve, table)
    })
}

fn multiply(k: u128) -> Point {
    secp256k1().1.scalar_multiply(&BigUint::from(k))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn scalar_multiplication_is_additive(k1 in 1u128..u128::MAX / 2, k2 in 1u128..u128::MAX / 2) {
        let (curve, _) = secp256k1();
        let sum = curve.add(&multiply(k1), &curve.normalize(&multiply(k2)));
        prop_assert!(curve.equals(&sum, &multiply(k1 + k2)));
    }

    #[test]
    fn doubling_agrees_with_addition(k in 1u128..u128::MAX) {
        let (curve, _) = secp256k1();
        let p = multiply(k);
        prop_assert!(curve.check(&p));
        prop_assert!(curve.equals(&curve.double(&p), &curve.add(&p, &curve.normalize(&p))));
    }

    #[test]
    fn equality_ignores_representative(k in 1u128..u128::MAX, lambda in 2u64..u64::MAX) {
        let (curve, _) = secp256k1();
        let p = multiply(k);
        let scaled = curve.rescale(&p, &BigUint::from(lambda));
        prop_assert!(curve.equals(&p, &scaled));
        prop_assert_eq!(curve.normalize(&scaled), curve.normalize(&p));
        prop_assert!(!curve.equals(&scaled, &multiply(k ^ 1)));
    }

    #[test]
    fn negation_cancels(k in 1u128..u128::MAX) {
        let (curve, _) = secp256k1();
        let p = curve.normalize(&multiply(k));
        prop_assert!(curve.add(&multiply(k), &curve.negate(&p)).is_identity());
    }

    #[test]
    fn scanner_finds_any_planted_key(
        k in 1u128..u128::MAX,
        head in prop::collection::vec(any::<u8>(), 0..40),
        tail in prop::collection::vec(any::<u8>(), 0..8),
    ) {
        let (curve, table) = secp256k1();
        let public = curve.normalize(&multiply(k));
        let verifier = KeyVerifier::with_table(table.clone(), public);
        let mut scanner = Scanner::new(verifier, None).unwrap();

        let mut key = [0u8; 32];
        key[16..].copy_from_slice(&k.to_be_bytes());
        let point = ProgramPoint::new(0x10, 0x20, 0x30);
        scanner.observe_write(point, &head);
        scanner.observe_write(point, &key);
        scanner.observe_write(point, &tail);

        prop_assert!(scanner.is_match(&point));
        prop_assert_eq!(scanner.recovered_key(&point), Some(&key[..]));
    }
}
