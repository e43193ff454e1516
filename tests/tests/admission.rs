use keyscan_api::ProgramPoint;
use keyscan_scanner::{AdmissionFilter, Scanner};
use keyscan_tests::{key_in_noise, secp256k1_config, secp256k1_scanner};

const TAP: ProgramPoint = ProgramPoint::new(0x1, 0x2, 0x3);
const STRAY: ProgramPoint = ProgramPoint::new(0x9, 0x9, 0x9);

#[test]
fn test_key_at_unlisted_point_is_not_found() {
    let filter = AdmissionFilter::new([TAP]);
    let mut scanner = secp256k1_scanner(Some(filter));

    scanner.observe_write(STRAY, &key_in_noise(10, 8, 8));
    assert!(scanner.matches().is_empty());
    assert_eq!(scanner.tracked_contexts(), 0);
    assert_eq!(scanner.stats().bytes_filtered, 48);

    scanner.observe_write(TAP, &key_in_noise(10, 8, 8));
    assert_eq!(scanner.matches().iter().collect::<Vec<_>>(), vec![&TAP]);
}

#[test]
fn test_empty_candidate_list_admits_nothing() {
    let filter = AdmissionFilter::parse("").unwrap();
    let mut scanner = secp256k1_scanner(Some(filter));
    scanner.observe_write(TAP, &key_in_noise(11, 0, 0));
    assert!(scanner.matches().is_empty());
}

#[test]
fn test_taps_from_config_drive_filter_and_gate() {
    let config = secp256k1_config().with_taps(vec![TAP, ProgramPoint::new(0x7, 0x4080, 0x3)]);
    let mut scanner = Scanner::from_config(&config).unwrap();
    assert_eq!(scanner.filter().map(AdmissionFilter::len), Some(2));

    let mut gate = scanner.gate();
    assert!(gate.before_region(0x3, 0x4000));
    gate.after_region(0x4000, 0x80);
    assert!(!gate.before_region(0x3, 0x5000));
    assert!(!gate.before_region(0x8, 0x4000));
    assert_eq!(gate.stats().instrumented, 1);
    assert_eq!(gate.stats().total, 2);

    scanner.observe_write(STRAY, &key_in_noise(12, 1, 1));
    assert!(scanner.matches().is_empty());
}

#[test]
fn test_context_capacity_from_config() {
    let config = secp256k1_config().with_max_contexts(1);
    let mut scanner = Scanner::from_config(&config).unwrap();
    scanner.observe_byte(STRAY, 0);
    scanner.observe_write(TAP, &key_in_noise(13, 0, 0));
    assert!(scanner.matches().is_empty());
    assert_eq!(scanner.dropped_bytes(), 32);
}
