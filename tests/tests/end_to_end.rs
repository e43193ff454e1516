use keyscan_api::ProgramPoint;
use keyscan_scanner::{write_matches, WindowState};
use keyscan_tests::{key_in_noise, secp256k1_config, secp256k1_scanner, vectors};

const TAP: ProgramPoint = ProgramPoint::new(0x1, 0x2, 0x3);

#[test]
fn test_key_between_random_bytes_is_found() {
    let mut scanner = secp256k1_scanner(None);
    assert_eq!(scanner.key_size(), 32);

    for byte in key_in_noise(1, 48, 48) {
        scanner.observe_byte(TAP, byte);
    }

    assert_eq!(scanner.matches().iter().collect::<Vec<_>>(), vec![&TAP]);
    assert_eq!(
        scanner.recovered_key(&TAP),
        Some(vectors::secp256k1_private_key().as_slice())
    );
    assert_eq!(scanner.window_state(&TAP), WindowState::Filled);
    // One verification per byte from the 32nd on
    assert_eq!(scanner.stats().verifications, 128 - 31);
}

#[test]
fn test_key_split_across_writes_and_points() {
    let stream = key_in_noise(2, 20, 5);
    let other = ProgramPoint::new(0x1, 0x2, 0x4);

    let mut scanner = secp256k1_scanner(None);
    for chunk in stream.chunks(7) {
        scanner.observe_write(TAP, chunk);
        // Interleaved writes at another point do not disturb TAP's window
        scanner.observe_write(other, &[0xff, 0x00]);
    }

    assert!(scanner.is_match(&TAP));
    assert!(!scanner.is_match(&other));
    assert_eq!(scanner.tracked_contexts(), 2);
}

#[test]
fn test_key_ending_exactly_at_stream_end() {
    let mut scanner = secp256k1_scanner(None);
    scanner.observe_write(TAP, &key_in_noise(3, 0, 0));
    assert!(scanner.is_match(&TAP));

    // One byte short never fills the window
    let mut short = secp256k1_scanner(None);
    short.observe_write(TAP, &vectors::secp256k1_private_key()[..31]);
    assert_eq!(short.window_state(&TAP), WindowState::Filling);
    assert!(short.matches().is_empty());
}

#[test]
fn test_noise_alone_never_matches() {
    let mut scanner = secp256k1_scanner(None);
    let mut stream = key_in_noise(4, 64, 0);
    // Drop the key, keeping only the noise
    stream.truncate(64);
    scanner.observe_write(TAP, &stream);
    assert!(scanner.matches().is_empty());
}

#[test]
fn test_report_from_scan() {
    let scanner = {
        let mut s = keyscan_scanner::Scanner::from_config(&secp256k1_config()).unwrap();
        s.observe_write(TAP, &key_in_noise(5, 3, 3));
        s
    };
    let mut out = Vec::new();
    write_matches(scanner.matches(), &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "0000000000000001 0000000000000002 0000000000000003\n"
    );
}
