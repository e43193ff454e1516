use keyscan_api::{Error, ProgramPoint};
use keyscan_params::{DEFAULT_CANDIDATES_FILE, DEFAULT_CONFIG_FILE, DEFAULT_REPORT_FILE};
use keyscan_scanner::{
    replay, replay_files, write_match_file, ReplaySummary, ScanConfig, Scanner, TapIndex, TapRecord,
};
use keyscan_tests::{key_in_noise, secp256k1_scanner, vectors};
use std::fs;
use std::path::PathBuf;

const TAP: ProgramPoint = ProgramPoint::new(0x1, 0x2, 0x3);
const OTHER: ProgramPoint = ProgramPoint::new(0x1, 0x5, 0x3);

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("keyscan-{}-{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

/// TAP's bytes are split over two records with OTHER in between
fn recording() -> (TapIndex, Vec<u8>) {
    let key = key_in_noise(20, 5, 4);
    let (first, second) = key.split_at(20);
    let index = TapIndex::new(
        4,
        vec![
            TapRecord::new(TAP, first.len() as u64),
            TapRecord::new(OTHER, 3),
            TapRecord::new(TAP, second.len() as u64),
        ],
    )
    .unwrap();
    let mut dump = first.to_vec();
    dump.extend_from_slice(&[0xaa, 0xbb, 0xcc]);
    dump.extend_from_slice(second);
    (index, dump)
}

#[test]
fn test_replay_finds_key_split_over_records() {
    let (index, dump) = recording();
    let mut scanner = secp256k1_scanner(None);
    let summary = replay(&index, &dump, &mut scanner).unwrap();

    assert_eq!(
        summary,
        ReplaySummary {
            records: 3,
            bytes: 44
        }
    );
    assert_eq!(scanner.matches().iter().collect::<Vec<_>>(), vec![&TAP]);
    assert_eq!(index.extract(&dump, &TAP).unwrap(), key_in_noise(20, 5, 4));
}

#[test]
fn test_truncated_dump_leaves_scanner_untouched() {
    let (index, dump) = recording();
    let mut scanner = secp256k1_scanner(None);
    let err = replay(&index, &dump[..dump.len() - 1], &mut scanner).unwrap_err();
    assert!(matches!(err, Error::SerializationError { .. }));
    assert_eq!(scanner.stats().bytes_observed, 0);
}

#[test]
fn test_replay_from_files_and_report() {
    let dir = scratch_dir("replay");
    let (index, dump) = recording();
    fs::write(dir.join("tap_writes.idx"), index.to_bytes()).unwrap();
    fs::write(dir.join("tap_writes.bin"), &dump).unwrap();

    let mut scanner = secp256k1_scanner(None);
    replay_files(
        dir.join("tap_writes.idx"),
        dir.join("tap_writes.bin"),
        &mut scanner,
    )
    .unwrap();

    let report = dir.join(DEFAULT_REPORT_FILE);
    write_match_file(&report, scanner.matches()).unwrap();
    assert_eq!(
        fs::read_to_string(&report).unwrap(),
        "0000000000000001 0000000000000002 0000000000000003\n"
    );

    assert!(matches!(
        replay_files(dir.join("missing.idx"), dir.join("tap_writes.bin"), &mut scanner),
        Err(Error::Io { .. })
    ));
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_config_directory_with_candidates() {
    let dir = scratch_dir("config");
    fs::write(
        dir.join(DEFAULT_CONFIG_FILE),
        format!(
            "# target key\n\
             p: 0xfffffffffffffffffffffffffffffffffffffffffffffffffffffffefffffc2f\n\
             a: 0\n\
             b: 7\n\
             g1: 0x79be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798\n\
             g2: 0x483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8\n\
             pub1: {}\n\
             pub2: {}\n",
            vectors::SECP256K1_PUB_X,
            vectors::SECP256K1_PUB_Y
        ),
    )
    .unwrap();

    // Without a candidate list every write is scanned
    let config = ScanConfig::load_dir(&dir).unwrap();
    assert!(config.taps.is_none());

    fs::write(dir.join(DEFAULT_CANDIDATES_FILE), "1 2 3\n").unwrap();
    let config = ScanConfig::load_dir(&dir).unwrap();
    assert_eq!(config.taps, Some(vec![TAP]));

    let mut scanner = Scanner::from_config(&config).unwrap();
    scanner.observe_write(OTHER, &key_in_noise(21, 0, 0));
    scanner.observe_write(TAP, &key_in_noise(21, 0, 0));
    assert_eq!(scanner.matches().iter().collect::<Vec<_>>(), vec![&TAP]);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_toml_config_file() {
    let dir = scratch_dir("toml");
    let path = dir.join("scan.toml");
    fs::write(
        &path,
        format!(
            "curve = \"secp256k1\"\npubx = \"{}\"\npuby = \"{}\"\n\n[[tap]]\ncaller = \"0x1\"\npc = \"0x2\"\ncontext = \"0x3\"\n",
            vectors::SECP256K1_PUB_X,
            vectors::SECP256K1_PUB_Y
        ),
    )
    .unwrap();

    let config = ScanConfig::load(&path).unwrap();
    assert_eq!(config.taps, Some(vec![TAP]));
    assert_eq!(Scanner::from_config(&config).unwrap().key_size(), 32);

    // Same text under a non-TOML name goes through the line parser and
    // finds none of its keys
    let legacy = dir.join("scan.txt");
    fs::copy(&path, &legacy).unwrap();
    let config = ScanConfig::load(&legacy).unwrap();
    assert!(matches!(
        config.curve.build_verifier(),
        Err(Error::MissingParameter { field: "p" })
    ));
    fs::remove_dir_all(&dir).unwrap();
}
