//! Test vectors and fixtures for the keyscan integration tests

pub mod vectors {
    //! Known keypairs

    /// secp256k1 private key, big-endian hex
    pub const SECP256K1_PRIV: &str =
        "83847e2207c73ec40381dc389adf4d69b0e5d8ed28278857648cebc6bfe7ba93";
    /// Matching public key x-coordinate
    pub const SECP256K1_PUB_X: &str =
        "0xc215aa61a2ee4cf174068f33fa58de9a5af6b95bc318e5369bebeefd00766cfe";
    /// Matching public key y-coordinate
    pub const SECP256K1_PUB_Y: &str =
        "0xbd76f2b9200f7b530a79ae58098463931c349f2dbafd5b222d744a099c13b73a";

    /// The private key as bytes
    pub fn secp256k1_private_key() -> Vec<u8> {
        hex::decode(SECP256K1_PRIV).expect("vector is valid hex")
    }
}

use keyscan_params::SECP256K1;
use keyscan_scanner::{AdmissionFilter, ScanConfig, Scanner};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Config for the secp256k1 vector keypair
pub fn secp256k1_config() -> ScanConfig {
    ScanConfig::named(&SECP256K1, vectors::SECP256K1_PUB_X, vectors::SECP256K1_PUB_Y)
}

/// Scanner hunting the secp256k1 vector key
pub fn secp256k1_scanner(filter: Option<AdmissionFilter>) -> Scanner {
    let verifier = secp256k1_config()
        .curve
        .build_verifier()
        .expect("vector config is valid");
    Scanner::new(verifier, filter).expect("32-byte keys fit")
}

/// `before` random bytes, the private key, then `after` random bytes
pub fn key_in_noise(seed: u64, before: usize, after: usize) -> Vec<u8> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut head = vec![0u8; before];
    rng.fill_bytes(&mut head);
    let mut tail = vec![0u8; after];
    rng.fill_bytes(&mut tail);

    let mut stream = head;
    stream.extend_from_slice(&vectors::secp256k1_private_key());
    stream.extend_from_slice(&tail);
    stream
}
