use num_bigint::BigInt;
use sha1::{Digest, Sha1};

/// Minecraft-style hex digest: the SHA-1 read as a signed big-endian
/// integer, printed in base 16 without leading zeros.
pub fn calc_hash(input: &str) -> String {
    let hash = Sha1::new().chain_update(input).finalize();
    BigInt::from_signed_bytes_be(&hash).to_str_radix(16)
}

/// The `serverId` sent to the session server when joining an online-mode
/// server.
pub fn generate_server_hash(server_id: &str, shared_secret: &[u8], public_key: &[u8]) -> String {
    let hash = Sha1::new()
        .chain_update(server_id.as_bytes())
        .chain_update(shared_secret)
        .chain_update(public_key)
        .finalize();

    BigInt::from_signed_bytes_be(&hash).to_str_radix(16)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calc_hash() {
        assert_eq!(calc_hash("jeb_"), "-7c9d5b0044c130109a5d7b5fb5c317c02b4e28c1");
        assert_eq!(calc_hash("Notch"), "4ed1f46bbe04bc756bcb17c0c7ce3e4632f06a48");
        assert_eq!(calc_hash("simon"), "88e16a1019277b15d58faf0541e11910eb756f6");
    }

    #[test]
    fn test_server_hash_concatenates_inputs() {
        assert_eq!(
            generate_server_hash("Not", b"ch", b""),
            calc_hash("Notch")
        );
        assert_eq!(generate_server_hash("", b"jeb_", b""), calc_hash("jeb_"));
    }
}
