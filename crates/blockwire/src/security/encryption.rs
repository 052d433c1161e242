use aes::cipher::consts::U1;
use aes::cipher::{
    BlockBackend, BlockClosure, BlockSizeUser, KeyIvInit, generic_array::GenericArray,
    inout::InOut,
};
use blockwire_config::LogType;
use blockwire_protocol::minecraft::java::sha1::generate_server_hash;
use rand::RngCore;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey, pkcs1::DecodeRsaPublicKey, pkcs8::DecodePublicKey};
use tracing::debug;

use crate::core::error::RsaError;

pub type Aes128Cfb8Enc = cfb8::Encryptor<aes::Aes128>;
pub type Aes128Cfb8Dec = cfb8::Decryptor<aes::Aes128>;

/// Length of the AES key, which doubles as the IV.
pub const SHARED_SECRET_LEN: usize = 16;

/// Runs a CFB8 cipher over a buffer in place, one byte per block.
pub struct Cfb8Closure<'a> {
    pub data: &'a mut [u8],
}

impl BlockSizeUser for Cfb8Closure<'_> {
    type BlockSize = U1;
}

impl BlockClosure for Cfb8Closure<'_> {
    fn call<B: BlockBackend<BlockSize = Self::BlockSize>>(self, backend: &mut B) {
        for byte in self.data.iter_mut() {
            let input = GenericArray::<u8, U1>::from([*byte]);
            let mut output = GenericArray::<u8, U1>::default();
            let block = InOut::from((&input, &mut output));
            backend.proc_block(block);
            *byte = output[0];
        }
    }
}

pub fn generate_shared_secret() -> [u8; SHARED_SECRET_LEN] {
    let mut secret = [0u8; SHARED_SECRET_LEN];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// Both halves of the stream cipher. Key and IV are the shared secret.
pub fn create_cipher(shared_secret: &[u8; SHARED_SECRET_LEN]) -> (Aes128Cfb8Enc, Aes128Cfb8Dec) {
    let encrypt = Aes128Cfb8Enc::new(shared_secret.into(), shared_secret.into());
    let decrypt = Aes128Cfb8Dec::new(shared_secret.into(), shared_secret.into());
    (encrypt, decrypt)
}

/// Client side of the login encryption exchange.
pub struct EncryptionState {
    shared_secret: [u8; SHARED_SECRET_LEN],
    verify_token: Vec<u8>,
    public_key_der: Vec<u8>,
    server_public_key: RsaPublicKey,
}

impl EncryptionState {
    /// Parses the server key (X.509 SubjectPublicKeyInfo, or bare PKCS#1 as
    /// a fallback) and picks a fresh shared secret.
    pub fn try_new_with_server_data(
        public_key_der: Vec<u8>,
        verify_token: Vec<u8>,
    ) -> Result<Self, RsaError> {
        debug!(
            log_type = LogType::Authentication.as_str(),
            "Public key length: {}, verify token length: {}",
            public_key_der.len(),
            verify_token.len()
        );

        let server_public_key = RsaPublicKey::from_public_key_der(&public_key_der)
            .or_else(|_| RsaPublicKey::from_pkcs1_der(&public_key_der))
            .map_err(|e| {
                RsaError::KeyEncodingError(format!("Failed to parse server public key: {}", e))
            })?;

        Ok(Self {
            shared_secret: generate_shared_secret(),
            verify_token,
            public_key_der,
            server_public_key,
        })
    }

    pub fn shared_secret(&self) -> &[u8; SHARED_SECRET_LEN] {
        &self.shared_secret
    }

    pub fn compute_server_id_hash(&self, server_id: &str) -> String {
        generate_server_hash(server_id, &self.shared_secret, &self.public_key_der)
    }

    pub fn encrypt_shared_secret(&self) -> Result<Vec<u8>, RsaError> {
        self.encrypt(&self.shared_secret)
    }

    pub fn encrypt_verify_token(&self) -> Result<Vec<u8>, RsaError> {
        self.encrypt(&self.verify_token)
    }

    fn encrypt(&self, data: &[u8]) -> Result<Vec<u8>, RsaError> {
        self.server_public_key
            .encrypt(&mut rand::thread_rng(), Pkcs1v15Encrypt, data)
            .map_err(RsaError::from)
    }

    pub fn create_cipher(&self) -> (Aes128Cfb8Enc, Aes128Cfb8Dec) {
        debug!(
            log_type = LogType::Authentication.as_str(),
            "Created AES-128-CFB8 ciphers with 16-byte key/IV"
        );
        create_cipher(&self.shared_secret)
    }
}
