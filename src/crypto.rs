use base64::Engine;
use chacha20poly1305::{
    aead::{Aead, KeyInit, OsRng},
    ChaCha20Poly1305, Nonce,
};
use rand::RngCore;
use std::env;
use thiserror::Error;

pub const MASTER_KEY_ENV: &str = "ROLEGATE_MASTER_KEY";

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("ROLEGATE_MASTER_KEY environment variable not set")]
    MissingKey,
    #[error("master key is not valid hex: {0}")]
    BadKeyEncoding(#[from] hex::FromHexError),
    #[error("master key must be 32 bytes (64 hex characters)")]
    BadKeyLength,
    #[error("payload is not valid base64: {0}")]
    BadEncoding(#[from] base64::DecodeError),
    #[error("iv must be 12 bytes, got {0}")]
    BadIvLength(usize),
    #[error("decryption failed")]
    Aead,
    #[error("decrypted payload is not valid UTF-8")]
    BadUtf8(#[from] std::string::FromUtf8Error),
}

pub struct Decryptor {
    key: [u8; 32],
}

impl Decryptor {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    pub fn from_env() -> Result<Self, CryptoError> {
        let key_hex = env::var(MASTER_KEY_ENV).map_err(|_| CryptoError::MissingKey)?;
        let key_bytes = hex::decode(&key_hex)?;

        if key_bytes.len() != 32 {
            return Err(CryptoError::BadKeyLength);
        }

        let mut key = [0u8; 32];
        key.copy_from_slice(&key_bytes);

        Ok(Self { key })
    }

    pub fn decrypt(&self, ciphertext_b64: &str, iv_b64: &str) -> Result<String, CryptoError> {
        let iv = base64::engine::general_purpose::STANDARD.decode(iv_b64)?;

        if iv.len() != 12 {
            return Err(CryptoError::BadIvLength(iv.len()));
        }

        let ciphertext = base64::engine::general_purpose::STANDARD.decode(ciphertext_b64)?;

        let cipher = ChaCha20Poly1305::new(&self.key.into());
        let nonce = Nonce::from_slice(&iv);

        let plaintext = cipher
            .decrypt(nonce, ciphertext.as_slice())
            .map_err(|_| CryptoError::Aead)?;

        Ok(String::from_utf8(plaintext)?)
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<(String, String), CryptoError> {
        let mut iv = [0u8; 12];
        OsRng.fill_bytes(&mut iv);

        let cipher = ChaCha20Poly1305::new(&self.key.into());
        let nonce = Nonce::from_slice(&iv);

        let ciphertext = cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::Aead)?;

        Ok((
            base64::engine::general_purpose::STANDARD.encode(&ciphertext),
            base64::engine::general_purpose::STANDARD.encode(iv),
        ))
    }
}
