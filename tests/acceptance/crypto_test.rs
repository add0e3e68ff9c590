use base64::Engine;

use crate::common::TEST_KEY;
use rolegate::crypto::{CryptoError, Decryptor};
use rolegate::grants::{PermissionSet, ShapeError};

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let decryptor = Decryptor::new(TEST_KEY);

    let plaintext = r#"[{"module":"payroll","actions":["read","approve"]}]"#;
    let (ciphertext, iv) = decryptor.encrypt(plaintext).unwrap();

    let decrypted = decryptor.decrypt(&ciphertext, &iv).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_decrypt_with_wrong_key_fails() {
    let encryptor = Decryptor::new(TEST_KEY);
    let (ciphertext, iv) = encryptor.encrypt("secret").unwrap();

    let decryptor = Decryptor::new([9u8; 32]);
    let result = decryptor.decrypt(&ciphertext, &iv);

    assert!(matches!(result, Err(CryptoError::Aead)));
}

#[test]
fn test_decrypt_bad_base64() {
    let decryptor = Decryptor::new(TEST_KEY);

    let result = decryptor.decrypt("not base64!!!", "also not base64!!!");
    assert!(matches!(result, Err(CryptoError::BadEncoding(_))));
}

#[test]
fn test_decrypt_short_iv() {
    let decryptor = Decryptor::new(TEST_KEY);

    let short_iv = base64::engine::general_purpose::STANDARD.encode([0u8; 4]);
    let ciphertext = base64::engine::general_purpose::STANDARD.encode([0u8; 32]);

    let result = decryptor.decrypt(&ciphertext, &short_iv);
    assert!(matches!(result, Err(CryptoError::BadIvLength(4))));
}

#[test]
fn test_decrypt_tampered_ciphertext() {
    let decryptor = Decryptor::new(TEST_KEY);

    let (ciphertext, iv) = decryptor.encrypt("payload").unwrap();
    let mut raw = base64::engine::general_purpose::STANDARD
        .decode(&ciphertext)
        .unwrap();
    raw[0] ^= 0xff;
    let tampered = base64::engine::general_purpose::STANDARD.encode(&raw);

    let result = decryptor.decrypt(&tampered, &iv);
    assert!(matches!(result, Err(CryptoError::Aead)));
}

#[test]
fn test_permission_set_shape_validation() {
    let set =
        PermissionSet::from_plaintext(r#"[{"module":"leave","actions":["read"]}]"#).unwrap();
    assert_eq!(set.len(), 1);
    assert!(set.allows("leave", "read"));

    let result = PermissionSet::from_plaintext("not json at all");
    assert!(matches!(result, Err(ShapeError::Json(_))));

    let result = PermissionSet::from_plaintext(r#"[{"module":"","actions":["read"]}]"#);
    assert!(matches!(result, Err(ShapeError::EmptyModule)));
}

#[test]
fn test_permission_set_missing_actions_defaults_empty() {
    let set = PermissionSet::from_plaintext(r#"[{"module":"crm"}]"#).unwrap();
    assert_eq!(set.len(), 1);
    assert!(!set.allows("crm", "read"));
}
