//! Unit tests for the CryptoService public API.
//!
//! Exercises PBKDF2 key derivation and AES-256-GCM encrypt/decrypt, the
//! primitives the session cache relies on.

use markstash::services::crypto_service::{CryptoService, CryptoServiceTrait, KEY_LENGTH};
use markstash::types::crypto::EncryptedData;

#[test]
fn test_derive_key_produces_correct_length() {
    let service = CryptoService::new();
    let key = service.derive_key("test-passphrase", b"fixed-salt").unwrap();
    assert_eq!(key.len(), KEY_LENGTH);
}

#[test]
fn test_derive_key_deterministic() {
    let service = CryptoService::new();
    let key1 = service.derive_key("passphrase", b"salt-a").unwrap();
    let key2 = service.derive_key("passphrase", b"salt-a").unwrap();
    assert_eq!(key1, key2);
}

#[test]
fn test_derive_key_different_salts_produce_different_keys() {
    let service = CryptoService::new();
    let key1 = service.derive_key("passphrase", b"salt-a").unwrap();
    let key2 = service.derive_key("passphrase", b"salt-b").unwrap();
    assert_ne!(key1, key2);
}

#[test]
fn test_encrypt_decrypt_roundtrip() {
    let service = CryptoService::new();
    let key = service.generate_random_bytes(KEY_LENGTH);
    let plaintext = br#"{"user_id":"user-1","email":"a@example.com"}"#;

    let encrypted = service.encrypt_aes256gcm(plaintext, &key).unwrap();
    let decrypted = service.decrypt_aes256gcm(&encrypted, &key).unwrap();

    assert_eq!(decrypted, plaintext);
}

#[test]
fn test_ciphertext_differs_from_plaintext() {
    let service = CryptoService::new();
    let key = service.generate_random_bytes(KEY_LENGTH);
    let plaintext = b"session payload";

    let encrypted = service.encrypt_aes256gcm(plaintext, &key).unwrap();
    assert_ne!(encrypted.ciphertext, plaintext.to_vec());
}

#[test]
fn test_encrypt_invalid_key_length() {
    let service = CryptoService::new();
    let short_key = vec![0u8; 16];
    let result = service.encrypt_aes256gcm(b"test", &short_key);
    assert!(result.is_err());
}

#[test]
fn test_decrypt_with_wrong_key_fails() {
    let service = CryptoService::new();
    let key1 = service.generate_random_bytes(KEY_LENGTH);
    let key2 = service.generate_random_bytes(KEY_LENGTH);

    let encrypted = service.encrypt_aes256gcm(b"secret data", &key1).unwrap();
    let result = service.decrypt_aes256gcm(&encrypted, &key2);
    assert!(result.is_err());
}

#[test]
fn test_decrypt_tampered_ciphertext_fails() {
    let service = CryptoService::new();
    let key = service.generate_random_bytes(KEY_LENGTH);

    let mut encrypted = service.encrypt_aes256gcm(b"sensitive data", &key).unwrap();
    encrypted.ciphertext[0] ^= 0xFF;
    let result = service.decrypt_aes256gcm(&encrypted, &key);
    assert!(result.is_err());
}

#[test]
fn test_decrypt_invalid_iv_length() {
    let service = CryptoService::new();
    let key = service.generate_random_bytes(KEY_LENGTH);
    let encrypted = EncryptedData {
        ciphertext: vec![0u8; 10],
        iv: vec![0u8; 8],
        auth_tag: vec![0u8; 16],
    };
    let result = service.decrypt_aes256gcm(&encrypted, &key);
    assert!(result.is_err());
}

#[test]
fn test_generate_random_bytes_correct_length() {
    let service = CryptoService::new();
    assert_eq!(service.generate_random_bytes(0).len(), 0);
    assert_eq!(service.generate_random_bytes(16).len(), 16);
    assert_eq!(service.generate_random_bytes(64).len(), 64);
}

#[test]
fn test_generate_random_bytes_unique() {
    let service = CryptoService::new();
    let a = service.generate_random_bytes(16);
    let b = service.generate_random_bytes(16);
    assert_ne!(a, b);
}

#[test]
fn test_zeroize_memory_clears_buffer() {
    let service = CryptoService::new();
    let mut data = vec![0xFFu8; 32];
    service.zeroize_memory(&mut data);
    assert!(data.iter().all(|&b| b == 0));
}
