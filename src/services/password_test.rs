use super::*;

#[test]
fn hash_has_salt_and_sha256_digest() {
    let stored = hash_password("senha123");
    let (salt, hash) = stored.split_once('$').expect("salt separator");
    assert_eq!(salt.len(), SALT_LEN * 2);
    assert_eq!(hash.len(), 64);
    assert!(stored.chars().all(|c| c == '$' || c.is_ascii_hexdigit()));
    assert!(!stored.contains("senha123"));
}

#[test]
fn verify_accepts_only_the_original_password() {
    let stored = hash_password("senha123");
    assert!(verify_password("senha123", &stored));
    assert!(!verify_password("senha124", &stored));
    assert!(!verify_password("", &stored));
}

#[test]
fn same_password_gets_different_salts() {
    assert_ne!(hash_password("senha123"), hash_password("senha123"));
}

#[test]
fn verify_rejects_malformed_stored_value() {
    assert!(!verify_password("senha123", "no-separator"));
}

#[test]
fn digest_covers_salt_hex_text_then_password() {
    let stored = hash_password("senha123");
    let (salt_hex, hash) = stored.split_once('$').expect("salt separator");

    let mut hasher = Sha256::new();
    hasher.update(format!("{salt_hex}senha123").as_bytes());
    assert_eq!(to_hex(&hasher.finalize()), hash);
}
