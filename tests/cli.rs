use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::tempdir;

fn bytecrypt() -> Command {
    let mut cmd = Command::cargo_bin("bytecrypt").unwrap();
    cmd.env_remove("BYTECRYPT_KEYS_DIR")
        .env_remove("BYTECRYPT_KEY_SIZE")
        .env_remove("BYTECRYPT_MR_ROUNDS");
    cmd
}

#[test]
fn test_aes_file_workflow() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("input.txt");
    let encrypted_path = temp_dir.path().join("out/encrypted.bin");
    let decrypted_path = temp_dir.path().join("decrypted.txt");

    let input_content = "Hello AES! This file spans more than one block.";
    fs::write(&input_path, input_content).unwrap();

    bytecrypt()
        .args(["encrypt", "--algorithm", "aes", "--key", "0123456789abcdef"])
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&encrypted_path)
        .assert()
        .success();

    let encrypted = fs::read(&encrypted_path).unwrap();
    assert_eq!(encrypted.len() % 16, 0);
    assert_ne!(encrypted, input_content.as_bytes());

    bytecrypt()
        .args(["decrypt", "--algorithm", "AES", "--key-hex", "30313233343536373839616263646566"])
        .arg("--input")
        .arg(&encrypted_path)
        .arg("--output")
        .arg(&decrypted_path)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&decrypted_path).unwrap(), input_content);
}

#[test]
fn test_tripledes_wrong_key_fails() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("input.txt");
    let encrypted_path = temp_dir.path().join("encrypted.bin");

    fs::write(&input_path, "Hello TripleDES!").unwrap();

    bytecrypt()
        .args(["encrypt", "-a", "3des", "-k", "short"])
        .arg("-i")
        .arg(&input_path)
        .arg("-o")
        .arg(&encrypted_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid 3DES key length"));

    assert!(!encrypted_path.exists());
}

#[test]
fn test_missing_symmetric_key() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("input.txt");
    fs::write(&input_path, "data").unwrap();

    bytecrypt()
        .args(["encrypt", "--algorithm", "des"])
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(temp_dir.path().join("out.bin"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("needs --key"));
}

#[test]
fn test_unknown_algorithm() {
    bytecrypt()
        .args(["encrypt", "--algorithm", "rot13", "--input", "a", "--output", "b"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown algorithm"));
}

#[test]
fn test_rsa_keygen_encrypt_decrypt_workflow() {
    let temp_dir = tempdir().unwrap();
    let keys_dir = temp_dir.path().join("keys");
    let input_path = temp_dir.path().join("message.txt");
    let encrypted_path = temp_dir.path().join("message.enc");
    let decrypted_path = temp_dir.path().join("message.dec");

    let message = "RSA-OAEP over more than one chunk. ".repeat(3);
    fs::write(&input_path, &message).unwrap();

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["keygen", "--key-size", "1024"])
        .assert()
        .success()
        .stdout(predicate::str::contains("-----BEGIN RSA PUBLIC KEY-----"))
        .stdout(predicate::str::contains("Key Size: 1024 bits"));

    assert!(keys_dir.join("public_key.json").exists());
    assert!(keys_dir.join("private_key.json").exists());

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["encrypt", "--algorithm", "rsa"])
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&encrypted_path)
        .assert()
        .success();

    assert_eq!(fs::read(&encrypted_path).unwrap().len(), 2 * 128);

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["decrypt", "--algorithm", "rsa"])
        .arg("--input")
        .arg(&encrypted_path)
        .arg("--output")
        .arg(&decrypted_path)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&decrypted_path).unwrap(), message);

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["export", "--private"])
        .assert()
        .success()
        .stdout(predicate::str::contains("d (private exponent): "));
}

#[test]
fn test_rsa_ignores_keygen_settings_with_stored_keys() {
    let temp_dir = tempdir().unwrap();
    let keys_dir = temp_dir.path().join("keys");
    let input_path = temp_dir.path().join("message.txt");
    let encrypted_path = temp_dir.path().join("message.enc");
    let decrypted_path = temp_dir.path().join("message.dec");
    fs::write(&input_path, "stored keys win").unwrap();

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["keygen", "--key-size", "1024"])
        .assert()
        .success();

    bytecrypt()
        .env("BYTECRYPT_KEY_SIZE", "512")
        .env("BYTECRYPT_MR_ROUNDS", "0")
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["encrypt", "--algorithm", "rsa"])
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(&encrypted_path)
        .assert()
        .success();

    bytecrypt()
        .env("BYTECRYPT_KEY_SIZE", "512")
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["decrypt", "--algorithm", "rsa"])
        .arg("--input")
        .arg(&encrypted_path)
        .arg("--output")
        .arg(&decrypted_path)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&decrypted_path).unwrap(), "stored keys win");

    bytecrypt()
        .env("BYTECRYPT_KEY_SIZE", "512")
        .arg("--keys-dir")
        .arg(&keys_dir)
        .arg("keygen")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported RSA key size: 512 bits"));
}

#[test]
fn test_rsa_without_keys() {
    let temp_dir = tempdir().unwrap();
    let input_path = temp_dir.path().join("message.txt");
    fs::write(&input_path, "nobody can read this").unwrap();

    bytecrypt()
        .arg("--keys-dir")
        .arg(temp_dir.path().join("empty"))
        .args(["encrypt", "--algorithm", "rsa"])
        .arg("--input")
        .arg(&input_path)
        .arg("--output")
        .arg(temp_dir.path().join("message.enc"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("no public key loaded"));
}

#[test]
fn test_import_then_export_public() {
    let temp_dir = tempdir().unwrap();
    let keys_dir = temp_dir.path().join("keys");
    let record_path = temp_dir.path().join("pub.json");
    fs::write(&record_path, r#"{"e": 17, "n": 3233, "key_size": 12}"#).unwrap();

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .arg("import-public")
        .arg(&record_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 12-bit public key"));

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("e (exponent): 17"))
        .stdout(predicate::str::contains("n (modulus): 3233"));

    bytecrypt()
        .arg("--keys-dir")
        .arg(&keys_dir)
        .args(["export", "--private"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no private key"));
}
