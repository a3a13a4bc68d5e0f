//! The full seed lifecycle: request payload, authority reply, decryption,
//! persistence, code generation, verification and the cron line.

use data_encoding::BASE64;
use pki2fa_crypto_core::{
    encrypt_oaep, public_key_from_pem, CryptoError, TotpConfig, MIN_KEY_BITS,
};
use pki2fa_provisioning::{
    cron_tick, generate_and_store_keypair, load_private_key, load_public_key_text,
    read_encrypted_seed, write_encrypted_seed, DecryptSeedRequest, ProvisionError, SeedRequest,
    SeedResponse, SeedService, SeedStore, Verify2faRequest,
};
use tempfile::TempDir;

use super::SEED;

/// What the authority does with a request: encrypt a seed to the key in it.
fn authority_reply(request_json: &str, seed: &str) -> String {
    let request: SeedRequest = serde_json::from_str(request_json).unwrap();
    let public = public_key_from_pem(&request.public_key).unwrap();
    let ciphertext = encrypt_oaep(seed.as_bytes(), &public).unwrap();
    serde_json::json!({
        "status": "success",
        "encrypted_seed": BASE64.encode(&ciphertext),
    })
    .to_string()
}

#[test]
fn provision_then_generate_verify_and_log() {
    let dir = TempDir::new().unwrap();
    let private_path = dir.path().join("student_private.pem");
    let public_path = dir.path().join("student_public.pem");
    let encrypted_path = dir.path().join("encrypted_seed.txt");
    generate_and_store_keypair(&private_path, &public_path, MIN_KEY_BITS, false).unwrap();

    // Holder builds the request from the stored public key.
    let request = SeedRequest::new(
        "22MH1A05H9",
        "https://github.com/example/pki-2fa",
        load_public_key_text(&public_path).unwrap(),
    )
    .unwrap();
    let reply = authority_reply(&request.to_json().unwrap(), SEED);

    // Reply is stored, then decrypted through the endpoint handler.
    let encrypted = SeedResponse::from_json(&reply)
        .unwrap()
        .into_encrypted_seed()
        .unwrap();
    write_encrypted_seed(&encrypted_path, &encrypted).unwrap();

    let store = SeedStore::new(dir.path().join("data/seed.txt"));
    let service = SeedService::new(store.clone(), TotpConfig::default());
    let response = service
        .decrypt_seed(
            &DecryptSeedRequest {
                encrypted_seed: Some(read_encrypted_seed(&encrypted_path).unwrap()),
            },
            &load_private_key(&private_path).unwrap(),
        )
        .unwrap();
    assert_eq!(response.status, "ok");
    assert_eq!(response.seed_preview, "00010203...");
    assert_eq!(store.load().unwrap().unwrap().expose(), SEED);

    // Codes follow the stored seed.
    let generated = service.generate_2fa(1_234_567_890).unwrap();
    assert_eq!(generated.code, "232605");
    assert_eq!(generated.valid_for, 30);

    let check = Verify2faRequest {
        code: Some(generated.code),
    };
    assert!(service.verify_2fa(&check, 1_234_567_890 + 30).unwrap().valid);
    assert!(!service.verify_2fa(&check, 1_234_567_890 + 60).unwrap().valid);

    assert_eq!(
        cron_tick(&store, 1_234_567_890).unwrap().as_deref(),
        Some("2009-02-13 23:31:30 - 2FA Code: 232605")
    );
}

#[test]
fn failed_decryption_keeps_previous_seed() {
    let dir = TempDir::new().unwrap();
    let private_path = dir.path().join("student_private.pem");
    let public_path = dir.path().join("student_public.pem");
    let pair =
        generate_and_store_keypair(&private_path, &public_path, MIN_KEY_BITS, false).unwrap();

    let store = SeedStore::new(dir.path().join("seed.txt"));
    let service = SeedService::new(store.clone(), TotpConfig::default());

    let good = BASE64.encode(&encrypt_oaep(SEED.as_bytes(), pair.public_key()).unwrap());
    service
        .decrypt_seed(
            &DecryptSeedRequest {
                encrypted_seed: Some(good),
            },
            pair.private_key(),
        )
        .unwrap();

    // Ciphertext for somebody else: generic failure, seed file untouched.
    let other_seed = "f".repeat(64);
    let foreign = BASE64.encode(
        &encrypt_oaep(other_seed.as_bytes(), super::authority().public_key()).unwrap(),
    );
    let err = service
        .decrypt_seed(
            &DecryptSeedRequest {
                encrypted_seed: Some(foreign),
            },
            pair.private_key(),
        )
        .unwrap_err();
    assert!(matches!(err, ProvisionError::Crypto(CryptoError::Decryption)));
    assert_eq!(err.to_string(), "decryption failed");
    assert_eq!(store.load().unwrap().unwrap().expose(), SEED);
}

#[test]
fn decrypted_non_seed_is_rejected_specifically() {
    let dir = TempDir::new().unwrap();
    let pair = super::authority();
    let store = SeedStore::new(dir.path().join("seed.txt"));
    let service = SeedService::new(store.clone(), TotpConfig::default());

    let not_a_seed = BASE64.encode(&encrypt_oaep(b"hello", pair.public_key()).unwrap());
    let err = service
        .decrypt_seed(
            &DecryptSeedRequest {
                encrypted_seed: Some(not_a_seed),
            },
            pair.private_key(),
        )
        .unwrap_err();
    assert!(matches!(
        err,
        ProvisionError::Crypto(CryptoError::InvalidSeedFormat(_))
    ));
    assert!(!store.exists());
}

#[test]
fn blank_ciphertext_is_missing_field() {
    let dir = TempDir::new().unwrap();
    let service = SeedService::new(
        SeedStore::new(dir.path().join("seed.txt")),
        TotpConfig::default(),
    );
    let err = service
        .decrypt_seed(
            &DecryptSeedRequest {
                encrypted_seed: Some("   ".into()),
            },
            super::authority().private_key(),
        )
        .unwrap_err();
    assert!(matches!(err, ProvisionError::MissingField("encrypted_seed")));
}
