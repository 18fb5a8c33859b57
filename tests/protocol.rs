use std::{sync::Arc, thread, time::Duration};

use chrono::{TimeDelta, TimeZone, Utc};
use sealpass::{
    FixedClock, HashingConfig, PasswordHash, PasswordHasher, PasswordValidator, Policy, Strategy,
    TokenError, TokenGenerator, TokenKeys, TokenValidator,
};

fn keys() -> TokenKeys {
    TokenKeys::new([9u8; 16], b"integration".to_vec())
}

fn clocked() -> (FixedClock, TokenGenerator<FixedClock>, TokenValidator<FixedClock>) {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2025, 6, 30, 23, 59, 59).unwrap());
    (
        clock.clone(),
        TokenGenerator::with_clock(clock.clone(), keys()),
        TokenValidator::with_clock(clock, keys()),
    )
}

#[test]
fn tokens_roundtrip_for_many_kinds_and_payloads() {
    let (_, generator, validator) = clocked();
    let payloads: Vec<Vec<u8>> = vec![
        Vec::new(),
        b".".to_vec(),
        b"{\"user\":42,\"roles\":[\"admin\"]}".to_vec(),
        (0u8..=255).collect(),
        vec![b'.'; 1000],
    ];

    for kind in ["session", "password-reset", "email-confirm", "x"] {
        for payload in &payloads {
            let token = generator
                .generate(kind, payload, Duration::from_secs(300))
                .unwrap();
            assert!(!token.contains('='));
            assert_eq!(token.matches('.').count(), 1);
            assert_eq!(&validator.validate(kind, &token).unwrap(), payload);
        }
    }
}

#[test]
fn token_lifetime_crosses_midnight() {
    let (clock, generator, validator) = clocked();
    let token = generator
        .generate("session", b"late", Duration::from_secs(2))
        .unwrap();

    clock.advance(TimeDelta::seconds(2));
    assert!(validator.validate("session", &token).is_ok());

    clock.advance(TimeDelta::seconds(1));
    assert!(validator.validate("session", &token).unwrap_err().is_invalid_token());
}

#[test]
fn validator_without_generator_keys_rejects() {
    let (clock, generator, _) = clocked();
    let token = generator
        .generate("session", b"x", Duration::from_secs(60))
        .unwrap();

    let stranger =
        TokenValidator::with_clock(clock, TokenKeys::new([8u8; 16], b"integration".to_vec()));
    assert!(matches!(
        stranger.validate("session", &token),
        Err(TokenError::InvalidToken(_))
    ));
}

#[test]
fn shared_instances_work_across_threads() {
    let generator = Arc::new(TokenGenerator::new(keys()));
    let validator = Arc::new(TokenValidator::new(keys()));

    let handles: Vec<_> = (0..8u8)
        .map(|i| {
            let generator = Arc::clone(&generator);
            let validator = Arc::clone(&validator);
            thread::spawn(move || {
                for j in 0..25u8 {
                    let payload = [i, j];
                    let token = generator
                        .generate("session", &payload, Duration::from_secs(60))
                        .unwrap();
                    assert_eq!(validator.validate("session", &token).unwrap(), payload);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn password_roundtrip_under_every_family() {
    for strategy in [
        Strategy::pbkdf2(3, 24).unwrap(),
        Strategy::argon2id(64, 1, 1, 16).unwrap(),
    ] {
        let config = HashingConfig::with_strategy(strategy.id());
        let hasher = config.hasher().unwrap();
        let validator = config.validator().unwrap();

        let stored = hasher.compute_hash("hunter2").unwrap();
        assert_eq!(
            <(bool, bool)>::from(validator.validate_password("hunter2", &stored)),
            (true, false),
            "{strategy}"
        );
        assert_eq!(
            <(bool, bool)>::from(validator.validate_password("hunter3", &stored)),
            (false, false),
            "{strategy}"
        );
    }
}

#[test]
fn hashes_are_salted() {
    let hasher = PasswordHasher::new("pbkdf2/hmacsha256/2/W").unwrap();
    let a: PasswordHash = hasher.compute_hash("same").unwrap().parse().unwrap();
    let b: PasswordHash = hasher.compute_hash("same").unwrap().parse().unwrap();

    assert_eq!(a.strategy(), b.strategy());
    assert_ne!(a.salt(), b.salt());
    assert_ne!(a.hash(), b.hash());
}

#[test]
fn migration_to_a_new_default() {
    let old = "pbkdf2/hmacsha256/2/W";
    let new = Strategy::argon2id(64, 1, 1, 32).unwrap();

    let stored = PasswordHasher::new(old).unwrap().compute_hash("pw").unwrap();

    let validator = PasswordValidator::new(new.id()).unwrap();
    let check = validator.validate_password("pw", &stored);
    assert!(check.matches && check.needs_upgrade);

    // caller rehashes with the new default
    let rehashed = PasswordHasher::new(new.id()).unwrap().compute_hash("pw").unwrap();
    let check = validator.validate_password("pw", &rehashed);
    assert!(check.matches && !check.needs_upgrade);

    // the old hash still verifies after the switch
    assert!(validator.validate_password("pw", &stored).matches);
    assert!(!validator.validate_password("nope", &stored).needs_upgrade);
}

#[test]
fn tampered_hashes_never_match() {
    let validator = PasswordValidator::new("pbkdf2/hmacsha256/2/W").unwrap();
    let stored = PasswordHasher::new("pbkdf2/hmacsha256/2/W")
        .unwrap()
        .compute_hash("pw")
        .unwrap();
    let record: PasswordHash = stored.parse().unwrap();

    let mut hash = record.hash().to_vec();
    hash[0] ^= 1;
    let flipped = PasswordHash::new(record.strategy(), record.salt().to_vec(), hash);

    let mut salt = record.salt().to_vec();
    salt[0] ^= 1;
    let resalted = PasswordHash::new(record.strategy(), salt, record.hash().to_vec());

    let retuned = PasswordHash::new(
        "pbkdf2/hmacsha256/3/W",
        record.salt().to_vec(),
        record.hash().to_vec(),
    );

    for tampered in [flipped, resalted, retuned] {
        assert!(!validator.validate_password("pw", &tampered.to_string()).matches);
    }
}

#[test]
fn policy_gates_new_passwords() {
    let policy = Policy::default();
    assert!(policy.check("Tr0ub4dor&3").is_ok());

    let err = policy.check("password").unwrap_err();
    assert_eq!(err.violations().len(), 3);
}
