#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::arithmetic_side_effects
)]

use crate::{
    ContractError, MedicalRecordsRegistry, MedicalRecordsRegistryClient, VerificationResult,
    VerificationStatus,
};
use soroban_sdk::{
    contract, contractimpl, symbol_short, testutils::Address as _, Address, Env, String,
};

/// Reports whatever score was configured, with a deliberately stale status,
/// and remembers the arguments of the last call.
#[contract]
pub struct StubVerifier;

#[contractimpl]
impl StubVerifier {
    pub fn set_score(env: Env, score: u32) {
        env.storage().instance().set(&symbol_short!("SCORE"), &score);
    }

    pub fn last_call(env: Env) -> Option<(String, String)> {
        env.storage().instance().get(&symbol_short!("LAST"))
    }

    pub fn verify(env: Env, document_pointer: String, expected_hash: String) -> VerificationResult {
        env.storage()
            .instance()
            .set(&symbol_short!("LAST"), &(document_pointer, expected_hash));
        let score: u32 = env
            .storage()
            .instance()
            .get(&symbol_short!("SCORE"))
            .unwrap_or(0);
        VerificationResult {
            verified: true,
            score,
            status: VerificationStatus::Verified,
        }
    }
}

#[contract]
pub struct BrokenVerifier;

#[contractimpl]
impl BrokenVerifier {
    pub fn verify(_env: Env, _document_pointer: String, _expected_hash: String) -> VerificationResult {
        panic!("verifier offline")
    }
}

fn setup() -> (Env, MedicalRecordsRegistryClient<'static>, Address, u64) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsRegistry, ());
    let client = MedicalRecordsRegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    let record_id = client.create_record(
        &String::from_str(&env, "QmWATWQ7fVPP2EFGu71UkfnqhYXDYH566qy47CnAQP2bDB"),
        &String::from_str(&env, "did:x:patient"),
        &String::from_str(&env, "lab_report"),
        &String::from_str(&env, "did:x:lab"),
        &String::from_str(&env, "0xabc"),
    );

    (env, client, admin, record_id)
}

fn stub_with_score(env: &Env, score: u32) -> Address {
    let verifier_id = env.register(StubVerifier, ());
    StubVerifierClient::new(env, &verifier_id).set_score(&score);
    verifier_id
}

#[test]
fn test_verify_without_verifier() {
    let (env, client, _admin, record_id) = setup();

    assert_eq!(client.get_verifier(), None);
    let res = client.try_verify_record(&record_id, &String::from_str(&env, "0xabc"));
    assert_eq!(res, Err(Ok(ContractError::VerifierNotConfigured)));
}

#[test]
fn test_set_verifier_requires_admin() {
    let (env, client, _admin, _record_id) = setup();
    let verifier_id = stub_with_score(&env, 95);
    let stranger = Address::generate(&env);

    let res = client.try_set_verifier(&stranger, &verifier_id);
    assert_eq!(res, Err(Ok(ContractError::Unauthorized)));
    assert_eq!(client.get_verifier(), None);
}

#[test]
fn test_verify_record_high_score() {
    let (env, client, admin, record_id) = setup();
    let verifier_id = stub_with_score(&env, 95);

    client.set_verifier(&admin, &verifier_id);
    assert_eq!(client.get_verifier(), Some(verifier_id.clone()));

    let expected_hash = String::from_str(&env, "0xfeedbeef");
    let result = client.verify_record(&record_id, &expected_hash);
    assert!(result.verified);
    assert_eq!(result.score, 95);
    assert_eq!(result.status, VerificationStatus::Verified);

    // the verifier sees the record's pointer and the caller's hash
    let (pointer, hash) = StubVerifierClient::new(&env, &verifier_id)
        .last_call()
        .unwrap();
    assert_eq!(pointer, client.get_record(&record_id).document_pointer);
    assert_eq!(hash, expected_hash);
}

#[test]
fn test_verify_record_recomputes_status() {
    let (env, client, admin, record_id) = setup();
    let hash = String::from_str(&env, "0xabc");

    client.set_verifier(&admin, &stub_with_score(&env, 75));
    let pending = client.verify_record(&record_id, &hash);
    assert!(!pending.verified);
    assert_eq!(pending.status, VerificationStatus::Pending);

    client.set_verifier(&admin, &stub_with_score(&env, 12));
    let flagged = client.verify_record(&record_id, &hash);
    assert!(!flagged.verified);
    assert_eq!(flagged.status, VerificationStatus::Flagged);

    // out of range scores are clamped
    client.set_verifier(&admin, &stub_with_score(&env, 400));
    let clamped = client.verify_record(&record_id, &hash);
    assert_eq!(clamped.score, 100);
    assert!(clamped.verified);
}

#[test]
fn test_verify_record_failing_verifier() {
    let (env, client, admin, record_id) = setup();
    let verifier_id = env.register(BrokenVerifier, ());
    client.set_verifier(&admin, &verifier_id);

    let res = client.try_verify_record(&record_id, &String::from_str(&env, "0xabc"));
    assert_eq!(res, Err(Ok(ContractError::VerifierFailed)));
}

#[test]
fn test_verify_record_input_errors() {
    let (env, client, admin, record_id) = setup();
    client.set_verifier(&admin, &stub_with_score(&env, 95));

    let missing = client.try_verify_record(&99, &String::from_str(&env, "0xabc"));
    assert_eq!(missing, Err(Ok(ContractError::RecordNotFound)));

    let empty_hash = client.try_verify_record(&record_id, &String::from_str(&env, ""));
    assert_eq!(empty_hash, Err(Ok(ContractError::InvalidInput)));
}
