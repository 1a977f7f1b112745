use soroban_sdk::{contractclient, contracttype, symbol_short, Address, Env, String, Symbol};

use crate::ContractError;

const VERIFIER: Symbol = symbol_short!("VERIFIER");

const VERIFIED_THRESHOLD: u32 = 90;
const PENDING_THRESHOLD: u32 = 70;
const MAX_SCORE: u32 = 100;

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum VerificationStatus {
    Verified,
    Pending,
    Flagged,
}

impl VerificationStatus {
    pub fn from_score(score: u32) -> Self {
        if score >= VERIFIED_THRESHOLD {
            VerificationStatus::Verified
        } else if score >= PENDING_THRESHOLD {
            VerificationStatus::Pending
        } else {
            VerificationStatus::Flagged
        }
    }
}

/// Outcome of checking a document against an expected hash.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerificationResult {
    pub verified: bool,
    pub score: u32,
    pub status: VerificationStatus,
}

impl VerificationResult {
    /// Clamps the score to 0..=100 and derives status and `verified` from it.
    pub fn from_score(score: u32) -> Self {
        let score = score.min(MAX_SCORE);
        let status = VerificationStatus::from_score(score);
        VerificationResult {
            verified: status == VerificationStatus::Verified,
            score,
            status,
        }
    }
}

/// Interface a verifier contract must expose.
#[contractclient(name = "DocumentVerifierClient")]
pub trait DocumentVerifier {
    fn verify(env: Env, document_pointer: String, expected_hash: String) -> VerificationResult;
}

pub fn set_verifier(env: &Env, verifier: &Address) {
    env.storage().instance().set(&VERIFIER, verifier);
}

pub fn get_verifier(env: &Env) -> Option<Address> {
    env.storage().instance().get(&VERIFIER)
}

/// Asks the configured verifier about `document_pointer`.
/// Only the reported score is trusted; status is recomputed here.
pub fn verify_document(
    env: &Env,
    document_pointer: &String,
    expected_hash: &String,
) -> Result<VerificationResult, ContractError> {
    let verifier = get_verifier(env).ok_or(ContractError::VerifierNotConfigured)?;
    let client = DocumentVerifierClient::new(env, &verifier);

    match client.try_verify(document_pointer, expected_hash) {
        Ok(Ok(reported)) => Ok(VerificationResult::from_score(reported.score)),
        _ => Err(ContractError::VerifierFailed),
    }
}
