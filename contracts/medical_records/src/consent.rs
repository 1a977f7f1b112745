use soroban_sdk::{contracttype, symbol_short, BytesN, Env, String, Symbol, Vec};

use crate::storage::identity_digest;
use crate::validation;
use crate::ContractError;

const CONSENT: Symbol = symbol_short!("CONSENT");
const GRANTEES: Symbol = symbol_short!("GRANTEES");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Consent from `granter_did` letting `grantee_did` read records of the listed types.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentGrant {
    pub granter_did: String,
    pub grantee_did: String,
    pub record_types: Vec<String>,
    pub granted_at: u64,
    pub expires_at: u64,
    pub active: bool,
    pub revoked_at: Option<u64>,
}

/// Lifecycle of the grant stored for a (granter, grantee) pair, evaluated at query time.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConsentStatus {
    NoGrant,
    Active,
    Revoked,
    Expired,
}

impl ConsentGrant {
    /// Valid iff still active, `now < expires_at` and `record_type` is covered.
    pub fn is_valid_at(&self, now: u64, record_type: &String) -> bool {
        self.active && now < self.expires_at && self.record_types.contains(record_type)
    }

    /// Revocation wins over expiry.
    pub fn status_at(&self, now: u64) -> ConsentStatus {
        if !self.active {
            ConsentStatus::Revoked
        } else if now >= self.expires_at {
            ConsentStatus::Expired
        } else {
            ConsentStatus::Active
        }
    }
}

fn consent_key(env: &Env, granter_did: &String, grantee_did: &String) -> (Symbol, BytesN<32>) {
    (CONSENT, identity_digest(env, &[granter_did, grantee_did]))
}

fn grantees_key(env: &Env, granter_did: &String) -> (Symbol, BytesN<32>) {
    (GRANTEES, identity_digest(env, &[granter_did]))
}

fn store(env: &Env, grant: &ConsentGrant) {
    let key = consent_key(env, &grant.granter_did, &grant.grantee_did);
    env.storage().persistent().set(&key, grant);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Stores a fresh active grant for the pair, replacing whatever was there.
/// Record types are overwritten, never merged with the previous grant.
pub fn grant(
    env: &Env,
    granter_did: String,
    grantee_did: String,
    expires_at: u64,
    record_types: Vec<String>,
) -> Result<ConsentGrant, ContractError> {
    validation::validate_identity(&granter_did)?;
    validation::validate_identity(&grantee_did)?;

    if granter_did == grantee_did {
        return Err(ContractError::SelfGrant);
    }

    let now = env.ledger().timestamp();
    validation::validate_expiry(expires_at, now)?;
    let record_types = validation::normalize_record_types(env, &record_types)?;

    let first_grant = !env
        .storage()
        .persistent()
        .has(&consent_key(env, &granter_did, &grantee_did));

    let grant = ConsentGrant {
        granter_did,
        grantee_did,
        record_types,
        granted_at: now,
        expires_at,
        active: true,
        revoked_at: None,
    };
    store(env, &grant);

    if first_grant {
        let key = grantees_key(env, &grant.granter_did);
        let mut grantees = grantees_of(env, &grant.granter_did);
        grantees.push_back(grant.grantee_did.clone());
        env.storage().persistent().set(&key, &grantees);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }

    Ok(grant)
}

/// Marks the pair's grant inactive. Revoking an inactive grant is a no-op
/// that keeps the original `revoked_at`.
pub fn revoke(
    env: &Env,
    granter_did: &String,
    grantee_did: &String,
) -> Result<ConsentGrant, ContractError> {
    let mut grant = get(env, granter_did, grantee_did).ok_or(ContractError::ConsentNotFound)?;

    if grant.active {
        grant.active = false;
        grant.revoked_at = Some(env.ledger().timestamp());
        store(env, &grant);
    }

    Ok(grant)
}

pub fn get(env: &Env, granter_did: &String, grantee_did: &String) -> Option<ConsentGrant> {
    env.storage()
        .persistent()
        .get(&consent_key(env, granter_did, grantee_did))
}

pub fn has_valid_consent(
    env: &Env,
    granter_did: &String,
    grantee_did: &String,
    record_type: &String,
) -> bool {
    match get(env, granter_did, grantee_did) {
        Some(grant) => grant.is_valid_at(env.ledger().timestamp(), record_type),
        None => false,
    }
}

pub fn status(env: &Env, granter_did: &String, grantee_did: &String) -> ConsentStatus {
    match get(env, granter_did, grantee_did) {
        Some(grant) => grant.status_at(env.ledger().timestamp()),
        None => ConsentStatus::NoGrant,
    }
}

/// Every grantee the granter has ever granted to, in first-grant order.
pub fn grantees_of(env: &Env, granter_did: &String) -> Vec<String> {
    env.storage()
        .persistent()
        .get(&grantees_key(env, granter_did))
        .unwrap_or(Vec::new(env))
}
