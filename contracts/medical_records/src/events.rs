use crate::circuit_breaker::PauseScope;
use crate::verifier::VerificationResult;
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

pub const AUDIT_LOG_KEY: Symbol = symbol_short!("CST_AUD");
/// Instance counter: sequence number the next audit entry will take.
const AUDIT_SEQ_KEY: Symbol = symbol_short!("AUD_SEQ");
pub const MAX_AUDIT_LOG_SIZE: u32 = 100;

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Event published when the contract is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a new medical record is created.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordCreatedEvent {
    pub record_id: u64,
    pub owner_did: String,
    pub record_type: String,
    pub created_by: String,
    pub timestamp: u64,
}

/// Event published when a granter authorizes a grantee.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentGrantedEvent {
    pub granter_did: String,
    pub grantee_did: String,
    pub record_types: Vec<String>,
    pub expires_at: u64,
    pub timestamp: u64,
}

/// Event published when a consent grant is revoked.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentRevokedEvent {
    pub granter_did: String,
    pub grantee_did: String,
    pub timestamp: u64,
}

/// Event published when a pause scope is engaged or released.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PauseChangedEvent {
    pub caller: Address,
    pub scope: PauseScope,
    pub paused: bool,
    pub timestamp: u64,
}

/// Event published when the admin points the registry at a verifier contract.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VerifierSetEvent {
    pub verifier: Address,
    pub timestamp: u64,
}

/// Event published after a record's document went through the verifier.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DocumentVerifiedEvent {
    pub record_id: u64,
    pub result: VerificationResult,
    pub timestamp: u64,
}

/// Kind of change recorded in the consent audit log.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConsentAction {
    Granted,
    Revoked,
}

/// One entry of the consent audit trail.
/// `record_types` and `expires_at` describe the grant as it stood after the action.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConsentAuditEntry {
    pub action: ConsentAction,
    pub granter_did: String,
    pub grantee_did: String,
    pub record_types: Vec<String>,
    pub expires_at: u64,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when a new medical record is created.
/// Topics carry the owner so indexers can follow a single patient.
pub fn publish_record_created(
    env: &Env,
    record_id: u64,
    owner_did: String,
    record_type: String,
    created_by: String,
) {
    let topics = (symbol_short!("REC_NEW"), owner_did.clone());
    let data = RecordCreatedEvent {
        record_id,
        owner_did,
        record_type,
        created_by,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when consent is granted.
pub fn publish_consent_granted(
    env: &Env,
    granter_did: String,
    grantee_did: String,
    record_types: Vec<String>,
    expires_at: u64,
) {
    let topics = (
        symbol_short!("CST_GRT"),
        granter_did.clone(),
        grantee_did.clone(),
    );
    let data = ConsentGrantedEvent {
        granter_did,
        grantee_did,
        record_types,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes an event when consent is revoked.
pub fn publish_consent_revoked(env: &Env, granter_did: String, grantee_did: String) {
    let topics = (
        symbol_short!("CST_REV"),
        granter_did.clone(),
        grantee_did.clone(),
    );
    let data = ConsentRevokedEvent {
        granter_did,
        grantee_did,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_pause_changed(env: &Env, caller: Address, scope: PauseScope, paused: bool) {
    let topic = if paused {
        symbol_short!("PAUSED")
    } else {
        symbol_short!("RESUMED")
    };
    let data = PauseChangedEvent {
        caller,
        scope,
        paused,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((topic,), data);
}

pub fn publish_verifier_set(env: &Env, verifier: Address) {
    let topics = (symbol_short!("VRF_SET"),);
    let data = VerifierSetEvent {
        verifier,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_document_verified(env: &Env, record_id: u64, result: VerificationResult) {
    let topics = (symbol_short!("DOC_VRF"), record_id);
    let data = DocumentVerifiedEvent {
        record_id,
        result,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

fn audit_entry_key(seq: u64) -> (Symbol, u64) {
    (AUDIT_LOG_KEY, seq)
}

fn next_audit_seq(env: &Env) -> u64 {
    env.storage().instance().get(&AUDIT_SEQ_KEY).unwrap_or(0)
}

/// Appends an entry to the consent audit log.
/// Entries live in their own persistent slots keyed by sequence number; only
/// the most recent `MAX_AUDIT_LOG_SIZE` are kept, older slots are removed.
pub fn record_consent_audit(
    env: &Env,
    action: ConsentAction,
    granter_did: String,
    grantee_did: String,
    record_types: Vec<String>,
    expires_at: u64,
) {
    let entry = ConsentAuditEntry {
        action,
        granter_did,
        grantee_did,
        record_types,
        expires_at,
        timestamp: env.ledger().timestamp(),
    };

    let seq = next_audit_seq(env);
    let key = audit_entry_key(seq);
    env.storage().persistent().set(&key, &entry);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    if let Some(evicted) = seq.checked_sub(u64::from(MAX_AUDIT_LOG_SIZE)) {
        env.storage().persistent().remove(&audit_entry_key(evicted));
    }

    env.storage()
        .instance()
        .set(&AUDIT_SEQ_KEY, &seq.saturating_add(1));
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Retrieves the consent audit log, oldest entry first.
pub fn get_consent_audit_log(env: &Env) -> Vec<ConsentAuditEntry> {
    let end = next_audit_seq(env);
    let start = end.saturating_sub(u64::from(MAX_AUDIT_LOG_SIZE));

    let mut log = Vec::new(env);
    for seq in start..end {
        if let Some(entry) = env.storage().persistent().get(&audit_entry_key(seq)) {
            log.push_back(entry);
        }
    }
    log
}
