use soroban_sdk::{contracttype, symbol_short, BytesN, Env, String, Symbol, Vec};

use crate::storage::identity_digest;
use crate::validation;
use crate::ContractError;

const RECORD: Symbol = symbol_short!("RECORD");
const OWNER_RECORDS: Symbol = symbol_short!("OWN_REC");
const RECORD_COUNTER: Symbol = symbol_short!("REC_CTR");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// A medical record entry. Never mutated or removed once stored.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MedicalRecord {
    pub id: u64,
    pub document_pointer: String,
    pub owner_did: String,
    pub record_type: String,
    pub created_by: String,
    pub metadata_hash: String,
    pub created_at: u64,
}

fn record_key(record_id: u64) -> (Symbol, u64) {
    (RECORD, record_id)
}

fn owner_key(env: &Env, owner_did: &String) -> (Symbol, BytesN<32>) {
    (OWNER_RECORDS, identity_digest(env, &[owner_did]))
}

/// Allocates the next record id. Ids start at 1 and are never handed out twice.
fn next_record_id(env: &Env) -> Result<u64, ContractError> {
    let current: u64 = env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0);
    let next = current.checked_add(1).ok_or(ContractError::StorageError)?;
    env.storage().instance().set(&RECORD_COUNTER, &next);
    Ok(next)
}

/// Validates the inputs, stores a new record and appends it to the owner's index.
pub fn create(
    env: &Env,
    document_pointer: String,
    owner_did: String,
    record_type: String,
    created_by: String,
    metadata_hash: String,
) -> Result<MedicalRecord, ContractError> {
    validation::validate_document_pointer(&document_pointer)?;
    validation::validate_identity(&owner_did)?;
    validation::validate_record_type(&record_type)?;
    validation::validate_identity(&created_by)?;
    validation::validate_hash(&metadata_hash)?;

    let record = MedicalRecord {
        id: next_record_id(env)?,
        document_pointer,
        owner_did,
        record_type,
        created_by,
        metadata_hash,
        created_at: env.ledger().timestamp(),
    };

    let key = record_key(record.id);
    env.storage().persistent().set(&key, &record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);

    let index_key = owner_key(env, &record.owner_did);
    let mut owned = records_for_owner(env, &record.owner_did);
    owned.push_back(record.id);
    env.storage().persistent().set(&index_key, &owned);
    env.storage()
        .persistent()
        .extend_ttl(&index_key, TTL_THRESHOLD, TTL_EXTEND_TO);

    Ok(record)
}

pub fn get(env: &Env, record_id: u64) -> Option<MedicalRecord> {
    env.storage().persistent().get(&record_key(record_id))
}

/// Ids owned by `owner_did`, in creation order.
pub fn records_for_owner(env: &Env, owner_did: &String) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&owner_key(env, owner_did))
        .unwrap_or(Vec::new(env))
}

pub fn count(env: &Env) -> u64 {
    env.storage().instance().get(&RECORD_COUNTER).unwrap_or(0)
}
