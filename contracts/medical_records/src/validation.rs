use registry_common::{validate_did, MAX_DID_LEN};
use soroban_sdk::{Env, String, Vec};

use crate::ContractError;

const MAX_POINTER_LEN: u32 = 128;
const MAX_HASH_LEN: u32 = 128;
const MAX_RECORD_TYPE_LEN: u32 = 64;

/// Upper bound on distinct categories carried by one consent grant.
pub const MAX_RECORD_TYPES: u32 = 32;

const BUF_LEN: usize = 128;

/// Non-empty, at most `max_len` bytes, printable ASCII without spaces.
/// Used for pointers and hashes.
fn validate_token(value: &String, max_len: u32) -> Result<(), ContractError> {
    let len = value.len();
    if len == 0 || len > max_len {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; BUF_LEN];
    value.copy_into_slice(&mut buf[..len as usize]);

    if !buf[..len as usize].iter().all(|b| (0x21..=0x7e).contains(b)) {
        return Err(ContractError::InvalidInput);
    }

    Ok(())
}

/// Validate an identity string (`did:<method>:<id>`).
pub fn validate_identity(did: &String) -> Result<(), ContractError> {
    let len = did.len() as usize;
    if len == 0 || len > MAX_DID_LEN {
        return Err(ContractError::InvalidIdentity);
    }

    let mut buf = [0u8; MAX_DID_LEN];
    did.copy_into_slice(&mut buf[..len]);
    validate_did(&buf[..len])?;

    Ok(())
}

/// Validate the content address of an off-chain document (IPFS CID or similar).
pub fn validate_document_pointer(pointer: &String) -> Result<(), ContractError> {
    validate_token(pointer, MAX_POINTER_LEN)
}

/// Validate an opaque integrity tag (metadata hash, expected document hash).
pub fn validate_hash(hash: &String) -> Result<(), ContractError> {
    validate_token(hash, MAX_HASH_LEN)
}

/// Validate a single record-type category tag: free-form UTF-8 text of at
/// most `MAX_RECORD_TYPE_LEN` bytes. Spaces and non-ASCII letters are fine,
/// control characters are not.
pub fn validate_record_type(record_type: &String) -> Result<(), ContractError> {
    let len = record_type.len();
    if len == 0 || len > MAX_RECORD_TYPE_LEN {
        return Err(ContractError::InvalidInput);
    }

    let mut buf = [0u8; MAX_RECORD_TYPE_LEN as usize];
    record_type.copy_into_slice(&mut buf[..len as usize]);

    let text = core::str::from_utf8(&buf[..len as usize]).map_err(|_| ContractError::InvalidInput)?;
    if text.trim().is_empty() || text.chars().any(char::is_control) {
        return Err(ContractError::InvalidInput);
    }

    Ok(())
}

/// Validates every tag and returns the set without duplicates, first occurrence first.
pub fn normalize_record_types(
    env: &Env,
    record_types: &Vec<String>,
) -> Result<Vec<String>, ContractError> {
    if record_types.is_empty() {
        return Err(ContractError::EmptyRecordTypes);
    }

    let mut set: Vec<String> = Vec::new(env);
    for record_type in record_types.iter() {
        validate_record_type(&record_type)?;
        if set.contains(&record_type) {
            continue;
        }
        if set.len() == MAX_RECORD_TYPES {
            return Err(ContractError::InvalidInput);
        }
        set.push_back(record_type);
    }

    Ok(set)
}

/// Expiry must lie strictly after `now`.
pub fn validate_expiry(expires_at: u64, now: u64) -> Result<(), ContractError> {
    if expires_at <= now {
        return Err(ContractError::InvalidExpiry);
    }
    Ok(())
}
