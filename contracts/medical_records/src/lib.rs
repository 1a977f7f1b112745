#![no_std]

pub mod circuit_breaker;
pub mod consent;
pub mod errors;
pub mod events;
pub mod records;
pub mod storage;
pub mod validation;
pub mod verifier;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

pub use circuit_breaker::PauseScope;
pub use consent::{ConsentGrant, ConsentStatus};
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use events::{ConsentAction, ConsentAuditEntry};
pub use records::MedicalRecord;
pub use verifier::{
    DocumentVerifier, DocumentVerifierClient, VerificationResult, VerificationStatus,
};

/// Storage keys for the contract
const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

/// Authenticates `caller` and checks it is the stored admin.
fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();

    let admin: Address = env
        .storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)?;

    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }

    Ok(())
}

#[contract]
pub struct MedicalRecordsRegistry;

#[contractimpl]
impl MedicalRecordsRegistry {
    /// Initialize the contract with an admin address.
    /// Record and consent operations work without initialization; only the
    /// administrative endpoints need an admin.
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(errors::report(
                &env,
                symbol_short!("INIT"),
                ContractError::AlreadyInitialized,
            ));
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    // ======================== Record Store ========================

    /// Create a medical record and return its id.
    /// Ids start at 1 and increase by one per record.
    pub fn create_record(
        env: Env,
        document_pointer: String,
        owner_did: String,
        record_type: String,
        created_by: String,
        metadata_hash: String,
    ) -> Result<u64, ContractError> {
        let op = circuit_breaker::CREATE_RECORD;
        circuit_breaker::require_not_paused(&env, &op)
            .map_err(|e| errors::report(&env, op.clone(), e))?;

        let record = records::create(
            &env,
            document_pointer,
            owner_did,
            record_type,
            created_by,
            metadata_hash,
        )
        .map_err(|e| errors::report(&env, op.clone(), e))?;

        events::publish_record_created(
            &env,
            record.id,
            record.owner_did,
            record.record_type,
            record.created_by,
        );

        Ok(record.id)
    }

    /// Get a medical record by id
    pub fn get_record(env: Env, record_id: u64) -> Result<MedicalRecord, ContractError> {
        records::get(&env, record_id).ok_or_else(|| {
            errors::report(&env, symbol_short!("GET_REC"), ContractError::RecordNotFound)
        })
    }

    /// Get all record ids owned by an identity, oldest first
    pub fn get_records_for_identity(env: Env, owner_did: String) -> Vec<u64> {
        records::records_for_owner(&env, &owner_did)
    }

    /// Get the total number of records
    pub fn get_record_count(env: Env) -> u64 {
        records::count(&env)
    }

    /// Whether `requester_did` may read the record: owners always can, anyone
    /// else needs a valid consent from the owner covering the record's type.
    pub fn can_access_record(
        env: Env,
        record_id: u64,
        requester_did: String,
    ) -> Result<bool, ContractError> {
        let record = Self::get_record(env.clone(), record_id)?;

        if record.owner_did == requester_did {
            return Ok(true);
        }

        Ok(consent::has_valid_consent(
            &env,
            &record.owner_did,
            &requester_did,
            &record.record_type,
        ))
    }

    // ======================== Consent Store ========================

    /// Grant consent from `granter_did` to `grantee_did` for the given record
    /// types until `expires_at`. Replaces any earlier grant for the same pair.
    pub fn grant_consent(
        env: Env,
        granter_did: String,
        grantee_did: String,
        expires_at: u64,
        record_types: Vec<String>,
    ) -> Result<(), ContractError> {
        let op = circuit_breaker::GRANT_CONSENT;
        circuit_breaker::require_not_paused(&env, &op)
            .map_err(|e| errors::report(&env, op.clone(), e))?;

        let grant = consent::grant(&env, granter_did, grantee_did, expires_at, record_types)
            .map_err(|e| errors::report(&env, op.clone(), e))?;

        events::publish_consent_granted(
            &env,
            grant.granter_did.clone(),
            grant.grantee_did.clone(),
            grant.record_types.clone(),
            grant.expires_at,
        );
        events::record_consent_audit(
            &env,
            ConsentAction::Granted,
            grant.granter_did,
            grant.grantee_did,
            grant.record_types,
            grant.expires_at,
        );

        Ok(())
    }

    /// Revoke the consent held by the pair. The grant is kept for the audit
    /// trail and revoking twice is not an error.
    pub fn revoke_consent(
        env: Env,
        granter_did: String,
        grantee_did: String,
    ) -> Result<(), ContractError> {
        let op = circuit_breaker::REVOKE_CONSENT;
        circuit_breaker::require_not_paused(&env, &op)
            .map_err(|e| errors::report(&env, op.clone(), e))?;

        let grant = consent::revoke(&env, &granter_did, &grantee_did)
            .map_err(|e| errors::report(&env, op.clone(), e))?;

        events::publish_consent_revoked(&env, granter_did.clone(), grantee_did.clone());
        events::record_consent_audit(
            &env,
            ConsentAction::Revoked,
            granter_did,
            grantee_did,
            grant.record_types,
            grant.expires_at,
        );

        Ok(())
    }

    /// Check whether a valid consent covers `record_type` at the current ledger time
    pub fn has_valid_consent(
        env: Env,
        granter_did: String,
        grantee_did: String,
        record_type: String,
    ) -> bool {
        consent::has_valid_consent(&env, &granter_did, &grantee_did, &record_type)
    }

    /// Get the grant stored for a pair, active or not
    pub fn get_consent(
        env: Env,
        granter_did: String,
        grantee_did: String,
    ) -> Result<ConsentGrant, ContractError> {
        consent::get(&env, &granter_did, &grantee_did).ok_or_else(|| {
            errors::report(&env, symbol_short!("GET_CST"), ContractError::ConsentNotFound)
        })
    }

    pub fn get_consent_status(
        env: Env,
        granter_did: String,
        grantee_did: String,
    ) -> ConsentStatus {
        consent::status(&env, &granter_did, &grantee_did)
    }

    /// Identities the granter has ever granted consent to
    pub fn get_grantees(env: Env, granter_did: String) -> Vec<String> {
        consent::grantees_of(&env, &granter_did)
    }

    /// Recent consent grants and revocations, oldest first
    pub fn get_consent_audit_log(env: Env) -> Vec<ConsentAuditEntry> {
        events::get_consent_audit_log(&env)
    }

    // ======================== Administration ========================

    /// Pause a scope. Admin only.
    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        require_admin(&env, &caller).map_err(|e| errors::report(&env, symbol_short!("PAUSE"), e))?;
        circuit_breaker::set_paused(&env, caller, scope, true)
    }

    /// Resume a paused scope. Admin only.
    pub fn resume(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        require_admin(&env, &caller)
            .map_err(|e| errors::report(&env, symbol_short!("RESUME"), e))?;
        circuit_breaker::set_paused(&env, caller, scope, false)
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        circuit_breaker::is_paused(&env, &scope)
    }

    // ======================== Document Verification ========================

    /// Point the registry at a verifier contract. Admin only.
    pub fn set_verifier(env: Env, caller: Address, verifier: Address) -> Result<(), ContractError> {
        require_admin(&env, &caller)
            .map_err(|e| errors::report(&env, symbol_short!("SET_VRF"), e))?;

        verifier::set_verifier(&env, &verifier);
        events::publish_verifier_set(&env, verifier);

        Ok(())
    }

    pub fn get_verifier(env: Env) -> Option<Address> {
        verifier::get_verifier(&env)
    }

    /// Check a record's document against `expected_hash` with the configured verifier
    pub fn verify_record(
        env: Env,
        record_id: u64,
        expected_hash: String,
    ) -> Result<VerificationResult, ContractError> {
        let op = symbol_short!("VRF_REC");
        let record = Self::get_record(env.clone(), record_id)?;
        validation::validate_hash(&expected_hash)
            .map_err(|e| errors::report(&env, op.clone(), e))?;

        let result = verifier::verify_document(&env, &record.document_pointer, &expected_hash)
            .map_err(|e| errors::report(&env, op.clone(), e))?;

        events::publish_document_verified(&env, record_id, result.clone());

        Ok(result)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }
}




#[cfg(test)]
mod test_pause;

#[cfg(test)]
mod test_verifier;
