use registry_common::CommonError;
use soroban_sdk::{contracttype, log, Env, Symbol};

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed or missing input, self-grants, stale expiries
    Validation = 1,
    /// Authorization errors: caller is not the administrator
    Authorization = 2,
    /// Not found errors: unknown record id or consent pair
    NotFound = 3,
    /// Internal errors: storage or verifier failures, never retried by the registry
    Internal = 5,
    /// System errors: contract-level issues like pausing
    System = 7,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: caller mistakes, nothing to act on
    Low = 1,
    /// Medium severity: rejected privileged calls
    Medium = 2,
    /// High severity: internal failures requiring attention
    High = 3,
    /// Critical severity: the registry is halted
    Critical = 4,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    RecordNotFound = 5,
    InvalidInput = 6,
    Paused = 8,
    ConsentNotFound = 9,
    InvalidIdentity = 10,
    SelfGrant = 11,
    EmptyRecordTypes = 12,
    InvalidExpiry = 13,
    VerifierNotConfigured = 14,
    StorageError = 15,
    VerifierFailed = 16,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidInput
            | ContractError::InvalidIdentity
            | ContractError::SelfGrant
            | ContractError::EmptyRecordTypes
            | ContractError::InvalidExpiry
            | ContractError::VerifierNotConfigured => ErrorCategory::Validation,
            ContractError::Unauthorized => ErrorCategory::Authorization,
            ContractError::RecordNotFound | ContractError::ConsentNotFound => {
                ErrorCategory::NotFound
            }
            ContractError::StorageError | ContractError::VerifierFailed => {
                ErrorCategory::Internal
            }
            ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::InvalidInput
            | ContractError::InvalidIdentity
            | ContractError::SelfGrant
            | ContractError::EmptyRecordTypes
            | ContractError::InvalidExpiry
            | ContractError::RecordNotFound
            | ContractError::ConsentNotFound => ErrorSeverity::Low,
            ContractError::Unauthorized | ContractError::VerifierNotConfigured => {
                ErrorSeverity::Medium
            }
            ContractError::StorageError | ContractError::VerifierFailed => ErrorSeverity::High,
            ContractError::Paused => ErrorSeverity::Critical,
        }
    }

    /// Returns whether this error is retryable.
    /// Only a paused registry may accept the same call later; retry policy
    /// belongs to the caller.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::Paused)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::RecordNotFound => "Record not found",
            ContractError::InvalidInput => "Invalid input parameters provided",
            ContractError::Paused => "Contract operations are currently paused",
            ContractError::ConsentNotFound => "No consent exists for this granter and grantee",
            ContractError::InvalidIdentity => "Identity is not a valid DID",
            ContractError::SelfGrant => "Granter and grantee must differ",
            ContractError::EmptyRecordTypes => "At least one record type is required",
            ContractError::InvalidExpiry => "Expiry must be in the future",
            ContractError::VerifierNotConfigured => "No document verifier has been configured",
            ContractError::StorageError => "Storage operation failed",
            ContractError::VerifierFailed => "Document verifier call failed",
        }
    }
}

impl From<CommonError> for ContractError {
    fn from(err: CommonError) -> Self {
        match err {
            CommonError::InvalidIdentity => ContractError::InvalidIdentity,
            CommonError::InvalidAddress => ContractError::InvalidInput,
        }
    }
}

/// Writes a diagnostic log line for `error` raised by `operation` and hands the
/// error back so call sites can `return Err(report(..))`.
pub fn report(env: &Env, operation: Symbol, error: ContractError) -> ContractError {
    log!(
        env,
        "registry error",
        operation,
        error as u32,
        error.category() as u32,
        error.severity() as u32
    );
    error
}
