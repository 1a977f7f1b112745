use crate::{events, ContractError};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Types ─────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every mutating operation
    Global,
    /// Halts a single mutating operation, named by one of the symbols below
    Function(Symbol),
}

pub const CREATE_RECORD: Symbol = symbol_short!("CRT_REC");
pub const GRANT_CONSENT: Symbol = symbol_short!("GRT_CST");
pub const REVOKE_CONSENT: Symbol = symbol_short!("REV_CST");

// ── Storage Keys ─────────────────────────────────────────────

fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

fn is_pausable(func: &Symbol) -> bool {
    *func == CREATE_RECORD || *func == GRANT_CONSENT || *func == REVOKE_CONSENT
}

// ── Core Logistics ───────────────────────────────────────────

/// A function scope counts as paused when either it or the global scope is.
pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    let global = env
        .storage()
        .instance()
        .get(&global_pause_key())
        .unwrap_or(false);

    match scope {
        PauseScope::Global => global,
        PauseScope::Function(func) => {
            global
                || env
                    .storage()
                    .instance()
                    .get(&function_pause_key(func))
                    .unwrap_or(false)
        }
    }
}

pub fn require_not_paused(env: &Env, func: &Symbol) -> Result<(), ContractError> {
    if is_paused(env, &PauseScope::Function(func.clone())) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

/// Engages or releases a scope. The caller must already be authenticated as admin.
pub fn set_paused(
    env: &Env,
    caller: Address,
    scope: PauseScope,
    paused: bool,
) -> Result<(), ContractError> {
    match &scope {
        PauseScope::Global => {
            env.storage().instance().set(&global_pause_key(), &paused);
        }
        PauseScope::Function(func) => {
            if !is_pausable(func) {
                return Err(ContractError::InvalidInput);
            }
            env.storage()
                .instance()
                .set(&function_pause_key(func), &paused);
        }
    }

    events::publish_pause_changed(env, caller, scope, paused);

    Ok(())
}
