#![cfg(test)]

use crate::{
    circuit_breaker::{CREATE_RECORD, GRANT_CONSENT, REVOKE_CONSENT},
    ContractError, MedicalRecordsRegistry, MedicalRecordsRegistryClient, PauseScope,
};
use soroban_sdk::{symbol_short, testutils::Address as _, testutils::Ledger, vec, Address, Env, String};

fn setup_test() -> (Env, MedicalRecordsRegistryClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_000);

    let contract_id = env.register(MedicalRecordsRegistry, ());
    let client = MedicalRecordsRegistryClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    (env, client, admin)
}

fn create(env: &Env, client: &MedicalRecordsRegistryClient) -> Result<u64, ContractError> {
    match client.try_create_record(
        &String::from_str(env, "Qm123"),
        &String::from_str(env, "did:x:patient"),
        &String::from_str(env, "lab_report"),
        &String::from_str(env, "did:x:doctor"),
        &String::from_str(env, "0x1"),
    ) {
        Ok(Ok(id)) => Ok(id),
        Err(Ok(e)) => Err(e),
        _ => panic!("unexpected invocation failure"),
    }
}

#[test]
fn test_global_pause() {
    let (env, client, admin) = setup_test();

    client.pause(&admin, &PauseScope::Global);
    assert!(client.is_paused(&PauseScope::Global));
    assert!(client.is_paused(&PauseScope::Function(CREATE_RECORD)));

    assert_eq!(create(&env, &client), Err(ContractError::Paused));

    let a = String::from_str(&env, "did:x:A");
    let b = String::from_str(&env, "did:x:B");
    let res = client.try_grant_consent(
        &a,
        &b,
        &2_000,
        &vec![&env, String::from_str(&env, "diagnosis")],
    );
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Paused);

    // reads keep working while paused
    assert_eq!(client.get_record_count(), 0);
    assert!(!client.has_valid_consent(&a, &b, &String::from_str(&env, "diagnosis")));

    client.resume(&admin, &PauseScope::Global);
    assert!(!client.is_paused(&PauseScope::Global));
    assert_eq!(create(&env, &client), Ok(1));
}

#[test]
fn test_granular_pause() {
    let (env, client, admin) = setup_test();

    client.pause(&admin, &PauseScope::Function(CREATE_RECORD));
    assert!(client.is_paused(&PauseScope::Function(CREATE_RECORD)));
    assert!(!client.is_paused(&PauseScope::Function(GRANT_CONSENT)));
    assert!(!client.is_paused(&PauseScope::Global));

    assert_eq!(create(&env, &client), Err(ContractError::Paused));

    // consent operations are unaffected
    let a = String::from_str(&env, "did:x:A");
    let b = String::from_str(&env, "did:x:B");
    client.grant_consent(
        &a,
        &b,
        &2_000,
        &vec![&env, String::from_str(&env, "diagnosis")],
    );

    client.pause(&admin, &PauseScope::Function(REVOKE_CONSENT));
    let res = client.try_revoke_consent(&a, &b);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Paused);

    client.resume(&admin, &PauseScope::Function(CREATE_RECORD));
    assert_eq!(create(&env, &client), Ok(1));
}

#[test]
fn test_pause_requires_admin() {
    let (env, client, _admin) = setup_test();
    let stranger = Address::generate(&env);

    let res = client.try_pause(&stranger, &PauseScope::Global);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);
    assert!(!client.is_paused(&PauseScope::Global));

    let res = client.try_resume(&stranger, &PauseScope::Global);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::Unauthorized);
}

#[test]
fn test_pause_before_initialize() {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalRecordsRegistry, ());
    let client = MedicalRecordsRegistryClient::new(&env, &contract_id);
    let caller = Address::generate(&env);

    let res = client.try_pause(&caller, &PauseScope::Global);
    assert_eq!(res.unwrap_err().unwrap(), ContractError::NotInitialized);
}

#[test]
fn test_pause_unknown_function_rejected() {
    let (_env, client, admin) = setup_test();

    let res = client.try_pause(&admin, &PauseScope::Function(symbol_short!("GET_REC")));
    assert_eq!(res.unwrap_err().unwrap(), ContractError::InvalidInput);
}
