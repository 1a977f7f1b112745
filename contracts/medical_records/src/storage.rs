use soroban_sdk::xdr::ToXdr;
use soroban_sdk::{Bytes, BytesN, Env, String};

/// SHA-256 over the XDR encoding of `identities`, in order.
///
/// Ledger keys are capped at 250 bytes, below what a maximum-length identity
/// plus key overhead can take, so identity-keyed entries use this digest and
/// keep the identities in the stored value. XDR strings are length-prefixed,
/// so distinct sequences never share a preimage.
pub fn identity_digest(env: &Env, identities: &[&String]) -> BytesN<32> {
    let mut buf = Bytes::new(env);
    for identity in identities {
        buf.append(&(*identity).clone().to_xdr(env));
    }
    env.crypto().sha256(&buf).into()
}
