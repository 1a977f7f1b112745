//! Decentralised identifier (DID) helpers.
//!
//! Identities are opaque strings of the form `did:<method>:<id>[:...]`. The
//! registry never interprets them beyond this syntax check; the wallet to DID
//! mapping lives with the caller and is provided here for off-chain tooling.

use crate::CommonError;

/// Longest identity string accepted, in bytes.
pub const MAX_DID_LEN: usize = 128;

/// Method used for wallet-derived identities.
pub const DID_METHOD_ETHR: &str = "ethr";

const WALLET_HEX_LEN: usize = 40;

/// Checks that `did` is printable non-whitespace ASCII of at most
/// [`MAX_DID_LEN`] bytes, split by `:` into at least three non-empty
/// segments, the first of which is `did`.
pub fn validate_did(did: &[u8]) -> Result<(), CommonError> {
    if did.is_empty() || did.len() > MAX_DID_LEN {
        return Err(CommonError::InvalidIdentity);
    }
    if !did.iter().all(|b| (0x21..=0x7e).contains(b)) {
        return Err(CommonError::InvalidIdentity);
    }

    let mut segments = did.split(|b| *b == b':');
    if segments.next() != Some(&b"did"[..]) {
        return Err(CommonError::InvalidIdentity);
    }

    let mut count = 1usize;
    for segment in segments {
        if segment.is_empty() {
            return Err(CommonError::InvalidIdentity);
        }
        count += 1;
    }

    if count < 3 {
        return Err(CommonError::InvalidIdentity);
    }

    Ok(())
}

/// Network a wallet lives on. The tag becomes the third DID segment.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Network {
    Base,
    BaseSepolia,
}

impl Network {
    pub fn tag(&self) -> &'static str {
        match self {
            Network::Base => "base",
            Network::BaseSepolia => "baseSepolia",
        }
    }

    /// Production deployments use mainnet; everything else the testnet.
    pub fn for_deployment(production: bool) -> Self {
        if production {
            Network::Base
        } else {
            Network::BaseSepolia
        }
    }
}

/// Returns `true` for `0x` followed by exactly 40 hex digits (any case).
pub fn is_wallet_address(address: &str) -> bool {
    let hex = match address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    {
        Some(h) => h,
        None => return false,
    };
    hex.len() == WALLET_HEX_LEN && hex.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Derives the identity for a wallet: `did:ethr:<network>:<lowercase address>`.
///
/// Two checksummed spellings of the same address yield the same DID.
#[cfg(feature = "std")]
pub fn did_for_address(network: Network, address: &str) -> Result<String, CommonError> {
    if !is_wallet_address(address) {
        return Err(CommonError::InvalidAddress);
    }
    Ok(format!(
        "did:{}:{}:{}",
        DID_METHOD_ETHR,
        network.tag(),
        address.to_ascii_lowercase()
    ))
}
