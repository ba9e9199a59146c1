//! Agent identity: the ed25519 key an agent is deployed with.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};

use crate::Error;

pub const KEY_TYPE: &str = "ed25519";

/// Signing identity of a deployed agent.
pub struct AgentIdentity {
    signing_key: SigningKey,
}

impl AgentIdentity {
    /// Parse a hex encoded 32-byte seed (optional `0x` prefix).
    pub fn from_hex(raw: &str) -> Result<Self, Error> {
        let trimmed = raw.trim();
        let hex_part = trimmed.strip_prefix("0x").unwrap_or(trimmed);
        let bytes = hex::decode(hex_part)
            .map_err(|e| Error::Identity(format!("agent private key is not hex: {e}")))?;
        let seed: [u8; 32] = bytes.as_slice().try_into().map_err(|_| {
            Error::Identity(format!(
                "agent private key must be 32 bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self {
            signing_key: SigningKey::from_bytes(&seed),
        })
    }

    /// Load from the configured `AGENT_PRIVATE_KEY`.
    pub fn from_config(config: &crate::Config) -> Result<Self, Error> {
        match config.agent_private_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Self::from_hex(key),
            _ => Err(Error::Identity("AGENT_PRIVATE_KEY is not set".into())),
        }
    }

    /// Fresh random identity. Useful for local runs and tests.
    pub fn generate() -> Self {
        let mut rng = rand::rngs::OsRng;
        Self {
            signing_key: SigningKey::generate(&mut rng),
        }
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// `0x` + lowercase hex public key. Authors every agent dialog item.
    pub fn address(&self) -> String {
        format!("0x{}", hex::encode(self.verifying_key().to_bytes()))
    }

    /// Sign `message`, returning the `0x`-prefixed hex signature.
    pub fn sign(&self, message: &[u8]) -> String {
        format!("0x{}", hex::encode(self.signing_key.sign(message).to_bytes()))
    }
}

impl std::fmt::Debug for AgentIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentIdentity")
            .field("address", &self.address())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature, Verifier};

    // RFC 8032, test 1.
    const SEED: &str = "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60";
    const PUBLIC: &str = "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a";

    #[test]
    fn test_address_from_known_seed() {
        let id = AgentIdentity::from_hex(SEED).unwrap();
        assert_eq!(id.address(), format!("0x{PUBLIC}"));

        let prefixed = AgentIdentity::from_hex(&format!("0x{SEED}")).unwrap();
        assert_eq!(prefixed.address(), id.address());
    }

    #[test]
    fn test_sign_verifies() {
        let id = AgentIdentity::generate();
        let sig_hex = id.sign(b"nonce");
        let bytes = hex::decode(sig_hex.trim_start_matches("0x")).unwrap();
        let sig = Signature::from_slice(&bytes).unwrap();
        assert!(id.verifying_key().verify(b"nonce", &sig).is_ok());
    }

    #[test]
    fn test_rejects_bad_keys() {
        assert!(AgentIdentity::from_hex("zz").is_err());
        assert!(AgentIdentity::from_hex("abcd").is_err());

        let config = crate::Config::default();
        let err = AgentIdentity::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("AGENT_PRIVATE_KEY"));
    }

    #[test]
    fn test_debug_hides_secret() {
        let id = AgentIdentity::from_hex(SEED).unwrap();
        assert!(!format!("{id:?}").contains(SEED));
    }
}
