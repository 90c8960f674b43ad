use std::time::{SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha1::{Digest, Sha1};

/// The decoded `identity_secret` from a maFile. Used to sign every mobile confirmation request.
pub struct IdentitySecret(Secret<Vec<u8>>);

impl IdentitySecret {
	/// Decode a base64 encoded identity secret.
	pub fn parse(secret: &str) -> anyhow::Result<Self> {
		ensure!(!secret.is_empty(), "unable to parse empty identity secret");
		let bytes = STANDARD.decode(secret)?;
		ensure!(!bytes.is_empty(), "identity secret decoded to zero bytes");
		Ok(Self(Secret::new(bytes)))
	}

	pub fn expose_secret(&self) -> &[u8] {
		self.0.expose_secret()
	}
}

impl std::fmt::Debug for IdentitySecret {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("IdentitySecret([REDACTED])")
	}
}

/// Produces the `k` and `p` query parameters that Steam expects on mobile confirmation requests.
pub trait SigningProvider {
	/// Signature over `time` and `tag`, keyed by the identity secret.
	fn sign(&self, secret: &IdentitySecret, tag: &str, time: u64) -> String;

	/// Stable pseudo device id for the account.
	fn device_id(&self, steam_id: u64) -> String;
}

/// The signing scheme used by the official Steam mobile app.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteamGuardSigner;

impl SigningProvider for SteamGuardSigner {
	fn sign(&self, secret: &IdentitySecret, tag: &str, time: u64) -> String {
		generate_confirmation_hash_for_time(time, tag, secret.expose_secret())
	}

	fn device_id(&self, steam_id: u64) -> String {
		generate_device_id(steam_id)
	}
}

fn build_time_bytes(time: u64) -> [u8; 8] {
	time.to_be_bytes()
}

fn generate_confirmation_hash_for_time(time: u64, tag: &str, identity_secret: &[u8]) -> String {
	let mut mac =
		Hmac::<Sha1>::new_from_slice(identity_secret).expect("HMAC accepts keys of any length");
	mac.update(&build_time_bytes(time));
	mac.update(tag.as_bytes());
	STANDARD.encode(mac.finalize().into_bytes())
}

fn generate_device_id(steam_id: u64) -> String {
	let digest = Sha1::digest(steam_id.to_string().as_bytes());
	let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
	format!(
		"android:{}-{}-{}-{}-{}",
		&hex[0..8],
		&hex[8..12],
		&hex[12..16],
		&hex[16..20],
		&hex[20..32]
	)
}

/// Source of the current unix time, in seconds.
pub trait Clock {
	fn now(&self) -> u64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> u64 {
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map(|d| d.as_secs())
			.unwrap_or(0)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_build_time_bytes() {
		let t1 = build_time_bytes(1617591917);
		let t2: [u8; 8] = [0, 0, 0, 0, 96, 106, 126, 109];
		assert_eq!(t1, t2);
	}

	#[test]
	fn test_generate_confirmation_hash_for_time() -> anyhow::Result<()> {
		let secret = IdentitySecret::parse("GQP46b73Ws7gr8GmZFR0sDuau5c=")?;
		assert_eq!(
			SteamGuardSigner.sign(&secret, "conf", 1617591917),
			"NaL8EIMhfy/7vBounJ0CvpKbrPk="
		);
		assert_eq!(
			SteamGuardSigner.sign(&secret, "details42", 1617591917),
			"R8UFRezmh/vnJH/UutievCAmsfg="
		);
		Ok(())
	}

	#[test]
	fn test_generate_device_id() {
		assert_eq!(
			SteamGuardSigner.device_id(76561197960265728),
			"android:63e01aa8-e99c-42c4-ef4c-e78bd041f129"
		);
	}

	#[test]
	fn test_parse_identity_secret_fail() {
		assert!(IdentitySecret::parse("").is_err());
		assert!(IdentitySecret::parse("not base64!").is_err());
	}

	#[test]
	fn test_identity_secret_debug_is_redacted() -> anyhow::Result<()> {
		let secret = IdentitySecret::parse("GQP46b73Ws7gr8GmZFR0sDuau5c=")?;
		let printed = format!("{:?}", secret);
		assert!(!printed.contains("GQP46"));
		Ok(())
	}
}
