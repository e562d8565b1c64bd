//! Credential primitives: login and registration payloads, password digests.
//!
//! Inbound adapters hand raw strings to the `try_from_parts` constructors;
//! services only ever see validated values. Plaintext passwords are held in
//! [`Zeroizing`] buffers and wiped on drop.

use std::fmt;

use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::Role;

const SALT_LEN: usize = 16;

/// Validation failures for credential payloads. Each names the offending
/// field so adapters can report it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// A required field was missing or blank once trimmed.
    MissingField(&'static str),
    /// Role was not `teacher` or `student`.
    InvalidRole(String),
}

impl CredentialsValidationError {
    /// Wire name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidRole(_) => "role",
        }
    }
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "{field} is required"),
            Self::InvalidRole(role) => write!(f, "invalid role: {role}"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

fn required(value: &str, field: &'static str) -> Result<String, CredentialsValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CredentialsValidationError::MissingField(field));
    }
    Ok(trimmed.to_owned())
}

/// Validated login credentials.
///
/// ## Invariants
/// - `login` (a username or an email) is trimmed and non-empty.
/// - `password` is non-empty but keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use slo_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "secret").unwrap();
/// assert_eq!(creds.login(), "ada");
/// assert_eq!(creds.password(), "secret");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    login: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw inputs.
    pub fn try_from_parts(login: &str, password: &str) -> Result<Self, CredentialsValidationError> {
        let login = required(login, "username")?;
        if password.is_empty() {
            return Err(CredentialsValidationError::MissingField("password"));
        }
        Ok(Self {
            login,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username or email used for the account lookup.
    pub fn login(&self) -> &str {
        self.login.as_str()
    }

    /// Password supplied by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Raw registration fields as received from an adapter.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistrationParts<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

/// Validated registration request. Every field is required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    username: String,
    email: String,
    password: Zeroizing<String>,
    role: Role,
    first_name: String,
    last_name: String,
}

impl Registration {
    /// Validate raw registration fields.
    pub fn try_from_parts(
        parts: RegistrationParts<'_>,
    ) -> Result<Self, CredentialsValidationError> {
        let username = required(parts.username, "username")?;
        let email = required(parts.email, "email")?;
        if parts.password.is_empty() {
            return Err(CredentialsValidationError::MissingField("password"));
        }
        let role_label = required(parts.role, "role")?;
        let first_name = required(parts.first_name, "first_name")?;
        let last_name = required(parts.last_name, "last_name")?;
        let role = role_label
            .parse::<Role>()
            .map_err(|_| CredentialsValidationError::InvalidRole(role_label))?;

        Ok(Self {
            username,
            email,
            password: Zeroizing::new(parts.password.to_owned()),
            role,
            first_name,
            last_name,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

/// Salted SHA-256 password digest stored as `salt_hex$digest_hex`.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Derive a digest for `password` using a fresh random salt.
    pub fn derive(password: &str) -> Self {
        let mut salt = [0_u8; SALT_LEN];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(password, &salt)
    }

    fn with_salt(password: &str, salt: &[u8]) -> Self {
        let digest = Self::hash(password, salt);
        Self(format!("{}${}", hex::encode(salt), hex::encode(digest)))
    }

    fn hash(password: &str, salt: &[u8]) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        hasher.finalize().to_vec()
    }

    /// Rehydrate a digest previously produced by [`PasswordDigest::derive`].
    pub fn from_stored(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Encoded form for persistence.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check `password` against this digest. Malformed digests never match.
    pub fn verify(&self, password: &str) -> bool {
        let Some((salt_hex, digest_hex)) = self.0.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(digest_hex)) else {
            return false;
        };
        let actual = Self::hash(password, &salt);
        actual.len() == expected.len()
            && actual
                .iter()
                .zip(expected.iter())
                .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parts() -> RegistrationParts<'static> {
        RegistrationParts {
            username: "ada",
            email: "ada@example.edu",
            password: "hunter2",
            role: "student",
            first_name: "Ada",
            last_name: "Lovelace",
        }
    }

    #[rstest]
    #[case("", "pw", "username")]
    #[case("   ", "pw", "username")]
    #[case("ada", "", "password")]
    fn login_rejects_blank_fields(
        #[case] login: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let err = LoginCredentials::try_from_parts(login, password).expect_err("invalid");
        assert_eq!(err.field(), field);
    }

    #[rstest]
    fn registration_accepts_complete_payload() {
        let registration = Registration::try_from_parts(parts()).expect("valid registration");
        assert_eq!(registration.role(), Role::Student);
        assert_eq!(registration.last_name(), "Lovelace");
    }

    #[rstest]
    fn registration_requires_every_field() {
        let err = Registration::try_from_parts(RegistrationParts {
            first_name: " ",
            ..parts()
        })
        .expect_err("missing first name");
        assert_eq!(err, CredentialsValidationError::MissingField("first_name"));
    }

    #[rstest]
    fn registration_rejects_unknown_role() {
        let err = Registration::try_from_parts(RegistrationParts {
            role: "admin",
            ..parts()
        })
        .expect_err("invalid role");
        assert_eq!(err.field(), "role");
    }

    #[rstest]
    fn digest_verifies_only_the_original_password() {
        let digest = PasswordDigest::derive("correct horse");
        assert!(digest.verify("correct horse"));
        assert!(!digest.verify("correct horse "));
    }

    #[rstest]
    fn digests_are_salted() {
        let first = PasswordDigest::derive("same");
        let second = PasswordDigest::derive("same");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[case("")]
    #[case("no-separator")]
    #[case("zz$zz")]
    fn malformed_digests_never_match(#[case] stored: &str) {
        assert!(!PasswordDigest::from_stored(stored).verify(""));
    }

    #[rstest]
    fn debug_output_hides_digest() {
        let digest = PasswordDigest::derive("secret");
        assert_eq!(format!("{digest:?}"), "PasswordDigest(..)");
    }
}
