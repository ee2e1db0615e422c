//! Secret material from the optional `.env` file
//!
//! The file is read as dotenv `KEY=VALUE` lines without touching the process
//! environment. Only three keys are meaningful; each may be absent.

use crate::{Error, Result};
use cluster_fs::{NormalizedPath, io};
use sha_crypt::{Sha512Params, sha512_simple};

/// Key of the controller's privilege-escalation password.
pub const CONTROLLER_BECOME_PASSWORD: &str = "CONTROLLER_BECOME_PASSWORD";
/// Key of the root account password hash used by PXE installs.
pub const PXE_ROOT_PASSWORD_HASH: &str = "PXE_ROOT_PASSWORD_HASH";
/// Key of the local user password hash used by PXE installs.
pub const PXE_LOCAL_USER_PASSWORD_HASH: &str = "PXE_LOCAL_USER_PASSWORD_HASH";

/// Rounds used for generated hashes.
pub const DEFAULT_HASH_ROUNDS: usize = 656_000;

/// The secrets an inventory run may inject.
///
/// An empty value is treated the same as a missing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SecretMaterial {
    pub controller_become_password: Option<String>,
    pub root_password_hash: Option<String>,
    pub local_user_password_hash: Option<String>,
}

impl SecretMaterial {
    /// Read secrets from a dotenv file; a missing file yields no secrets.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(%path, "No secret file found");
            return Ok(Self::default());
        }

        let native = path.to_native();
        let content = escape_literal_dollars(&io::read_text(path)?);

        let mut pairs = Vec::new();
        for item in dotenvy::from_read_iter(content.as_bytes()) {
            let (key, value) = item.map_err(|e| Error::SecretParse {
                path: native.clone(),
                message: e.to_string(),
            })?;
            pairs.push((key, value));
        }

        let secrets = Self::from_pairs(pairs);
        tracing::debug!(
            %path,
            become_password = secrets.controller_become_password.is_some(),
            root_hash = secrets.root_password_hash.is_some(),
            local_hash = secrets.local_user_password_hash.is_some(),
            "Loaded secrets"
        );
        Ok(secrets)
    }

    /// Pick the known keys out of `KEY=VALUE` pairs; later pairs win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut secrets = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                CONTROLLER_BECOME_PASSWORD => &mut secrets.controller_become_password,
                PXE_ROOT_PASSWORD_HASH => &mut secrets.root_password_hash,
                PXE_LOCAL_USER_PASSWORD_HASH => &mut secrets.local_user_password_hash,
                _ => continue,
            };
            let value = value.into();
            *slot = if value.is_empty() { None } else { Some(value) };
        }
        secrets
    }

    /// The local user hash, falling back to the root hash.
    pub fn effective_local_user_password_hash(&self) -> Option<&str> {
        self.local_user_password_hash
            .as_deref()
            .or(self.root_password_hash.as_deref())
    }
}

/// Hash a password with SHA-512 crypt (`$6$...`).
pub fn hash_password(password: &str, rounds: usize) -> Result<String> {
    if password.is_empty() {
        return Err(Error::EmptyPassword);
    }

    let params = Sha512Params::new(rounds).map_err(|e| Error::PasswordHash {
        message: format!("{:?}", e),
    })?;
    sha512_simple(password, &params).map_err(|e| Error::PasswordHash {
        message: format!("{:?}", e),
    })
}

/// The `.env` lines that make `hash` the root and local user hash.
pub fn hash_env_lines(hash: &str) -> Vec<String> {
    [PXE_ROOT_PASSWORD_HASH, PXE_LOCAL_USER_PASSWORD_HASH]
        .iter()
        .map(|key| format!("{}=\"{}\"", key, hash))
        .collect()
}

/// Escape every `$` outside single quotes unless it opens a `${NAME}`
/// reference.
///
/// Crypt hashes (`$6$salt$hash`) are written unquoted or double-quoted, and
/// the dotenv parser would otherwise substitute `$6`, `$salt` and so on.
/// Comment lines pass through untouched.
fn escape_literal_dollars(content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 16);
    let mut strong_quote = false;
    let mut weak_quote = false;
    let mut escaped = false;
    let mut line_start = true;
    let mut comment = false;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\n' {
            comment = false;
            escaped = false;
            line_start = !strong_quote && !weak_quote;
            out.push(c);
            continue;
        }
        if comment {
            out.push(c);
            continue;
        }
        if line_start {
            if c == ' ' || c == '\t' {
                out.push(c);
                continue;
            }
            line_start = false;
            if c == '#' {
                comment = true;
                out.push(c);
                continue;
            }
        }

        if escaped {
            escaped = false;
        } else if strong_quote {
            if c == '\'' {
                strong_quote = false;
            }
        } else {
            match c {
                '\\' => escaped = true,
                '\'' if !weak_quote => strong_quote = true,
                '"' => weak_quote = !weak_quote,
                '$' if chars.peek() != Some(&'{') => out.push('\\'),
                _ => {}
            }
        }
        out.push(c);
    }

    out
}
