//! Password hashing for the secrets file

use colored::Colorize;
use dialoguer::Password;

use cluster_inventory::{DEFAULT_HASH_ROUNDS, hash_env_lines, hash_password};

use crate::error::{CliError, Result};

/// Prompt twice for a password and print its hash with ready-to-paste lines.
pub fn run_hash_password() -> Result<()> {
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .allow_empty_password(true)
        .interact()?;

    if password.is_empty() {
        return Err(CliError::user("Empty password not allowed"));
    }

    let hash = hash_password(&password, DEFAULT_HASH_ROUNDS)?;
    print!("{}", render_hash_output(&hash));
    println!();
    println!(
        "{} Paste the lines above into {}.",
        "=>".blue().bold(),
        ".env".cyan()
    );
    Ok(())
}

/// The hash followed by the `.env` lines that carry it.
pub fn render_hash_output(hash: &str) -> String {
    let mut text = String::from("Generated SHA-512 password hash:\n");
    text.push_str(hash);
    text.push_str("\n\n# Add to .env\n");
    for line in hash_env_lines(hash) {
        text.push_str(&line);
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_names_both_secret_keys() {
        let text = render_hash_output("$6$salt$abc");

        assert!(text.starts_with("Generated SHA-512 password hash:\n$6$salt$abc\n"));
        assert!(text.contains("PXE_ROOT_PASSWORD_HASH=\"$6$salt$abc\""));
        assert!(text.contains("PXE_LOCAL_USER_PASSWORD_HASH=\"$6$salt$abc\""));
    }
}
