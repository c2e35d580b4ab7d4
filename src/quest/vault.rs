//! Password and secret store.

use crate::config::{PasswordConfig, QuestConfig, SecretConfig};
use crate::quest::level::Level;
use crate::quest::redirect::RedirectChain;

/// Read-only passwords and secrets, built once at startup.
#[derive(Debug, Clone)]
pub struct Vault {
    passwords: [String; 12],
    redirect_chain: RedirectChain,
    robots_secret: String,
    mask_secret: String,
}

impl Vault {
    pub fn new(passwords: &PasswordConfig, secrets: &SecretConfig) -> Self {
        let passwords = [
            passwords.plain.clone(),
            passwords.reverse.clone(),
            passwords.base64.clone(),
            passwords.header.clone(),
            passwords.delete.clone(),
            passwords.user_agent.clone(),
            passwords.accept_language.clone(),
            passwords.redirect.clone(),
            passwords.robots.clone(),
            passwords.guess_number.clone(),
            passwords.mask.clone(),
            passwords.finish.clone(),
        ];

        Self {
            passwords,
            redirect_chain: RedirectChain::new(secrets.redirect_chain.clone()),
            robots_secret: secrets.robots.clone(),
            mask_secret: secrets.mask.clone(),
        }
    }

    /// Password required to call `level`.
    pub fn password(&self, level: Level) -> &str {
        &self.passwords[level.index()]
    }

    pub fn redirect_chain(&self) -> &RedirectChain {
        &self.redirect_chain
    }

    pub fn robots_secret(&self) -> &str {
        &self.robots_secret
    }

    pub fn mask_secret(&self) -> &str {
        &self.mask_secret
    }
}

impl From<&QuestConfig> for Vault {
    fn from(config: &QuestConfig) -> Self {
        Self::new(&config.passwords, &config.secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passwords_follow_level_order() {
        let config = QuestConfig::default();
        let vault = Vault::from(&config);

        assert_eq!(vault.password(Level::Plain), config.passwords.plain);
        assert_eq!(vault.password(Level::AcceptLanguage), config.passwords.accept_language);
        assert_eq!(vault.password(Level::Finish), config.passwords.finish);
        assert_eq!(vault.mask_secret(), config.secrets.mask);
        assert_eq!(vault.redirect_chain().len(), 20);
    }
}
