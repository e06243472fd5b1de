use anyhow::{anyhow, Result};
use std::collections::HashSet;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub admin_ids: HashSet<i64>,
    pub database_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| anyhow!("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(anyhow!("TELEGRAM_BOT_TOKEN must be set"));
        }

        let admin_ids = env::var("ADMIN_IDS").unwrap_or_default();
        let admin_ids = parse_admin_ids(&admin_ids)?;

        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:./data/squad.db".to_string());
        let database_url = if database_url.trim().is_empty() {
            "sqlite:./data/squad.db".to_string()
        } else {
            database_url
        };

        Ok(Config {
            telegram_bot_token: token,
            admin_ids,
            database_url,
        })
    }

    pub fn is_admin(&self, user_id: i64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

fn parse_admin_ids(raw: &str) -> Result<HashSet<i64>> {
    let mut ids = HashSet::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let id: i64 = part
            .parse()
            .map_err(|_| anyhow!("ADMIN_IDS contains a non-numeric entry: '{}'", part))?;
        ids.insert(id);
    }
    Ok(ids)
}
