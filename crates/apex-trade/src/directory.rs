//! Account directory: the mock stand-in for the trade login API.

use std::collections::HashMap;

use apex_commerce::ids::TradeAccountId;
use apex_commerce::money::Money;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::rngs::OsRng;

use crate::account::{DiscountTier, TradeAccount};
use crate::TradeError;

/// Memory cost (KiB) for directory hashes. Kept small: the directory is
/// rebuilt at every start-up.
const HASH_MEMORY_KIB: u32 = 8 * 1024;

struct Entry {
    account: TradeAccount,
    password_hash: String,
}

/// Accounts keyed by lower-cased email, with argon2 password hashes.
pub struct TradeDirectory {
    entries: HashMap<String, Entry>,
    hasher: Argon2<'static>,
}

impl TradeDirectory {
    /// Create an empty directory.
    pub fn new() -> Result<Self, TradeError> {
        let params = Params::new(HASH_MEMORY_KIB, 2, 1, None)
            .map_err(|e| TradeError::Hashing(e.to_string()))?;
        Ok(Self {
            entries: HashMap::new(),
            hasher: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// The two demo trade accounts.
    pub fn demo() -> Result<Self, TradeError> {
        let mut directory = Self::new()?;
        directory.register(
            TradeAccount {
                id: TradeAccountId::new("TRD-001"),
                company_name: "Smith's Auto Repairs Ltd".to_string(),
                email: "trade@apexmotors.co.uk".to_string(),
                account_number: "APX-78432".to_string(),
                discount_tier: DiscountTier::Gold,
                credit_limit: Money::gbp(1_500_000),
            },
            "trade123",
        )?;
        directory.register(
            TradeAccount {
                id: TradeAccountId::new("TRD-002"),
                company_name: "Demo Garage Services".to_string(),
                email: "demo@garage.com".to_string(),
                account_number: "APX-99001".to_string(),
                discount_tier: DiscountTier::Silver,
                credit_limit: Money::gbp(750_000),
            },
            "demo123",
        )?;
        Ok(directory)
    }

    /// Add or replace an account.
    pub fn register(&mut self, account: TradeAccount, password: &str) -> Result<(), TradeError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = self
            .hasher
            .hash_password(password.as_bytes(), &salt)?
            .to_string();
        self.entries.insert(
            account.email.to_lowercase(),
            Entry {
                account,
                password_hash,
            },
        );
        Ok(())
    }

    /// Check credentials. Email matching ignores case.
    pub fn authenticate(&self, email: &str, password: &str) -> Result<TradeAccount, TradeError> {
        let entry = self
            .entries
            .get(&email.trim().to_lowercase())
            .ok_or(TradeError::InvalidCredentials)?;

        let parsed = PasswordHash::new(&entry.password_hash)?;
        self.hasher
            .verify_password(password.as_bytes(), &parsed)
            .map_err(|_| TradeError::InvalidCredentials)?;
        Ok(entry.account.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
