use std::collections::HashMap;

use anyhow::Context;
use bcrypt::{hash, verify};
use log::info;
use parking_lot::RwLock;

use crate::errors::{AppError, AuthError};
use crate::models::user::User;
use crate::utils::id_gen::generate_unique_id;

/// In-memory user accounts keyed by user id. The map lock is only held for
/// lookups and inserts, never while bcrypt runs.
#[derive(Debug)]
pub struct UserDirectory {
    users: RwLock<HashMap<String, User>>,
    bcrypt_cost: u32,
}

impl UserDirectory {
    pub fn new(bcrypt_cost: u32) -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            bcrypt_cost,
        }
    }

    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn get(&self, id: &str) -> Option<User> {
        self.users.read().get(id).cloned()
    }

    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.users
            .read()
            .values()
            .find(|user| user.email == email)
            .cloned()
    }

    /// Register a new account. Email uniqueness is checked here, at creation.
    pub fn create(&self, email: &str, password: &str) -> Result<User, AppError> {
        if email.is_empty() || password.is_empty() {
            return Err(AppError::validation("Email and password are required"));
        }

        if self.find_by_email(email).is_some() {
            return Err(email_taken());
        }

        let password_hash =
            hash(password, self.bcrypt_cost).context("Failed to hash password")?;

        self.insert(email, password_hash)
    }

    fn insert(&self, email: &str, password_hash: String) -> Result<User, AppError> {
        let mut users = self.users.write();
        // The email may have been claimed while the password was hashing
        if users.values().any(|user| user.email == email) {
            return Err(email_taken());
        }

        let id = generate_unique_id(|candidate| users.contains_key(candidate));
        let user = User::new(id.clone(), email.to_string(), password_hash);
        users.insert(id, user.clone());
        drop(users);

        info!("Registered user {}", user.id);
        Ok(user)
    }

    pub fn verify(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.find_by_email(email).ok_or(AuthError::InvalidEmail)?;

        let password_matches =
            verify(password, &user.password_hash).context("Password verification failed")?;

        if !password_matches {
            return Err(AuthError::InvalidPassword.into());
        }

        Ok(user)
    }
}

fn email_taken() -> AppError {
    AppError::validation("Email is already registered")
}
