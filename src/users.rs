//! Users

use std::fmt;

use crate::{
    buyers::BuyerKey,
    sellers::SellerKey,
    validation::{MIN_USERNAME_LEN, ValidationError},
};

/// Which kind of account to register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserKind {
    /// Lists products.
    Seller,

    /// Adds products to a cart and checks out.
    Buyer,
}

/// A registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum User {
    /// A seller account
    Seller(SellerKey),

    /// A buyer account
    Buyer(BuyerKey),
}

impl User {
    /// The kind of account this is.
    pub fn kind(&self) -> UserKind {
        match self {
            User::Seller(_) => UserKind::Seller,
            User::Buyer(_) => UserKind::Buyer,
        }
    }
}

/// Username and email shared by every kind of user.
///
/// Two identities are equal when both the username and the email match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    username: String,
    email: String,
}

impl Identity {
    /// Creates a validated identity.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the username or email is invalid.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let username = username.into();
        let email = email.into();

        validate_username(&username)?;
        validate_email(&email)?;

        Ok(Self { username, email })
    }

    /// The username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Replaces the username.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] and keeps the old username if the new one is invalid.
    pub fn set_username(&mut self, username: impl Into<String>) -> Result<(), ValidationError> {
        let username = username.into();

        validate_username(&username)?;
        self.username = username;

        Ok(())
    }

    /// Replaces the email address.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] and keeps the old email if the new one is invalid.
    pub fn set_email(&mut self, email: impl Into<String>) -> Result<(), ValidationError> {
        let email = email.into();

        validate_email(&email)?;
        self.email = email;

        Ok(())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.username, self.email)
    }
}

/// Checks that a username is non-blank and long enough once trimmed.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyUsername`] or [`ValidationError::UsernameTooShort`].
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let trimmed = username.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyUsername);
    }

    if trimmed.chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }

    Ok(())
}

/// Checks that an email is non-blank and contains an `@`.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyEmail`] or [`ValidationError::InvalidEmail`].
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        return Err(ValidationError::EmptyEmail);
    }

    if !email.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}
