use std::{fmt, ops::Deref, str::FromStr};

use chrono::NaiveDate;
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::domain::result::QuizResult;

/// A user's login identifier. Never empty.
///
/// Results embed the login by value, so changing it requires
/// [`rename_login`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Login(NonEmptyString);

impl Login {
    /// Creates a login from a string.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyLoginError`] if the string is empty or only whitespace.
    pub fn new(s: String) -> Result<Self, EmptyLoginError> {
        if s.trim().is_empty() {
            return Err(EmptyLoginError);
        }
        NonEmptyString::new(s).map(Self).map_err(|_| EmptyLoginError)
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for Login {
    type Error = EmptyLoginError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Login {
    type Error = EmptyLoginError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for Login {
    type Err = EmptyLoginError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl From<Login> for String {
    fn from(login: Login) -> Self {
        login.0.as_str().to_string()
    }
}

impl Deref for Login {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a login is empty.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("login must not be empty")]
pub struct EmptyLoginError;

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique login identifier.
    pub login: Login,
    /// Password, stored as entered.
    pub password: String,
    /// Date of birth.
    pub birth_date: NaiveDate,
}

/// Errors that can occur when renaming a login.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenameError {
    /// The new login already belongs to another user.
    #[error("login '{0}' already exists")]
    DuplicateIdentifier(Login),
    /// No user has the old login.
    #[error("user '{0}' not found")]
    UnknownUser(Login),
}

/// Errors that can occur when registering a user.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegisterError {
    /// The login is already taken.
    #[error("login '{0}' already exists")]
    DuplicateIdentifier(Login),
}

/// Finds a user by login.
#[must_use]
pub fn find<'a>(users: &'a [User], login: &str) -> Option<&'a User> {
    users.iter().find(|user| user.login.as_str() == login)
}

/// Adds a new user.
///
/// # Errors
///
/// Returns [`RegisterError::DuplicateIdentifier`] if the login is taken. The
/// collection is left unchanged.
pub fn register(users: &mut Vec<User>, user: User) -> Result<&User, RegisterError> {
    if find(users, &user.login).is_some() {
        return Err(RegisterError::DuplicateIdentifier(user.login));
    }
    info!("Registered user {}", user.login);
    let index = users.len();
    users.push(user);
    Ok(&users[index])
}

/// Returns the user whose login and password both match.
#[must_use]
pub fn authenticate<'a>(users: &'a [User], login: &str, password: &str) -> Option<&'a User> {
    find(users, login).filter(|user| user.password == password)
}

/// Renames a user and every result that references the old login.
///
/// Both collections are validated before either is modified, so on error
/// nothing changes. Renaming a login to itself is a no-op.
///
/// Returns the number of results that were updated.
///
/// # Errors
///
/// - [`RenameError::UnknownUser`] if no user has the old login
/// - [`RenameError::DuplicateIdentifier`] if another user has the new login
pub fn rename_login(
    users: &mut [User],
    results: &mut [QuizResult],
    old: &Login,
    new: Login,
) -> Result<usize, RenameError> {
    let position = users
        .iter()
        .position(|user| &user.login == old)
        .ok_or_else(|| RenameError::UnknownUser(old.clone()))?;

    if &new == old {
        return Ok(0);
    }
    if users.iter().any(|user| user.login == new) {
        return Err(RenameError::DuplicateIdentifier(new));
    }

    let mut updated = 0;
    for result in results.iter_mut().filter(|result| &result.user_login == old) {
        result.user_login = new.clone();
        updated += 1;
    }

    info!("Renamed user {old} → {new}, updated {updated} results");
    users[position].login = new;

    Ok(updated)
}
