//! Field rules for customer records. Pure functions; the uniqueness rule
//! needs the store and lives in [`crate::domain::service::Service::validate`].

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

pub const NOME_MAX_LEN: usize = 100;
pub const EMAIL_MAX_LEN: usize = 120;
pub const TELEFONE_MAX_LEN: usize = 50;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));

/// One violated rule. `Display` is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name is required.")]
    NomeRequired,

    #[error("name must be at most {max} characters.")]
    NomeTooLong { max: usize },

    #[error("invalid email.")]
    InvalidEmail,

    #[error("email must be at most {max} characters.")]
    EmailTooLong { max: usize },

    #[error("email already registered.")]
    EmailTaken,

    #[error("phone must be at most {max} characters.")]
    TelefoneTooLong { max: usize },
}

/// `local@domain.tld`: no whitespace, exactly one `@`, a dot after it.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Key an email is unique under: trimmed and lower-cased over all of
/// Unicode, so `ÉRICA@x.com` and `érica@x.com` collide.
pub fn email_key(email: &str) -> String {
    email.trim().to_lowercase()
}

fn too_long(value: &str, max: usize) -> bool {
    value.chars().count() > max
}

pub fn check_nome(nome: &str, errors: &mut Vec<ValidationError>) {
    let nome = nome.trim();
    if nome.is_empty() {
        errors.push(ValidationError::NomeRequired);
    } else if too_long(nome, NOME_MAX_LEN) {
        errors.push(ValidationError::NomeTooLong { max: NOME_MAX_LEN });
    }
}

/// Syntax and length only. Returns true when the email is present and
/// well-formed, i.e. worth a uniqueness lookup.
pub fn check_email_syntax(email: &str, errors: &mut Vec<ValidationError>) -> bool {
    let email = email.trim();
    if email.is_empty() {
        return false;
    }
    if !is_valid_email(email) {
        errors.push(ValidationError::InvalidEmail);
        return false;
    }
    if too_long(email, EMAIL_MAX_LEN) {
        errors.push(ValidationError::EmailTooLong { max: EMAIL_MAX_LEN });
    }
    true
}

pub fn check_telefone(telefone: &str, errors: &mut Vec<ValidationError>) {
    if too_long(telefone.trim(), TELEFONE_MAX_LEN) {
        errors.push(ValidationError::TelefoneTooLong {
            max: TELEFONE_MAX_LEN,
        });
    }
}
