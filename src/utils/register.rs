use base64::{engine::general_purpose, Engine};
use email_address::EmailAddress;
use rand::RngCore;
use sha2::{Digest, Sha512};
use tracing::warn;

use super::app_error::{AppError, FormErrors};
use crate::{store::Store, structs::register_user::RegisterUser};

const USERNAME_MAX_LEN: usize = 150;
const PASSWORD_MIN_LEN: usize = 8;

pub fn check_username(username: &str, errors: &mut FormErrors) {
    if username.is_empty() || username.chars().count() > USERNAME_MAX_LEN {
        warn!("Wrong username size : {username}");
        errors.add(
            "username",
            "Le nom d'utilisateur doit contenir entre 1 et 150 caractères.",
        );
        return;
    }

    for c in username.chars() {
        if !c.is_alphanumeric() && !matches!(c, '@' | '.' | '+' | '-' | '_') {
            warn!("The username has to contain only letters, digits and @/./+/-/_ : {username}");
            errors.add(
                "username",
                "Le nom d'utilisateur ne peut contenir que des lettres, des chiffres et les caractères @/./+/-/_.",
            );
            return;
        }
    }
}

/// An empty email is allowed, anything else has to be a valid address.
pub fn check_email_address(email: &str, errors: &mut FormErrors) {
    if !email.is_empty() && !EmailAddress::is_valid(email) {
        warn!("Invalid email `{email}`");
        errors.add("email", "L'email est invalide.");
    }
}

pub fn check_password(password: &str, errors: &mut FormErrors) {
    if password.chars().count() < PASSWORD_MIN_LEN {
        warn!("Password too short");
        errors.add(
            "password",
            "Le mot de passe doit contenir au moins 8 caractères.",
        );
    }
}

pub async fn check_register_infos(store: &Store, user: &RegisterUser) -> Result<(), AppError> {
    let mut errors = FormErrors::default();

    check_username(&user.username, &mut errors);
    check_email_address(&user.email, &mut errors);
    check_password(&user.password, &mut errors);

    if errors.get("username").is_none() && store.username_taken(&user.username).await? {
        warn!("Username `{}` already used", user.username);
        errors.add("username", "Pseudo déjà utilisé.");
    }

    errors.into_result()
}

pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha512::new();
    hasher.update(password);
    format!("{:x}", hasher.finalize())
}

/// Random value stored in the `session` cookie.
pub fn generate_session_token() -> String {
    let mut token = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut token);
    general_purpose::URL_SAFE_NO_PAD.encode(token)
}

/// Keeps only local absolute paths, anything else falls back to `/`.
/// Browsers read `/\host` like `//host`, so a backslash second is refused too.
pub fn safe_redirect_target(next: Option<&str>) -> String {
    match next {
        Some(next) if is_local_path(next) => next.to_string(),
        _ => "/".to_string(),
    }
}

fn is_local_path(next: &str) -> bool {
    let mut chars = next.chars();
    chars.next() == Some('/')
        && !matches!(chars.next(), Some('/' | '\\'))
        && !next.chars().any(char::is_control)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn username_errors(username: &str) -> bool {
        let mut errors = FormErrors::default();
        check_username(username, &mut errors);
        errors.get("username").is_some()
    }

    #[test]
    fn usernames() {
        assert!(!username_errors("auth"));
        assert!(!username_errors("leo.tolstoy+1@site"));
        assert!(username_errors(""));
        assert!(username_errors("with space"));
        assert!(username_errors(&"a".repeat(151)));
    }

    #[test]
    fn emails_are_optional_but_checked() {
        let mut errors = FormErrors::default();
        check_email_address("", &mut errors);
        check_email_address("someone@example.com", &mut errors);
        assert!(errors.is_empty());

        check_email_address("not-an-email", &mut errors);
        assert!(errors.get("email").is_some());
    }

    #[test]
    fn passwords_need_eight_chars() {
        let mut errors = FormErrors::default();
        check_password("12345678", &mut errors);
        assert!(errors.is_empty());
        check_password("short", &mut errors);
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn password_hash_is_stable_hex() {
        let hash = hash_password("password");
        assert_eq!(hash, hash_password("password"));
        assert_ne!(hash, hash_password("Password"));
        assert_eq!(hash.len(), 128);
    }

    #[test]
    fn session_tokens_differ() {
        assert_ne!(generate_session_token(), generate_session_token());
    }

    #[test]
    fn redirect_targets_stay_local() {
        assert_eq!(safe_redirect_target(Some("/create/")), "/create/");
        assert_eq!(safe_redirect_target(Some("//evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("https://evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("/\\evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("/\t/evil.example")), "/");
        assert_eq!(safe_redirect_target(Some("/profile/a\\b/")), "/profile/a\\b/");
        assert_eq!(safe_redirect_target(None), "/");
    }

    #[tokio::test]
    async fn taken_username_is_reported() {
        let store = Store::in_memory().await.unwrap();
        store
            .create_account(crate::models::account::NewAccount {
                username: "auth".to_string(),
                email: String::new(),
                first_name: String::new(),
                last_name: String::new(),
                password: hash_password("password"),
                token: generate_session_token(),
            })
            .await
            .unwrap();

        let user = RegisterUser {
            username: "auth".to_string(),
            email: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            password: "long enough".to_string(),
        };
        assert!(matches!(
            check_register_infos(&store, &user).await,
            Err(AppError::Validation(_))
        ));
    }
}
