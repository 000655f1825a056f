//! Registration and login flows.
//!
//! Forms are checked locally before anything is sent. A successful login
//! stores the token first and decodes it second, so a malformed token is
//! reported without losing the session the server granted.

use crate::core::session::{decode_claims, Landing, Session};
use crate::models::api::{LoginRequest, RegisterRequest};
use crate::services::api::CatalogClient;
use crate::services::store::KeyValueStore;
use crate::{Error, Result};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Sign-up form input.
#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

impl RegisterForm {
    /// Check the form and build the request.
    pub fn validate(&self) -> Result<RegisterRequest> {
        require(&self.name, "Name is Required")?;
        require(&self.email, "Email is Required")?;
        require(&self.password, "Password is Required")?;
        require(&self.confirm_password, "Confirm Password is Required")?;

        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Error::validation("Password Must be at least 6 characters"));
        }
        if self.password != self.confirm_password {
            return Err(Error::validation(
                "Password and Confirm Password do not match!",
            ));
        }
        if !self.agree_to_terms {
            return Err(Error::validation("You must agree to the terms"));
        }

        Ok(RegisterRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            agree_to_terms: self.agree_to_terms,
        })
    }
}

/// Login form input.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

impl LoginForm {
    /// Check the form and build the request.
    pub fn validate(&self) -> Result<LoginRequest> {
        require(&self.email, "Email is Required!!")?;
        require(&self.password, "Password is Required!!")?;

        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            remember_me: self.remember_me,
        })
    }
}

fn require(value: &str, message: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::validation(message))
    } else {
        Ok(())
    }
}

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub message: Option<String>,
    pub landing: Landing,
}

/// Create an account.
pub async fn register(client: &CatalogClient, form: &RegisterForm) -> Result<Option<String>> {
    let request = form.validate()?;
    client.register(&request).await
}

/// Log in, store the session and pick the landing page.
pub async fn login<S: KeyValueStore>(
    client: &CatalogClient,
    session: &Session<S>,
    form: &LoginForm,
) -> Result<LoginOutcome> {
    let request = form.validate()?;
    let resp = client.login(&request).await?;

    session.store_login(&resp.token, form.remember_me)?;
    let claims = decode_claims(&resp.token)?;

    Ok(LoginOutcome {
        message: resp.message,
        landing: Landing::for_claims(&claims),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegisterForm {
        RegisterForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
            agree_to_terms: true,
        }
    }

    fn message(result: Result<RegisterRequest>) -> String {
        match result {
            Err(Error::Validation(msg)) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_registration() {
        let request = valid_form().validate().unwrap();
        assert_eq!(request.email, "ada@example.com");
        assert!(request.agree_to_terms);
    }

    #[test]
    fn test_registration_checks() {
        let mut form = valid_form();
        form.name = "  ".to_string();
        assert_eq!(message(form.validate()), "Name is Required");

        let mut form = valid_form();
        form.password = "abc".to_string();
        form.confirm_password = "abc".to_string();
        assert_eq!(message(form.validate()), "Password Must be at least 6 characters");

        let mut form = valid_form();
        form.confirm_password = "secret2".to_string();
        assert_eq!(
            message(form.validate()),
            "Password and Confirm Password do not match!"
        );

        let mut form = valid_form();
        form.agree_to_terms = false;
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_login_checks() {
        let form = LoginForm {
            email: String::new(),
            password: "x".to_string(),
            remember_me: false,
        };
        assert!(matches!(form.validate(), Err(Error::Validation(m)) if m == "Email is Required!!"));

        let form = LoginForm {
            email: "a@b.c".to_string(),
            password: "x".to_string(),
            remember_me: true,
        };
        assert!(form.validate().unwrap().remember_me);
    }
}
