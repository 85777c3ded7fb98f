use std::sync::LazyLock;

use fancy_regex::Regex;
use thiserror::Error;

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    let Ok(email_re) = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$") else {
        error!("failed to compile email pattern");
        return None;
    };
    Some(email_re)
});

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("please fill in all fields")]
    MissingFields,
    #[error("username must be at least 3 characters")]
    UsernameTooShort,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("please enter a valid email")]
    InvalidEmail,
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL
        .as_ref()
        .is_some_and(|email_re| email_re.is_match(email).unwrap_or(false))
}

/// Live hint while the confirmation field is being typed; an empty
/// confirmation is not a mismatch yet.
pub fn confirm_mismatch(password: &str, confirm: &str) -> bool {
    !confirm.is_empty() && password != confirm
}

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(ValidationError::MissingFields);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegisterForm {
    /// Rules are checked in order and the first failure wins. Lengths are
    /// counted in UTF-16 units, like the browser counts them.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.username.is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }

        if self.username.encode_utf16().count() < MIN_USERNAME_LEN {
            return Err(ValidationError::UsernameTooShort);
        }

        if self.password.encode_utf16().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::PasswordTooShort);
        }

        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        if !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn register_form() -> RegisterForm {
        RegisterForm {
            username: "ayase".to_string(),
            email: "ayase@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let form = LoginForm {
            username: "ayase".to_string(),
            password: "".to_string(),
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));

        let form = LoginForm {
            username: "ayase".to_string(),
            password: "x".to_string(),
        };
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_register_valid() {
        assert_eq!(register_form().validate(), Ok(()));
    }

    #[test]
    fn test_register_missing_field() {
        let form = RegisterForm {
            confirm_password: "".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::MissingFields));
    }

    #[test]
    fn test_register_length_thresholds() {
        let form = RegisterForm {
            username: "ay".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::UsernameTooShort));

        let form = RegisterForm {
            username: "aya".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Ok(()));

        let form = RegisterForm {
            password: "12345".to_string(),
            confirm_password: "12345".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));
    }

    #[test]
    fn test_register_lengths_count_utf16_units() {
        // each emoji is one char but two UTF-16 units
        let form = RegisterForm {
            username: "😀😀".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Ok(()));

        let form = RegisterForm {
            password: "🔑🔑🔑".to_string(),
            confirm_password: "🔑🔑🔑".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Ok(()));

        let form = RegisterForm {
            username: "é".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::UsernameTooShort));
    }

    #[test]
    fn test_register_rule_order() {
        // short password is reported before the mismatch and the bad email
        let form = RegisterForm {
            email: "not-an-email".to_string(),
            password: "123".to_string(),
            confirm_password: "456".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordTooShort));

        let form = RegisterForm {
            email: "not-an-email".to_string(),
            confirm_password: "secret2".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));

        let form = RegisterForm {
            email: "not-an-email".to_string(),
            ..register_form()
        };
        assert_eq!(form.validate(), Err(ValidationError::InvalidEmail));
    }

    #[test]
    fn test_email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@sub.example.org"));
        assert!(!is_valid_email("ayase@example"));
        assert!(!is_valid_email("ayase example@mail.com"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ayase@@example.com"));
    }

    #[test]
    fn test_confirm_mismatch() {
        assert!(!confirm_mismatch("secret1", ""));
        assert!(!confirm_mismatch("secret1", "secret1"));
        assert!(confirm_mismatch("secret1", "secret"));
    }
}
