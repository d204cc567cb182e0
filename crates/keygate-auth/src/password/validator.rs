//! Password policy enforcement for new passwords.

use keygate_core::config::AuthConfig;
use keygate_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Validates a password against all configured policies.
    ///
    /// Returns `Ok(())` if the password meets all requirements,
    /// or an error describing the first violation found.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.len() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(AppError::validation(
                "Password must contain at least one uppercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(AppError::validation(
                "Password must contain at least one lowercase letter",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::validation(
                "Password must contain at least one digit",
            ));
        }

        if !password.chars().any(|c| !c.is_alphanumeric()) {
            return Err(AppError::validation(
                "Password must contain at least one special character",
            ));
        }

        // zxcvbn catches dictionary-shaped passwords that pass the
        // character-class checks.
        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Three {
            return Err(AppError::validation(
                "Password is too weak. Please use a stronger password with more entropy.",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_strong_password_passes() {
        assert!(validator().validate("vx7#Qm!plover-Trenches").is_ok());
    }

    #[test]
    fn test_short_password_rejected() {
        assert!(validator().validate("aB1!").is_err());
    }

    #[test]
    fn test_missing_character_classes_rejected() {
        let v = validator();
        assert!(v.validate("alllowercase1!").is_err());
        assert!(v.validate("ALLUPPERCASE1!").is_err());
        assert!(v.validate("NoDigitsHere!").is_err());
        assert!(v.validate("NoSpecials123").is_err());
    }

    #[test]
    fn test_dictionary_password_rejected() {
        // Passes every class check but zxcvbn scores it too low.
        assert!(validator().validate("Password1!").is_err());
    }
}
