use super::model::{AuthenticatedUser, Claims};
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use std::time::Duration;

/// Verifies HS256 admin access tokens issued by the admin login service
pub struct JwtValidator {
    decoding_key: DecodingKey,
    leeway: u64,
}

impl JwtValidator {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            leeway: leeway.as_secs(),
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let claims = token_data.claims;

        if claims.sub.trim().is_empty() {
            return Err(AppError::Auth("Token subject is empty".to_string()));
        }

        Ok(AuthenticatedUser {
            sub: claims.sub,
            roles: claims.roles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{issue_token, TEST_JWT_SECRET};

    #[test]
    fn test_valid_token_yields_user() {
        let validator = JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0));
        let token = issue_token(TEST_JWT_SECRET, "admin-42", &["super_admin"], 3600);

        let user = validator.validate_token(&token).unwrap();
        assert_eq!(user.sub, "admin-42");
        assert!(user.is_super_admin());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let validator = JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0));
        let token = issue_token(
            "another-secret-that-is-long-enough-1234",
            "admin-42",
            &["admin"],
            3600,
        );

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let validator = JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0));
        let token = issue_token(TEST_JWT_SECRET, "admin-42", &["admin"], -3600);

        assert!(matches!(
            validator.validate_token(&token),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let validator = JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0));
        assert!(validator.validate_token("not-a-jwt").is_err());
    }
}
