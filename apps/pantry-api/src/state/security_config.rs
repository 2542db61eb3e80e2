use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey};

/// Key material used to verify session tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JwtKey {
    /// Shared HMAC secret (HS256/HS384/HS512)
    Secret(Vec<u8>),
    /// PEM-encoded RSA or EC public key
    PublicPem(Vec<u8>),
}

/// Token verification settings shared by every request handle.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_key: JwtKey,
    pub algorithm: Algorithm,
    /// Expected `aud` claim; audience is not checked when unset
    pub audience: Option<String>,
}

impl SecurityConfig {
    /// HS256 verification with the given shared secret.
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_key: JwtKey::Secret(jwt_secret.into()),
            algorithm: Algorithm::HS256,
            audience: None,
        }
    }

    /// Verification with an asymmetric public key.
    ///
    /// The PEM is parsed eagerly so a bad key fails at startup rather than on
    /// the first request.
    pub fn from_public_key_pem(
        algorithm: Algorithm,
        pem: impl Into<Vec<u8>>,
    ) -> Result<Self, jsonwebtoken::errors::Error> {
        if matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ErrorKind::InvalidAlgorithm.into());
        }
        let config = Self {
            jwt_key: JwtKey::PublicPem(pem.into()),
            algorithm,
            audience: None,
        };
        config.decoding_key()?;
        Ok(config)
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn decoding_key(&self) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
        match &self.jwt_key {
            JwtKey::Secret(secret) => Ok(DecodingKey::from_secret(secret)),
            JwtKey::PublicPem(pem) => match self.algorithm {
                Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(pem),
                Algorithm::EdDSA => DecodingKey::from_ed_pem(pem),
                _ => DecodingKey::from_rsa_pem(pem),
            },
        }
    }

    /// Fixed HS256 secret shared by unit and integration tests.
    pub fn for_tests() -> Self {
        Self::new(b"test_secret_key_for_testing_purposes_only".to_vec())
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
