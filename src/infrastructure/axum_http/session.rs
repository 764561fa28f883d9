use anyhow::{Result, anyhow};
use axum_extra::extract::cookie::CookieJar;
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::config_model::Session as SessionConfig,
    domain::value_objects::iam::{SessionState, UserProfile},
};

pub const SESSION_COOKIE: &str = "session_token";

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    pub email: String,
    pub exp: usize,
}

pub fn encode_session_token(user: &UserProfile, config: &SessionConfig) -> Result<String> {
    let exp = Utc::now().timestamp() as usize + config.ttl_seconds as usize;
    let claims = SessionClaims {
        sub: user.id.to_string(),
        name: user.name.clone(),
        email: user.email.clone(),
        exp,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn decode_session_token(token: &str, jwt_secret: &str) -> Result<SessionClaims> {
    let decoding_key = DecodingKey::from_secret(jwt_secret.as_bytes());
    let validation = Validation::new(jsonwebtoken::Algorithm::HS256);

    let token_data = decode::<SessionClaims>(token, &decoding_key, &validation)
        .map_err(|err| anyhow!("session token validation failed: {}", err))?;

    Ok(token_data.claims)
}

/// Session snapshot for the current request. An absent, expired, or tampered
/// cookie is simply an anonymous session, never an error.
pub fn session_from_cookies(jar: &CookieJar, jwt_secret: &str) -> SessionState {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return SessionState::default();
    };

    let claims = match decode_session_token(cookie.value(), jwt_secret) {
        Ok(claims) => claims,
        Err(_) => return SessionState::default(),
    };

    let Ok(user_id) = Uuid::parse_str(&claims.sub) else {
        return SessionState::default();
    };

    SessionState {
        user: Some(UserProfile {
            id: user_id,
            name: claims.name,
            email: claims.email,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "supersecretjwtsecretforunittesting123";

    fn config() -> SessionConfig {
        SessionConfig {
            jwt_secret: SECRET.to_string(),
            ttl_seconds: 3600,
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        }
    }

    #[test]
    fn encoded_token_decodes_to_the_same_user() {
        let user = profile();
        let token = encode_session_token(&user, &config()).unwrap();

        let claims = decode_session_token(&token, SECRET).expect("valid token should pass");
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.email, user.email);
    }

    #[test]
    fn expired_token_is_rejected() {
        let user = profile();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            name: user.name,
            email: user.email,
            exp: 1, // past
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(decode_session_token(&token, SECRET).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let user = profile();
        let other = SessionConfig {
            jwt_secret: "wrongsecret".to_string(),
            ttl_seconds: 3600,
        };
        let token = encode_session_token(&user, &other).unwrap();

        assert!(decode_session_token(&token, SECRET).is_err());
    }
}
