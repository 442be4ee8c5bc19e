use {
    chrono::Utc,
    jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode},
    serde::{Deserialize, Serialize},
    taskboard_store::{Store, User},
};

use crate::error::AuthError;

/// Token lifetime: seven days.
const TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Claims carried by a session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id the token is bound to. Absent or null means the token
    /// carries no identifier and resolves to an anonymous caller.
    #[serde(default)]
    pub sub: Option<String>,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Sign a 7-day token bound to the given user id. Pure function of
/// identity, secret, and clock; nothing is persisted.
pub fn issue_token(user_id: &str, secret: &str) -> Result<String, AuthError> {
    let claims = Claims {
        sub: Some(user_id.to_string()),
        exp: Utc::now().timestamp() + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthError::Sign(e.to_string()))
}

/// Resolve the caller referenced by a bearer token.
///
/// `None` means an anonymous request. A token that fails validation
/// (malformed, expired, wrong signature) is an [`AuthError::InvalidToken`];
/// a token without a subject, or whose subject no longer maps to a user,
/// resolves to anonymous.
pub async fn resolve_caller(
    token: Option<&str>,
    secret: &str,
    store: &dyn Store,
) -> Result<Option<User>, AuthError> {
    let Some(token) = token else {
        return Ok(None);
    };
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AuthError::InvalidToken)?;
    let Some(id) = data.claims.sub else {
        return Ok(None);
    };
    Ok(store.user_by_id(&id).await?)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use taskboard_store::{MemoryStore, NewUser};

    use super::*;

    const SECRET: &str = "test-secret";

    async fn store_with_user() -> (MemoryStore, User) {
        let store = MemoryStore::new();
        let user = store
            .create_user(NewUser {
                name: "Ada".into(),
                email: "ada@x.com".into(),
                password_hash: "hash".into(),
                avatar: None,
            })
            .await
            .unwrap();
        (store, user)
    }

    fn sign(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn token_round_trips_to_the_same_user() {
        let (store, user) = store_with_user().await;
        let token = issue_token(&user.id, SECRET).unwrap();

        let caller = resolve_caller(Some(&token), SECRET, &store).await.unwrap();
        assert_eq!(caller.unwrap().id, user.id);
    }

    #[tokio::test]
    async fn absent_token_is_anonymous() {
        let (store, _) = store_with_user().await;
        let caller = resolve_caller(None, SECRET, &store).await.unwrap();
        assert!(caller.is_none());
    }

    #[tokio::test]
    async fn malformed_token_is_rejected() {
        let (store, _) = store_with_user().await;
        let err = resolve_caller(Some("garbage"), SECRET, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let (store, user) = store_with_user().await;
        // Well past the default validation leeway.
        let token = sign(
            &Claims {
                sub: Some(user.id),
                exp: Utc::now().timestamp() - 3600,
            },
            SECRET,
        );
        let err = resolve_caller(Some(&token), SECRET, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let (store, user) = store_with_user().await;
        let token = issue_token(&user.id, "other-secret").unwrap();
        let err = resolve_caller(Some(&token), SECRET, &store)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn token_without_subject_is_anonymous() {
        let (store, _) = store_with_user().await;
        let token = sign(
            &Claims {
                sub: None,
                exp: Utc::now().timestamp() + 60,
            },
            SECRET,
        );
        let caller = resolve_caller(Some(&token), SECRET, &store).await.unwrap();
        assert!(caller.is_none());
    }

    #[tokio::test]
    async fn vanished_user_is_anonymous() {
        let (store, _) = store_with_user().await;
        let token = issue_token("aaaaaaaaaaaaaaaaaaaaaaaa", SECRET).unwrap();
        let caller = resolve_caller(Some(&token), SECRET, &store).await.unwrap();
        assert!(caller.is_none());
    }
}
