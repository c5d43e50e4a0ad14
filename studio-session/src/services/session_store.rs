use crate::app_state::TokenStoreType;
use crate::domain::{AccessClaims, Identity, RefreshClaims, TokenPair, TokenStoreError};
use crate::errors::ClientError;
use crate::services::token_decoder::decode_refresh_claims;
use crate::utils::{
    ACCESS_TOKEN_KEY, AVATAR_KEY, GROUPS_KEY, NAME_KEY, REDIRECTED_FROM_KEY, REFRESH_EXP_KEY,
    REFRESH_TOKEN_KEY, ROLE_KEY, USER_ID_KEY,
};

pub async fn access_token(store: &TokenStoreType) -> Result<Option<String>, TokenStoreError> {
    store.read().await.get(ACCESS_TOKEN_KEY).await
}

pub async fn refresh_token(store: &TokenStoreType) -> Result<Option<String>, TokenStoreError> {
    store.read().await.get(REFRESH_TOKEN_KEY).await
}

/// The stored refresh token, if its stored expiry is still in the future.
/// A missing or unparsable `refresh_exp` counts as expired.
pub async fn usable_refresh_token(
    store: &TokenStoreType,
    now: i64,
) -> Result<Option<String>, TokenStoreError> {
    let (token, exp) = {
        let store = store.read().await;
        (
            store.get(REFRESH_TOKEN_KEY).await?,
            store.get(REFRESH_EXP_KEY).await?,
        )
    };
    let exp = exp.and_then(|v| v.parse::<i64>().ok());
    Ok(match (token, exp) {
        (Some(token), Some(exp)) if exp > now => Some(token),
        _ => None,
    })
}

/// Store a pair obtained from the refresh endpoint, with the new refresh
/// token's own expiry.
pub async fn persist_refreshed(
    store: &TokenStoreType,
    pair: &TokenPair,
) -> Result<RefreshClaims, ClientError> {
    let refresh_claims = decode_refresh_claims(&pair.refresh)?;
    store
        .write()
        .await
        .set_many(vec![
            (ACCESS_TOKEN_KEY, pair.access.clone()),
            (REFRESH_TOKEN_KEY, pair.refresh.clone()),
            (REFRESH_EXP_KEY, refresh_claims.exp.to_string()),
        ])
        .await?;
    Ok(refresh_claims)
}

/// Store a freshly established session: both tokens, the refresh expiry and
/// the denormalized display fields. `groups` are display names.
pub async fn persist_login(
    store: &TokenStoreType,
    pair: &TokenPair,
    access_claims: &AccessClaims,
    refresh_claims: &RefreshClaims,
    groups: Vec<String>,
) -> Result<Identity, TokenStoreError> {
    let identity = Identity {
        user_id: Some(access_claims.user_id),
        name: access_claims.name.clone(),
        avatar: access_claims.avatar.clone().filter(|a| !a.is_empty()),
        role: access_claims.role.clone(),
        groups,
    };

    store
        .write()
        .await
        .set_many(vec![
            (ACCESS_TOKEN_KEY, pair.access.clone()),
            (REFRESH_TOKEN_KEY, pair.refresh.clone()),
            (REFRESH_EXP_KEY, refresh_claims.exp.to_string()),
            (NAME_KEY, identity.name.clone()),
            (AVATAR_KEY, identity.avatar.clone().unwrap_or_default()),
            (USER_ID_KEY, access_claims.user_id.to_string()),
            (ROLE_KEY, identity.role.clone()),
            (GROUPS_KEY, serde_json::to_string(&identity.groups)?),
        ])
        .await?;

    Ok(identity)
}

/// Cached display fields, or `None` when no session is stored.
pub async fn identity(store: &TokenStoreType) -> Result<Option<Identity>, TokenStoreError> {
    let store = store.read().await;
    if store.get(ACCESS_TOKEN_KEY).await?.is_none() {
        return Ok(None);
    }

    let groups = match store.get(GROUPS_KEY).await? {
        Some(raw) => serde_json::from_str(&raw)?,
        None => Vec::new(),
    };
    Ok(Some(Identity {
        user_id: store
            .get(USER_ID_KEY)
            .await?
            .and_then(|v| v.parse::<i64>().ok()),
        name: store.get(NAME_KEY).await?.unwrap_or_default(),
        avatar: store.get(AVATAR_KEY).await?.filter(|a| !a.is_empty()),
        role: store.get(ROLE_KEY).await?.unwrap_or_default(),
        groups,
    }))
}

pub async fn wipe(store: &TokenStoreType) -> Result<(), TokenStoreError> {
    store.write().await.clear().await
}

/// Wipe the session and remember `redirect_from` for after the next login,
/// in one critical section.
pub async fn wipe_and_remember(
    store: &TokenStoreType,
    redirect_from: String,
) -> Result<(), TokenStoreError> {
    let mut store = store.write().await;
    store.clear().await?;
    store.set(REDIRECTED_FROM_KEY, redirect_from).await
}

/// Return and forget the page a forced logout happened on.
pub async fn take_redirect(store: &TokenStoreType) -> Result<Option<String>, TokenStoreError> {
    let mut store = store.write().await;
    let path = store.get(REDIRECTED_FROM_KEY).await?;
    if path.is_some() {
        store.remove(REDIRECTED_FROM_KEY).await?;
    }
    Ok(path)
}
