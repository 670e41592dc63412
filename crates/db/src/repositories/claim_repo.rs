//! Repository for meal claims.
//!
//! Layout:
//!
//! ```text
//! claims/{email}.json        Claim       (one per attendee; long emails
//!                                          are stored under a digest)
//! claim-tokens/{token}.json  TokenIndex  (meal token -> email)
//! ```
//!
//! Both documents are written with create-if-absent, so a second claim for
//! the same email loses at the store instead of overwriting the first.

use cafe_core::claim::{generate_meal_token, is_well_formed_token, normalize_token, MAX_TOKEN_ATTEMPTS};
use cafe_core::email::normalize_email;
use chrono::Utc;

use crate::blob::{bounded_key_segment, encode_key_segment};
use crate::error::StoreError;
use crate::models::claim::{Claim, NewClaim, TokenIndex};
use crate::store::Store;

const CLAIMS_PREFIX: &str = "claims/";
const TOKENS_PREFIX: &str = "claim-tokens/";

fn claim_key(email: &str) -> String {
    format!("{CLAIMS_PREFIX}{}.json", bounded_key_segment(email))
}

fn token_key(token: &str) -> String {
    format!("{TOKENS_PREFIX}{}.json", encode_key_segment(&token.to_ascii_lowercase()))
}

/// Result of [`ClaimRepo::try_create`].
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    Created(Claim),
    /// The email already holds a claim; nothing was written.
    AlreadyClaimed,
}

/// Provides claim lookup and the at-most-once claim write.
pub struct ClaimRepo;

impl ClaimRepo {
    pub async fn find_by_email(store: &Store, email: &str) -> Result<Option<Claim>, StoreError> {
        store.get_doc(&claim_key(&normalize_email(email))).await
    }

    /// Look up a claim by meal token as typed or scanned.
    pub async fn find_by_token(store: &Store, raw_token: &str) -> Result<Option<Claim>, StoreError> {
        let token = normalize_token(raw_token);
        if !is_well_formed_token(&token) {
            return Ok(None);
        }
        let Some(index) = store.get_doc::<TokenIndex>(&token_key(&token)).await? else {
            return Ok(None);
        };
        let claim = Self::find_by_email(store, &index.email).await?;
        // A revoked and re-made claim leaves the old token pointing at a
        // claim with a different token.
        Ok(claim.filter(|c| c.token == token))
    }

    /// Record a claim unless the email already has one.
    ///
    /// A unique token is reserved first, then the claim document is created.
    /// When the claim loses a race the reserved token is released.
    pub async fn try_create(store: &Store, input: NewClaim) -> Result<ClaimOutcome, StoreError> {
        let email = normalize_email(&input.email);
        let key = claim_key(&email);

        if store.get_doc::<Claim>(&key).await?.is_some() {
            return Ok(ClaimOutcome::AlreadyClaimed);
        }

        let token = Self::reserve_token(store, &email).await?;
        let claim = Claim {
            email,
            name: input.name,
            token,
            items: input.items,
            order_id: input.order_id,
            claimed_at: Utc::now(),
        };

        match store.put_doc_if_absent(&key, &claim).await {
            Ok(true) => {
                tracing::info!(email = %claim.email, order_id = %claim.order_id, "Meal claimed");
                Ok(ClaimOutcome::Created(claim))
            }
            Ok(false) => {
                store.delete_doc(&token_key(&claim.token)).await?;
                tracing::info!(email = %claim.email, "Concurrent claim lost the race");
                Ok(ClaimOutcome::AlreadyClaimed)
            }
            Err(e) => {
                if let Err(release) = store.delete_doc(&token_key(&claim.token)).await {
                    tracing::error!(error = %release, token = %claim.token, "Failed to release meal token");
                }
                Err(e)
            }
        }
    }

    async fn reserve_token(store: &Store, email: &str) -> Result<String, StoreError> {
        for _ in 0..MAX_TOKEN_ATTEMPTS {
            let token = generate_meal_token();
            let index = TokenIndex {
                token: token.clone(),
                email: email.to_string(),
            };
            if store.put_doc_if_absent(&token_key(&token), &index).await? {
                return Ok(token);
            }
            tracing::warn!("Meal token collision, retrying");
        }
        Err(StoreError::KeyExhausted(MAX_TOKEN_ATTEMPTS))
    }

    /// Remove a claim and its token index, freeing the email to claim again.
    pub async fn delete(store: &Store, email: &str) -> Result<Option<Claim>, StoreError> {
        let key = claim_key(&normalize_email(email));
        let Some(claim) = store.get_doc::<Claim>(&key).await? else {
            return Ok(None);
        };
        store.delete_doc(&key).await?;
        store.delete_doc(&token_key(&claim.token)).await?;
        Ok(Some(claim))
    }

    pub async fn count(store: &Store) -> Result<usize, StoreError> {
        Ok(store.list_keys(CLAIMS_PREFIX).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use cafe_core::menu::MenuCategory;
    use cafe_core::types::new_record_id;

    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::blob::{BlobStore, MemoryBlobStore};
    use crate::models::order::OrderItem;

    /// Memory store whose create-if-absent writes under `claims/` fail.
    #[derive(Default)]
    struct ClaimWritesFail {
        inner: MemoryBlobStore,
    }

    #[async_trait]
    impl BlobStore for ClaimWritesFail {
        async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
            self.inner.get(key).await
        }
        async fn put(&self, key: &str, bytes: Vec<u8>) -> Result<(), StoreError> {
            self.inner.put(key, bytes).await
        }
        async fn put_if_absent(&self, key: &str, bytes: Vec<u8>) -> Result<bool, StoreError> {
            if key.starts_with(CLAIMS_PREFIX) {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source: std::io::Error::other("disk full"),
                });
            }
            self.inner.put_if_absent(key, bytes).await
        }
        async fn delete(&self, key: &str) -> Result<bool, StoreError> {
            self.inner.delete(key).await
        }
        async fn list(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
            self.inner.list(prefix).await
        }
        async fn ping(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn new_claim(email: &str) -> NewClaim {
        NewClaim {
            email: email.into(),
            name: "Nimali".into(),
            items: vec![OrderItem {
                id: "ceylon-tea".into(),
                name: "Ceylon Milk Tea".into(),
                category: MenuCategory::Drink,
            }],
            order_id: new_record_id(),
        }
    }

    #[tokio::test]
    async fn second_claim_is_rejected() {
        let store = Store::memory();

        let first = ClaimRepo::try_create(&store, new_claim("Nimali@Example.com"))
            .await
            .unwrap();
        let claim = assert_matches!(first, ClaimOutcome::Created(c) => c);
        assert_eq!(claim.email, "nimali@example.com");
        assert!(is_well_formed_token(&claim.token));

        let second = ClaimRepo::try_create(&store, new_claim("nimali@example.com"))
            .await
            .unwrap();
        assert_eq!(second, ClaimOutcome::AlreadyClaimed);

        let stored = ClaimRepo::find_by_email(&store, "NIMALI@example.com").await.unwrap();
        assert_eq!(stored, Some(claim));
    }

    #[tokio::test]
    async fn concurrent_claims_have_one_winner() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::local(dir.path()).await.unwrap();

        let mut tasks = tokio::task::JoinSet::new();
        for _ in 0..12 {
            let store = store.clone();
            tasks.spawn(async move {
                ClaimRepo::try_create(&store, new_claim("race@example.com"))
                    .await
                    .unwrap()
            });
        }

        let mut created = 0;
        while let Some(outcome) = tasks.join_next().await {
            if matches!(outcome.unwrap(), ClaimOutcome::Created(_)) {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(ClaimRepo::count(&store).await.unwrap(), 1);
        // Losers released their reserved tokens.
        assert_eq!(store.list_keys(TOKENS_PREFIX).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn long_email_claims_on_local_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::local(dir.path()).await.unwrap();
        let email = format!("{}@example.lk", "a".repeat(240));
        assert!(cafe_core::email::is_valid_email(&email));

        let claim = assert_matches!(
            ClaimRepo::try_create(&store, new_claim(&email)).await.unwrap(),
            ClaimOutcome::Created(c) => c
        );
        assert_eq!(claim.email, email);
        assert_eq!(ClaimRepo::find_by_email(&store, &email).await.unwrap(), Some(claim.clone()));
        assert_eq!(ClaimRepo::find_by_token(&store, &claim.token).await.unwrap(), Some(claim));
        assert_eq!(
            ClaimRepo::try_create(&store, new_claim(&email)).await.unwrap(),
            ClaimOutcome::AlreadyClaimed
        );
        assert_eq!(ClaimRepo::count(&store).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn failed_claim_write_releases_token() {
        let store = Store::new(Arc::new(ClaimWritesFail::default()));

        let result = ClaimRepo::try_create(&store, new_claim("a@example.com")).await;
        assert_matches!(result, Err(StoreError::Io { .. }));
        assert!(store.list_keys(TOKENS_PREFIX).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn token_lookup_normalizes_input() {
        let store = Store::memory();
        let claim = assert_matches!(
            ClaimRepo::try_create(&store, new_claim("a@example.com")).await.unwrap(),
            ClaimOutcome::Created(c) => c
        );

        let typed = format!(" {}-{} ", &claim.token[..4], claim.token[4..].to_lowercase());
        let found = ClaimRepo::find_by_token(&store, &typed).await.unwrap();
        assert_eq!(found, Some(claim));

        assert_eq!(ClaimRepo::find_by_token(&store, "nope").await.unwrap(), None);
        assert_eq!(ClaimRepo::find_by_token(&store, "ABCDEFGH").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_frees_email_and_token() {
        let store = Store::memory();
        let claim = assert_matches!(
            ClaimRepo::try_create(&store, new_claim("a@example.com")).await.unwrap(),
            ClaimOutcome::Created(c) => c
        );

        let removed = ClaimRepo::delete(&store, "A@example.com").await.unwrap();
        assert_eq!(removed.map(|c| c.token), Some(claim.token.clone()));
        assert_eq!(ClaimRepo::find_by_token(&store, &claim.token).await.unwrap(), None);
        assert_eq!(ClaimRepo::delete(&store, "a@example.com").await.unwrap(), None);

        assert_matches!(
            ClaimRepo::try_create(&store, new_claim("a@example.com")).await.unwrap(),
            ClaimOutcome::Created(_)
        );
    }
}
