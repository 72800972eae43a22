use crate::domain_model::Email;
use crate::domain_port::{SessionStore, StoreError};
use rand::seq::IndexedRandom;
use std::sync::Arc;

/// Chooses which stored session to hand out.
pub struct AccountSelector {
    store: Arc<dyn SessionStore>,
}

impl AccountSelector {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    /// A named email is returned as is; whether it has a session is left to the fetch.
    /// Otherwise one live key is drawn uniformly at random, `None` if there are none.
    pub async fn select(&self, email: Option<&Email>) -> Result<Option<Email>, StoreError> {
        if let Some(email) = email {
            return Ok(Some(email.clone()));
        }
        let keys = self.store.list_keys().await?;
        Ok(keys.choose(&mut rand::rng()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_model::*;
    use crate::infra_memory::MemoryKvStore;
    use chrono::Utc;
    use std::collections::HashMap;

    #[tokio::test]
    async fn named_email_is_returned_without_lookup() {
        let selector = AccountSelector::new(Arc::new(MemoryKvStore::new()));
        let email = Email::parse("nobody@x.com").unwrap();
        assert_eq!(selector.select(Some(&email)).await.unwrap(), Some(email));
    }

    #[tokio::test]
    async fn empty_store_selects_nothing() {
        let selector = AccountSelector::new(Arc::new(MemoryKvStore::new()));
        assert_eq!(selector.select(None).await.unwrap(), None);
    }

    #[tokio::test]
    async fn random_draw_is_roughly_uniform() {
        let store = Arc::new(MemoryKvStore::new());
        let emails: Vec<Email> = ["a@x.com", "b@x.com", "c@x.com", "d@x.com"]
            .iter()
            .map(|e| Email::parse(e).unwrap())
            .collect();
        for email in &emails {
            store
                .put(&Session::new(email.clone(), CookieJar::default(), Utc::now()))
                .await
                .unwrap();
        }
        let selector = AccountSelector::new(store);

        let draws = 4000;
        let mut counts: HashMap<Email, usize> = HashMap::new();
        for _ in 0..draws {
            let picked = selector.select(None).await.unwrap().unwrap();
            *counts.entry(picked).or_default() += 1;
        }

        let expected = draws / emails.len();
        for email in &emails {
            let count = counts.get(email).copied().unwrap_or(0);
            assert!(
                count.abs_diff(expected) < expected / 5,
                "{} drawn {} times, expected about {}",
                email,
                count,
                expected
            );
        }
    }
}
