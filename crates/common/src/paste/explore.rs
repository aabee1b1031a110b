use alloy_primitives::{Address, U256};
use futures::future::try_join_all;
use serde::Serialize;

use super::{PasteClient, PasteError};
use crate::contract::{PasteInfo, PasteSummary};

pub const DEFAULT_PAGE_SIZE: u64 = 25;

/// One page of the public listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExploreQuery {
    /// 1-based
    pub page: u64,
    pub page_size: u64,
    /// Case-insensitive match against title or creator address
    pub search: Option<String>,
}

impl Default for ExploreQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExplorePage {
    pub page: u64,
    pub page_size: u64,
    pub pastes: Vec<PasteSummary>,
    pub has_more: bool,
}

/// Drop expired entries, apply the search term and cut to `page_size`
///
/// Returns the page and whether more matching entries were fetched than fit.
pub fn filter_listing(
    pastes: Vec<PasteSummary>,
    search: Option<&str>,
    page_size: u64,
    now: u64,
) -> (Vec<PasteSummary>, bool) {
    let needle = search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut filtered: Vec<PasteSummary> = pastes
        .into_iter()
        .filter(|paste| !paste.is_expired_at(now))
        .filter(|paste| match &needle {
            Some(needle) => {
                paste.title.to_lowercase().contains(needle)
                    || paste.creator.to_string().to_lowercase().contains(needle)
            }
            None => true,
        })
        .collect();

    let page_size = usize::try_from(page_size).unwrap_or(usize::MAX);
    let has_more = filtered.len() > page_size;
    filtered.truncate(page_size);
    (filtered, has_more)
}

impl PasteClient {
    /// Browse the public listing
    ///
    /// Fetches twice the page size so that filtering out expired and
    /// non-matching entries still tends to fill the page.
    pub async fn explore(&self, query: &ExploreQuery) -> Result<ExplorePage, PasteError> {
        let page = query.page.max(1);
        let page_size = query.page_size.max(1);
        let offset = (page - 1).saturating_mul(page_size);

        let pastes = self
            .contract()
            .get_public_pastes(offset, page_size.saturating_mul(2))
            .await?;
        tracing::debug!(offset, fetched = pastes.len(), "fetched public pastes");

        let now = chrono::Utc::now().timestamp().max(0) as u64;
        let (pastes, has_more) = filter_listing(pastes, query.search.as_deref(), page_size, now);

        Ok(ExplorePage {
            page,
            page_size,
            pastes,
            has_more,
        })
    }

    /// Pastes created by the connected account
    pub async fn my_pastes(&self) -> Result<Vec<PasteInfo>, PasteError> {
        let signer = self.signer()?;
        self.user_pastes(signer).await
    }

    /// Pastes created by `user`
    pub async fn user_pastes(&self, user: Address) -> Result<Vec<PasteInfo>, PasteError> {
        let ids = self.contract().get_user_pastes(user).await?;
        tracing::debug!(%user, count = ids.len(), "fetched user paste ids");
        let pastes = try_join_all(ids.into_iter().map(|id| self.contract().get_paste(id))).await?;
        Ok(pastes.into_iter().map(|paste| paste.info).collect())
    }

    /// Pastes the connected account has been granted or has paid for
    pub async fn accessible_pastes(&self) -> Result<Vec<PasteInfo>, PasteError> {
        let signer = self.signer()?;
        let ids = self.contract().get_accessible_pastes(signer).await?;
        self.infos(ids).await
    }

    async fn infos(&self, ids: Vec<U256>) -> Result<Vec<PasteInfo>, PasteError> {
        let infos =
            try_join_all(ids.into_iter().map(|id| self.contract().get_paste_info(id))).await?;
        Ok(infos)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::contract::PasteType;

    fn summary(id: u64, title: &str, creator: Address, expiration_time: u64) -> PasteSummary {
        PasteSummary {
            id: U256::from(id),
            creator,
            title: title.to_string(),
            creation_time: 1,
            expiration_time,
            paste_type: PasteType::Public,
            price: U256::ZERO,
            public_key: String::new(),
            current_version: None,
        }
    }

    #[test]
    fn test_drops_expired() {
        let creator = Address::repeat_byte(1);
        let pastes = vec![
            summary(1, "live", creator, 0),
            summary(2, "gone", creator, 50),
            summary(3, "later", creator, 500),
        ];
        let (page, has_more) = filter_listing(pastes, None, 10, 100);
        let ids: Vec<_> = page.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![U256::from(1), U256::from(3)]);
        assert!(!has_more);
    }

    #[test]
    fn test_search_title_and_creator_case_insensitive() {
        let alice = Address::repeat_byte(0xab);
        let bob = Address::repeat_byte(0x12);
        let pastes = vec![
            summary(1, "Rust Notes", bob, 0),
            summary(2, "shopping", alice, 0),
            summary(3, "other", bob, 0),
        ];

        let (page, _) = filter_listing(pastes.clone(), Some("rust"), 10, 0);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].id, U256::from(1));

        let (page, _) = filter_listing(pastes.clone(), Some("ABABAB"), 10, 0);
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].creator, alice);

        let (page, _) = filter_listing(pastes, Some("   "), 10, 0);
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_has_more_and_truncation() {
        let creator = Address::repeat_byte(1);
        let pastes: Vec<_> = (0..5).map(|i| summary(i, "p", creator, 0)).collect();

        let (page, has_more) = filter_listing(pastes.clone(), None, 2, 0);
        assert_eq!(page.len(), 2);
        assert!(has_more);

        let (page, has_more) = filter_listing(pastes, None, 5, 0);
        assert_eq!(page.len(), 5);
        assert!(!has_more);
    }
}
