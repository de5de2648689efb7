use std::{future::Future, time::Duration};

use tracing::{debug, info};

use crate::core::model::{Listing, ListingId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDetails {
    pub name: String,
    pub response_rate: u8,
    pub response_time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    pub user: String,
    pub rating: u8,
    pub date: String,
    pub comment: String,
}

/// Everything the room detail page shows about one listing.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingDetail {
    pub listing: Listing,
    pub owner: OwnerDetails,
    pub reviews: Vec<Review>,
}

/// Asynchronous "fetch listing by id". `Ok(None)` means not found.
pub trait ListingSource: Send + Sync + 'static {
    fn fetch_listing(
        &self,
        id: ListingId,
    ) -> impl Future<Output = anyhow::Result<Option<ListingDetail>>> + Send;
}

/// Parses the room route parameter. Anything that is not a positive integer
/// resolves to no listing at all.
pub fn parse_room_param(raw: &str) -> Option<ListingId> {
    raw.parse().ok()
}

/// Serves listings from a snapshot of the dashboard collection after a fixed
/// delay, standing in for a network round trip. The fetch cannot be
/// cancelled once started.
#[derive(Debug, Clone)]
pub struct SimulatedListingSource {
    delay: Duration,
    catalog: Vec<Listing>,
}

impl SimulatedListingSource {
    pub fn new(delay: Duration, catalog: Vec<Listing>) -> Self {
        Self { delay, catalog }
    }

    fn owner_details(listing: &Listing) -> OwnerDetails {
        let name = listing
            .owner
            .split('@')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("Owner")
            .to_string();
        OwnerDetails {
            name,
            response_rate: 95,
            response_time: "within a few hours".to_string(),
        }
    }

    fn sample_reviews() -> Vec<Review> {
        vec![
            Review {
                user: "Sarah Johnson".to_string(),
                rating: 5,
                date: "2 weeks ago".to_string(),
                comment: "This place is absolutely amazing! The location is perfect, and the amenities are top-notch.".to_string(),
            },
            Review {
                user: "Michael Brown".to_string(),
                rating: 4,
                date: "1 month ago".to_string(),
                comment: "Great place overall. The room was clean and well-maintained. The WiFi was a bit slow at times.".to_string(),
            },
            Review {
                user: "Emily Davis".to_string(),
                rating: 5,
                date: "2 months ago".to_string(),
                comment: "The host was very responsive and accommodating. Would definitely stay here again!".to_string(),
            },
        ]
    }
}

impl ListingSource for SimulatedListingSource {
    async fn fetch_listing(&self, id: ListingId) -> anyhow::Result<Option<ListingDetail>> {
        debug!(%id, delay = ?self.delay, "fetching listing");
        tokio::time::sleep(self.delay).await;

        let detail = self.catalog.iter().find(|l| l.id == id).map(|listing| ListingDetail {
            owner: Self::owner_details(listing),
            reviews: Self::sample_reviews(),
            listing: listing.clone(),
        });
        info!(%id, found = detail.is_some(), "fetched listing");
        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::seed::sample_listings;

    #[test]
    fn test_parse_room_param() {
        assert_eq!(parse_room_param("3"), Some(ListingId(3)));
        assert_eq!(parse_room_param("room-3"), None);
        assert_eq!(parse_room_param(""), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_waits_for_delay() -> anyhow::Result<()> {
        let source = SimulatedListingSource::new(Duration::from_secs(1), sample_listings());
        let started = tokio::time::Instant::now();

        let detail = source.fetch_listing(ListingId(2)).await?.expect("listing 2 exists");

        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(detail.listing.title, "Cozy Single Room in Shared Flat");
        assert_eq!(detail.owner.name, "john");
        assert_eq!(detail.reviews.len(), 3);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_listing_is_not_found() -> anyhow::Result<()> {
        let source = SimulatedListingSource::new(Duration::from_millis(10), sample_listings());
        assert!(source.fetch_listing(ListingId(404)).await?.is_none());
        Ok(())
    }
}
