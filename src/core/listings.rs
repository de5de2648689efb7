use time::OffsetDateTime;
use tracing::info;

use crate::core::{
    forms::FormError,
    model::{Amenity, Listing, ListingId, Location},
    seed::sample_listings,
};

/// Rating given to a freshly listed room.
const NEW_LISTING_RATING: f32 = 5.0;

/// Add/edit form for a listing. Amounts are kept as typed so the form can
/// be redisplayed unchanged when validation fails.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    /// `Some` when editing an existing listing.
    pub id: Option<ListingId>,
    pub title: String,
    pub rent: String,
    pub deposit: String,
    pub description: String,
    pub images: Vec<String>,
    pub location: Option<Location>,
    pub amenities: Vec<Amenity>,
}

impl ListingDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_listing(listing: &Listing) -> Self {
        Self {
            id: Some(listing.id),
            title: listing.title.clone(),
            rent: listing.rent.to_string(),
            deposit: listing.deposit.to_string(),
            description: listing.description.clone(),
            images: listing.images.clone(),
            location: Some(listing.location),
            amenities: listing.amenities.clone(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    pub fn toggle_amenity(&mut self, amenity: Amenity) {
        match self.amenities.iter().position(|a| *a == amenity) {
            Some(pos) => {
                self.amenities.remove(pos);
            }
            None => self.amenities.push(amenity),
        }
    }

    fn parse_amount(field: &'static str, value: &str) -> Result<u64, FormError> {
        value
            .trim()
            .parse()
            .map_err(|_| FormError::InvalidAmount {
                field,
                value: value.to_string(),
            })
    }

    fn validate(&self) -> Result<(u64, u64, Location), FormError> {
        let location = match self.location {
            Some(location)
                if !self.title.trim().is_empty()
                    && !self.rent.trim().is_empty()
                    && !self.deposit.trim().is_empty() =>
            {
                location
            }
            _ => return Err(FormError::MissingFields),
        };
        let rent = Self::parse_amount("Rent", &self.rent)?;
        let deposit = Self::parse_amount("Deposit", &self.deposit)?;
        Ok((rent, deposit, location))
    }
}

/// The dashboard's in-memory listings. New listings go to the front; edits
/// keep identity and position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingCollection {
    listings: Vec<Listing>,
}

impl ListingCollection {
    pub fn new(listings: Vec<Listing>) -> Self {
        Self { listings }
    }

    pub fn seeded() -> Self {
        Self::new(sample_listings())
    }

    pub fn as_slice(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn get(&self, id: ListingId) -> Option<&Listing> {
        self.listings.iter().find(|l| l.id == id)
    }

    fn contains(&self, id: ListingId) -> bool {
        self.get(id).is_some()
    }

    /// Millisecond timestamp, bumped past any identifier already in use.
    fn next_id(&self, now: OffsetDateTime) -> ListingId {
        let millis = u64::try_from(now.unix_timestamp_nanos() / 1_000_000).unwrap_or(1).max(1);
        let mut id = ListingId(millis);
        while self.contains(id) {
            id = ListingId(id.0 + 1);
        }
        id
    }

    /// Saves a draft: a draft with an identifier replaces that listing in
    /// place, any other draft becomes a new listing at the front. The owner
    /// is always re-stamped with `owner`.
    pub fn save(
        &mut self,
        draft: &ListingDraft,
        owner: &str,
        now: OffsetDateTime,
    ) -> Result<ListingId, FormError> {
        let (rent, deposit, location) = draft.validate()?;

        match draft.id {
            Some(id) => {
                let listing = self
                    .listings
                    .iter_mut()
                    .find(|l| l.id == id)
                    .ok_or(FormError::UnknownListing(id))?;
                listing.title = draft.title.clone();
                listing.rent = rent;
                listing.deposit = deposit;
                listing.description = draft.description.clone();
                listing.images = draft.images.clone();
                listing.location = location;
                listing.amenities = draft.amenities.clone();
                listing.owner = owner.to_string();
                info!(%id, "updated listing");
                Ok(id)
            }
            None => {
                let id = self.next_id(now);
                self.listings.insert(
                    0,
                    Listing {
                        id,
                        title: draft.title.clone(),
                        rent,
                        deposit,
                        description: draft.description.clone(),
                        images: draft.images.clone(),
                        location,
                        amenities: draft.amenities.clone(),
                        featured: false,
                        rating: Some(NEW_LISTING_RATING),
                        reviews: Some(0),
                        owner: owner.to_string(),
                    },
                );
                info!(%id, "added listing");
                Ok(id)
            }
        }
    }

    pub fn remove(&mut self, id: ListingId) -> Option<Listing> {
        let pos = self.listings.iter().position(|l| l.id == id)?;
        info!(%id, "removed listing");
        Some(self.listings.remove(pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ListingDraft {
        ListingDraft {
            title: "Garden Room".to_string(),
            rent: "9000".to_string(),
            deposit: "18000".to_string(),
            location: Some(Location::Suburban),
            amenities: vec![Amenity::Parking],
            ..Default::default()
        }
    }

    fn at(millis: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000).unwrap()
    }

    #[test]
    fn test_add_prepends_with_timestamp_id() {
        let mut collection = ListingCollection::seeded();
        let id = collection
            .save(&draft(), "me@example.com", at(1_700_000_000_000))
            .unwrap();

        assert_eq!(id, ListingId(1_700_000_000_000));
        let first = &collection.as_slice()[0];
        assert_eq!(first.id, id);
        assert_eq!(first.owner, "me@example.com");
        assert_eq!(first.rating, Some(5.0));
        assert_eq!(first.reviews, Some(0));
        assert_eq!(collection.len(), 4);
    }

    #[test]
    fn test_adding_twice_creates_two_listings() {
        let mut collection = ListingCollection::default();
        let now = at(1_700_000_000_000);
        let a = collection.save(&draft(), "me@example.com", now).unwrap();
        let b = collection.save(&draft(), "me@example.com", now).unwrap();

        assert_ne!(a, b);
        assert_eq!(collection.len(), 2);
    }

    #[test]
    fn test_edit_preserves_identity_and_position() {
        let mut collection = ListingCollection::seeded();
        let mut edit = ListingDraft::from_listing(collection.get(ListingId(2)).unwrap());
        edit.title = "Renamed".to_string();
        edit.rent = "8500".to_string();

        let id = collection
            .save(&edit, "admin@example.com", at(1))
            .unwrap();

        assert_eq!(id, ListingId(2));
        let listing = &collection.as_slice()[1];
        assert_eq!(listing.id, ListingId(2));
        assert_eq!(listing.title, "Renamed");
        assert_eq!(listing.rent, 8500);
        assert_eq!(listing.owner, "admin@example.com");
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_required_fields() {
        let mut collection = ListingCollection::default();
        let mut missing = draft();
        missing.location = None;
        assert_eq!(
            collection.save(&missing, "me@example.com", at(1)),
            Err(FormError::MissingFields)
        );

        let mut bad_rent = draft();
        bad_rent.rent = "lots".to_string();
        assert!(matches!(
            collection.save(&bad_rent, "me@example.com", at(1)),
            Err(FormError::InvalidAmount { field: "Rent", .. })
        ));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_blank_amount_is_missing_not_invalid() {
        let mut collection = ListingCollection::default();
        let mut blank = draft();
        blank.deposit = "  ".to_string();
        assert_eq!(
            collection.save(&blank, "me@example.com", at(1)),
            Err(FormError::MissingFields)
        );

        let mut shorthand = draft();
        shorthand.rent = "15k".to_string();
        assert_eq!(
            collection.save(&shorthand, "me@example.com", at(1)),
            Err(FormError::InvalidAmount {
                field: "Rent",
                value: "15k".to_string(),
            })
        );
        assert!(collection.is_empty());
    }

    #[test]
    fn test_edit_of_removed_listing_fails() {
        let mut collection = ListingCollection::seeded();
        let edit = ListingDraft::from_listing(collection.get(ListingId(1)).unwrap());
        assert!(collection.remove(ListingId(1)).is_some());
        assert!(collection.remove(ListingId(1)).is_none());

        assert_eq!(
            collection.save(&edit, "admin@example.com", at(1)),
            Err(FormError::UnknownListing(ListingId(1)))
        );
    }

    #[test]
    fn test_toggle_amenity() {
        let mut draft = ListingDraft::new();
        draft.toggle_amenity(Amenity::Tv);
        draft.toggle_amenity(Amenity::WiFi);
        draft.toggle_amenity(Amenity::Tv);
        assert_eq!(draft.amenities, vec![Amenity::WiFi]);
    }
}
