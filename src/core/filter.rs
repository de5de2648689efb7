//! Projection of the listing collection into what the dashboard shows.

use std::{cmp::Ordering, fmt, str::FromStr};

use crate::core::{
    db::Favorites,
    model::{Amenity, Listing, Location, UnknownVariant},
};

/// Dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    All,
    MyListings,
    Favorites,
}

impl Tab {
    pub const ALL: &'static [Tab] = &[Tab::All, Tab::MyListings, Tab::Favorites];

    /// Stable identifier, also used for the persisted tab hint.
    pub fn key(self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::MyListings => "my-listings",
            Tab::Favorites => "favorites",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All Rooms",
            Tab::MyListings => "My Listings",
            Tab::Favorites => "Favorites",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Tab {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .iter()
            .copied()
            .find(|tab| tab.key() == s.trim())
            .ok_or_else(|| UnknownVariant {
                kind: "tab",
                value: s.to_string(),
            })
    }
}

/// A selectable filter value. Amenities and locations are matched by name,
/// so a facet never cares which vocabulary it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Amenity(Amenity),
    Location(Location),
}

impl Facet {
    pub fn name(self) -> &'static str {
        match self {
            Facet::Amenity(amenity) => amenity.name(),
            Facet::Location(location) => location.name(),
        }
    }

    pub fn matches(self, listing: &Listing) -> bool {
        let name = self.name();
        listing.amenities.iter().any(|a| a.name() == name) || listing.location.name() == name
    }
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Facet {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<Amenity>()
            .map(Facet::Amenity)
            .or_else(|_| s.parse::<Location>().map(Facet::Location))
            .map_err(|_| UnknownVariant {
                kind: "facet",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Collection order.
    #[default]
    None,
    PriceLowToHigh,
    PriceHighToLow,
    RatingHighToLow,
    MostRecent,
}

impl SortOrder {
    pub const ALL: &'static [SortOrder] = &[
        SortOrder::None,
        SortOrder::PriceLowToHigh,
        SortOrder::PriceHighToLow,
        SortOrder::RatingHighToLow,
        SortOrder::MostRecent,
    ];

    fn key(self) -> &'static str {
        match self {
            SortOrder::None => "none",
            SortOrder::PriceLowToHigh => "price-asc",
            SortOrder::PriceHighToLow => "price-desc",
            SortOrder::RatingHighToLow => "rating",
            SortOrder::MostRecent => "recent",
        }
    }

    fn compare(self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortOrder::None => Ordering::Equal,
            SortOrder::PriceLowToHigh => a.rent.cmp(&b.rent),
            SortOrder::PriceHighToLow => b.rent.cmp(&a.rent),
            SortOrder::RatingHighToLow => {
                let rating = |l: &Listing| l.rating.unwrap_or(0.0);
                rating(b).total_cmp(&rating(a))
            }
            SortOrder::MostRecent => b.id.cmp(&a.id),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::None => "Default",
            SortOrder::PriceLowToHigh => "Price: Low to High",
            SortOrder::PriceHighToLow => "Price: High to Low",
            SortOrder::RatingHighToLow => "Rating: High to Low",
            SortOrder::MostRecent => "Most Recent",
        })
    }
}

impl FromStr for SortOrder {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .iter()
            .copied()
            .find(|order| order.key() == s.trim())
            .ok_or_else(|| UnknownVariant {
                kind: "sort order",
                value: s.to_string(),
            })
    }
}

/// Who is looking, for the tab predicates.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub user_email: Option<&'a str>,
    pub favorites: &'a Favorites,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingFilter {
    pub tab: Tab,
    pub query: String,
    pub facets: Vec<Facet>,
    pub sort: SortOrder,
}

impl ListingFilter {
    pub fn is_facet_selected(&self, facet: Facet) -> bool {
        self.facets.contains(&facet)
    }

    pub fn toggle_facet(&mut self, facet: Facet) {
        match self.facets.iter().position(|f| *f == facet) {
            Some(pos) => {
                self.facets.remove(pos);
            }
            None => self.facets.push(facet),
        }
    }

    pub fn clear_facets(&mut self) {
        self.facets.clear();
    }

    fn matches_tab(&self, listing: &Listing, ctx: &FilterContext<'_>) -> bool {
        match self.tab {
            Tab::All => true,
            Tab::MyListings => ctx
                .user_email
                .is_some_and(|email| listing.is_owned_by(email)),
            Tab::Favorites => ctx.favorites.contains(listing.id),
        }
    }

    fn matches_query(&self, listing: &Listing) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        listing.title.to_lowercase().contains(&needle)
            || listing.location.name().to_lowercase().contains(&needle)
            || listing.description.to_lowercase().contains(&needle)
    }

    fn matches_facets(&self, listing: &Listing) -> bool {
        self.facets.iter().all(|facet| facet.matches(listing))
    }

    pub fn matches(&self, listing: &Listing, ctx: &FilterContext<'_>) -> bool {
        self.matches_tab(listing, ctx) && self.matches_query(listing) && self.matches_facets(listing)
    }

    /// Matching listings in collection order, then stably sorted by
    /// [`ListingFilter::sort`].
    pub fn apply<'a>(&self, listings: &'a [Listing], ctx: &FilterContext<'_>) -> Vec<&'a Listing> {
        let mut matched: Vec<&Listing> = listings
            .iter()
            .filter(|listing| self.matches(listing, ctx))
            .collect();
        if self.sort != SortOrder::None {
            matched.sort_by(|a, b| self.sort.compare(a, b));
        }
        matched
    }
}

/// "1 Room" / "3 Rooms".
pub fn result_count_label(count: usize) -> String {
    if count == 1 {
        "1 Room".to_string()
    } else {
        format!("{count} Rooms")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{model::ListingId, seed::sample_listings};

    fn ids(listings: &[&Listing]) -> Vec<u64> {
        listings.iter().map(|l| l.id.0).collect()
    }

    #[test]
    fn test_default_filter_returns_collection_unchanged() {
        let listings = sample_listings();
        let favorites = Favorites::new();
        let ctx = FilterContext {
            user_email: None,
            favorites: &favorites,
        };

        let result = ListingFilter::default().apply(&listings, &ctx);

        assert_eq!(ids(&result), vec![1, 2, 3]);
    }

    #[test]
    fn test_my_listings_keeps_relative_order() {
        let listings = sample_listings();
        let favorites = Favorites::new();
        let ctx = FilterContext {
            user_email: Some("admin@example.com"),
            favorites: &favorites,
        };
        let filter = ListingFilter {
            tab: Tab::MyListings,
            ..Default::default()
        };

        assert_eq!(ids(&filter.apply(&listings, &ctx)), vec![1, 3]);
    }

    #[test]
    fn test_my_listings_without_user_is_empty() {
        let listings = sample_listings();
        let favorites = Favorites::new();
        let ctx = FilterContext {
            user_email: None,
            favorites: &favorites,
        };
        let filter = ListingFilter {
            tab: Tab::MyListings,
            ..Default::default()
        };

        assert!(filter.apply(&listings, &ctx).is_empty());
    }

    #[test]
    fn test_favorites_tab_ignores_unknown_ids() {
        let listings = sample_listings();
        let favorites: Favorites = [ListingId(3), ListingId(99), ListingId(2)].into_iter().collect();
        let ctx = FilterContext {
            user_email: None,
            favorites: &favorites,
        };
        let filter = ListingFilter {
            tab: Tab::Favorites,
            ..Default::default()
        };

        assert_eq!(ids(&filter.apply(&listings, &ctx)), vec![2, 3]);
    }

    #[test]
    fn test_query_is_case_insensitive_across_fields() {
        let listings = sample_listings();
        let favorites = Favorites::new();
        let ctx = FilterContext {
            user_email: None,
            favorites: &favorites,
        };

        for query in ["studio", "STUDIO", "Downtown", "downtown"] {
            let filter = ListingFilter {
                query: query.to_string(),
                ..Default::default()
            };
            assert_eq!(ids(&filter.apply(&listings, &ctx)), vec![1], "query {query:?}");
        }

        // description only
        let filter = ListingFilter {
            query: "UTILITIES".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&filter.apply(&listings, &ctx)), vec![2]);
    }

    #[test]
    fn test_every_selected_facet_must_match() {
        let listings = sample_listings();
        let favorites = Favorites::new();
        let ctx = FilterContext {
            user_email: None,
            favorites: &favorites,
        };
        let mut filter = ListingFilter::default();
        filter.toggle_facet(Facet::Amenity(Amenity::WiFi));
        assert_eq!(ids(&filter.apply(&listings, &ctx)), vec![1, 2, 3]);

        filter.toggle_facet(Facet::Location(Location::Downtown));
        assert_eq!(ids(&filter.apply(&listings, &ctx)), vec![1]);

        filter.toggle_facet(Facet::Amenity(Amenity::Balcony));
        assert!(filter.apply(&listings, &ctx).is_empty());

        filter.clear_facets();
        assert_eq!(filter.apply(&listings, &ctx).len(), 3);
    }

    #[test]
    fn test_facet_parses_either_vocabulary() {
        assert_eq!("WiFi".parse::<Facet>(), Ok(Facet::Amenity(Amenity::WiFi)));
        assert_eq!(
            "Downtown".parse::<Facet>(),
            Ok(Facet::Location(Location::Downtown))
        );
        assert!("Sauna".parse::<Facet>().is_err());
    }

    #[test]
    fn test_sort_orders() {
        let listings = sample_listings();
        let favorites = Favorites::new();
        let ctx = FilterContext {
            user_email: None,
            favorites: &favorites,
        };
        let sorted = |sort| {
            let filter = ListingFilter {
                sort,
                ..Default::default()
            };
            ids(&filter.apply(&listings, &ctx))
        };

        assert_eq!(sorted(SortOrder::PriceLowToHigh), vec![2, 1, 3]);
        assert_eq!(sorted(SortOrder::PriceHighToLow), vec![3, 1, 2]);
        assert_eq!(sorted(SortOrder::RatingHighToLow), vec![3, 1, 2]);
        assert_eq!(sorted(SortOrder::MostRecent), vec![3, 2, 1]);
    }

    #[test]
    fn test_tab_keys_round_trip() {
        for tab in Tab::ALL {
            assert_eq!(tab.key().parse::<Tab>(), Ok(*tab));
        }
        assert!("mine".parse::<Tab>().is_err());
    }

    #[test]
    fn test_result_count_label() {
        assert_eq!(result_count_label(0), "0 Rooms");
        assert_eq!(result_count_label(1), "1 Room");
        assert_eq!(result_count_label(3), "3 Rooms");
    }
}
