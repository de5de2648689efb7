use crate::core::model::{Amenity, Listing, ListingId, Location};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=400&width=600";

/// The collection every dashboard session starts from.
pub fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: ListingId(1),
            title: "Luxury Studio Apartment".to_string(),
            rent: 15_000,
            deposit: 30_000,
            description: "Modern studio apartment with premium furnishings, high ceilings, and lots of natural light. Located in the heart of the city with easy access to public transportation.".to_string(),
            images: vec![PLACEHOLDER_IMAGE.to_string(); 2],
            location: Location::Downtown,
            amenities: vec![
                Amenity::WiFi,
                Amenity::Ac,
                Amenity::Furnished,
                Amenity::AttachedBathroom,
                Amenity::KitchenAccess,
            ],
            featured: true,
            rating: Some(4.8),
            reviews: Some(24),
            owner: "admin@example.com".to_string(),
        },
        Listing {
            id: ListingId(2),
            title: "Cozy Single Room in Shared Flat".to_string(),
            rent: 8_000,
            deposit: 16_000,
            description: "Comfortable single room in a well-maintained shared apartment. All utilities included. Great for students or young professionals.".to_string(),
            images: vec![PLACEHOLDER_IMAGE.to_string()],
            location: Location::UniversityArea,
            amenities: vec![
                Amenity::WiFi,
                Amenity::Furnished,
                Amenity::KitchenAccess,
                Amenity::WashingMachine,
            ],
            featured: false,
            rating: Some(4.2),
            reviews: Some(15),
            owner: "john@example.com".to_string(),
        },
        Listing {
            id: ListingId(3),
            title: "Spacious 2BHK with Balcony".to_string(),
            rent: 22_000,
            deposit: 44_000,
            description: "Large two-bedroom apartment with a beautiful balcony overlooking the city. Recently renovated with modern amenities.".to_string(),
            images: vec![PLACEHOLDER_IMAGE.to_string(); 3],
            location: Location::EastSide,
            amenities: vec![
                Amenity::WiFi,
                Amenity::Ac,
                Amenity::Furnished,
                Amenity::AttachedBathroom,
                Amenity::Balcony,
                Amenity::Parking,
            ],
            featured: true,
            rating: Some(4.9),
            reviews: Some(32),
            owner: "admin@example.com".to_string(),
        },
    ]
}
