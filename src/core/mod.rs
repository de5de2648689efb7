pub mod carousel;
pub mod db;
pub mod filter;
pub mod forms;
pub mod listings;
pub mod model;
pub mod seed;
pub mod source;
pub mod state;

pub use carousel::Carousel;
pub use filter::{Facet, FilterContext, ListingFilter, SortOrder, Tab};
pub use forms::{FormError, InquiryForm, InquiryReceipt, LoginForm, RegisterForm};
pub use listings::{ListingCollection, ListingDraft};
pub use model::{Amenity, Listing, ListingId, Location, User};
pub use source::{ListingDetail, ListingSource, SimulatedListingSource};
pub use state::AppState;
