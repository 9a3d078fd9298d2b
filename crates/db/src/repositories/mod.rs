//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods that
//! accept `&PgPool` as the first argument. Operations that must be atomic
//! (translation replacement, availability replacement, booking insertion)
//! open a transaction internally or take `&mut PgConnection` so the handler
//! controls the transaction boundary.

pub mod availability_repo;
pub mod consent_repo;
pub mod content_repo;
pub mod lead_repo;
pub mod legal_page_repo;
pub mod link_repo;
pub mod meeting_repo;
pub mod testimonial_repo;
pub mod user_repo;

pub use availability_repo::AvailabilityRepo;
pub use consent_repo::ConsentRepo;
pub use content_repo::ContentRepo;
pub use lead_repo::LeadRepo;
pub use legal_page_repo::LegalPageRepo;
pub use link_repo::LinkRepo;
pub use meeting_repo::MeetingRepo;
pub use testimonial_repo::TestimonialRepo;
pub use user_repo::UserRepo;
