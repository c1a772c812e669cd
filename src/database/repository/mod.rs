//! SQL access, one repository per aggregate.
//!
//! Every repository is a cheap handle around the shared pool; clone freely.

pub mod admin;
pub mod landing;
pub mod lead;
pub mod tenant;

pub use admin::AdminRepository;
pub use landing::LandingRepository;
pub use lead::LeadRepository;
pub use tenant::TenantRepository;
