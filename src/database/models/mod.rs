pub mod admin_user;
pub mod landing;
pub mod lead;
pub mod tenant;

pub use admin_user::{AdminRole, AdminUser};
pub use landing::{ActorRef, LandingPage, LandingPageRow, LandingPublish, LandingPublishRow, LandingStatus};
pub use lead::{Lead, NewLead};
pub use tenant::Tenant;
