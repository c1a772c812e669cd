// handlers/public/mod.rs - Public handlers (no session required)
//
// Route Prefix: /, /api/landing, /api/leads, /uploads/*, /api/admin/login|logout

pub mod auth;
pub mod landing;
pub mod leads;
pub mod site;
pub mod uploads;

pub use auth::{login, logout};
pub use landing::landing_get;
pub use leads::lead_create;
pub use site::{health, robots, root, sitemap};
pub use uploads::upload_get;
