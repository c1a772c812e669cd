// handlers/protected/mod.rs - Backoffice handlers (admin session required)
//
// Route Prefix: /api/admin/*
// Middleware: session cookie presence check + admin context (tenant and admin
// resolved, tenant ownership enforced). Handlers receive `Extension<AdminContext>`.

pub mod landing;
pub mod leads;
pub mod upload;

pub use landing::{landing_get, landing_put, publish, publishes};
pub use leads::{leads_export, leads_list};
pub use upload::upload;
