//! Landing content: typed shape, defaults, validation and public rendering helpers.

pub mod defaults;
pub mod media;
pub mod site;
pub mod structured_data;
pub mod types;
pub mod validate;

pub use defaults::{default_landing_data, default_landing_seo, FALLBACK_CONTENT};
pub use media::{normalize_hero_images, normalize_image_src};
pub use site::{resolve_site_url, robots_txt, sitemap_xml};
pub use structured_data::build_home_json_ld;
pub use types::{
    ContactData, FallbackContent, FaqItem, FeatureItem, HeaderLink, HeroSlide, LandingData, LandingDraftPayload,
    LandingHeader, LandingSeo,
};
pub use validate::{parse_landing_data, parse_landing_seo, validate_draft_payload};
