//! SeaORM entities, one per metadata table. Column shapes and uniqueness
//! are declared by the `migration` crate; validation lives in the store
//! layer, not here.

pub mod alibaba_image;
pub mod amazon_image;
pub mod amazon_server;
pub mod google_image;
pub mod google_server;
pub mod microsoft_image;
pub mod microsoft_region_map;
pub mod microsoft_server;
pub mod oracle_image;
pub mod version;
