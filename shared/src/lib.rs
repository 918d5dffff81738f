//! Shared types for the Crumb bakery POS
//!
//! Common types used by both the report API server and the admin client:
//! document models, the API response envelope, the version descriptor and
//! utility functions.

pub mod models;
pub mod response;
pub mod util;
pub mod version;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Cashier, PaymentMethod, Product, ProductCreate, ProductUpdate, Sale, SaleItem, Shift,
    ShiftStatus,
};
pub use response::{ApiError, ApiResponse};
pub use version::{VersionDescriptor, is_newer_version};
