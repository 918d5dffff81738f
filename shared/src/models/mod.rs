//! Document models
//!
//! Mirrors the collections in the hosted document store. The store itself is
//! schemaless; these structs describe the fields this codebase reads and
//! writes. Record ids are plain strings (projected with `<string>id` on the
//! query side).

mod cashier;
mod product;
mod sale;
mod shift;

pub use cashier::Cashier;
pub use product::{Product, ProductCreate, ProductUpdate};
pub use sale::{PaymentMethod, Sale, SaleItem};
pub use shift::{Shift, ShiftStatus};
