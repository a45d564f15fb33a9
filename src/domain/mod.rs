//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `masking` - Template mask engine (apply/remove display masks)
//! - `validation` - Validation rules and the rule registry
//! - `field` - Payment product field definitions
//! - `product` - Payment product aggregate (fields + accounts on file)
//! - `account_on_file` - Stored payment instruments and write permissions
//! - `request` - Payment request aggregate (field values + validation)
//! - `errors` - Domain error taxonomy

pub mod account_on_file;
pub mod errors;
pub mod field;
pub mod masking;
pub mod product;
pub mod request;
pub mod validation;

pub use account_on_file::{AccountAttribute, AccountOnFile, AttributeStatus};
pub use errors::{PaymentError, ValidationErrorEntry};
pub use field::{FieldType, PaymentProductField};
pub use product::PaymentProduct;
pub use request::PaymentRequest;
