//! listings-features - Amenity dummies and covariates for listing price models
//!
//! The core is a three-stage, single-pass transform over a listings table:
//!
//! - **Normalizer**: canonicalizes each listing's raw amenities field into tokens
//! - **Vocabulary**: keeps the tokens frequent enough to model, minus known noise
//! - **DummyMatrix**: one boolean column per vocabulary token, one row per listing
//!
//! Around it sit covariate cleaning (`covariates`), typed regression term
//! lists (`formula`) and descriptive statistics (`summary`).
//!
//! # Ordering
//!
//! Downstream model fitting joins the dummy columns to the listing table by
//! position, so every stage returns exactly one entry per input listing, in
//! input order.

pub mod config;
pub mod covariates;
pub mod dummy;
pub mod error;
pub mod formula;
pub mod normalize;
pub mod pipeline;
pub mod summary;
pub mod vocabulary;

pub use config::*;
pub use covariates::*;
pub use dummy::*;
pub use error::*;
pub use formula::*;
pub use normalize::*;
pub use pipeline::*;
pub use summary::*;
pub use vocabulary::*;
