//! Repository implementations for all PVZ entities.

pub mod point;
pub mod product;
pub mod reception;
pub mod user;

pub use point::PointRepository;
pub use product::ProductRepository;
pub use reception::ReceptionRepository;
pub use user::UserRepository;

/// Name of the partial unique index guarding the open-reception invariant.
pub(crate) const ONE_OPEN_RECEPTION_INDEX: &str = "reception_one_open_per_pvz";

/// Column list shared by every reception query.
pub(crate) const RECEPTION_COLUMNS: &str = "id, date_time, pvz_id, status";

/// Column list shared by every product query. `seq` stays internal.
pub(crate) const PRODUCT_COLUMNS: &str = "id, date_time, type, reception_id";
