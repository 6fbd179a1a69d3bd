//! Products domain module (catalog items and units of measure).

pub mod product;
pub mod uom;

pub use product::Product;
pub use uom::Uom;
