mod catalog;
mod error;
mod group;
mod reg;
mod shape;

pub use catalog::{Catalog, Descriptor, END};
pub use error::CatalogError;
pub use group::Group;
pub use reg::Reg;
pub use shape::Shape;
