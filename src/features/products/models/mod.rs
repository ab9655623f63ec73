mod product;

pub use product::{Product, ProductDraft, ProductFilter, ProductPhoto, ProductWithCategory};
