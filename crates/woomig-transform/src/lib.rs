pub mod assemble;
pub mod attributes;
pub mod decade;
pub mod describe;
pub mod dimensions;
pub mod tags;

pub use assemble::{assemble_product, child_rows, classify_row, row_sku};
pub use attributes::{classify_attributes, ClassifiedAttributes};
pub use decade::normalize_decade;
pub use describe::format_description;
pub use dimensions::{parse_dimensions, Dimensions};
pub use tags::{process_categories, reconcile_tags, title_case};
