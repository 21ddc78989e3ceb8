pub mod identifiers;

pub use identifiers::{DocumentId, SHORT_ID_LEN};
