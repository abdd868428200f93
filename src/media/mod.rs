mod category;
mod natural;

pub use category::{classify, ClassifyError, FileCategory, FileEntry};
pub use natural::{sort_natural, KeyToken, NaturalKey};
