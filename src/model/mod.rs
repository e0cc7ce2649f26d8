mod account;
mod post;
mod record;
mod score;

pub use account::*;
pub use post::*;
pub(crate) use post::posts_from_value;
pub use record::*;
pub use score::*;
