pub mod movie;
pub mod user_record;

pub use movie::{MovieId, MovieSnapshot};
pub use user_record::UserRecord;
