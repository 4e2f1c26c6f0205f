pub mod add;
pub mod backup;
pub mod dedup;
pub mod stats;
pub mod validate;
