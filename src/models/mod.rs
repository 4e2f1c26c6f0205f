pub mod record;
pub mod remote_row;
pub mod summary;

pub use record::{NewRecord, Record, RecordPatch};
pub use remote_row::{DuplicatePair, RemoteRow};
pub use summary::{Averages, BandCount, PromotorStatistics, Statistics};
