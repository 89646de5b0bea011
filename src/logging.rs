pub mod record;

pub use record::RequestLogRecord;
