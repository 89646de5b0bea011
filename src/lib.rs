pub mod config;
pub mod decrypt;
pub mod error;
pub mod logging;
pub mod paging;
pub mod relay;
pub mod resource;
pub mod server;
pub mod upstream;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
