pub mod link;
pub mod payload;
pub mod shapes;

pub use link::LinkDecoder;
pub use payload::PayloadDecryptor;
pub use shapes::LinkShape;
