pub mod service;

pub use service::{detect, DetectError, StackDetector};
