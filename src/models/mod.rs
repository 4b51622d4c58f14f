pub mod image;
pub mod diagnosis;
pub mod verdict;
pub mod outcome;

pub use image::*;
pub use diagnosis::*;
pub use verdict::*;
pub use outcome::*;
