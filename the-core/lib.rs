pub mod line_ending;
pub mod normalize;
pub mod uri;

pub use normalize::normalize;
