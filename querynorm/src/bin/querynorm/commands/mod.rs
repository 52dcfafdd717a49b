pub mod normalize;
pub mod sort;
