pub mod coords;
pub mod geometry;
