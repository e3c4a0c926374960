//! Matrix math and procedural geometry shared by the scenes.

pub mod matrix;
pub mod shapes;

pub use self::matrix::Matrix;
pub use self::shapes::Shape;
