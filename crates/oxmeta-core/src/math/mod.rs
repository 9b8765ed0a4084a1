//! Colorimetric math used to synthesize matrix/TRC profiles

pub mod chromatic_adaptation;
pub mod matrix;

pub use chromatic_adaptation::{bradford_matrix, rgb_to_xyz_matrix};
pub use matrix::Matrix3x3;
