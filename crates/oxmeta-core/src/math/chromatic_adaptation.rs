//! Chromatic Adaptation
//!
//! Bradford adaptation between white points, as ICC.1:2022 Annex E uses to
//! bring device colorants into the D50 profile connection space.
//!
//! References:
//! - Lindbloom: http://www.brucelindbloom.com/index.html?Eqn_ChromAdapt.html
//! - Lindbloom: http://www.brucelindbloom.com/index.html?Eqn_RGB_XYZ_Matrix.html

use crate::color::{Chromaticity, WhitePoint};
use crate::math::Matrix3x3;

/// Bradford cone response matrix: XYZ -> LMS
const BRADFORD: Matrix3x3 = Matrix3x3::new([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// Bradford matrix adapting XYZ under `src` to XYZ under `dst`
///
/// `M = B^-1 × diag(dst_lms / src_lms) × B`
pub fn bradford_matrix(src: &WhitePoint, dst: &WhitePoint) -> Option<Matrix3x3> {
    let src_lms = BRADFORD.multiply_vec(src.xyz.to_array());
    let dst_lms = BRADFORD.multiply_vec(dst.xyz.to_array());
    if src_lms.iter().any(|v| v.abs() < 1e-10) {
        return None;
    }
    let scale = Matrix3x3::diagonal([
        dst_lms[0] / src_lms[0],
        dst_lms[1] / src_lms[1],
        dst_lms[2] / src_lms[2],
    ]);
    Some(BRADFORD.inverse()? * scale * BRADFORD)
}

/// RGB -> XYZ matrix for the given primaries, with white mapping to `white`
///
/// Columns are the XYZ of the red, green and blue primaries.
pub fn rgb_to_xyz_matrix(primaries: [Chromaticity; 3], white: &WhitePoint) -> Option<Matrix3x3> {
    let [r, g, b] = primaries.map(|p| p.to_xyz().to_array());
    let unscaled = Matrix3x3::from_columns(r, g, b);
    let s = unscaled.inverse()?.multiply_vec(white.xyz.to_array());
    Some(unscaled * Matrix3x3::diagonal(s))
}
