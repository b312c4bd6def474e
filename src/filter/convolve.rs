//! Neighborhood filters: box blur and Sobel edges.
//!
//! Both read a 3×3 window clipped to the image. Cells that fall outside
//! the image are dropped from the window rather than replaced, so a
//! corner pixel sees 4 cells, an edge pixel 6 and an interior pixel 9.
//! The mapping from kernel cell to neighbor offset never shifts.

use enough::Stop;

use crate::error::BmpError;
use crate::image::Image;
use crate::pixel::{Pixel, clamp_channel};

type Kernel3 = [[i32; 3]; 3];

const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

const RADIUS: usize = 1;

/// One in-bounds cell of a square window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Neighbor {
    pub row: usize,
    pub col: usize,
    /// Kernel row, `0..=2 * radius`.
    pub ky: usize,
    /// Kernel column, `0..=2 * radius`.
    pub kx: usize,
}

/// In-bounds cells of the `(2r+1)²` window centered on `(row, col)`,
/// in row-major kernel order.
pub(crate) fn neighborhood(
    row: usize,
    col: usize,
    radius: usize,
    height: usize,
    width: usize,
) -> impl Iterator<Item = Neighbor> {
    let span = 2 * radius + 1;
    (0..span).flat_map(move |ky| {
        (0..span).filter_map(move |kx| {
            let r = (row + ky).checked_sub(radius)?;
            let c = (col + kx).checked_sub(radius)?;
            (r < height && c < width).then_some(Neighbor {
                row: r,
                col: c,
                ky,
                kx,
            })
        })
    })
}

/// Build a new image from `src`, computing each pixel from its position.
fn convolve(
    src: &Image,
    stop: &dyn Stop,
    mut pixel_at: impl FnMut(usize, usize) -> Pixel,
) -> Result<Image, BmpError> {
    let mut out = Image::try_new(src.width(), src.height())?;
    for (row, out_row) in out.rows_mut().enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        for (col, px) in out_row.iter_mut().enumerate() {
            *px = pixel_at(row, col);
        }
    }
    Ok(out)
}

/// Box blur: each channel becomes the rounded mean of the clipped 3×3
/// window around it. `src` is never modified.
pub fn blur(src: &Image, stop: &dyn Stop) -> Result<Image, BmpError> {
    let (height, width) = (src.height(), src.width());
    convolve(src, stop, |row, col| {
        let mut sum = [0u32; 3];
        let mut count = 0u32;
        for n in neighborhood(row, col, RADIUS, height, width) {
            let p = src[(n.row, n.col)];
            sum[0] += u32::from(p.r);
            sum[1] += u32::from(p.g);
            sum[2] += u32::from(p.b);
            count += 1;
        }
        // count >= 1: the center is always in bounds
        let mean = |s: u32| (f64::from(s) / f64::from(count)).round() as u8;
        Pixel::new(mean(sum[0]), mean(sum[1]), mean(sum[2]))
    })
}

/// Sobel edge magnitude per channel, `round(sqrt(gx² + gy²))` capped at
/// 255. `src` is never modified.
pub fn edges(src: &Image, stop: &dyn Stop) -> Result<Image, BmpError> {
    let (height, width) = (src.height(), src.width());
    convolve(src, stop, |row, col| {
        let mut gx = [0i32; 3];
        let mut gy = [0i32; 3];
        for n in neighborhood(row, col, RADIUS, height, width) {
            let p = src[(n.row, n.col)];
            let wx = SOBEL_KERNEL_X[n.ky][n.kx];
            let wy = SOBEL_KERNEL_Y[n.ky][n.kx];
            for (c, v) in [p.r, p.g, p.b].into_iter().enumerate() {
                gx[c] += i32::from(v) * wx;
                gy[c] += i32::from(v) * wy;
            }
        }
        let magnitude = |c: usize| {
            let sq = gx[c] * gx[c] + gy[c] * gy[c];
            clamp_channel(f64::from(sq).sqrt())
        };
        Pixel::new(magnitude(0), magnitude(1), magnitude(2))
    })
}
