//! Block decomposition and block averaging.

use super::matrix::{DownsampledMatrix, PixelMatrix};

/// A square tile of the pixel matrix.
///
/// Values are stored row-major; `side * side` of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Tile row (0 = top)
    pub tile_row: usize,
    /// Tile column (0 = left)
    pub tile_col: usize,
    /// Side length in pixels
    pub side: usize,
    /// Pixel values, row-major
    pub values: Vec<u8>,
}

impl Block {
    /// Sum of all pixel values in the block.
    #[inline]
    pub fn sum(&self) -> u64 {
        self.values.iter().map(|&v| v as u64).sum()
    }
}

/// Split `matrix` into non-overlapping `block_size` x `block_size` tiles.
///
/// Tiles are emitted in row-major tile order: tile row in the outer loop,
/// tile column in the inner loop. Row and column tile counts come from the
/// matrix height and width respectively, so non-square matrices decompose
/// correctly. Remainder pixels that do not fill a whole tile are ignored,
/// and a zero `block_size` yields no tiles.
///
/// # Example
///
/// ```
/// use digit_downsample::{decompose, Matrix};
///
/// let m = Matrix::from_vec((0u8..8).collect(), 4); // 4 wide, 2 high
/// let blocks = decompose(&m, 2);
///
/// assert_eq!(blocks.len(), 2);
/// assert_eq!(blocks[0].values, vec![0, 1, 4, 5]);
/// assert_eq!(blocks[1].values, vec![2, 3, 6, 7]);
/// ```
pub fn decompose(matrix: &PixelMatrix, block_size: usize) -> Vec<Block> {
    if block_size == 0 {
        return Vec::new();
    }

    let tiles_down = matrix.height() / block_size;
    let tiles_across = matrix.width() / block_size;
    let mut blocks = Vec::with_capacity(tiles_down * tiles_across);

    for tile_row in 0..tiles_down {
        for tile_col in 0..tiles_across {
            let top = tile_row * block_size;
            let left = tile_col * block_size;
            let mut values = Vec::with_capacity(block_size * block_size);
            for y in top..top + block_size {
                values.extend_from_slice(&matrix.row(y)[left..left + block_size]);
            }
            blocks.push(Block {
                tile_row,
                tile_col,
                side: block_size,
                values,
            });
        }
    }

    blocks
}

/// Average each block and reassemble the results into a matrix.
///
/// Each output value is the block sum divided by `side * side`. Values are
/// laid out `tiles_per_row` to a row in the order the blocks are given, which
/// for [`decompose`] output reproduces the tile grid.
///
/// # Example
///
/// ```
/// use digit_downsample::{block_averages, decompose, Matrix};
///
/// let m = Matrix::from_vec(vec![0u8, 100, 200, 100], 2);
/// let averaged = block_averages(&decompose(&m, 2), 1);
///
/// assert_eq!(averaged.data(), &[100.0]);
/// ```
pub fn block_averages(blocks: &[Block], tiles_per_row: usize) -> DownsampledMatrix {
    let averages: Vec<f32> = blocks
        .iter()
        .map(|block| {
            let area = (block.side * block.side) as f64;
            if area == 0.0 {
                0.0
            } else {
                (block.sum() as f64 / area) as f32
            }
        })
        .collect();

    DownsampledMatrix::from_vec(averages, tiles_per_row)
}
