//! Row-major 2D matrix used for every intermediate image.

/// Grayscale canvas at full resolution.
pub type PixelMatrix = Matrix<u8>;

/// Block averages, one per tile, in `[0, 255]`.
pub type DownsampledMatrix = Matrix<f32>;

/// A `width` x `height` matrix stored row-major in a single `Vec`.
///
/// # Example
///
/// ```
/// use digit_downsample::Matrix;
///
/// let m = Matrix::from_vec(vec![1, 2, 3, 4, 5, 6], 3);
/// assert_eq!(m.width(), 3);
/// assert_eq!(m.height(), 2);
/// assert_eq!(m.row(1), &[4, 5, 6]);
/// assert_eq!(m.get(0, 2), Some(&3));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<T> {
    data: Vec<T>,
    width: usize,
    height: usize,
}

impl<T> Matrix<T> {
    /// Partition a flat vector into rows of `width` values.
    ///
    /// Row-major order is preserved. An incomplete trailing row is dropped,
    /// and a zero `width` yields an empty matrix.
    pub fn from_vec(mut data: Vec<T>, width: usize) -> Self {
        if width == 0 {
            data.clear();
            return Self {
                data,
                width: 0,
                height: 0,
            };
        }
        let height = data.len() / width;
        data.truncate(width * height);
        Self {
            data,
            width,
            height,
        }
    }

    /// Number of columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// All values, row-major.
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Consume the matrix, returning its row-major values.
    #[inline]
    pub fn into_data(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at `(row, col)`, or `None` when out of range.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.height && col < self.width {
            self.data.get(row * self.width + col)
        } else {
            None
        }
    }

    /// Row `row` as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= height`.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.width;
        &self.data[start..start + self.width]
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        // chunks_exact panics on 0; an empty matrix has no rows anyway
        self.data.chunks_exact(self.width.max(1))
    }
}
