use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Position or offset on a 2D board, `x` grows to the right, `y` grows down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    /// Row-major iteration over the rectangle `from..to`.
    pub fn iter_fill(from: Dims, to: Dims) -> impl Iterator<Item = Dims> {
        (from.1..to.1).flat_map(move |y| (from.0..to.0).map(move |x| Dims(x, y)))
    }

    pub fn all_positive(self) -> bool {
        self.0 > 0 && self.1 > 0
    }

    pub fn all_non_negative(self) -> bool {
        self.0 >= 0 && self.1 >= 0
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    pub fn manhattan(self, other: Dims) -> i32 {
        (self - other).abs_sum()
    }

    pub fn euclidean(self, other: Dims) -> f64 {
        let Dims(dx, dy) = self - other;
        f64::from(dx).hypot(f64::from(dy))
    }
}

impl fmt::Display for Dims {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl Add for Dims {
    type Output = Dims;

    fn add(self, other: Dims) -> Dims {
        Dims(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Dims {
    type Output = Dims;

    fn sub(self, other: Dims) -> Dims {
        Dims(self.0 - other.0, self.1 - other.1)
    }
}

impl AddAssign for Dims {
    fn add_assign(&mut self, other: Dims) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl SubAssign for Dims {
    fn sub_assign(&mut self, other: Dims) {
        self.0 -= other.0;
        self.1 -= other.1;
    }
}

impl Mul<i32> for Dims {
    type Output = Dims;

    fn mul(self, other: i32) -> Dims {
        Dims(self.0 * other, self.1 * other)
    }
}

#[cfg(test)]
mod tests {
    use super::Dims;

    #[test]
    fn iter_fill_is_row_major() {
        let cells: Vec<_> = Dims::iter_fill(Dims::ZERO, Dims(2, 2)).collect();
        assert_eq!(cells, vec![Dims(0, 0), Dims(1, 0), Dims(0, 1), Dims(1, 1)]);
    }

    #[test]
    fn distances() {
        assert_eq!(Dims(0, 1).manhattan(Dims(4, 3)), 6);
        assert_eq!(Dims(0, 0).euclidean(Dims(3, 4)), 5.0);
        assert_eq!(Dims(2, 2).euclidean(Dims(2, 2)), 0.0);
    }

    #[test]
    fn arithmetic() {
        let mut pos = Dims(1, 2) * 2 + Dims::ONE;
        assert_eq!(pos, Dims(3, 5));
        pos -= Dims(3, 1);
        pos += Dims::ONE;
        assert_eq!(pos, Dims(1, 5));
        assert_eq!(pos.abs_sum(), 6);
    }
}
