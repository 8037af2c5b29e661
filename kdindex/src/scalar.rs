use std::{
    cmp::Ordering,
    fmt::Debug,
    ops::{Add, Div, Mul, Neg, Sub},
};

/// Trait for the element `infinity`.
pub trait Infinity {
    /// `infinity` (∞) value of the type.
    fn infinity() -> Self;
}

/// Trait to compute the minimum and maximum of a number.
pub trait MinMax {
    /// Returns the minimum between two numbers.
    fn min(self, rhs: Self) -> Self;

    /// Returns the maximum between two numbers.
    fn max(self, rhs: Self) -> Self;
}

/// Trait to compute the midpoint of two numbers.
pub trait MidPoint {
    /// Returns the middle point of `self` and `rhs`.
    fn midpoint(self, rhs: Self) -> Self;
}

/// Three-dimensional vector the intersection kernels compute with.
pub trait InternalVector: Copy + Sub<Output = Self> {
    /// Type of the components of the vector.
    type Scalar;

    /// Creates the vector from an array of components.
    fn from_array(array: [Self::Scalar; 3]) -> Self;

    /// Dot product of two vectors.
    fn dot(self, rhs: Self) -> Self::Scalar;

    /// Cross product of two vectors.
    fn cross(self, rhs: Self) -> Self;
}

/// Floating point scalar the trees are built with, implemented for `f32` and `f64`.
pub trait Float:
    Copy
    + Default
    + Debug
    + PartialOrd
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Infinity
    + MinMax
    + MidPoint
{
    /// `0`.
    const ZERO: Self;
    /// `1`.
    const ONE: Self;
    /// Machine epsilon of the type.
    const EPSILON: Self;

    /// [`glam`] vector used for this scalar.
    type Vector3: InternalVector<Scalar = Self>;

    /// Absolute value.
    fn abs(self) -> Self;

    /// Returns `true` if the number is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Total ordering between two numbers.
    fn total_cmp(&self, rhs: &Self) -> Ordering;

    /// Lossy conversion to `f64`, used by the cost model.
    fn to_f64(self) -> f64;
}

macro_rules! impl_floats {
    ($s: ty, $v: ty) => {
        impl Infinity for $s {
            #[inline]
            fn infinity() -> Self {
                Self::INFINITY
            }
        }

        impl MinMax for $s {
            #[inline]
            fn min(self, rhs: Self) -> Self {
                self.min(rhs)
            }

            #[inline]
            fn max(self, rhs: Self) -> Self {
                self.max(rhs)
            }
        }

        impl MidPoint for $s {
            #[inline]
            fn midpoint(self, rhs: Self) -> Self {
                (self + rhs) / 2.0
            }
        }

        impl InternalVector for $v {
            type Scalar = $s;

            #[inline]
            fn from_array(array: [$s; 3]) -> Self {
                <$v>::from_array(array)
            }

            #[inline]
            fn dot(self, rhs: Self) -> $s {
                <$v>::dot(self, rhs)
            }

            #[inline]
            fn cross(self, rhs: Self) -> Self {
                <$v>::cross(self, rhs)
            }
        }

        impl Float for $s {
            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const EPSILON: Self = <$s>::EPSILON;

            type Vector3 = $v;

            #[inline]
            fn abs(self) -> Self {
                <$s>::abs(self)
            }

            #[inline]
            fn is_finite(self) -> bool {
                <$s>::is_finite(self)
            }

            #[inline]
            fn total_cmp(&self, rhs: &Self) -> Ordering {
                <$s>::total_cmp(self, rhs)
            }

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    };
}

impl_floats!(f32, glam::Vec3A);
impl_floats!(f64, glam::DVec3);
