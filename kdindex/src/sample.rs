/// Trait to describe the [position](Position::position) of a point sample.
///
/// #### Deriving:
///
/// Used when the type has a field named `position`:
///
/// ```
/// # use kdindex::prelude::*;
/// #[derive(Position, Value)]
/// struct Photon {
///     position: [f32; 3],
///     value: [f32; 3],
/// //  ...
/// }
/// ```
/// #### Manual implementation:
///
/// Used when the type cannot directly provide its position.
///
/// ```
/// # use kdindex::prelude::*;
/// # use glam::Vec3;
/// struct Photon {
///     origin: Vec3,
///     travelled: Vec3,
/// //  ...
/// }
///
/// impl Position for Photon {
///     type Vector = Vec3;
///
///     fn position(&self) -> Vec3 {
///         self.origin + self.travelled
///     }
/// }
/// ```
///
/// Tuples of a vector and a value implement both [`Position`] and [`Value`], which avoids an
/// intermediate type:
///
/// ```
/// # use kdindex::prelude::*;
/// let sample = ([1.0, 2.0], "a");
///
/// assert_eq!(sample.position(), [1.0, 2.0]);
/// assert_eq!(sample.value(), "a");
/// ```
pub trait Position {
    /// Type of the [position](Position::position), convertible into an array.
    type Vector;

    /// The position of the sample in space.
    fn position(&self) -> Self::Vector;
}

/// Trait to describe the [value](Value::value) a point sample carries into the tree.
///
/// See [`Position`] for the ways to implement it.
pub trait Value {
    /// Type of the [value](Value::value).
    type Value;

    /// The value associated with the sample.
    fn value(&self) -> Self::Value;
}

impl<V: Clone, T> Position for (V, T) {
    type Vector = V;

    #[inline]
    fn position(&self) -> V {
        self.0.clone()
    }
}

impl<V, T: Clone> Value for (V, T) {
    type Value = T;

    #[inline]
    fn value(&self) -> T {
        self.1.clone()
    }
}

impl<P: Position + ?Sized> Position for &P {
    type Vector = P::Vector;

    #[inline]
    fn position(&self) -> Self::Vector {
        (**self).position()
    }
}

impl<P: Value + ?Sized> Value for &P {
    type Value = P::Value;

    #[inline]
    fn value(&self) -> Self::Value {
        (**self).value()
    }
}
