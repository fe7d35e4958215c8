use crate::core::traits::Real;
use std::ops;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 2D vector used for points, directions and sizes.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector2<T = f64> {
    pub x: T,
    pub y: T,
}

impl<T> Vector2<T>
where
    T: Real,
{
    /// Create a new vector with x and y components.
    #[inline]
    pub fn new(x: T, y: T) -> Self {
        Vector2 { x, y }
    }

    /// Create a zero vector (x = 0, y = 0).
    #[inline]
    pub fn zero() -> Self {
        Vector2::new(T::zero(), T::zero())
    }

    /// Uniformly scale the vector by `scale_factor`.
    #[inline]
    pub fn scale(&self, scale_factor: T) -> Self {
        vec2(scale_factor * self.x, scale_factor * self.y)
    }

    #[inline]
    pub fn dot(&self, other: Self) -> T {
        self.x * other.x + self.y * other.y
    }

    /// 2D cross product (perpendicular dot product), `self.x * other.y - self.y * other.x`.
    ///
    /// Positive when `other` is counter clockwise from `self`.
    #[inline]
    pub fn cross(&self, other: Self) -> T {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    pub fn length_squared(&self) -> T {
        self.dot(*self)
    }

    #[inline]
    pub fn length(&self) -> T {
        self.dot(*self).sqrt()
    }

    /// Normalize the vector (length = 1).
    ///
    /// A zero vector produces NaN components, use [Vector2::try_normalize] when the input may be
    /// zero length.
    #[inline]
    pub fn normalize(&self) -> Self {
        self.scale(T::one() / self.length())
    }

    /// Normalize the vector or return `None` if its length is fuzzy zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyslice::core::math::*;
    /// assert!(Vector2::new(3.0, 4.0).try_normalize().unwrap().fuzzy_eq(Vector2::new(0.6, 0.8)));
    /// assert!(Vector2::<f64>::zero().try_normalize().is_none());
    /// ```
    #[inline]
    pub fn try_normalize(&self) -> Option<Self> {
        let length = self.length();
        if length.fuzzy_eq_zero() || !length.is_finite() {
            return None;
        }

        Some(self.scale(T::one() / length))
    }

    pub fn fuzzy_eq_eps(&self, other: Self, fuzzy_epsilon: T) -> bool {
        self.x.fuzzy_eq_eps(other.x, fuzzy_epsilon) && self.y.fuzzy_eq_eps(other.y, fuzzy_epsilon)
    }

    pub fn fuzzy_eq(&self, other: Self) -> bool {
        self.fuzzy_eq_eps(other, T::fuzzy_epsilon())
    }

    /// Create perpendicular vector (rotated a quarter turn counter clockwise).
    #[inline]
    pub fn perp(&self) -> Self {
        vec2(-self.y, self.x)
    }

    /// Create perpendicular unit vector (length = 1).
    #[inline]
    pub fn unit_perp(&self) -> Self {
        self.perp().normalize()
    }

    /// Rotate the vector about the origin by `angle` in radians.
    ///
    /// Uses the standard rotation matrix, counter clockwise with Y up. With Y down screen
    /// coordinates the same rotation appears clockwise.
    ///
    /// # Examples
    ///
    /// ```
    /// # use polyslice::core::math::*;
    /// use std::f64::consts::FRAC_PI_2;
    /// let v = Vector2::new(1.0, 0.0).rotate(FRAC_PI_2);
    /// assert!(v.fuzzy_eq(Vector2::new(0.0, 1.0)));
    /// ```
    #[inline]
    pub fn rotate(&self, angle: T) -> Self {
        let (s, c) = angle.sin_cos();
        vec2(self.x * c - self.y * s, self.x * s + self.y * c)
    }

    /// Returns true if both components are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[inline(always)]
pub fn vec2<T>(x: T, y: T) -> Vector2<T>
where
    T: Real,
{
    Vector2::new(x, y)
}

macro_rules! ImplBinaryOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl<T: Real> ops::$op_trait<Vector2<T>> for Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<T: Real> ops::$op_trait<&Vector2<T>> for Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: &Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<'a, 'b, T: Real> ops::$op_trait<&'b Vector2<T>> for &'a Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: &'b Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }

        impl<T: Real> ops::$op_trait<Vector2<T>> for &Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: Vector2<T>) -> Self::Output {
                Vector2::new(self.x $op rhs.x, self.y $op rhs.y)
            }
        }
    };
}

ImplBinaryOp!(Add, add, +);
ImplBinaryOp!(Sub, sub, -);

macro_rules! ImplScalarOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl<T: Real> ops::$op_trait<T> for Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: T) -> Self::Output {
                Vector2::new(self.x $op rhs, self.y $op rhs)
            }
        }

        impl<T: Real> ops::$op_trait<T> for &Vector2<T> {
            type Output = Vector2<T>;
            fn $op_func(self, rhs: T) -> Self::Output {
                Vector2::new(self.x $op rhs, self.y $op rhs)
            }
        }
    };
}

ImplScalarOp!(Mul, mul, *);
ImplScalarOp!(Div, div, /);

macro_rules! ImplAssignOp {
    ($op_trait:ident, $op_func:ident, $op:tt) => {
        impl<T: Real> ops::$op_trait<Vector2<T>> for Vector2<T> {
            fn $op_func(&mut self, rhs: Vector2<T>) {
                self.x = self.x $op rhs.x;
                self.y = self.y $op rhs.y;
            }
        }
    };
}

ImplAssignOp!(AddAssign, add_assign, +);
ImplAssignOp!(SubAssign, sub_assign, -);

impl<T: Real> ops::Neg for Vector2<T> {
    type Output = Vector2<T>;
    fn neg(self) -> Self::Output {
        Vector2::new(-self.x, -self.y)
    }
}

impl<T: Real> ops::Neg for &Vector2<T> {
    type Output = Vector2<T>;
    fn neg(self) -> Self::Output {
        Vector2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::traits::FuzzyEq;
    use std::f64::consts::{FRAC_PI_2, PI};

    macro_rules! test_binary_op {
        ($v1:ident, $v2:ident, $op:tt, $expected:expr) => {
            assert!(($v1 $op $v2).fuzzy_eq($expected));
            assert!((&$v1 $op $v2).fuzzy_eq($expected));
            assert!(($v1 $op &$v2).fuzzy_eq($expected));
            assert!((&$v1 $op &$v2).fuzzy_eq($expected));
        };
    }

    #[test]
    fn ops() {
        let v1 = vec2(4.0, 5.0);
        let v2 = vec2(1.0, 2.0);
        test_binary_op!(v1, v2, +, vec2(5.0, 7.0));
        test_binary_op!(v1, v2, -, vec2(3.0, 3.0));
        assert!((v1 * 2.0).fuzzy_eq(vec2(8.0, 10.0)));
        assert!((v1 / 2.0).fuzzy_eq(vec2(2.0, 2.5)));
        assert!((-v1).fuzzy_eq(vec2(-4.0, -5.0)));

        let mut v3 = v1;
        v3 += v2;
        assert!(v3.fuzzy_eq(vec2(5.0, 7.0)));
        v3 -= v2;
        assert!(v3.fuzzy_eq(v1));
    }

    #[test]
    fn cross_sign_follows_turn_direction() {
        let x_axis = vec2(1.0, 0.0);
        let y_axis = vec2(0.0, 1.0);
        assert!(x_axis.cross(y_axis).fuzzy_eq(1.0));
        assert!(y_axis.cross(x_axis).fuzzy_eq(-1.0));
        assert!(x_axis.cross(x_axis * 3.0).fuzzy_eq(0.0));
    }

    #[test]
    fn rotate() {
        let v = vec2(2.0, 0.0);
        assert!(v.rotate(FRAC_PI_2).fuzzy_eq(vec2(0.0, 2.0)));
        assert!(v.rotate(PI).fuzzy_eq(vec2(-2.0, 0.0)));
        assert!(v.rotate(PI).rotate(-PI).fuzzy_eq(v));
    }

    #[test]
    fn normalize_zero_vector() {
        assert!(vec2(0.0, 0.0).try_normalize().is_none());
        assert!(vec2(f64::NAN, 1.0).try_normalize().is_none());
        let n = vec2(0.0, -5.0).try_normalize().unwrap();
        assert!(n.fuzzy_eq(vec2(0.0, -1.0)));
    }
}
