//! Closed-form activation math, generic over the float type.
//!
//! These are plain functions on numbers; graph construction lives in the
//! parent module. Derivatives that are cheaper to express through the forward
//! output take `out` instead of `x`.

use num_traits::Float;

/// Logistic sigmoid, split on the sign of `x` so `exp` never overflows.
pub fn sigmoid<T: Float>(x: T) -> T {
    if x >= T::zero() {
        T::one() / (T::one() + (-x).exp())
    } else {
        let e = x.exp();
        e / (T::one() + e)
    }
}

/// σ'(x) written in terms of `out = σ(x)`.
pub fn sigmoid_derivative<T: Float>(out: T) -> T {
    out * (T::one() - out)
}

pub fn tanh<T: Float>(x: T) -> T {
    x.tanh()
}

/// tanh'(x) written in terms of `out = tanh(x)`.
pub fn tanh_derivative<T: Float>(out: T) -> T {
    T::one() - out * out
}

pub fn relu<T: Float>(x: T) -> T {
    if x < T::zero() {
        T::zero()
    } else {
        x
    }
}

/// 1 for strictly positive inputs, 0 otherwise (including at 0).
pub fn relu_derivative<T: Float>(x: T) -> T {
    if x > T::zero() {
        T::one()
    } else {
        T::zero()
    }
}

pub fn leaky_relu<T: Float>(x: T, alpha: T) -> T {
    if x < T::zero() {
        x * alpha
    } else {
        x
    }
}

pub fn leaky_relu_derivative<T: Float>(x: T, alpha: T) -> T {
    if x >= T::zero() {
        T::one()
    } else {
        alpha
    }
}

pub fn elu<T: Float>(x: T, alpha: T) -> T {
    if x < T::zero() {
        alpha * (x.exp() - T::one())
    } else {
        x
    }
}

pub fn elu_derivative<T: Float>(x: T, alpha: T) -> T {
    if x >= T::zero() {
        T::one()
    } else {
        alpha * x.exp()
    }
}

/// `x * σ(βx)`
pub fn swish<T: Float>(x: T, beta: T) -> T {
    x * sigmoid(beta * x)
}

/// σ(βx) + βx·σ(βx)(1 − σ(βx))
pub fn swish_derivative<T: Float>(x: T, beta: T) -> T {
    let s = sigmoid(beta * x);
    s + beta * x * s * (T::one() - s)
}
