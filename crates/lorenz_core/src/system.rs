//! Lorenz system integration
//!
//! The system is advanced with a fixed-step explicit Euler method:
//!
//! ```text
//! x' = x + h * Pr * (y - x)
//! y' = y + h * (x * (r - z) - y)
//! z' = z + h * (x * y - b * z)
//! ```
//!
//! No bounds are enforced here. Divergent states are left to the voxel
//! accumulator, which drops anything outside its bounds.

use rand::Rng;
use serde::{Serialize, Deserialize};
use lorenz_math::{Axis, Bounds3, Vec3};

use crate::CoreError;

/// Coefficients of the Lorenz equations
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LorenzParams {
    /// Prandtl number (Pr, often sigma)
    pub prandtl: f64,
    /// Rayleigh number (r, often rho)
    pub rayleigh: f64,
    /// Geometric factor (b, often beta)
    pub beta: f64,
}

impl Default for LorenzParams {
    fn default() -> Self {
        Self {
            prandtl: 10.0,
            rayleigh: 28.0,
            beta: 2.667,
        }
    }
}

impl LorenzParams {
    /// Create a new parameter set
    pub fn new(prandtl: f64, rayleigh: f64, beta: f64) -> Self {
        Self { prandtl, rayleigh, beta }
    }

    /// Check that every coefficient is finite
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.prandtl.is_finite() {
            return Err(CoreError::NonFiniteParameter("prandtl"));
        }
        if !self.rayleigh.is_finite() {
            return Err(CoreError::NonFiniteParameter("rayleigh"));
        }
        if !self.beta.is_finite() {
            return Err(CoreError::NonFiniteParameter("beta"));
        }
        Ok(())
    }

    /// Time derivative (dx/dt, dy/dt, dz/dt) at a state
    #[inline]
    pub fn derivative(&self, s: Vec3) -> Vec3 {
        Vec3::new(
            self.prandtl * (s.y - s.x),
            s.x * (self.rayleigh - s.z) - s.y,
            s.x * s.y - self.beta * s.z,
        )
    }
}

/// Advance a state by one explicit Euler step of size `h`
#[inline]
pub fn euler_step(state: Vec3, params: &LorenzParams, h: f64) -> Vec3 {
    let Vec3 { x, y, z } = state;
    Vec3::new(
        x + h * params.prandtl * (y - x),
        y + h * (x * (params.rayleigh - z) - y),
        z + h * (x * y - params.beta * z),
    )
}

/// Draw a state uniformly from `[min, max)` on each axis
///
/// `bounds` must be valid (see [`Bounds3::is_valid`]).
pub fn random_start<R: Rng + ?Sized>(bounds: &Bounds3, rng: &mut R) -> Vec3 {
    let mut coord = |axis: Axis| {
        let [lo, hi] = bounds.range(axis);
        rng.gen_range(lo..hi)
    };
    let x = coord(Axis::X);
    let y = coord(Axis::Y);
    let z = coord(Axis::Z);
    Vec3::new(x, y, z)
}

/// A Lorenz system with a fixed integration step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LorenzSystem {
    params: LorenzParams,
    step_size: f64,
}

impl LorenzSystem {
    /// Create a system, rejecting non-finite coefficients and non-positive steps
    pub fn new(params: LorenzParams, step_size: f64) -> Result<Self, CoreError> {
        params.validate()?;
        if !(step_size.is_finite() && step_size > 0.0) {
            return Err(CoreError::InvalidStepSize(step_size));
        }
        Ok(Self { params, step_size })
    }

    /// The Lorenz coefficients
    pub fn params(&self) -> &LorenzParams {
        &self.params
    }

    /// The integration step size
    pub fn step_size(&self) -> f64 {
        self.step_size
    }

    /// Advance `state` by one step
    #[inline]
    pub fn step(&self, state: Vec3) -> Vec3 {
        euler_step(state, &self.params, self.step_size)
    }

    /// Iterate successive states starting after `start`
    pub fn trajectory(&self, start: Vec3) -> Trajectory {
        Trajectory {
            system: *self,
            state: start,
        }
    }

    /// Equilibrium points of the continuous system
    ///
    /// The origin is always stationary. For `b * (r - 1) > 0` the two
    /// convection fixed points `(±c, ±c, r - 1)` with `c = sqrt(b (r - 1))`
    /// exist as well.
    pub fn fixed_points(&self) -> Vec<Vec3> {
        let LorenzParams { rayleigh, beta, .. } = self.params;
        let mut points = vec![Vec3::ZERO];
        let c2 = beta * (rayleigh - 1.0);
        if c2 > 0.0 {
            let c = c2.sqrt();
            points.push(Vec3::new(c, c, rayleigh - 1.0));
            points.push(Vec3::new(-c, -c, rayleigh - 1.0));
        }
        points
    }
}

/// Unbounded iterator over integrated states
///
/// Each call to `next` performs exactly one step; take as many as needed.
#[derive(Clone, Debug)]
pub struct Trajectory {
    system: LorenzSystem,
    state: Vec3,
}

impl Trajectory {
    /// Most recently produced state (the start state before the first step)
    pub fn state(&self) -> Vec3 {
        self.state
    }
}

impl Iterator for Trajectory {
    type Item = Vec3;

    #[inline]
    fn next(&mut self) -> Option<Vec3> {
        self.state = self.system.step(self.state);
        Some(self.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
