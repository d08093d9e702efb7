//! Point-mass trajectory in the vertical plane.
//!
//! Fixed-step RK4 on position and velocity, with drag from a tabulated
//! reference curve scaled by the projectile's form factor. Samples are
//! produced lazily by [`TrajectoryIter`]; [`TrajectorySolver::solve`]
//! collects them and marks the transonic zone.

use nalgebra::Vector2;
use serde::Serialize;

use crate::constants::{G_ACCEL_MPS2, TRANSONIC_ENTRY_MACH, TRANSONIC_EXIT_MACH};
use crate::drag::{g7_table, DragCoefficient, DragTable};
use crate::spin_drift::spin_drift_mm;

/// Integration and sampling settings
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryConfig {
    pub muzzle_velocity_mps: f64,
    /// Bore elevation above horizontal
    pub elevation_deg: f64,
    pub max_range_m: f64,
    pub time_step_s: f64,
    /// Integration stops once speed falls below this
    pub min_velocity_mps: f64,
    /// Integration stops once height falls below this
    pub min_height_m: f64,
    /// Horizontal distance between samples
    pub sample_interval_m: f64,
    /// Hard cap on integration steps
    pub max_steps: usize,
}

impl Default for TrajectoryConfig {
    fn default() -> Self {
        Self {
            muzzle_velocity_mps: 853.0,
            elevation_deg: 0.0,
            max_range_m: 1000.0,
            time_step_s: 0.001,
            min_velocity_mps: 50.0,
            min_height_m: -1000.0,
            sample_interval_m: 100.0,
            max_steps: 2_000_000,
        }
    }
}

/// Mass properties and drag scaling of the projectile
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectileModel {
    pub mass_kg: f64,
    /// Frontal area in m²
    pub area_m2: f64,
    /// Multiplier on the reference drag coefficient (sectional density / BC)
    pub form_factor: f64,
    pub stability_factor: f64,
    pub length_mm: f64,
    pub diameter_mm: f64,
}

/// Air properties held constant along the path
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlightConditions {
    pub air_density_kg_m3: f64,
    pub speed_of_sound_mps: f64,
}

// Trajectory sample data
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrajectorySample {
    pub range_m: f64,
    pub velocity_mps: f64,
    pub mach: f64,
    /// Drop below the bore line, positive downward
    pub drop_cm: f64,
    pub spin_drift_mm: f64,
    pub time_s: f64,
}

/// Why integration stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminationReason {
    MinimumVelocity,
    MaxRange,
    DropLimit,
    StepBudget,
}

// Trajectory result
#[derive(Debug, Clone, Serialize)]
pub struct TrajectoryResult {
    pub samples: Vec<TrajectorySample>,
    /// Range of the first sample at or below Mach 1.1
    pub transonic_entry_m: Option<f64>,
    /// Range of the first sample at or below Mach 0.9
    pub transonic_exit_m: Option<f64>,
    pub termination: Option<TerminationReason>,
    pub steps: usize,
}

impl TrajectoryResult {
    pub fn from_samples(
        samples: Vec<TrajectorySample>,
        termination: Option<TerminationReason>,
        steps: usize,
    ) -> Self {
        let transonic_entry_m = samples
            .iter()
            .find(|s| s.mach <= TRANSONIC_ENTRY_MACH)
            .map(|s| s.range_m);
        let transonic_exit_m = samples
            .iter()
            .find(|s| s.mach <= TRANSONIC_EXIT_MACH)
            .map(|s| s.range_m);

        Self {
            samples,
            transonic_entry_m,
            transonic_exit_m,
            termination,
            steps,
        }
    }

    pub fn last(&self) -> Option<&TrajectorySample> {
        self.samples.last()
    }
}

// Trajectory solver
#[derive(Debug, Clone)]
pub struct TrajectorySolver<D: DragCoefficient> {
    projectile: ProjectileModel,
    conditions: FlightConditions,
    config: TrajectoryConfig,
    drag: D,
}

impl TrajectorySolver<&'static DragTable> {
    /// Solver using the shared G7 reference table
    pub fn g7(
        projectile: ProjectileModel,
        conditions: FlightConditions,
        config: TrajectoryConfig,
    ) -> Self {
        Self::with_drag(projectile, conditions, config, g7_table())
    }
}

impl<D: DragCoefficient> TrajectorySolver<D> {
    pub fn with_drag(
        projectile: ProjectileModel,
        conditions: FlightConditions,
        config: TrajectoryConfig,
        drag: D,
    ) -> Self {
        Self {
            projectile,
            conditions,
            config,
            drag,
        }
    }

    /// Lazily integrate, yielding one sample per sample interval
    pub fn iter(&self) -> TrajectoryIter<'_, D> {
        let elevation = self.config.elevation_deg.to_radians();
        let v0 = self.config.muzzle_velocity_mps;
        TrajectoryIter {
            solver: self,
            position: Vector2::zeros(),
            velocity: Vector2::new(v0 * elevation.cos(), v0 * elevation.sin()),
            time: 0.0,
            last_sample_m: -self.config.sample_interval_m,
            steps: 0,
            termination: None,
        }
    }

    /// Integrate to termination and collect every sample
    pub fn solve(&self) -> TrajectoryResult {
        let mut iter = self.iter();
        let samples: Vec<TrajectorySample> = iter.by_ref().collect();
        TrajectoryResult::from_samples(samples, iter.termination(), iter.steps())
    }

    fn mach(&self, speed: f64) -> f64 {
        if self.conditions.speed_of_sound_mps > 0.0 {
            speed / self.conditions.speed_of_sound_mps
        } else {
            0.0
        }
    }

    fn calculate_acceleration(&self, velocity: &Vector2<f64>) -> Vector2<f64> {
        let gravity = Vector2::new(0.0, -G_ACCEL_MPS2);
        let speed = velocity.norm();
        if speed <= 0.0 || self.projectile.mass_kg <= 0.0 {
            return gravity;
        }

        let cd = self.projectile.form_factor * self.drag.drag_coefficient(self.mach(speed));
        let drag_force =
            0.5 * self.conditions.air_density_kg_m3 * speed * speed * cd * self.projectile.area_m2;

        // Drag acts opposite to velocity
        gravity - velocity * (drag_force / self.projectile.mass_kg / speed)
    }
}

/// Lazy trajectory integration.
///
/// Each call to `next` advances the RK4 state until the next sample is due
/// or a termination condition is met.
pub struct TrajectoryIter<'a, D: DragCoefficient> {
    solver: &'a TrajectorySolver<D>,
    position: Vector2<f64>,
    velocity: Vector2<f64>,
    time: f64,
    last_sample_m: f64,
    steps: usize,
    termination: Option<TerminationReason>,
}

impl<'a, D: DragCoefficient> TrajectoryIter<'a, D> {
    /// Set once integration has stopped
    pub fn termination(&self) -> Option<TerminationReason> {
        self.termination
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    fn step(&mut self) {
        let dt = self.solver.config.time_step_s;
        let position = self.position;
        let velocity = self.velocity;

        // k1
        let acc1 = self.solver.calculate_acceleration(&velocity);

        // k2
        let vel2 = velocity + acc1 * (dt * 0.5);
        let acc2 = self.solver.calculate_acceleration(&vel2);

        // k3
        let vel3 = velocity + acc2 * (dt * 0.5);
        let acc3 = self.solver.calculate_acceleration(&vel3);

        // k4
        let vel4 = velocity + acc3 * dt;
        let acc4 = self.solver.calculate_acceleration(&vel4);

        self.position = position + (velocity + vel2 * 2.0 + vel3 * 2.0 + vel4) * (dt / 6.0);
        self.velocity = velocity + (acc1 + acc2 * 2.0 + acc3 * 2.0 + acc4) * (dt / 6.0);
        self.time += dt;
        self.steps += 1;
    }
}

impl<'a, D: DragCoefficient> Iterator for TrajectoryIter<'a, D> {
    type Item = TrajectorySample;

    fn next(&mut self) -> Option<TrajectorySample> {
        let solver = self.solver;
        let config = &solver.config;
        while self.termination.is_none() {
            if self.steps >= config.max_steps || !(config.time_step_s > 0.0) {
                self.termination = Some(TerminationReason::StepBudget);
                break;
            }

            self.step();

            let speed = self.velocity.norm();
            let (x, y) = (self.position.x, self.position.y);
            if !(speed >= config.min_velocity_mps) {
                self.termination = Some(TerminationReason::MinimumVelocity);
                break;
            }
            if x >= config.max_range_m {
                self.termination = Some(TerminationReason::MaxRange);
                break;
            }
            if y < config.min_height_m {
                self.termination = Some(TerminationReason::DropLimit);
                break;
            }

            if x - self.last_sample_m >= config.sample_interval_m {
                self.last_sample_m = x;
                let p = &solver.projectile;
                return Some(TrajectorySample {
                    range_m: x,
                    velocity_mps: speed,
                    mach: solver.mach(speed),
                    drop_cm: -y * 100.0,
                    spin_drift_mm: spin_drift_mm(p.stability_factor, p.length_mm, p.diameter_mm, x),
                    time_s: self.time,
                });
            }
        }
        None
    }
}
