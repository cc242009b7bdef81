//! Main run configuration: geometry, grid, time stepping and EM boundaries.

use crate::units::{reference_angular_frequency_si, wavelengths};
use serde::{Deserialize, Serialize};

/// Simulation geometry tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Geometry {
    /// 1D in space, 3D in velocity
    #[serde(rename = "1d3v", alias = "1Dcartesian")]
    Cartesian1D,

    /// 2D in space, 3D in velocity
    #[serde(rename = "2d3v", alias = "2Dcartesian")]
    Cartesian2D,

    /// 3D in space, 3D in velocity
    #[serde(rename = "3d3v", alias = "3Dcartesian")]
    Cartesian3D,

    /// Azimuthal modes (longitudinal x, radial r)
    #[serde(rename = "3drz")]
    ThetaMode,
}

impl Geometry {
    /// Returns the tag the engine reads.
    pub fn name(&self) -> &'static str {
        match self {
            Geometry::Cartesian1D => "1d3v",
            Geometry::Cartesian2D => "2d3v",
            Geometry::Cartesian3D => "3d3v",
            Geometry::ThetaMode => "3drz",
        }
    }

    /// Number of spatial grid dimensions.
    pub fn dimensions(&self) -> usize {
        match self {
            Geometry::Cartesian1D => 1,
            Geometry::Cartesian2D | Geometry::ThetaMode => 2,
            Geometry::Cartesian3D => 3,
        }
    }

    /// EM boundary tags accepted along the longitudinal (x) axis.
    pub fn allowed_em_boundaries(&self) -> &'static [EmBoundary] {
        match self {
            Geometry::Cartesian1D | Geometry::Cartesian2D => &[
                EmBoundary::Periodic,
                EmBoundary::SilverMuller,
                EmBoundary::Reflective,
            ],
            Geometry::Cartesian3D | Geometry::ThetaMode => {
                &[EmBoundary::Periodic, EmBoundary::SilverMuller]
            }
        }
    }
}

impl std::fmt::Display for Geometry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Geometry {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1d3v" | "1Dcartesian" => Ok(Geometry::Cartesian1D),
            "2d3v" | "2Dcartesian" => Ok(Geometry::Cartesian2D),
            "3d3v" | "3Dcartesian" => Ok(Geometry::Cartesian3D),
            "3drz" => Ok(Geometry::ThetaMode),
            _ => Err(format!("Unknown geometry: {}", s)),
        }
    }
}

/// Electromagnetic boundary condition tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmBoundary {
    #[serde(rename = "periodic")]
    Periodic,

    /// Injecting/absorbing
    #[serde(rename = "silver-muller")]
    SilverMuller,

    #[serde(rename = "reflective")]
    Reflective,

    /// Radial outer boundary in theta-mode geometry
    #[serde(rename = "Buneman")]
    Buneman,
}

impl EmBoundary {
    /// Returns the tag the engine reads.
    pub fn name(&self) -> &'static str {
        match self {
            EmBoundary::Periodic => "periodic",
            EmBoundary::SilverMuller => "silver-muller",
            EmBoundary::Reflective => "reflective",
            EmBoundary::Buneman => "Buneman",
        }
    }
}

impl std::fmt::Display for EmBoundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The `Main` block of a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainBlock {
    pub geometry: Geometry,

    /// Shape-function order used by interpolators and projectors (2 or 4)
    pub interpolation_order: u32,

    /// Patches per dimension
    pub number_of_patches: Vec<u32>,

    pub timestep: f64,

    pub sim_time: f64,

    /// Time before fields start evolving
    pub time_fields_frozen: f64,

    pub cell_length: Vec<f64>,

    pub sim_length: Vec<f64>,

    /// EM boundaries along x: one entry for both sides, or `[xmin, xmax]`
    pub bc_em_type_x: Vec<EmBoundary>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bc_em_type_y: Option<Vec<EmBoundary>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bc_em_type_z: Option<Vec<EmBoundary>>,

    pub random_seed: u64,

    #[serde(rename = "reference_angular_frequency_SI")]
    pub reference_angular_frequency_si: f64,

    /// Log cadence in timesteps
    pub print_every: u32,
}

impl Default for MainBlock {
    fn default() -> Self {
        Self {
            geometry: Geometry::Cartesian1D,
            interpolation_order: 2,
            number_of_patches: vec![1],
            timestep: wavelengths(0.95 / 16.0),
            sim_time: wavelengths(1.0),
            time_fields_frozen: 0.0,
            cell_length: vec![wavelengths(1.0 / 16.0)],
            sim_length: vec![wavelengths(1.0)],
            bc_em_type_x: vec![EmBoundary::Periodic],
            bc_em_type_y: None,
            bc_em_type_z: None,
            random_seed: 0,
            reference_angular_frequency_si: reference_angular_frequency_si(),
            print_every: 10,
        }
    }
}

impl MainBlock {
    /// Number of timesteps covering `sim_time`.
    pub fn n_timesteps(&self) -> u64 {
        if self.timestep > 0.0 {
            (self.sim_time / self.timestep).round() as u64
        } else {
            0
        }
    }

    /// Number of cells along each dimension.
    pub fn n_cells(&self) -> Vec<u64> {
        self.sim_length
            .iter()
            .zip(&self.cell_length)
            .map(|(length, cell)| (length / cell).round() as u64)
            .collect()
    }
}

/// Optional `MovingWindow` block.
///
/// The window shifts by whole cell blocks along x once the simulation time
/// passes `t_move_win`, travelling at `vx_win` (fraction of c).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingWindow {
    /// Cells in the window along x (0 disables it)
    pub nspace_win_x: u32,

    /// Window velocity (fraction of c)
    pub vx_win: f64,

    /// Time at which the window starts moving
    pub t_move_win: f64,
}

impl MovingWindow {
    /// Returns true if the window is due to shift at `time_dual`, given how
    /// far it has already moved.
    pub fn is_moving(&self, time_dual: f64, x_moved: f64) -> bool {
        self.nspace_win_x > 0 && (time_dual - self.t_move_win) * self.vx_win > x_moved
    }

    /// Distance covered by a single shift of `clrw` cells.
    pub fn shift_length(cell_length_x: f64, clrw: u32) -> f64 {
        cell_length_x * clrw as f64
    }
}
