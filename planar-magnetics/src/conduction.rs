//! DC resistance and skin-depth helpers for copper sheets and annular turns.

use crate::error::Error;
use crate::geometry::TWO_PI;
use crate::materials::Conductor;

/// Thickness of a one-ounce copper layer, in meters.
const THICKNESS_PER_OUNCE: f64 = 35.0e-6;

/// Convert a copper weight (oz) to a layer thickness (m).
pub fn weight_to_thickness(weight: f64) -> f64 {
    THICKNESS_PER_OUNCE * weight
}

/// Convert a copper layer thickness (m) to a weight (oz).
pub fn thickness_to_weight(thickness: f64) -> f64 {
    thickness / THICKNESS_PER_OUNCE
}

/// Resistance of a rectangular sheet with current flowing along its length,
/// in ohms.
pub fn dcr_of_sheet(thickness: f64, width: f64, length: f64, rho: f64) -> f64 {
    rho * length / (width * thickness)
}

/// Resistance of a full annular turn with circumferential current flow, in
/// ohms.
///
/// # Errors
/// Returns an error if `outer_radius` does not exceed `inner_radius`.
pub fn dcr_of_annulus(
    thickness: f64,
    inner_radius: f64,
    outer_radius: f64,
    rho: f64,
) -> Result<f64, Error> {
    dcr_of_annular_sector(thickness, inner_radius, outer_radius, TWO_PI, rho)
}

/// Resistance of an annular sector spanning `angle` radians with
/// circumferential current flow, in ohms.
///
/// Integrating the conductance of concentric filaments over the radial span
/// gives `R = θ·ρ / (t · ln(r_o / r_i))`.
///
/// # Errors
/// Returns an error if `outer_radius` does not exceed `inner_radius`.
pub fn dcr_of_annular_sector(
    thickness: f64,
    inner_radius: f64,
    outer_radius: f64,
    angle: f64,
    rho: f64,
) -> Result<f64, Error> {
    if outer_radius <= inner_radius {
        return Err(Error::InvalidAnnulus {
            inner: inner_radius,
            outer: outer_radius,
        });
    }

    Ok(angle.abs() * rho / (thickness * (outer_radius / inner_radius).ln()))
}

/// Skin depth of `material` at `frequency` (Hz) and `temperature` (°C), in
/// meters.
pub fn frequency_to_skin_depth(frequency: f64, temperature: f64, material: &Conductor) -> f64 {
    let rho = material.resistivity_at(temperature);

    (2.0 * rho / (TWO_PI * frequency * material.permeability)).sqrt()
}

/// Frequency (Hz) at which `material` has the given skin depth (m) at
/// `temperature` (°C).
pub fn skin_depth_to_frequency(skin_depth: f64, temperature: f64, material: &Conductor) -> f64 {
    let rho = material.resistivity_at(temperature);

    2.0 * rho / (TWO_PI * skin_depth * skin_depth * material.permeability)
}
