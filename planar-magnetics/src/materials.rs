//! Conductor material properties used for resistance and skin-depth
//! estimation.

use serde::{Deserialize, Serialize};

/// Magnetic constant (vacuum permeability), in H/m.
pub const MU_0: f64 = 1.25663706212e-6;

/// Physical properties of a conductor material.
///
/// Resistivity follows the first-order linear model
/// `ρ(T) = ρ₂₅ · (1 + α · (T − 25 °C))`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Conductor {
    /// Resistivity at [Conductor::REFERENCE_TEMPERATURE], in Ω·m
    pub resistivity: f64,
    /// First-order temperature coefficient of resistance, in 1/K
    pub temperature_coefficient: f64,
    /// Magnetic permeability, in H/m
    pub permeability: f64,
}

impl Conductor {
    /// Reference temperature for [Conductor::resistivity], in °C.
    pub const REFERENCE_TEMPERATURE: f64 = 25.0;

    /// Resistivity at the given `temperature` (°C), in Ω·m.
    pub fn resistivity_at(&self, temperature: f64) -> f64 {
        self.resistivity
            * (1.0 + self.temperature_coefficient * (temperature - Self::REFERENCE_TEMPERATURE))
    }
}

/// Annealed copper, the standard plating of printed circuit boards.
pub const COPPER: Conductor = Conductor {
    resistivity: 1.68e-8,
    temperature_coefficient: 3.93e-3,
    permeability: MU_0 * 0.999994,
};

/// Aluminum, occasionally used for insulated metal substrates.
pub const ALUMINUM: Conductor = Conductor {
    resistivity: 2.65e-8,
    temperature_coefficient: 3.9e-3,
    permeability: MU_0 * 1.000022,
};

#[cfg(test)]
mod test {
    use super::{Conductor, ALUMINUM, COPPER};

    #[test]
    fn resistivity_at_the_reference_temperature_is_nominal() {
        assert_eq!(
            COPPER.resistivity_at(Conductor::REFERENCE_TEMPERATURE),
            COPPER.resistivity
        );
    }

    #[test]
    fn resistivity_rises_with_temperature() {
        let hot = COPPER.resistivity_at(100.0);

        // copper gains roughly 0.4 %/K
        assert!((hot / COPPER.resistivity - 1.2948).abs() < 1e-4);
        assert!(ALUMINUM.resistivity_at(100.0) > ALUMINUM.resistivity);
    }

    #[test]
    fn resistivity_drops_below_the_reference() {
        assert!(COPPER.resistivity_at(-40.0) < COPPER.resistivity);
    }
}
