use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Cathode chemistry of a graphite-anode lithium-ion cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Chemistry {
    /// Nickel manganese cobalt oxide.
    #[serde(alias = "nmc", alias = "Nmc")]
    Nmc,
    /// Lithium iron phosphate.
    #[serde(alias = "lfp", alias = "Lfp")]
    Lfp,
    /// Lithium cobalt oxide.
    #[serde(alias = "lco", alias = "Lco")]
    Lco,
}

impl Chemistry {
    /// All supported chemistries, in display order.
    pub const ALL: [Chemistry; 3] = [Chemistry::Nmc, Chemistry::Lfp, Chemistry::Lco];

    /// Returns the short uppercase label (`"NMC"`, `"LFP"`, `"LCO"`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Chemistry::Nmc => "NMC",
            Chemistry::Lfp => "LFP",
            Chemistry::Lco => "LCO",
        }
    }

    /// Returns the reference parameter profile for this chemistry.
    #[must_use]
    pub fn profile(self) -> &'static ChemistryProfile {
        match self {
            Chemistry::Nmc => &NMC_GRAPHITE,
            Chemistry::Lfp => &LFP_GRAPHITE,
            Chemistry::Lco => &LCO_GRAPHITE,
        }
    }
}

impl fmt::Display for Chemistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Chemistry {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Chemistry::ALL
            .into_iter()
            .find(|chem| chem.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownChemistry(s.to_owned()))
    }
}

/// Open-circuit potential curve of the positive electrode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CathodeKind {
    Nmc811,
    Lfp,
    Lco,
}

impl CathodeKind {
    /// Open-circuit potential (V vs Li) at lithium stoichiometry `y`.
    #[must_use]
    pub fn ocp(self, y: f64) -> f64 {
        match self {
            CathodeKind::Nmc811 => {
                -0.8090 * y + 4.4875 - 0.0428 * (18.5138 * (y - 0.5542)).tanh()
                    - 17.7326 * (15.7890 * (y - 0.3117)).tanh()
                    + 17.5842 * (15.9308 * (y - 0.3120)).tanh()
            }
            CathodeKind::Lfp => {
                let d = 1.0 - y;
                3.4323 - 0.8428 * (-80.2493 * d.powf(1.3198)).exp()
                    - 3.2474e-6 * (20.2645 * d.powf(3.8003)).exp()
                    + 3.2482e-6 * (20.2646 * d.powf(3.7995)).exp()
            }
            CathodeKind::Lco => {
                let y2 = y * y;
                let num = -4.656 + 88.669 * y2 - 401.119 * y2.powi(2) + 342.909 * y2.powi(3)
                    - 462.471 * y2.powi(4)
                    + 433.434 * y2.powi(5);
                let den = -1.0 + 18.933 * y2 - 79.532 * y2.powi(2) + 37.311 * y2.powi(3)
                    - 73.083 * y2.powi(4)
                    + 95.96 * y2.powi(5);
                num / den
            }
        }
    }
}

/// Open-circuit potential (V vs Li) of a graphite negative electrode at
/// lithium stoichiometry `x`.
#[must_use]
pub fn graphite_ocp(x: f64) -> f64 {
    1.9793 * (-39.3631 * x).exp() + 0.2482
        - 0.0909 * (29.8538 * (x - 0.1234)).tanh()
        - 0.04478 * (14.9159 * (x - 0.2769)).tanh()
        - 0.0205 * (30.4444 * (x - 0.6103)).tanh()
}

/// Reference cell parameters for one chemistry.
///
/// Geometry entries are the reference design; a [`ParameterSet`] overrides
/// thickness, radius and active fraction of the negative electrode and the
/// positive electrode thickness. Everything else is fixed per chemistry.
///
/// [`ParameterSet`]: crate::ParameterSet
#[derive(Debug, Clone, PartialEq)]
pub struct ChemistryProfile {
    /// Literature parameter set the profile is based on.
    pub parameter_set: &'static str,
    pub cathode: CathodeKind,
    /// Whether a full DFN solve enables SEI growth and partially reversible
    /// plating. The built-in lumped solver has no side-reaction terms and
    /// ignores it.
    pub side_reactions: bool,

    pub nominal_capacity_ah: f64,
    pub electrode_area_m2: f64,

    pub anode_thickness_m: f64,
    pub cathode_thickness_m: f64,
    pub separator_thickness_m: f64,
    pub anode_particle_radius_m: f64,
    pub cathode_particle_radius_m: f64,
    pub anode_active_fraction: f64,
    pub cathode_active_fraction: f64,

    pub anode_max_concentration: f64,
    pub cathode_max_concentration: f64,
    /// Anode stoichiometry at 0 % and 100 % state of charge.
    pub anode_stoichiometry: [f64; 2],
    /// Cathode stoichiometry at 0 % and 100 % state of charge.
    pub cathode_stoichiometry: [f64; 2],
    /// Lowest cathode stoichiometry the OCP curve is valid for.
    pub cathode_stoichiometry_floor: f64,

    pub anode_diffusivity_m2_s: f64,
    pub anode_rate_constant: f64,
    pub cathode_rate_constant: f64,
    pub kinetic_activation_energy: f64,

    pub electrolyte_concentration: f64,
    pub electrolyte_diffusivity_m2_s: f64,
    pub transference_number: f64,
    /// Lumped electrolyte and separator resistance at 25 °C.
    pub ohmic_resistance_ohm: f64,

    pub cell_mass_kg: f64,
    pub specific_heat_j_kg_k: f64,
    pub cooling_area_m2: f64,
}

impl ChemistryProfile {
    /// Side-reaction submodels a full solve of this profile would enable.
    #[must_use]
    pub fn side_reaction_summary(&self) -> &'static str {
        if self.side_reactions {
            "SEI growth, partially reversible plating"
        } else {
            "none"
        }
    }
}

pub(crate) const NMC_GRAPHITE: ChemistryProfile = ChemistryProfile {
    parameter_set: "Chen2020",
    cathode: CathodeKind::Nmc811,
    side_reactions: false,
    nominal_capacity_ah: 5.0,
    electrode_area_m2: 0.1027,
    anode_thickness_m: 85.2e-6,
    cathode_thickness_m: 75.6e-6,
    separator_thickness_m: 12.0e-6,
    anode_particle_radius_m: 5.86e-6,
    cathode_particle_radius_m: 5.22e-6,
    anode_active_fraction: 0.75,
    cathode_active_fraction: 0.665,
    anode_max_concentration: 33_133.0,
    cathode_max_concentration: 63_104.0,
    anode_stoichiometry: [0.0279, 0.9014],
    cathode_stoichiometry: [0.9084, 0.2661],
    cathode_stoichiometry_floor: 0.05,
    anode_diffusivity_m2_s: 3.3e-14,
    anode_rate_constant: 6.48e-7,
    cathode_rate_constant: 3.42e-6,
    kinetic_activation_energy: 35_000.0,
    electrolyte_concentration: 1000.0,
    electrolyte_diffusivity_m2_s: 1.77e-10,
    transference_number: 0.2594,
    ohmic_resistance_ohm: 0.012,
    cell_mass_kg: 0.068,
    specific_heat_j_kg_k: 1100.0,
    cooling_area_m2: 0.00531,
};

pub(crate) const LFP_GRAPHITE: ChemistryProfile = ChemistryProfile {
    parameter_set: "Ai2020",
    cathode: CathodeKind::Lfp,
    side_reactions: false,
    nominal_capacity_ah: 2.3,
    electrode_area_m2: 0.18,
    anode_thickness_m: 34.0e-6,
    cathode_thickness_m: 80.0e-6,
    separator_thickness_m: 25.0e-6,
    anode_particle_radius_m: 5.0e-6,
    cathode_particle_radius_m: 1.0e-6,
    anode_active_fraction: 0.58,
    cathode_active_fraction: 0.374,
    anode_max_concentration: 30_555.0,
    cathode_max_concentration: 22_806.0,
    anode_stoichiometry: [0.01, 0.81],
    cathode_stoichiometry: [0.95, 0.05],
    cathode_stoichiometry_floor: 0.001,
    anode_diffusivity_m2_s: 3.9e-14,
    anode_rate_constant: 5.0e-7,
    cathode_rate_constant: 1.4e-6,
    kinetic_activation_energy: 30_000.0,
    electrolyte_concentration: 1200.0,
    electrolyte_diffusivity_m2_s: 2.0e-10,
    transference_number: 0.36,
    ohmic_resistance_ohm: 0.015,
    cell_mass_kg: 0.076,
    specific_heat_j_kg_k: 1000.0,
    cooling_area_m2: 0.0068,
};

pub(crate) const LCO_GRAPHITE: ChemistryProfile = ChemistryProfile {
    parameter_set: "OKane2022",
    cathode: CathodeKind::Lco,
    side_reactions: true,
    nominal_capacity_ah: 2.1,
    electrode_area_m2: 0.1,
    anode_thickness_m: 76.5e-6,
    cathode_thickness_m: 68.0e-6,
    separator_thickness_m: 25.0e-6,
    anode_particle_radius_m: 6.0e-6,
    cathode_particle_radius_m: 3.0e-6,
    anode_active_fraction: 0.61,
    cathode_active_fraction: 0.5,
    anode_max_concentration: 28_700.0,
    cathode_max_concentration: 49_943.0,
    anode_stoichiometry: [0.02, 0.85],
    cathode_stoichiometry: [0.98, 0.5],
    cathode_stoichiometry_floor: 0.46,
    anode_diffusivity_m2_s: 3.9e-14,
    anode_rate_constant: 5.0e-7,
    cathode_rate_constant: 2.0e-6,
    kinetic_activation_energy: 37_480.0,
    electrolyte_concentration: 1000.0,
    electrolyte_diffusivity_m2_s: 1.5e-10,
    transference_number: 0.363,
    ohmic_resistance_ohm: 0.02,
    cell_mass_kg: 0.045,
    specific_heat_j_kg_k: 1050.0,
    cooling_area_m2: 0.0042,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_case_insensitively() {
        assert_eq!("NMC".parse::<Chemistry>().unwrap(), Chemistry::Nmc);
        assert_eq!("lfp".parse::<Chemistry>().unwrap(), Chemistry::Lfp);
        assert_eq!(" Lco ".parse::<Chemistry>().unwrap(), Chemistry::Lco);
        assert!(matches!(
            "NCA".parse::<Chemistry>(),
            Err(ConfigError::UnknownChemistry(label)) if label == "NCA"
        ));
    }

    #[test]
    fn profiles_match_dashboard_parameter_sets() {
        assert_eq!(Chemistry::Nmc.profile().parameter_set, "Chen2020");
        assert_eq!(Chemistry::Lfp.profile().parameter_set, "Ai2020");
        assert_eq!(Chemistry::Lco.profile().parameter_set, "OKane2022");
        assert!(Chemistry::Lco.profile().side_reactions);
        assert!(!Chemistry::Nmc.profile().side_reactions);
        assert_eq!(
            Chemistry::Lco.profile().side_reaction_summary(),
            "SEI growth, partially reversible plating"
        );
        assert_eq!(Chemistry::Lfp.profile().side_reaction_summary(), "none");
    }

    #[test]
    fn graphite_potential_falls_with_lithiation() {
        let empty = graphite_ocp(0.03);
        let half = graphite_ocp(0.5);
        let full = graphite_ocp(0.9);

        assert!(empty > half && half > full);
        assert!(full > 0.0 && full < 0.15);
    }

    #[test]
    fn cathode_potentials_are_in_cell_range() {
        for chem in Chemistry::ALL {
            let profile = chem.profile();
            let [discharged, charged] = profile.cathode_stoichiometry;
            let low = profile.cathode.ocp(discharged);
            let high = profile.cathode.ocp(charged);

            assert!(low > 2.5 && low < 4.5, "{chem}: {low}");
            assert!(high > 3.2 && high < 4.5, "{chem}: {high}");
            assert!(high >= low, "{chem}: charging should raise the cathode potential");
        }
    }

    #[test]
    fn chemistry_serde_uses_uppercase_labels() {
        let json = serde_json::to_string(&Chemistry::Lfp).unwrap();
        assert_eq!(json, "\"LFP\"");

        let parsed: Chemistry = serde_json::from_str("\"nmc\"").unwrap();
        assert_eq!(parsed, Chemistry::Nmc);
    }
}
