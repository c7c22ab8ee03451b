use serde::Serialize;
use uom::si::{
    f64::ThermodynamicTemperature,
    heat_transfer::watt_per_square_meter_kelvin,
    thermodynamic_temperature::{degree_celsius, kelvin},
};
use voltaic_cell::{Chemistry, TimeSeries, Variable};
use voltaic_safety::{Advisory, Overall, RuleVerdict, SafetyReport, Severity};

use crate::Run;

pub const TITLE: &str = "Electrode Geometry & Battery Charging Stability Simulation";
pub const TIME_AXIS_LABEL: &str = "Time [min]";

/// Title, channel, and y-axis label of each panel, row by row.
const PANELS: [(&str, Variable, &str); 8] = [
    ("Voltage Profile", Variable::TerminalVoltage, "Voltage [V]"),
    ("Thermal Response", Variable::CellTemperature, "Temp [K]"),
    ("Electrolyte Conc.", Variable::ElectrolyteConcentration, "Conc [mol/m³]"),
    ("Interfacial Current", Variable::InterfacialCurrentDensity, "Current [A/m²]"),
    ("Anode Potential", Variable::AnodeSurfacePotential, "Potential [V]"),
    ("Cathode Potential", Variable::CathodePotential, "Potential [V]"),
    ("Anode Surf. Conc.", Variable::AnodeSurfaceConcentration, "Conc [mol/m³]"),
    ("Cathode Surf. Conc.", Variable::CathodeSurfaceConcentration, "Conc [mol/m³]"),
];

const PANEL_COLUMNS: usize = 4;

/// Layout data for one run, ready for a display layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub title: &'static str,
    pub chemistry: Chemistry,
    pub parameter_set: &'static str,
    pub solver: String,
    pub metrics: Vec<MetricCard>,
    pub x_label: &'static str,
    /// Shared x axis of every panel.
    pub time_minutes: Vec<f64>,
    pub panels: Vec<Panel>,
    pub safety: SafetyPanel,
}

/// A headline number.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricCard {
    pub label: &'static str,
    /// `None` when the run has no sample to report.
    pub value: Option<f64>,
    pub unit: &'static str,
    pub display: String,
}

impl MetricCard {
    fn new(label: &'static str, value: Option<f64>, unit: &'static str, precision: usize) -> Self {
        let display = match value {
            Some(v) => format!("{v:.precision$} {unit}"),
            None => "n/a".to_owned(),
        };
        Self {
            label,
            value,
            unit,
            display,
        }
    }
}

/// One plot in the 2×4 grid; rows and columns count from one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub title: &'static str,
    pub variable: Variable,
    pub y_label: &'static str,
    pub row: usize,
    pub col: usize,
    /// Empty if the series lacks the channel.
    pub values: Vec<f64>,
}

/// The BMS verdict box.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SafetyPanel {
    pub overall: Overall,
    pub severity: Severity,
    pub headline: &'static str,
    pub reasons: Vec<String>,
    pub rules: Vec<RuleVerdict>,
    pub advisories: Vec<Advisory>,
}

impl SafetyPanel {
    #[must_use]
    pub fn from_report(report: &SafetyReport) -> Self {
        let overall = report.overall();
        Self {
            overall,
            severity: report.verdict.severity(),
            headline: headline(overall),
            reasons: report.reasons(),
            rules: report.verdict.rules().copied().collect(),
            advisories: report.advisories.clone(),
        }
    }
}

fn headline(overall: Overall) -> &'static str {
    match overall {
        Overall::Safe => "SAFE TO CHARGE: Parameters are within safe operation boundaries.",
        Overall::Unsafe => "CHARGING UNSAFE: The BMS detected safety violations:",
        Overall::Indeterminate => "SAFETY UNKNOWN: The run produced no samples to assess.",
    }
}

impl Dashboard {
    #[must_use]
    pub fn build(run: &Run) -> Self {
        let params = run.params();
        let series = run.series();

        let last = |variable| series.last(variable).map(|sample| sample.value);
        let max_temperature_c = series.channel(Variable::CellTemperature).and_then(|values| {
            values
                .iter()
                .copied()
                .reduce(f64::max)
                .map(|k| ThermodynamicTemperature::new::<kelvin>(k).get::<degree_celsius>())
        });

        let metrics = vec![
            MetricCard::new("Terminal Voltage", last(Variable::TerminalVoltage), "V", 2),
            MetricCard::new("Max Cell Temp", max_temperature_c, "°C", 1),
            MetricCard::new("Anode Potential", last(Variable::AnodeSurfacePotential), "V", 4),
            MetricCard::new(
                "Ambient Temp",
                Some(params.ambient_temperature().get::<degree_celsius>()),
                "°C",
                1,
            ),
            MetricCard::new(
                "Cooling Coeff.",
                Some(
                    params
                        .cooling_coefficient()
                        .get::<watt_per_square_meter_kelvin>(),
                ),
                "W/m²K",
                1,
            ),
        ];

        Self {
            title: TITLE,
            chemistry: params.chemistry(),
            parameter_set: params.chemistry().profile().parameter_set,
            solver: run.solver().to_owned(),
            metrics,
            x_label: TIME_AXIS_LABEL,
            time_minutes: series.time_minutes(),
            panels: panels(series),
            safety: SafetyPanel::from_report(run.report()),
        }
    }

    #[must_use]
    pub fn metric(&self, label: &str) -> Option<&MetricCard> {
        self.metrics.iter().find(|card| card.label == label)
    }

    #[must_use]
    pub fn panel(&self, variable: Variable) -> Option<&Panel> {
        self.panels.iter().find(|panel| panel.variable == variable)
    }

    /// Serializes the layout for a display layer.
    ///
    /// # Errors
    ///
    /// Fails only if serialization itself fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn panels(series: &TimeSeries) -> Vec<Panel> {
    PANELS
        .iter()
        .enumerate()
        .map(|(i, &(title, variable, y_label))| Panel {
            title,
            variable,
            y_label,
            row: i / PANEL_COLUMNS + 1,
            col: i % PANEL_COLUMNS + 1,
            values: series.channel(variable).map(<[f64]>::to_vec).unwrap_or_default(),
        })
        .collect()
}
