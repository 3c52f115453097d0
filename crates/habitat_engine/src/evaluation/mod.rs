//! # Habitability Evaluation
//!
//! Scores the current habitat design against the crew it has to house.
//!
//! The score is a weighted sum of three ratios, each capped at 1:
//!
//! | Sub-score    | Ratio                                        | Weight |
//! |--------------|----------------------------------------------|--------|
//! | volume       | total volume / (crew × 50 m³)                | 0.4    |
//! | capacity     | total crew berths / crew                     | 0.4    |
//! | connectivity | connections / max(1, modules − 1)            | 0.2    |
//!
//! Evaluation never touches the scene; it is a pure function of the store
//! and the habitat context.

use std::fmt;

use crate::catalog::HabitatContext;
use crate::scene::SceneStore;

/// Volume each crew member needs, in cubic meters
pub const VOLUME_PER_CREW: f64 = 50.0;

/// Weight of the volume sub-score
pub const VOLUME_WEIGHT: f64 = 0.4;
/// Weight of the capacity sub-score
pub const CAPACITY_WEIGHT: f64 = 0.4;
/// Weight of the connectivity sub-score
pub const CONNECTIVITY_WEIGHT: f64 = 0.2;

/// Qualitative band of a final score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HabitabilityBand {
    /// 80 and above
    Excellent,
    /// 60 up to 80
    Acceptable,
    /// Below 60
    Critical,
}

impl HabitabilityBand {
    /// Band for a final score on the 0..100 scale
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Acceptable
        } else {
            Self::Critical
        }
    }

    /// Display label
    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Acceptable => "Acceptable",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for HabitabilityBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Scores and the totals they were computed from
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreBreakdown {
    /// Volume ratio, 0..1
    pub volume_score: f64,
    /// Capacity ratio, 0..1
    pub capacity_score: f64,
    /// Connectivity ratio, 0..1
    pub connectivity_score: f64,
    /// Weighted total, 0..100
    pub final_score: f64,
    /// Band of the final score
    pub band: HabitabilityBand,
    /// Sum of module volumes
    pub total_volume: u32,
    /// Sum of crew berths
    pub total_capacity: u32,
    /// Number of modules evaluated
    pub module_count: usize,
    /// Number of connections evaluated
    pub connection_count: usize,
    /// Crew size used for the ratios
    pub crew_count: u32,
    /// Habitat display name
    pub habitat_name: &'static str,
}

impl ScoreBreakdown {
    /// Volume sub-score as a percentage
    pub fn volume_percent(&self) -> f64 {
        self.volume_score * 100.0
    }

    /// Capacity sub-score as a percentage
    pub fn capacity_percent(&self) -> f64 {
        self.capacity_score * 100.0
    }

    /// Connectivity sub-score as a percentage
    pub fn connectivity_percent(&self) -> f64 {
        self.connectivity_score * 100.0
    }
}

/// Result of evaluating a habitat
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationReport {
    /// The habitat has no modules yet
    NoModules,
    /// Scored habitat
    Scored(ScoreBreakdown),
}

impl EvaluationReport {
    /// Breakdown, if the habitat was scored
    pub fn breakdown(&self) -> Option<&ScoreBreakdown> {
        match self {
            Self::NoModules => None,
            Self::Scored(breakdown) => Some(breakdown),
        }
    }

    /// Final score, if any
    pub fn final_score(&self) -> Option<f64> {
        self.breakdown().map(|b| b.final_score)
    }

    /// Band, if any
    pub fn band(&self) -> Option<HabitabilityBand> {
        self.breakdown().map(|b| b.band)
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoModules => write!(f, "No modules to evaluate"),
            Self::Scored(b) => {
                writeln!(f, "Habitability: {:.1} ({})", b.final_score, b.band)?;
                writeln!(f, "  Habitat: {} / crew {}", b.habitat_name, b.crew_count)?;
                writeln!(f, "  Volume: {:.1}% ({} m³)", b.volume_percent(), b.total_volume)?;
                writeln!(f, "  Capacity: {:.1}% ({} berths)", b.capacity_percent(), b.total_capacity)?;
                write!(
                    f,
                    "  Connectivity: {:.1}% ({} links / {} modules)",
                    b.connectivity_percent(),
                    b.connection_count,
                    b.module_count
                )
            }
        }
    }
}

/// Evaluate the habitat held by `store`
pub fn evaluate(store: &SceneStore, context: &HabitatContext) -> EvaluationReport {
    let summary = store.summary();
    if summary.module_count == 0 {
        return EvaluationReport::NoModules;
    }

    let crew = f64::from(context.crew_count().max(1));
    let volume_score = (f64::from(summary.total_volume) / (crew * VOLUME_PER_CREW)).min(1.0);
    let capacity_score = (f64::from(summary.total_capacity) / crew).min(1.0);
    let links_needed = summary.module_count.saturating_sub(1).max(1);
    let connectivity_score = (summary.total_connections as f64 / links_needed as f64).min(1.0);

    let final_score = (VOLUME_WEIGHT * volume_score
        + CAPACITY_WEIGHT * capacity_score
        + CONNECTIVITY_WEIGHT * connectivity_score)
        * 100.0;

    EvaluationReport::Scored(ScoreBreakdown {
        volume_score,
        capacity_score,
        connectivity_score,
        final_score,
        band: HabitabilityBand::from_score(final_score),
        total_volume: summary.total_volume,
        total_capacity: summary.total_capacity,
        module_count: summary.module_count,
        connection_count: summary.total_connections,
        crew_count: context.crew_count(),
        habitat_name: context.habitat().spec().name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Habitat, ModuleCatalog, ModuleType};
    use crate::docking::{ConnectionManager, PortRef};
    use crate::geometry::MeshData;
    use crate::render::MeshHandle;
    use crate::scene::{ModuleGeometry, ModuleId, PortGeometry};
    use crate::foundation::math::Vec3;
    use approx::assert_relative_eq;

    fn add(store: &mut SceneStore, module_type: ModuleType) -> ModuleId {
        let spec = ModuleCatalog::default().spec(module_type).unwrap().clone();
        let ports = (0..spec.docking_ports)
            .map(|i| PortGeometry { local_position: Vec3::zeros(), mesh: MeshHandle(i as u64) })
            .collect();
        store.add_module(&spec, ModuleGeometry { mesh: MeshData::default(), mesh_handle: MeshHandle(0), ports })
    }

    #[test]
    fn test_empty_store_reports_no_modules() {
        let report = evaluate(&SceneStore::default(), &HabitatContext::default());
        assert_eq!(report, EvaluationReport::NoModules);
        assert_eq!(report.final_score(), None);
    }

    #[test]
    fn test_single_halo_for_four_crew_is_critical() {
        let mut store = SceneStore::default();
        add(&mut store, ModuleType::Halo);

        let report = evaluate(&store, &HabitatContext::new(Habitat::Leo, 4));
        let b = report.breakdown().unwrap();
        assert_relative_eq!(b.volume_score, 0.25);
        assert_relative_eq!(b.capacity_score, 1.0);
        assert_relative_eq!(b.connectivity_score, 0.0);
        assert_relative_eq!(b.final_score, 50.0, epsilon = 1e-9);
        assert_eq!(b.band, HabitabilityBand::Critical);
        assert_eq!(b.habitat_name, "LEO");
    }

    #[test]
    fn test_connected_design_scores_higher() {
        let mut store = SceneStore::default();
        let manager = ConnectionManager::new();
        let a = add(&mut store, ModuleType::Halo);
        let b = add(&mut store, ModuleType::Halo);
        let c = add(&mut store, ModuleType::Eclss);
        manager.connect(&mut store, PortRef::new(a, 0), PortRef::new(b, 0)).unwrap();
        manager.connect(&mut store, PortRef::new(b, 1), PortRef::new(c, 0)).unwrap();

        let report = evaluate(&store, &HabitatContext::new(Habitat::Mars, 2));
        let breakdown = report.breakdown().unwrap();
        // 130 m³ for two crew caps at 1, 8 berths caps at 1, 2 of 2 links
        assert_relative_eq!(breakdown.final_score, 100.0, epsilon = 1e-9);
        assert_eq!(report.band(), Some(HabitabilityBand::Excellent));
        assert_eq!(breakdown.habitat_name, "Mars");
    }

    #[test]
    fn test_unconnected_single_module_divides_by_one() {
        let mut store = SceneStore::default();
        add(&mut store, ModuleType::Power);
        let report = evaluate(&store, &HabitatContext::new(Habitat::Luna, 1));
        let b = report.breakdown().unwrap();
        assert_relative_eq!(b.connectivity_score, 0.0);
        assert_relative_eq!(b.volume_score, 0.4);
        assert_relative_eq!(b.final_score, 16.0, epsilon = 1e-9);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(HabitabilityBand::from_score(80.0), HabitabilityBand::Excellent);
        assert_eq!(HabitabilityBand::from_score(79.999), HabitabilityBand::Acceptable);
        assert_eq!(HabitabilityBand::from_score(60.0), HabitabilityBand::Acceptable);
        assert_eq!(HabitabilityBand::from_score(59.9), HabitabilityBand::Critical);
        assert_eq!(HabitabilityBand::from_score(0.0).label(), "Critical");
    }

    #[test]
    fn test_report_display_mentions_band() {
        let mut store = SceneStore::default();
        add(&mut store, ModuleType::Halo);
        let text = evaluate(&store, &HabitatContext::default()).to_string();
        assert!(text.contains("50.0"));
        assert!(text.contains("Critical"));
        assert!(text.contains("Volume: 25.0%"));
        assert!(text.contains("Capacity: 100.0%"));
        assert!(text.contains("Connectivity: 0.0%"));
        assert_eq!(EvaluationReport::NoModules.to_string(), "No modules to evaluate");
    }
}
