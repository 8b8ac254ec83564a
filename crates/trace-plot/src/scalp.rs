//! Scalp-map geometry
//!
//! Polar layout of the supported 10-20 electrode positions and the
//! annular sector each one fills on the scalp disc. The layout is a
//! fixed calibration table: 21 electrodes have a defined position and
//! sector; every other electrode identity is valid but unlocated, and
//! both lookups return `None` so callers skip rendering it.
//!
//! Angle convention throughout: a fraction of a full turn in [0, 1),
//! 0 pointing up (toward the nasion), increasing clockwise.

use std::f64::consts::PI;

use trace_core::electrode::{Electrode, Prefix};

/// A canvas extent in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Radius of the largest centered disc that fits the canvas
    pub fn max_radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }

    pub fn center(&self) -> Point {
        Point {
            x: self.width / 2.0,
            y: self.height / 2.0,
        }
    }
}

/// A pixel-space point, y growing downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A polar scalp coordinate
///
/// `radius` is a fraction of the scalp radius (0 = vertex, 1 = rim);
/// `angle` is a fraction of a full turn, 0 = up, clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polar {
    pub radius: f64,
    pub angle: f64,
}

impl Polar {
    pub const fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }

    /// Projects the coordinate onto a canvas centered on the scalp disc
    pub fn to_point(&self, size: Size) -> Point {
        let reach = size.max_radius() * self.radius;
        let turn = 2.0 * PI * self.angle;

        Point {
            x: size.width / 2.0 - reach * turn.sin(),
            y: size.height / 2.0 - reach * turn.cos(),
        }
    }
}

/// Calibration bounds of one electrode's annular sector
///
/// Radii are fractions of the scalp radius, angles are turn fractions.
/// An `end_angle` of 0 closes a wedge that wraps past north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorBounds {
    pub outer_radius: f64,
    pub inner_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl SectorBounds {
    const fn new(outer_radius: f64, inner_radius: f64, start_angle: f64, end_angle: f64) -> Self {
        Self {
            outer_radius,
            inner_radius,
            start_angle,
            end_angle,
        }
    }
}

/// One drawing instruction of a sector outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Circular arc about the canvas center; radius in pixels, angles
    /// as turn fractions in the scalp convention
    Arc {
        radius: f64,
        start_angle: f64,
        end_angle: f64,
        clockwise: bool,
    },
}

/// A filled scalp-map region for one electrode
#[derive(Debug, Clone, PartialEq)]
pub enum SectorShape {
    /// Annular wedge described by its outline
    Wedge(Vec<PathCommand>),
    /// The vertex electrode fills a disc instead of a wedge, since a
    /// wedge degenerates at radius 0
    Circle { center: Point, radius: f64 },
}

/// Radii of the two electrode rings, as fractions of the scalp radius
pub const RING_RADII: [f64; 2] = [2.0 / 7.0, 4.0 / 7.0];

/// Electrode positions on the scalp disc
///
/// Calibration data; values are reproduced from the reference layout
/// and are not derivable from the labelling grammar.
const LOCATIONS: [((Prefix, u8), Polar); 21] = [
    ((Prefix::Prefrontal, 1), Polar::new(4.0 / 7.0, 0.05)),
    ((Prefix::Prefrontal, 2), Polar::new(4.0 / 7.0, 0.95)),
    ((Prefix::Frontal, 0), Polar::new(2.0 / 7.0, 0.0)),
    ((Prefix::Frontal, 3), Polar::new(2.0 / 7.0, 0.875)),
    ((Prefix::Frontal, 4), Polar::new(2.0 / 7.0, 0.125)),
    ((Prefix::Frontal, 7), Polar::new(4.0 / 7.0, 0.85)),
    ((Prefix::Frontal, 8), Polar::new(4.0 / 7.0, 0.15)),
    ((Prefix::Temporal, 3), Polar::new(4.0 / 7.0, 0.75)),
    ((Prefix::Temporal, 4), Polar::new(4.0 / 7.0, 0.25)),
    ((Prefix::Temporal, 5), Polar::new(4.0 / 7.0, 0.65)),
    ((Prefix::Temporal, 6), Polar::new(4.0 / 7.0, 0.35)),
    ((Prefix::Parietal, 0), Polar::new(2.0 / 7.0, 0.5)),
    ((Prefix::Parietal, 3), Polar::new(2.0 / 7.0, 0.625)),
    ((Prefix::Parietal, 4), Polar::new(2.0 / 7.0, 0.375)),
    ((Prefix::Occipital, 1), Polar::new(4.0 / 7.0, 0.45)),
    ((Prefix::Occipital, 2), Polar::new(4.0 / 7.0, 0.55)),
    ((Prefix::Central, 0), Polar::new(0.0, 0.0)),
    ((Prefix::Central, 3), Polar::new(2.0 / 7.0, 0.75)),
    ((Prefix::Central, 4), Polar::new(2.0 / 7.0, 0.25)),
    ((Prefix::Mastoid, 1), Polar::new(6.0 / 7.0, 0.75)),
    ((Prefix::Mastoid, 2), Polar::new(6.0 / 7.0, 0.25)),
];

/// Sector bounds per electrode
///
/// The vertex electrode Cz is absent: it renders as a circle, handled
/// in [`sector`]. Within each ring, adjacent wedges share boundary
/// angles exactly so the ring tiles without gap or overlap.
const SECTORS: [((Prefix, u8), SectorBounds); 20] = [
    ((Prefix::Prefrontal, 1), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.0, 0.1)),
    ((Prefix::Prefrontal, 2), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.9, 0.0)),
    ((Prefix::Frontal, 0), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.9375, 0.0625)),
    ((Prefix::Frontal, 3), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.8125, 0.9375)),
    ((Prefix::Frontal, 4), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.0625, 0.1875)),
    ((Prefix::Frontal, 7), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.8, 0.9)),
    ((Prefix::Frontal, 8), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.1, 0.2)),
    ((Prefix::Temporal, 3), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.7, 0.8)),
    ((Prefix::Temporal, 4), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.2, 0.3)),
    ((Prefix::Temporal, 5), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.6, 0.7)),
    ((Prefix::Temporal, 6), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.3, 0.4)),
    ((Prefix::Parietal, 0), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.4375, 0.5625)),
    ((Prefix::Parietal, 3), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.5625, 0.6875)),
    ((Prefix::Parietal, 4), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.3125, 0.4375)),
    ((Prefix::Occipital, 1), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.4, 0.5)),
    ((Prefix::Occipital, 2), SectorBounds::new(5.0 / 7.0, 3.0 / 7.0, 0.5, 0.6)),
    ((Prefix::Central, 3), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.6875, 0.8125)),
    ((Prefix::Central, 4), SectorBounds::new(3.0 / 7.0, 1.0 / 7.0, 0.1875, 0.3125)),
    ((Prefix::Mastoid, 1), SectorBounds::new(7.0 / 7.0, 5.0 / 7.0, 0.725, 0.775)),
    ((Prefix::Mastoid, 2), SectorBounds::new(7.0 / 7.0, 5.0 / 7.0, 0.225, 0.275)),
];

/// The polar position of an electrode, `None` when unlocated
pub fn location(electrode: Electrode) -> Option<Polar> {
    let key = (electrode.prefix, electrode.suffix);

    LOCATIONS
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, polar)| *polar)
}

/// The sector calibration bounds of an electrode
///
/// `None` both for unlocated electrodes and for the vertex electrode,
/// whose region is a disc rather than a wedge.
pub fn sector_bounds(electrode: Electrode) -> Option<SectorBounds> {
    let key = (electrode.prefix, electrode.suffix);

    SECTORS
        .iter()
        .find(|(entry, _)| *entry == key)
        .map(|(_, bounds)| *bounds)
}

/// The filled scalp-map region for an electrode on a given canvas,
/// `None` when the electrode is unlocated
pub fn sector(electrode: Electrode, size: Size) -> Option<SectorShape> {
    if electrode.prefix == Prefix::Central && electrode.suffix == 0 {
        // Disc of diameter min(w, h) / 7 centered on the vertex
        let diameter = size.width.min(size.height) * (1.0 / 7.0);

        return Some(SectorShape::Circle {
            center: size.center(),
            radius: diameter / 2.0,
        });
    }

    let bounds = sector_bounds(electrode)?;
    let max_radius = size.max_radius();

    let outline = vec![
        PathCommand::MoveTo(Polar::new(bounds.outer_radius, bounds.start_angle).to_point(size)),
        PathCommand::Arc {
            radius: max_radius * bounds.outer_radius,
            start_angle: bounds.start_angle,
            end_angle: bounds.end_angle,
            clockwise: true,
        },
        PathCommand::LineTo(Polar::new(bounds.inner_radius, bounds.end_angle).to_point(size)),
        PathCommand::Arc {
            radius: max_radius * bounds.inner_radius,
            start_angle: bounds.end_angle,
            end_angle: bounds.start_angle,
            clockwise: false,
        },
        PathCommand::LineTo(Polar::new(bounds.outer_radius, bounds.start_angle).to_point(size)),
    ];

    Some(SectorShape::Wedge(outline))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn electrode(symbol: &str) -> Electrode {
        Electrode::parse(symbol).unwrap()
    }

    fn placeable() -> Vec<Electrode> {
        [
            "Fp1", "Fp2", "Fz", "F3", "F4", "F7", "F8", "T3", "T4", "T5", "T6", "Pz", "P3",
            "P4", "O1", "O2", "Cz", "C3", "C4", "A1", "A2",
        ]
        .into_iter()
        .map(electrode)
        .collect()
    }

    #[test]
    fn test_whitelist_has_location_and_sector() {
        let size = Size::new(200.0, 200.0);

        for e in placeable() {
            assert!(location(e).is_some(), "{} should be located", e.symbol());
            assert!(sector(e, size).is_some(), "{} should have a sector", e.symbol());
        }
    }

    #[test]
    fn test_unlocated_electrodes_yield_none() {
        let size = Size::new(200.0, 200.0);

        for symbol in ["Fp3", "F1", "T8", "P7", "O5", "C1", "Az"] {
            let e = electrode(symbol);
            assert!(location(e).is_none(), "{} should be unlocated", symbol);
            assert!(sector(e, size).is_none(), "{} should have no sector", symbol);
            assert!(sector_bounds(e).is_none());
        }
    }

    #[test]
    fn test_cartesian_projection() {
        let size = Size::new(200.0, 100.0);

        // Radius 0 lands on the canvas center regardless of angle
        let center = Polar::new(0.0, 0.3).to_point(size);
        assert!((center.x - 100.0).abs() < EPSILON);
        assert!((center.y - 50.0).abs() < EPSILON);

        // Angle 0 points straight up: x stays centered, y shrinks
        let north = Polar::new(1.0, 0.0).to_point(size);
        assert!((north.x - 100.0).abs() < EPSILON);
        assert!((north.y - 0.0).abs() < EPSILON);

        // A quarter turn clockwise points right... in scalp convention
        // that is negative sin, so x moves left of center
        let east = Polar::new(1.0, 0.25).to_point(size);
        assert!((east.x - 50.0).abs() < EPSILON);
        assert!((east.y - 50.0).abs() < EPSILON);
    }

    #[test]
    fn test_vertex_renders_as_circle() {
        let shape = sector(electrode("Cz"), Size::new(140.0, 280.0)).unwrap();

        match shape {
            SectorShape::Circle { center, radius } => {
                assert!((center.x - 70.0).abs() < EPSILON);
                assert!((center.y - 140.0).abs() < EPSILON);
                // Diameter min(w, h) / 7 = 20
                assert!((radius - 10.0).abs() < EPSILON);
            }
            SectorShape::Wedge(_) => panic!("vertex should be a circle"),
        }
    }

    #[test]
    fn test_wedge_outline_shape() {
        let size = Size::new(200.0, 200.0);
        let bounds = sector_bounds(electrode("O1")).unwrap();

        let SectorShape::Wedge(outline) = sector(electrode("O1"), size).unwrap() else {
            panic!("O1 should be a wedge");
        };

        assert_eq!(outline.len(), 5);

        let PathCommand::MoveTo(start) = outline[0] else {
            panic!("outline should start with a move");
        };
        let expected = Polar::new(bounds.outer_radius, bounds.start_angle).to_point(size);
        assert!((start.x - expected.x).abs() < EPSILON);
        assert!((start.y - expected.y).abs() < EPSILON);

        let PathCommand::Arc {
            radius, clockwise, ..
        } = outline[1]
        else {
            panic!("second command should be the outer arc");
        };
        assert!((radius - size.max_radius() * bounds.outer_radius).abs() < EPSILON);
        assert!(clockwise);

        // Last command closes back onto the starting point
        let PathCommand::LineTo(close) = outline[4] else {
            panic!("outline should close with a line");
        };
        assert!((close.x - start.x).abs() < EPSILON);
        assert!((close.y - start.y).abs() < EPSILON);
    }

    fn ring_tiles(outer_radius: f64, expected_sectors: usize) {
        let mut spans: Vec<(f64, f64)> = placeable()
            .into_iter()
            .filter_map(sector_bounds)
            .filter(|bounds| (bounds.outer_radius - outer_radius).abs() < EPSILON)
            .map(|bounds| {
                // A wrapping wedge ends past a full turn
                let end = if bounds.end_angle <= bounds.start_angle {
                    bounds.end_angle + 1.0
                } else {
                    bounds.end_angle
                };
                (bounds.start_angle, end)
            })
            .collect();

        assert_eq!(spans.len(), expected_sectors);

        spans.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());

        let mut covered = 0.0;
        for (index, (start, end)) in spans.iter().enumerate() {
            covered += end - start;

            let (next_start, _) = spans[(index + 1) % spans.len()];
            let gap = (end - next_start).rem_euclid(1.0);
            assert!(
                gap < EPSILON || (1.0 - gap) < EPSILON,
                "sector ending at {end} does not abut neighbour starting at {next_start}"
            );
        }

        assert!((covered - 1.0).abs() < EPSILON, "ring covers {covered} turns");
    }

    #[test]
    fn test_inner_ring_tiles_without_gaps() {
        ring_tiles(3.0 / 7.0, 8);
    }

    #[test]
    fn test_outer_ring_tiles_without_gaps() {
        ring_tiles(5.0 / 7.0, 10);
    }

    #[test]
    fn test_locations_sit_inside_their_sectors() {
        for e in placeable() {
            let Some(bounds) = sector_bounds(e) else {
                continue; // vertex
            };
            let polar = location(e).unwrap();

            assert!(
                polar.radius > bounds.inner_radius - EPSILON
                    && polar.radius < bounds.outer_radius + EPSILON,
                "{} location radius {} outside sector radii",
                e.symbol(),
                polar.radius
            );

            let end = if bounds.end_angle <= bounds.start_angle {
                bounds.end_angle + 1.0
            } else {
                bounds.end_angle
            };
            let angle = if polar.angle < bounds.start_angle {
                polar.angle + 1.0
            } else {
                polar.angle
            };
            assert!(
                angle >= bounds.start_angle - EPSILON && angle <= end + EPSILON,
                "{} location angle {} outside sector angles",
                e.symbol(),
                polar.angle
            );
        }
    }
}
