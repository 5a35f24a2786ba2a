use std::f64::consts::PI;

use crate::orrery::{BodySpec, OrbitalElements};

// Sizes are exaggerated relative to distances, otherwise nothing but the
// sun would be visible. Distances are in AU, periods in days, angles in
// degrees.

pub const DAYS_PER_SECOND: f64 = 5.0;

pub const SUN_RADIUS: f32 = 0.25;
pub const SUN_SIDEREAL_PERIOD: f64 = 25.38;
pub const SUN_EMISSION: [f32; 4] = [3.0, 3.0, 0.0, 0.7];
pub const SUN_TEXTURE: &str = "sun.bmp";

pub const SKY_RADIUS: f32 = 50.0;
pub const SKY_TEXTURE: &str = "starmap.bmp";

/// Inclination of the ecliptic against the sun's equator
pub const ECLIPTIC_INCLINATION: f32 = 7.25;

pub const EARTH_RADIUS: f32 = 0.05;
pub const SIDEREAL_YEAR: f64 = 365.256;
pub const EARTH_AXIS_INCLINATION: f64 = 23.44;

pub const MOON_RADIUS: f32 = EARTH_RADIUS * 0.27;
pub const MOON_ORBIT_RADIUS: f64 = 0.2;
pub const MOON_INCLINATION: f64 = 5.14;
pub const SIDEREAL_MONTH: f64 = 27.322;

pub const MOON: BodySpec = BodySpec {
    name: "Moon",
    radius: MOON_RADIUS,
    elements: OrbitalElements {
        semimajor_axis: MOON_ORBIT_RADIUS,
        eccentricity: 0.0549,
        inclination: MOON_INCLINATION,
        ascending_node: 125.08,
        arg_periapsis: 318.15,
        sidereal_year: SIDEREAL_MONTH,
        sidereal_day: SIDEREAL_MONTH,
        axial_tilt: 6.68,
    },
    texture_file: Some("moon.bmp"),
    phi: 0.0,
    moons: &[],
};

pub const EARTH: BodySpec = BodySpec {
    name: "Earth",
    radius: EARTH_RADIUS,
    elements: OrbitalElements {
        semimajor_axis: 1.0,
        eccentricity: 0.016,
        inclination: 0.0,
        ascending_node: -11.26,
        arg_periapsis: 114.21,
        sidereal_year: SIDEREAL_YEAR,
        sidereal_day: 1.0,
        axial_tilt: EARTH_AXIS_INCLINATION,
    },
    texture_file: Some("earth.bmp"),
    phi: -PI,
    moons: &[MOON],
};

pub const MERCURY: BodySpec = BodySpec {
    name: "Mercury",
    radius: EARTH_RADIUS * 0.38,
    elements: OrbitalElements {
        semimajor_axis: 0.39,
        eccentricity: 0.2,
        inclination: 7.0,
        ascending_node: 48.33,
        arg_periapsis: 29.12,
        sidereal_year: 87.9,
        sidereal_day: 58.6,
        axial_tilt: 0.03,
    },
    texture_file: Some("mercury.bmp"),
    phi: -PI,
    moons: &[],
};

// Retrograde spin is encoded in the sign of the day, not in a flipped axis
pub const VENUS: BodySpec = BodySpec {
    name: "Venus",
    radius: EARTH_RADIUS * 0.93,
    elements: OrbitalElements {
        semimajor_axis: 0.7,
        eccentricity: 0.006,
        inclination: 3.39,
        ascending_node: 76.68,
        arg_periapsis: 54.88,
        sidereal_year: 224.7,
        sidereal_day: -243.0,
        axial_tilt: 2.64,
    },
    texture_file: Some("venus.bmp"),
    phi: -PI,
    moons: &[],
};

pub const MARS: BodySpec = BodySpec {
    name: "Mars",
    radius: EARTH_RADIUS * 0.53,
    elements: OrbitalElements {
        semimajor_axis: 1.52,
        eccentricity: 0.09,
        inclination: 1.85,
        ascending_node: 49.56,
        arg_periapsis: 286.5,
        sidereal_year: 686.9,
        sidereal_day: 1.02,
        axial_tilt: 25.19,
    },
    texture_file: Some("mars.bmp"),
    phi: -PI,
    moons: &[],
};

/// Bodies orbiting the sun directly, in look-at order.
pub const PLANETS: &[BodySpec] = &[EARTH, MERCURY, VENUS, MARS];
