//! Coordinate datum conversions: BD-09 → GCJ-02 → WGS-84.
//!
//! The geocoding service answers in BD-09; resolved points are stored in
//! both BD-09 and WGS-84. The chain is the standard closed-form
//! approximation over the Krasovsky 1940 ellipsoid. Points outside
//! mainland China pass through unchanged.

use serde::{Deserialize, Serialize};

/// A longitude/latitude pair. The datum is contextual: `resolved_points`
/// holds WGS-84, `resolved_points_native` BD-09.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub longitude: f64,
    pub latitude: f64,
}

const X_PI: f64 = std::f64::consts::PI * 3000.0 / 180.0;
/// Krasovsky 1940 semi-major axis.
const A: f64 = 6_378_245.0;
/// First eccentricity squared.
const EE: f64 = 0.006_693_421_622_965_943;

/// BD-09 → GCJ-02.
pub fn bd09_to_gcj02(p: GeoPoint) -> GeoPoint {
    if out_of_china(p) {
        return p;
    }
    let x = p.longitude - 0.0065;
    let y = p.latitude - 0.006;
    let z = (x * x + y * y).sqrt() - 0.00002 * (y * X_PI).sin();
    let theta = y.atan2(x) - 0.000003 * (x * X_PI).cos();
    GeoPoint {
        longitude: z * theta.cos(),
        latitude: z * theta.sin(),
    }
}

/// GCJ-02 → WGS-84 (closed-form approximation, no iteration).
pub fn gcj02_to_wgs84(p: GeoPoint) -> GeoPoint {
    if out_of_china(p) {
        return p;
    }
    let dlat = transform_lat(p.longitude - 105.0, p.latitude - 35.0);
    let dlng = transform_lng(p.longitude - 105.0, p.latitude - 35.0);

    let rad_lat = p.latitude / 180.0 * std::f64::consts::PI;
    let magic = 1.0 - EE * rad_lat.sin() * rad_lat.sin();
    let sqrt_magic = magic.sqrt();

    let dlat = (dlat * 180.0)
        / ((A * (1.0 - EE)) / (magic * sqrt_magic) * std::f64::consts::PI);
    let dlng = (dlng * 180.0) / (A / sqrt_magic * rad_lat.cos() * std::f64::consts::PI);

    GeoPoint {
        longitude: p.longitude - dlng,
        latitude: p.latitude - dlat,
    }
}

/// Full chain: BD-09 → WGS-84.
pub fn bd09_to_wgs84(p: GeoPoint) -> GeoPoint {
    gcj02_to_wgs84(bd09_to_gcj02(p))
}

fn out_of_china(p: GeoPoint) -> bool {
    !(72.004..=137.8347).contains(&p.longitude) || !(0.8293..=55.8271).contains(&p.latitude)
}

fn transform_lat(x: f64, y: f64) -> f64 {
    let pi = std::f64::consts::PI;
    let mut ret = -100.0
        + 2.0 * x
        + 3.0 * y
        + 0.2 * y * y
        + 0.1 * x * y
        + 0.2 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * pi).sin() + 20.0 * (2.0 * x * pi).sin()) * 2.0 / 3.0;
    ret += (20.0 * (y * pi).sin() + 40.0 * (y / 3.0 * pi).sin()) * 2.0 / 3.0;
    ret += (160.0 * (y / 12.0 * pi).sin() + 320.0 * (y * pi / 30.0).sin()) * 2.0 / 3.0;
    ret
}

fn transform_lng(x: f64, y: f64) -> f64 {
    let pi = std::f64::consts::PI;
    let mut ret =
        300.0 + x + 2.0 * y + 0.1 * x * x + 0.1 * x * y + 0.1 * x.abs().sqrt();
    ret += (20.0 * (6.0 * x * pi).sin() + 20.0 * (2.0 * x * pi).sin()) * 2.0 / 3.0;
    ret += (20.0 * (x * pi).sin() + 40.0 * (x / 3.0 * pi).sin()) * 2.0 / 3.0;
    ret += (150.0 * (x / 12.0 * pi).sin() + 300.0 * (x / 30.0 * pi).sin()) * 2.0 / 3.0;
    ret
}
