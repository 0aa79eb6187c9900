//! Bubble map geometry
//!
//! Web Mercator projection into a screen rectangle, plus bubble sizing.
//! Screen coordinates have their origin at the top-left corner, y down.

use std::f64::consts::PI;

use belt_domain::model::Coordinate;
use belt_domain::service::EARTH_RADIUS_KM;

/// Smallest bubble, in meters on the ground
pub const BUBBLE_BASE_M: f64 = 200.0;
/// Extra meters for the largest value
pub const BUBBLE_SPAN_M: f64 = 8000.0;

/// Web Mercator is undefined at the poles
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;
/// Narrowest span the viewport will zoom to (projected units, about 60 km)
const MIN_SPAN: f64 = 0.01;

/// Bubble radius in meters: square-root scaled against the largest value
pub fn bubble_radius_m(value: f64, max_value: f64) -> f64 {
    if max_value <= 0.0 || value <= 0.0 {
        return BUBBLE_BASE_M;
    }
    BUBBLE_BASE_M + BUBBLE_SPAN_M * (value / max_value).min(1.0).sqrt()
}

/// Mean of the given positions
pub fn map_center(points: &[Coordinate]) -> Option<Coordinate> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let lat = points.iter().map(Coordinate::latitude).sum::<f64>() / n;
    let lon = points.iter().map(Coordinate::longitude).sum::<f64>() / n;
    Coordinate::new(lat, lon).ok()
}

fn project(c: &Coordinate) -> (f64, f64) {
    let lat = c.latitude().clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
    let x = c.longitude().to_radians();
    let y = (PI / 4.0 + lat / 2.0).tan().ln();
    (x, y)
}

/// Maps coordinates onto a `width` x `height` screen area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapViewport {
    center: (f64, f64),
    /// Pixels per projected unit
    scale: f64,
    width: f64,
    height: f64,
}

impl MapViewport {
    /// Viewport centered on the mean of `anchors`, zoomed so every anchor and
    /// every extra point stays at least `padding` pixels inside the edges
    pub fn fit(
        anchors: &[Coordinate],
        extra: &[Coordinate],
        width: f64,
        height: f64,
        padding: f64,
    ) -> Self {
        let center = map_center(anchors).map(|c| project(&c)).unwrap_or((0.0, 0.0));
        let (half_x, half_y) = anchors.iter().chain(extra).map(project).fold(
            (MIN_SPAN / 2.0, MIN_SPAN / 2.0),
            |(hx, hy), (x, y)| (hx.max((x - center.0).abs()), hy.max((y - center.1).abs())),
        );

        let usable_w = (width - 2.0 * padding).max(1.0);
        let usable_h = (height - 2.0 * padding).max(1.0);
        let scale = (usable_w / (2.0 * half_x)).min(usable_h / (2.0 * half_y));

        Self {
            center,
            scale,
            width,
            height,
        }
    }

    /// Screen position of a coordinate
    pub fn to_screen(&self, c: &Coordinate) -> (f64, f64) {
        let (x, y) = project(c);
        (
            self.width / 2.0 + (x - self.center.0) * self.scale,
            self.height / 2.0 - (y - self.center.1) * self.scale,
        )
    }

    /// Ground distance at latitude `at` expressed in screen pixels
    pub fn meters_to_pixels(&self, meters: f64, at: &Coordinate) -> f64 {
        let lat = at.latitude().clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
        let earth_radius_m = EARTH_RADIUS_KM * 1000.0;
        meters / (earth_radius_m * lat.cos()) * self.scale
    }

    /// Zoom around the screen center; factor > 1 zooms in
    pub fn zoom(&mut self, factor: f64) {
        if factor.is_finite() && factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Move the view by a screen-space drag delta
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.center.0 -= dx / self.scale;
        self.center.1 += dy / self.scale;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}
