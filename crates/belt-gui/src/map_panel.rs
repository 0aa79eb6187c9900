//! Bubble map of workshops sized by NRC VIN count within the radius

use belt_app::presentation::{bubble_radius_m, MapViewport};
use belt_domain::model::Coordinate;
use belt_domain::CoverageSession;
use belt_infra::csv_export::format_count;
use eframe::egui::{self, Color32, Pos2, Sense, Stroke, Ui};

const PADDING_PX: f64 = 40.0;
const VEHICLE_DOT_PX: f32 = 2.5;
const CRIMSON: Color32 = Color32::from_rgb(220, 20, 60);

pub struct MapPanel {
    viewport: Option<MapViewport>,
    /// Dataset generation the viewport was fitted to
    fitted_generation: u64,
    fitted_with_points: bool,
}

impl MapPanel {
    pub fn new() -> Self {
        Self {
            viewport: None,
            fitted_generation: 0,
            fitted_with_points: false,
        }
    }

    pub fn ui(
        &mut self,
        ui: &mut Ui,
        session: &CoverageSession,
        generation: u64,
        show_vehicle_points: bool,
        selected_workshop: &mut Option<String>,
    ) {
        ui.horizontal(|ui| {
            if ui.button("Fit").clicked() {
                self.viewport = None;
            }
            ui.label(
                egui::RichText::new("Drag to pan, scroll to zoom, click a bubble to select")
                    .color(Color32::GRAY)
                    .small(),
            );
        });

        let (response, painter) =
            ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;
        painter.rect_filled(rect, 0.0, Color32::from_gray(24));

        let workshops = session.dataset().workshops();
        if workshops.is_empty() {
            return;
        }

        let (width, height) = (rect.width() as f64, rect.height() as f64);
        if self.viewport.is_none()
            || self.fitted_generation != generation
            || self.fitted_with_points != show_vehicle_points
        {
            let anchors: Vec<Coordinate> = workshops.iter().map(|w| w.position).collect();
            let extra: Vec<Coordinate> = if show_vehicle_points {
                session.dataset().vehicles().iter().map(|v| v.position).collect()
            } else {
                Vec::new()
            };
            self.viewport = Some(MapViewport::fit(&anchors, &extra, width, height, PADDING_PX));
            self.fitted_generation = generation;
            self.fitted_with_points = show_vehicle_points;
        }
        let Some(viewport) = self.viewport.as_mut() else {
            return;
        };
        viewport.resize(width, height);

        if response.dragged() {
            let delta = response.drag_delta();
            viewport.pan(delta.x as f64, delta.y as f64);
        }
        if response.hovered() {
            let scroll = ui.input(|i| i.smooth_scroll_delta.y);
            if scroll != 0.0 {
                viewport.zoom((scroll as f64 / 200.0).exp());
            }
        }

        let viewport = *viewport;
        let to_pos = |c: &Coordinate| {
            let (x, y) = viewport.to_screen(c);
            Pos2::new(rect.left() + x as f32, rect.top() + y as f32)
        };

        let hover = response.hover_pos();
        let mut hover_text = None;

        if show_vehicle_points {
            for vehicle in session.dataset().vehicles() {
                let pos = to_pos(&vehicle.position);
                if !rect.contains(pos) {
                    continue;
                }
                painter.circle_filled(pos, VEHICLE_DOT_PX, Color32::from_rgb(70, 130, 180));
                if hover.is_some_and(|p| p.distance(pos) <= VEHICLE_DOT_PX + 2.0) {
                    hover_text = Some(format!(
                        "VIN: {}\nPincode: {}\nNRC VIN count: {}",
                        vehicle.vin,
                        vehicle.pincode.as_deref().unwrap_or("-"),
                        format_count(vehicle.nrc_vin_count),
                    ));
                }
            }
        }

        let report = session.report();
        let max_total = report.max_nrc_total();
        let radius_m = report.radius.km() * 1000.0;
        let mut hovered = None;

        for result in report.iter() {
            let ws = &result.workshop;
            let center = to_pos(&ws.position);
            let selected = selected_workshop.as_deref() == Some(ws.name.as_str());

            let ring = viewport.meters_to_pixels(radius_m, &ws.position) as f32;
            painter.circle_stroke(
                center,
                ring,
                Stroke::new(if selected { 2.0 } else { 1.0 }, Color32::from_gray(150)),
            );

            let bubble =
                viewport.meters_to_pixels(bubble_radius_m(result.nrc_vin_total, max_total), &ws.position) as f32;
            let bubble = bubble.max(3.0);
            painter.circle(
                center,
                bubble,
                CRIMSON.gamma_multiply(0.6),
                Stroke::new(if selected { 2.5 } else { 1.0 }, CRIMSON),
            );
            painter.circle_filled(center, 2.5, Color32::WHITE);

            if let Some(p) = hover {
                if p.distance(center) <= bubble {
                    hovered = Some(result);
                }
            }
        }

        // Bubbles sit above vehicle points
        if let Some(result) = hovered {
            hover_text = Some(format!(
                "Workshop: {}\nVINs within {}: {}\nNRC VIN count: {}",
                result.workshop.name,
                report.radius,
                result.count,
                format_count(result.nrc_vin_total),
            ));
        }

        let label_pos = Pos2::new(rect.right() - 8.0, rect.bottom() - 8.0);
        let radius_label = format!("Radius {}", report.radius);

        if response.clicked() {
            *selected_workshop = hovered.map(|r| r.workshop.name.clone());
        }
        if let Some(text) = hover_text {
            response.on_hover_text_at_pointer(text);
        }

        painter.text(
            label_pos,
            egui::Align2::RIGHT_BOTTOM,
            radius_label,
            egui::FontId::proportional(13.0),
            Color32::LIGHT_GRAY,
        );
    }
}
