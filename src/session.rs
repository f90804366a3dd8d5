//! Interactive segmentation session.
//!
//! A [`Session`] owns the scoring field and the live seeds, and keeps the
//! derived state (tessellation, edge field, score) in sync with them. Every
//! mutation goes through an explicit call (`move_selected`,
//! `set_edge_gradient_width`, `refine`, or [`Session::apply`]) which
//! recomputes the derived state from scratch. Nothing is patched
//! incrementally.
//!
//! The display composite mirrors the classic three-channel overlay:
//! red = scoring field, green = edge field plus seed markers, blue = black,
//! with a white ring around the selected seed.
use crate::diagnostics::{RecomputeReport, RefinementReport, SessionReport, TimingBreakdown};
use crate::edges::{EdgeField, EdgeFieldGenerator};
use crate::error::RefineError;
use crate::image::{GrayImageU8, ImageView, RgbImageU8};
use crate::refine::{Minimizer, RefineOptions, Refiner};
use crate::score::{score, ScoringField};
use crate::seeds::SeedSet;
use crate::types::Point;
use crate::voronoi::{build_tessellation, Tessellation};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Radius (px) of the filled seed markers drawn into the green channel.
pub const SEED_MARKER_RADIUS: i64 = 5;
/// Radius (px) of the ring drawn around the selected seed.
pub const SELECTION_RING_RADIUS: i64 = 20;

/// Tunables of an interactive session.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionParams {
    /// Half-size of the square used to thicken boundaries.
    pub edge_gradient_width: usize,
    /// Upper limit accepted by [`Session::set_edge_gradient_width`].
    pub max_edge_gradient_width: usize,
    /// Translation (px) applied by one keyboard move.
    pub move_step: f32,
}

impl Default for SessionParams {
    fn default() -> Self {
        Self {
            edge_gradient_width: 10,
            max_edge_gradient_width: 50,
            move_step: 2.0,
        }
    }
}

/// One user action.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Command {
    /// Cycle the selection to the next seed.
    SelectNext,
    /// Translate the selected seed.
    Move { dx: f32, dy: f32 },
    SetEdgeGradientWidth(usize),
    /// Run one refinement over all seeds.
    Refine,
    Quit,
}

impl Command {
    /// Keyboard binding: `Tab` selects the next seed, `w`/`a`/`s`/`d` move the
    /// selection by `step` pixels, `r` refines and `q` quits.
    pub fn from_key(key: char, step: f32) -> Option<Self> {
        match key {
            '\t' => Some(Command::SelectNext),
            'w' => Some(Command::Move { dx: 0.0, dy: -step }),
            's' => Some(Command::Move { dx: 0.0, dy: step }),
            'a' => Some(Command::Move { dx: -step, dy: 0.0 }),
            'd' => Some(Command::Move { dx: step, dy: 0.0 }),
            'r' => Some(Command::Refine),
            'q' => Some(Command::Quit),
            _ => None,
        }
    }
}

struct Derived {
    tessellation: Tessellation,
    edge_field: EdgeField,
    report: RecomputeReport,
}

pub struct Session {
    scoring: ScoringField,
    seeds: SeedSet,
    initial_seeds: Vec<Point>,
    params: SessionParams,
    refiner: Refiner,
    generator: EdgeFieldGenerator,
    derived: Derived,
    refinements: Vec<RefinementReport>,
    commands_applied: usize,
}

impl Session {
    /// Start a session; seeds are clamped into the scoring field's bounds and
    /// the derived state is computed once.
    pub fn new(scoring: ScoringField, seeds: Vec<Point>, params: SessionParams) -> Self {
        let mut params = params;
        params.edge_gradient_width = params
            .edge_gradient_width
            .min(params.max_edge_gradient_width);

        let seeds = SeedSet::new(seeds, scoring.bounds());
        let initial_seeds = seeds.points().to_vec();
        let mut generator = EdgeFieldGenerator::new();
        let derived = derive(
            &scoring,
            &seeds,
            params.edge_gradient_width,
            &mut generator,
        );

        Self {
            scoring,
            seeds,
            initial_seeds,
            params,
            refiner: Refiner::default(),
            generator,
            derived,
            refinements: Vec::new(),
            commands_applied: 0,
        }
    }

    /// Use `options` for subsequent [`refine`](Self::refine) calls.
    pub fn with_refine_options(mut self, options: RefineOptions) -> Self {
        self.refiner = Refiner::new(options);
        self
    }

    pub fn scoring(&self) -> &ScoringField {
        &self.scoring
    }

    pub fn seeds(&self) -> &SeedSet {
        &self.seeds
    }

    pub fn params(&self) -> &SessionParams {
        &self.params
    }

    pub fn refine_options(&self) -> &RefineOptions {
        self.refiner.options()
    }

    pub fn edge_gradient_width(&self) -> usize {
        self.params.edge_gradient_width
    }

    pub fn tessellation(&self) -> &Tessellation {
        &self.derived.tessellation
    }

    pub fn edge_field(&self) -> &EdgeField {
        &self.derived.edge_field
    }

    /// Score of the current seeds at the current width.
    pub fn score(&self) -> f64 {
        self.derived.report.score
    }

    pub fn last_recompute(&self) -> &RecomputeReport {
        &self.derived.report
    }

    pub fn refinements(&self) -> &[RefinementReport] {
        &self.refinements
    }

    /// Rebuild tessellation, edge field and score from the current seeds.
    pub fn recompute(&mut self) -> &RecomputeReport {
        self.derived = derive(
            &self.scoring,
            &self.seeds,
            self.params.edge_gradient_width,
            &mut self.generator,
        );
        &self.derived.report
    }

    /// Change the edge gradient width (clamped to the configured maximum) and
    /// recompute. Returns the width actually applied.
    pub fn set_edge_gradient_width(&mut self, width: usize) -> usize {
        let clamped = width.min(self.params.max_edge_gradient_width);
        if clamped != width {
            warn!(
                "Session::set_edge_gradient_width {} exceeds maximum {}, using {}",
                width, self.params.max_edge_gradient_width, clamped
            );
        }
        self.params.edge_gradient_width = clamped;
        self.recompute();
        clamped
    }

    /// Cycle the selection; the derived state does not depend on it.
    pub fn select_next(&mut self) -> Option<usize> {
        self.seeds.select_next()
    }

    /// Move the selected seed and recompute. Returns `false` when nothing is
    /// selected.
    pub fn move_selected(&mut self, dx: f32, dy: f32) -> bool {
        if !self.seeds.move_selected(dx, dy) {
            return false;
        }
        self.recompute();
        true
    }

    /// Refine all seeds at the current width, then recompute.
    pub fn refine(
        &mut self,
        minimizer: &mut dyn Minimizer,
    ) -> Result<RefinementReport, RefineError> {
        let report = self.refiner.refine(
            &mut self.seeds,
            &self.scoring,
            self.params.edge_gradient_width,
            minimizer,
        )?;
        self.refinements.push(report.clone());
        self.recompute();
        Ok(report)
    }

    /// Apply one command. Returns `false` once the session should end.
    pub fn apply(&mut self, command: &Command, minimizer: &mut dyn Minimizer) -> bool {
        self.commands_applied += 1;
        debug!("Session::apply {:?}", command);
        match *command {
            Command::SelectNext => {
                self.select_next();
            }
            Command::Move { dx, dy } => {
                self.move_selected(dx, dy);
            }
            Command::SetEdgeGradientWidth(w) => {
                self.set_edge_gradient_width(w);
            }
            Command::Refine => {
                if let Err(err) = self.refine(minimizer) {
                    warn!("Session::apply refine failed: {err}");
                }
            }
            Command::Quit => return false,
        }
        true
    }

    /// RGB overlay of the scoring field, the edge field and the seeds.
    pub fn compose_display(&self) -> RgbImageU8 {
        let scoring = self.scoring.field();
        let (w, h) = (scoring.width(), scoring.height());

        let mut green = self.derived.edge_field.display();
        for p in self.seeds.points() {
            fill_disc(&mut green, *p, SEED_MARKER_RADIUS, 255);
        }

        let mut out = RgbImageU8::new(w, h);
        for y in 0..h {
            let row = scoring.row(y);
            for (x, &s) in row.iter().enumerate() {
                let red = s.round().clamp(0.0, 255.0) as u8;
                out.set(x, y, [red, green.get(x, y), 0]);
            }
        }

        if let Some(p) = self.seeds.selected_point() {
            draw_ring(&mut out, p, SELECTION_RING_RADIUS, [255, 255, 255]);
        }
        out
    }

    /// Snapshot for the JSON report.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            initial_seeds: self.initial_seeds.clone(),
            seeds: self.seeds.points().to_vec(),
            selected: self.seeds.selected(),
            last_recompute: self.derived.report.clone(),
            refinements: self.refinements.clone(),
            commands_applied: self.commands_applied,
        }
    }
}

fn derive(
    scoring: &ScoringField,
    seeds: &SeedSet,
    width: usize,
    generator: &mut EdgeFieldGenerator,
) -> Derived {
    let bounds = scoring.bounds();
    let t0 = Instant::now();

    let t_tess = Instant::now();
    let tessellation = build_tessellation(seeds.points(), bounds);
    let tess_ms = t_tess.elapsed().as_secs_f64() * 1000.0;

    let t_edge = Instant::now();
    let edge_field = generator.generate(&tessellation, width);
    let edge_ms = t_edge.elapsed().as_secs_f64() * 1000.0;

    let t_score = Instant::now();
    let value = score(edge_field.field(), scoring.field());
    let score_ms = t_score.elapsed().as_secs_f64() * 1000.0;

    let mut timings = TimingBreakdown::with_total(t0.elapsed().as_secs_f64() * 1000.0);
    timings.push("tessellation", tess_ms);
    timings.push("edge_field", edge_ms);
    timings.push("score", score_ms);

    let report = RecomputeReport {
        width: bounds.width(),
        height: bounds.height(),
        seed_count: seeds.len(),
        edge_gradient_width: width,
        cells: tessellation.cells().iter().filter(|c| !c.is_empty()).count(),
        boundary_segments: tessellation.interior_edges().len(),
        edge_support_px: edge_field.support(),
        score: value,
        timings,
    };
    debug!(
        "Session::recompute seeds={} width={} score={:.3} in {:.2} ms",
        report.seed_count, width, value, report.timings.total_ms
    );

    Derived {
        tessellation,
        edge_field,
        report,
    }
}

fn fill_disc(img: &mut GrayImageU8, center: Point, radius: i64, value: u8) {
    let cx = center.x.round() as i64;
    let cy = center.y.round() as i64;
    let (w, h) = (img.width() as i64, img.height() as i64);
    for y in (cy - radius).max(0)..=(cy + radius).min(h - 1) {
        for x in (cx - radius).max(0)..=(cx + radius).min(w - 1) {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= radius * radius {
                img.set(x as usize, y as usize, value);
            }
        }
    }
}

/// One-pixel circle outline (midpoint algorithm), clipped to the image.
fn draw_ring(img: &mut RgbImageU8, center: Point, radius: i64, color: [u8; 3]) {
    let cx = center.x.round() as i64;
    let cy = center.y.round() as i64;
    let (w, h) = (img.w as i64, img.h as i64);
    let mut plot = |x: i64, y: i64| {
        if x >= 0 && y >= 0 && x < w && y < h {
            img.set(x as usize, y as usize, color);
        }
    };

    let mut x = radius;
    let mut y = 0i64;
    let mut err = 1 - radius;
    while x >= y {
        for (px, py) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            plot(cx + px, cy + py);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}
