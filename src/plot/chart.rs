use std::path::Path;

use image::{Rgb, RgbImage};

use crate::error::Result;
use crate::plot::font::{self, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

/// Default series colors (blue, orange).
pub const TRAIN_COLOR: Rgb<u8> = Rgb([31, 119, 180]);
pub const TEST_COLOR: Rgb<u8> = Rgb([255, 127, 14]);

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PLOT_BACKGROUND: Rgb<u8> = Rgb([234, 234, 242]);
const GRID: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([40, 40, 40]);
const LEGEND_BORDER: Rgb<u8> = Rgb([200, 200, 200]);

// Plot-area margins in pixels.
const MARGIN_LEFT: i64 = 100;
const MARGIN_RIGHT: i64 = 30;
const MARGIN_TOP: i64 = 60;
const MARGIN_BOTTOM: i64 = 80;

const LABEL_SCALE: u32 = 2;
const TITLE_SCALE: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    LowerRight,
    UpperRight,
}

/// One named line; point `i` is plotted at x = i.
#[derive(Debug, Clone)]
pub struct Series {
    pub name: String,
    pub color: Rgb<u8>,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct LineChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub legend: LegendPosition,
}

impl LineChart {
    /// Rasterizes the chart. Images too small to hold the margins come back
    /// blank.
    pub fn render(&self, width: u32, height: u32) -> RgbImage {
        let mut canvas = Canvas::new(width, height);

        let (x0, y0) = (MARGIN_LEFT, MARGIN_TOP);
        let (x1, y1) = (width as i64 - MARGIN_RIGHT, height as i64 - MARGIN_BOTTOM);
        if x1 <= x0 || y1 <= y0 {
            return canvas.img;
        }
        canvas.fill_rect(x0, y0, x1, y1, PLOT_BACKGROUND);

        let n_points = self.series.iter().map(|s| s.values.len()).max().unwrap_or(0);
        let x_max = (n_points.max(2) - 1) as f64;

        let (lo, hi) = self.y_range();
        let y_step = nice_step(hi - lo, 5);
        let y_lo = (lo / y_step).floor() * y_step;
        let y_hi = ((hi / y_step).ceil() * y_step).max(y_lo + y_step);

        let to_px = |x: f64| x0 + (x / x_max * (x1 - x0) as f64).round() as i64;
        let to_py = |y: f64| y1 - ((y - y_lo) / (y_hi - y_lo) * (y1 - y0) as f64).round() as i64;

        // Horizontal grid and y tick labels.
        let decimals = decimals_for(y_step);
        let y_ticks = ((y_hi - y_lo) / y_step).round() as usize;
        for k in 0..=y_ticks {
            let v = y_lo + k as f64 * y_step;
            let py = to_py(v);
            canvas.hline(x0, x1, py, GRID);
            let label = format!("{:.*}", decimals, v);
            let w = font::text_width(&label, LABEL_SCALE) as i64;
            canvas.text(x0 - 10 - w, py - (GLYPH_HEIGHT * LABEL_SCALE / 2) as i64, &label, LABEL_SCALE, INK);
        }

        // Vertical grid and x tick labels (integer epochs).
        let x_step = (nice_step(x_max, 8).ceil() as usize).max(1);
        for i in (0..=x_max as usize).step_by(x_step) {
            let px = to_px(i as f64);
            canvas.vline(px, y0, y1, GRID);
            let label = i.to_string();
            let w = font::text_width(&label, LABEL_SCALE) as i64;
            canvas.text(px - w / 2, y1 + 10, &label, LABEL_SCALE, INK);
        }

        canvas.rect(x0, y0, x1, y1, INK);

        for series in &self.series {
            let points: Vec<(i64, i64)> = series.values.iter().enumerate()
                .filter(|(_, v)| v.is_finite())
                .map(|(i, &v)| (to_px(i as f64), to_py(v)))
                .collect();
            for pair in points.windows(2) {
                canvas.line(pair[0], pair[1], series.color, 3);
            }
            if let [only] = points.as_slice() {
                canvas.fill_rect(only.0 - 2, only.1 - 2, only.0 + 2, only.1 + 2, series.color);
            }
        }

        // Title and axis labels.
        let title_w = font::text_width(&self.title, TITLE_SCALE) as i64;
        canvas.text((x0 + x1) / 2 - title_w / 2, 18, &self.title, TITLE_SCALE, INK);

        let xl_w = font::text_width(&self.x_label, LABEL_SCALE) as i64;
        canvas.text((x0 + x1) / 2 - xl_w / 2, y1 + 45, &self.x_label, LABEL_SCALE, INK);

        let yl_w = font::text_width(&self.y_label, LABEL_SCALE) as i64;
        canvas.text_vertical(15, (y0 + y1) / 2 + yl_w / 2, &self.y_label, LABEL_SCALE, INK);

        self.draw_legend(&mut canvas, (x0, y0, x1, y1));

        canvas.img
    }

    pub fn save_png<P: AsRef<Path>>(&self, path: P, width: u32, height: u32) -> Result<()> {
        self.render(width, height).save(path)?;
        Ok(())
    }

    /// Min and max over every finite value, widened when flat.
    fn y_range(&self) -> (f64, f64) {
        let (lo, hi) = self.series.iter()
            .flat_map(|s| s.values.iter().copied())
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));
        if lo > hi {
            (0.0, 1.0)
        } else if hi - lo < 1e-12 {
            (lo - 0.5, hi + 0.5)
        } else {
            (lo, hi)
        }
    }

    fn draw_legend(&self, canvas: &mut Canvas, (_, y0, x1, y1): (i64, i64, i64, i64)) {
        if self.series.is_empty() {
            return;
        }
        let swatch = 30;
        let row_h = (GLYPH_HEIGHT * LABEL_SCALE) as i64 + 10;
        let name_w = self.series.iter()
            .map(|s| font::text_width(&s.name, LABEL_SCALE))
            .max()
            .unwrap_or(0) as i64;
        let box_w = 10 + swatch + 10 + name_w + 10;
        let box_h = row_h * self.series.len() as i64 + 6;

        let bx = x1 - 12 - box_w;
        let by = match self.legend {
            LegendPosition::UpperRight => y0 + 12,
            LegendPosition::LowerRight => y1 - 12 - box_h,
        };

        canvas.fill_rect(bx, by, bx + box_w, by + box_h, BACKGROUND);
        canvas.rect(bx, by, bx + box_w, by + box_h, LEGEND_BORDER);

        for (i, series) in self.series.iter().enumerate() {
            let row_top = by + 3 + i as i64 * row_h;
            let mid = row_top + row_h / 2;
            canvas.line((bx + 10, mid), (bx + 10 + swatch, mid), series.color, 3);
            canvas.text(
                bx + 20 + swatch,
                mid - (GLYPH_HEIGHT * LABEL_SCALE / 2) as i64,
                &series.name,
                LABEL_SCALE,
                INK,
            );
        }
    }
}

/// A 1, 2 or 5 × 10^k step that splits `range` into about `target` ticks.
pub fn nice_step(range: f64, target: usize) -> f64 {
    if !(range.is_finite() && range > 0.0) || target == 0 {
        return 1.0;
    }
    let raw = range / target as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let norm = raw / magnitude;
    let nice = if norm < 1.5 {
        1.0
    } else if norm < 3.0 {
        2.0
    } else if norm < 7.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Decimal places needed to print multiples of `step` exactly.
fn decimals_for(step: f64) -> usize {
    (-step.log10() - 1e-9).ceil().max(0.0) as usize
}

/// Clipped drawing primitives over an RGB image.
struct Canvas {
    img: RgbImage,
}

impl Canvas {
    fn new(width: u32, height: u32) -> Canvas {
        Canvas { img: RgbImage::from_pixel(width, height, BACKGROUND) }
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u64) < self.img.width() as u64 && (y as u64) < self.img.height() as u64 {
            self.img.put_pixel(x as u32, y as u32, color);
        }
    }

    fn hline(&mut self, x0: i64, x1: i64, y: i64, color: Rgb<u8>) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.put(x, y, color);
        }
    }

    fn vline(&mut self, x: i64, y0: i64, y1: i64, color: Rgb<u8>) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.put(x, y, color);
        }
    }

    fn rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        self.hline(x0, x1, y0, color);
        self.hline(x0, x1, y1, color);
        self.vline(x0, y0, y1, color);
        self.vline(x1, y0, y1, color);
    }

    fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Rgb<u8>) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.hline(x0, x1, y, color);
        }
    }

    /// Bresenham line stamped with a `thickness`-wide square brush.
    fn line(&mut self, (mut x, mut y): (i64, i64), (x1, y1): (i64, i64), color: Rgb<u8>, thickness: i64) {
        let dx = (x1 - x).abs();
        let dy = -(y1 - y).abs();
        let sx = if x < x1 { 1 } else { -1 };
        let sy = if y < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let half = thickness / 2;

        loop {
            self.fill_rect(x - half, y - half, x - half + thickness - 1, y - half + thickness - 1, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws `text` with its top-left corner at (x, y).
    fn text(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let s = scale as i64;
        for (k, c) in text.chars().enumerate() {
            let origin = x + (k as u32 * ADVANCE) as i64 * s;
            self.glyph(c, scale, color, |gx, gy| (origin + gx * s, y + gy * s));
        }
    }

    /// Draws `text` rotated a quarter turn counter-clockwise, reading
    /// bottom-to-top from (x, y).
    fn text_vertical(&mut self, x: i64, y: i64, text: &str, scale: u32, color: Rgb<u8>) {
        let s = scale as i64;
        for (k, c) in text.chars().enumerate() {
            let origin = y - (k as u32 * ADVANCE) as i64 * s;
            self.glyph(c, scale, color, |gx, gy| (x + gy * s, origin - gx * s));
        }
    }

    /// Stamps every set pixel of `c` at the position `place(col, row)`.
    fn glyph<F>(&mut self, c: char, scale: u32, color: Rgb<u8>, place: F)
    where
        F: Fn(i64, i64) -> (i64, i64),
    {
        let s = scale as i64;
        for (row, bits) in font::glyph(c).iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                    let (px, py) = place(col as i64, row as i64);
                    self.fill_rect(px, py, px + s - 1, py + s - 1, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(values: Vec<f64>) -> LineChart {
        LineChart {
            title: "Model accuracy".into(),
            x_label: "Epoch".into(),
            y_label: "Accuracy".into(),
            series: vec![Series { name: "Train".into(), color: TRAIN_COLOR, values }],
            legend: LegendPosition::LowerRight,
        }
    }

    fn count(img: &RgbImage, color: Rgb<u8>) -> usize {
        img.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn renders_requested_size_with_series_pixels() {
        let img = chart(vec![0.6, 0.8, 0.9, 0.95]).render(640, 400);
        assert_eq!(img.dimensions(), (640, 400));
        // Line plus legend swatch.
        assert!(count(&img, TRAIN_COLOR) > 200);
        assert!(count(&img, INK) > 0);
    }

    #[test]
    fn handles_flat_single_and_empty_series() {
        assert!(count(&chart(vec![0.5; 5]).render(400, 300), TRAIN_COLOR) > 0);
        assert!(count(&chart(vec![0.5]).render(400, 300), TRAIN_COLOR) > 0);
        let _ = chart(vec![]).render(400, 300);
        let _ = chart(vec![f64::NAN, 1.0]).render(400, 300);
    }

    #[test]
    fn tiny_canvas_is_blank() {
        let img = chart(vec![1.0, 2.0]).render(50, 50);
        assert_eq!(count(&img, BACKGROUND), 2500);
    }

    #[test]
    fn nice_steps() {
        assert!((nice_step(0.38, 5) - 0.1).abs() < 1e-12);
        assert!((nice_step(14.0, 8) - 2.0).abs() < 1e-12);
        assert!((nice_step(1.0, 5) - 0.2).abs() < 1e-12);
        assert_eq!(nice_step(0.0, 5), 1.0);
        assert_eq!(decimals_for(0.1), 1);
        assert_eq!(decimals_for(0.05), 2);
        assert_eq!(decimals_for(2.0), 0);
    }
}
