//! Fixed-size glyph canvas for terminal charts.
//!
//! A `Chart` maps data coordinates onto a plain character grid and renders
//! it into a `String` with axis labels, one row per line. Points outside
//! the configured ranges are silently dropped, so callers can plot raw
//! series without pre-filtering.

use std::fmt::Write;

/// Character-grid chart over a fixed data range.
#[derive(Debug, Clone)]
pub struct Chart {
    width: usize,
    height: usize,
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
    cells: Vec<char>,
}

impl Chart {
    /// Creates an empty canvas covering the given data ranges.
    ///
    /// Dimensions below 2 are raised to 2 so every range has two ends.
    pub fn new(width: usize, height: usize, x_range: (f32, f32), y_range: (f32, f32)) -> Self {
        let width = width.max(2);
        let height = height.max(2);
        Self {
            width,
            height,
            x_min: x_range.0,
            x_max: x_range.1,
            y_min: y_range.0,
            y_max: y_range.1,
            cells: vec![' '; width * height],
        }
    }

    /// Plots one glyph per (x, y) pair that falls inside the ranges.
    pub fn scatter(&mut self, xs: &[f32], ys: &[f32], glyph: char) {
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            if let Some((col, row)) = self.cell_of(x, y) {
                self.set(col, row, glyph);
            }
        }
    }

    /// Plots a connected series, filling vertical gaps between neighboring
    /// columns so step jumps stay visible.
    pub fn line(&mut self, xs: &[f32], ys: &[f32], glyph: char) {
        let mut previous: Option<(usize, usize)> = None;
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let Some((col, row)) = self.cell_of(x, y) else {
                previous = None;
                continue;
            };
            self.set(col, row, glyph);
            if let Some((_, prev_row)) = previous {
                let (top, bottom) = if prev_row < row {
                    (prev_row, row)
                } else {
                    (row, prev_row)
                };
                for fill_row in top + 1..bottom {
                    self.set(col, fill_row, glyph);
                }
            }
            previous = Some((col, row));
        }
    }

    /// Renders the canvas with y labels on the left and x labels below.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..self.height {
            if row == 0 {
                let _ = write!(out, "{:>8.2} ┤", self.y_max);
            } else if row == self.height - 1 {
                let _ = write!(out, "{:>8.2} ┤", self.y_min);
            } else {
                out.push_str("         │");
            }
            for col in 0..self.width {
                out.push(self.cells[row * self.width + col]);
            }
            out.push('\n');
        }
        let _ = writeln!(out, "         └{}", "─".repeat(self.width));

        let left = format!("{:.2}", self.x_min);
        let right = format!("{:.2}", self.x_max);
        let pad = self.width.saturating_sub(left.len() + right.len());
        let _ = writeln!(out, "          {left}{}{right}", " ".repeat(pad));
        out
    }

    fn set(&mut self, col: usize, row: usize, glyph: char) {
        self.cells[row * self.width + col] = glyph;
    }

    /// Maps data coordinates to a (column, row) cell, row 0 at the top.
    fn cell_of(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let col = scale(x, self.x_min, self.x_max, self.width)?;
        let row = scale(y, self.y_min, self.y_max, self.height)?;
        Some((col, self.height - 1 - row))
    }
}

/// Range of a series with a small margin so edge points stay off the border.
pub fn padded_range(values: &[f32]) -> (f32, f32) {
    let mut lo = f32::INFINITY;
    let mut hi = f32::NEG_INFINITY;
    for &v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if lo > hi {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

/// Maps a value into an index in `0..len`, or None outside `[min, max]`.
fn scale(value: f32, min: f32, max: f32, len: usize) -> Option<usize> {
    if !value.is_finite() || value < min || value > max {
        return None;
    }
    if max <= min {
        return Some(len / 2);
    }
    let t = (value - min) / (max - min);
    let idx = (t * (len - 1) as f32).round() as usize;
    Some(idx.min(len - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_maps_range_ends() {
        assert_eq!(scale(0.0, 0.0, 9.0, 10), Some(0));
        assert_eq!(scale(9.0, 0.0, 9.0, 10), Some(9));
        assert_eq!(scale(4.5, 0.0, 9.0, 10), Some(5));
    }

    #[test]
    fn test_scale_drops_out_of_range_values() {
        assert_eq!(scale(-0.1, 0.0, 9.0, 10), None);
        assert_eq!(scale(9.1, 0.0, 9.0, 10), None);
        assert_eq!(scale(f32::NAN, 0.0, 9.0, 10), None);
    }

    #[test]
    fn test_scale_handles_degenerate_range() {
        assert_eq!(scale(3.0, 3.0, 3.0, 10), Some(5));
    }

    #[test]
    fn test_render_has_expected_line_count() {
        let chart = Chart::new(20, 8, (0.0, 1.0), (0.0, 1.0));
        let rendered = chart.render();

        // 8 canvas rows, the bottom border and the x-label line.
        assert_eq!(rendered.lines().count(), 10);
    }

    #[test]
    fn test_render_labels_the_axes() {
        let chart = Chart::new(20, 8, (0.0, 5.0), (-1.0, 2.0));
        let rendered = chart.render();

        assert!(rendered.contains("2.00"));
        assert!(rendered.contains("-1.00"));
        assert!(rendered.contains("0.00"));
        assert!(rendered.contains("5.00"));
    }

    #[test]
    fn test_scatter_puts_a_point_in_the_corner() {
        let mut chart = Chart::new(10, 5, (0.0, 9.0), (0.0, 4.0));
        chart.scatter(&[0.0], &[0.0], '*');
        let rendered = chart.render();

        // Bottom canvas row, first plot column after the 10-char margin.
        let bottom: Vec<char> = rendered.lines().nth(4).unwrap().chars().collect();
        assert_eq!(bottom[10], '*');
    }

    #[test]
    fn test_scatter_ignores_out_of_range_points() {
        let mut chart = Chart::new(10, 5, (0.0, 9.0), (0.0, 4.0));
        chart.scatter(&[100.0, f32::NAN], &[1.0, 1.0], '*');

        assert!(!chart.render().contains('*'));
    }

    #[test]
    fn test_line_fills_vertical_jumps() {
        let mut chart = Chart::new(2, 6, (0.0, 1.0), (0.0, 5.0));
        chart.line(&[0.0, 1.0], &[0.0, 5.0], '#');

        // Two endpoints plus the four fill cells between the jump rows.
        let glyphs = chart.render().chars().filter(|&c| c == '#').count();
        assert_eq!(glyphs, 6);
    }

    #[test]
    fn test_padded_range_widens_both_ends() {
        let (lo, hi) = padded_range(&[0.0, 10.0]);
        assert!(lo < 0.0);
        assert!(hi > 10.0);
    }

    #[test]
    fn test_padded_range_degenerate_inputs() {
        assert_eq!(padded_range(&[]), (0.0, 1.0));
        assert_eq!(padded_range(&[3.0]), (2.5, 3.5));
    }
}
