//! `image` 버퍼 위에 그리는 간단한 래스터 차트. 축, 격자, 꺾은선, 막대만 지원한다.
//!
//! 글꼴 렌더링은 하지 않는다. 축 값과 제목은 콘솔/CSV로 함께 출력한다.

use image::{Rgb, RgbImage};

use super::RenderError;

pub const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
pub const AXIS: Rgb<u8> = Rgb([40, 40, 40]);
pub const GRID: Rgb<u8> = Rgb([225, 225, 225]);
pub const SERIES: Rgb<u8> = Rgb([31, 119, 180]);
pub const REFERENCE: Rgb<u8> = Rgb([214, 39, 40]);
pub const MARKER: Rgb<u8> = Rgb([44, 160, 44]);
pub const NEGATIVE_BAR: Rgb<u8> = Rgb([214, 39, 40]);
pub const POSITIVE_BAR: Rgb<u8> = Rgb([31, 119, 180]);

const GRID_DIVISIONS: u32 = 10;

/// 출력 이미지 크기와 여백 [px].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSize {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
}

impl ChartSize {
    pub fn new(width: u32, height: u32) -> Self {
        let margin = (width.min(height) / 12).max(4);
        Self {
            width,
            height,
            margin,
        }
    }
}

/// 데이터 좌표 범위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// 유한한 점들로 범위를 구한다. 폭이 0이면 양쪽으로 넓힌다.
    pub fn from_points(points: &[(f64, f64)]) -> Option<Self> {
        let mut it = points
            .iter()
            .copied()
            .filter(|(x, y)| x.is_finite() && y.is_finite());
        let (x0, y0) = it.next()?;
        let mut b = Bounds {
            x_min: x0,
            x_max: x0,
            y_min: y0,
            y_max: y0,
        };
        for (x, y) in it {
            b.x_min = b.x_min.min(x);
            b.x_max = b.x_max.max(x);
            b.y_min = b.y_min.min(y);
            b.y_max = b.y_max.max(y);
        }
        Some(b.widened())
    }

    /// y 범위에 값을 포함시킨다.
    pub fn include_y(mut self, y: f64) -> Self {
        if y.is_finite() {
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
        self
    }

    /// y 범위를 아래로 `below`, 위로 `above` 비율만큼 늘린다.
    pub fn padded(mut self, below: f64, above: f64) -> Self {
        let span = self.y_max - self.y_min;
        self.y_min -= span * below;
        self.y_max += span * above;
        self
    }

    fn widened(mut self) -> Self {
        if self.x_max - self.x_min == 0.0 {
            self.x_min -= 0.5;
            self.x_max += 0.5;
        }
        if self.y_max - self.y_min == 0.0 {
            let d = (self.y_max.abs() * 0.1).max(0.5);
            self.y_min -= d;
            self.y_max += d;
        }
        self
    }
}

/// 데이터 좌표를 픽셀로 옮겨 그리는 캔버스.
pub struct Canvas {
    image: RgbImage,
    size: ChartSize,
    bounds: Bounds,
}

impl Canvas {
    pub fn new(size: ChartSize, bounds: Bounds) -> Self {
        let mut canvas = Self {
            image: RgbImage::from_pixel(size.width, size.height, BACKGROUND),
            size,
            bounds,
        };
        canvas.draw_grid();
        canvas.draw_axes();
        canvas
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    fn plot_left(&self) -> f64 {
        self.size.margin as f64
    }

    fn plot_right(&self) -> f64 {
        self.size.width.saturating_sub(self.size.margin) as f64
    }

    fn plot_top(&self) -> f64 {
        self.size.margin as f64
    }

    fn plot_bottom(&self) -> f64 {
        self.size.height.saturating_sub(self.size.margin) as f64
    }

    /// 데이터 좌표 → 픽셀 좌표.
    pub fn to_pixel(&self, x: f64, y: f64) -> (f64, f64) {
        let b = &self.bounds;
        let px = self.plot_left()
            + (x - b.x_min) / (b.x_max - b.x_min) * (self.plot_right() - self.plot_left());
        let py = self.plot_bottom()
            - (y - b.y_min) / (b.y_max - b.y_min) * (self.plot_bottom() - self.plot_top());
        (px, py)
    }

    fn put(&mut self, x: i64, y: i64, color: Rgb<u8>) {
        if x >= 0 && y >= 0 && (x as u32) < self.size.width && (y as u32) < self.size.height {
            self.image.put_pixel(x as u32, y as u32, color);
        }
    }

    /// 픽셀 좌표 사이에 선을 긋는다(DDA, 두께 `thickness`).
    fn segment(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>, thickness: i64) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let steps = dx.abs().max(dy.abs()).ceil().clamp(1.0, 10_000.0) as usize;
        let half = thickness / 2;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = (from.0 + dx * t).round() as i64;
            let y = (from.1 + dy * t).round() as i64;
            for ox in -half..=half {
                for oy in -half..=half {
                    self.put(x + ox, y + oy, color);
                }
            }
        }
    }

    fn draw_grid(&mut self) {
        let (left, right) = (self.plot_left(), self.plot_right());
        let (top, bottom) = (self.plot_top(), self.plot_bottom());
        for i in 0..=GRID_DIVISIONS {
            let f = i as f64 / GRID_DIVISIONS as f64;
            let x = left + f * (right - left);
            let y = top + f * (bottom - top);
            self.segment((x, top), (x, bottom), GRID, 1);
            self.segment((left, y), (right, y), GRID, 1);
        }
    }

    fn draw_axes(&mut self) {
        let (left, right) = (self.plot_left(), self.plot_right());
        let (top, bottom) = (self.plot_top(), self.plot_bottom());
        self.segment((left, bottom), (right, bottom), AXIS, 1);
        self.segment((left, top), (left, bottom), AXIS, 1);
    }

    /// 꺾은선. 비유한 점에서 선을 끊는다.
    pub fn polyline(&mut self, points: &[(f64, f64)], color: Rgb<u8>) {
        let mut prev: Option<(f64, f64)> = None;
        for &(x, y) in points {
            if !(x.is_finite() && y.is_finite()) {
                prev = None;
                continue;
            }
            let p = self.to_pixel(x, y);
            if let Some(q) = prev {
                self.segment(q, p, color, 3);
            }
            prev = Some(p);
        }
    }

    /// 데이터 y 위치에 점선을 긋는다.
    pub fn dashed_hline(&mut self, y: f64, color: Rgb<u8>) {
        if !y.is_finite() {
            return;
        }
        let (_, py) = self.to_pixel(self.bounds.x_min, y);
        let (left, right) = (self.plot_left(), self.plot_right());
        let dash = 8.0;
        let mut x = left;
        while x < right {
            let end = (x + dash).min(right);
            self.segment((x, py), (end, py), color, 1);
            x += dash * 2.0;
        }
    }

    /// 데이터 x 위치에 수직선을 긋는다.
    pub fn vline(&mut self, x: f64, color: Rgb<u8>) {
        if !x.is_finite() {
            return;
        }
        let (px, _) = self.to_pixel(x, self.bounds.y_min);
        let (top, bottom) = (self.plot_top(), self.plot_bottom());
        self.segment((px, top), (px, bottom), color, 1);
    }

    /// 데이터 좌표에 원형 표식을 찍는다.
    pub fn marker(&mut self, x: f64, y: f64, radius: i64, color: Rgb<u8>) {
        if !(x.is_finite() && y.is_finite()) {
            return;
        }
        let (px, py) = self.to_pixel(x, y);
        let (cx, cy) = (px.round() as i64, py.round() as i64);
        for ox in -radius..=radius {
            for oy in -radius..=radius {
                if ox * ox + oy * oy <= radius * radius {
                    self.put(cx + ox, cy + oy, color);
                }
            }
        }
    }

    /// x 구간 [x0, x1]에 0에서 `value`까지 채운 막대를 그린다.
    pub fn bar(&mut self, x0: f64, x1: f64, value: f64, color: Rgb<u8>) {
        if !value.is_finite() {
            return;
        }
        let (px0, py0) = self.to_pixel(x0, 0.0);
        let (px1, py1) = self.to_pixel(x1, value);
        let (xa, xb) = (px0.min(px1).round() as i64, px0.max(px1).round() as i64);
        let (ya, yb) = (py0.min(py1).round() as i64, py0.max(py1).round() as i64);
        for x in xa..=xb {
            for y in ya..=yb {
                self.put(x, y, color);
            }
        }
    }
}

/// 꺾은선 차트. `reference_y`가 있으면 점선 기준선을 함께 그린다.
pub fn line_chart(
    points: &[(f64, f64)],
    reference_y: Option<f64>,
    size: ChartSize,
) -> Result<RgbImage, RenderError> {
    let mut bounds = Bounds::from_points(points).ok_or(RenderError::EmptySeries)?;
    if let Some(r) = reference_y {
        bounds = bounds.include_y(r);
    }
    Ok(line_chart_in(points, reference_y, bounds.padded(0.1, 0.1), size))
}

/// 범위를 고정한 꺾은선 차트. 애니메이션 프레임처럼 축이 움직이면 안 될 때 쓴다.
pub fn line_chart_in(
    points: &[(f64, f64)],
    reference_y: Option<f64>,
    bounds: Bounds,
    size: ChartSize,
) -> RgbImage {
    let mut canvas = Canvas::new(size, bounds);
    if let Some(r) = reference_y {
        canvas.dashed_hline(r, REFERENCE);
    }
    canvas.polyline(points, SERIES);
    canvas.into_image()
}

/// 0 기준 막대 차트. 음수는 빨강, 양수는 파랑으로 칠한다.
pub fn bar_chart(values: &[f64], size: ChartSize) -> Result<RgbImage, RenderError> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return Err(RenderError::EmptySeries);
    }
    let lo = finite.iter().copied().fold(0.0_f64, f64::min);
    let hi = finite.iter().copied().fold(0.0_f64, f64::max);
    let bounds = Bounds {
        x_min: 0.0,
        x_max: values.len() as f64,
        y_min: lo,
        y_max: hi,
    }
    .widened()
    .padded(0.1, 0.1);

    let mut canvas = Canvas::new(size, bounds);
    for (i, &v) in values.iter().enumerate() {
        let color = if v < 0.0 { NEGATIVE_BAR } else { POSITIVE_BAR };
        canvas.bar(i as f64 + 0.2, i as f64 + 0.8, v, color);
    }
    canvas.dashed_hline(0.0, AXIS);
    Ok(canvas.into_image())
}
