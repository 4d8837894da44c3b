//! Drawing surface abstraction.
//!
//! The renderer only needs a handful of 2D primitives. [`Surface`] names them so
//! the frame logic can run against a real `CanvasRenderingContext2d`
//! ([`CanvasSurface`]) or a recording double in tests.

use wasm_bindgen::JsCast;
use web_sys::{CanvasGradient, CanvasRenderingContext2d, HtmlCanvasElement};

use super::color::Rgb;
use super::viewport::Viewport;
use crate::error::BackdropError;

/// Compositing mode for subsequent draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Blend {
	/// Plain source-over painting.
	Normal,
	/// Additive-looking `screen` compositing for glow layers.
	Screen,
}

impl Blend {
	pub fn as_css(self) -> &'static str {
		match self {
			Blend::Normal => "source-over",
			Blend::Screen => "screen",
		}
	}
}

/// Gradient stop. `alpha` multiplies the stop color only, not the global alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
	pub offset: f64,
	pub color: Rgb,
	pub alpha: f64,
}

impl ColorStop {
	pub const fn opaque(offset: f64, color: Rgb) -> Self {
		Self {
			offset,
			color,
			alpha: 1.0,
		}
	}

	pub const fn transparent(offset: f64) -> Self {
		Self {
			offset,
			color: Rgb::new(0.0, 0.0, 0.0),
			alpha: 0.0,
		}
	}

	fn to_css(self) -> String {
		if self.alpha >= 1.0 {
			self.color.to_css()
		} else {
			self.color.to_css_alpha(self.alpha)
		}
	}
}

/// Fill or stroke source.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint<'a> {
	Solid(Rgb),
	Linear {
		from: (f64, f64),
		to: (f64, f64),
		stops: &'a [ColorStop],
	},
	/// Concentric radial gradient between `inner` and `outer` radii.
	Radial {
		center: (f64, f64),
		inner: f64,
		outer: f64,
		stops: &'a [ColorStop],
	},
}

/// Rotated ellipse outline to fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipse {
	pub cx: f64,
	pub cy: f64,
	pub rx: f64,
	pub ry: f64,
	pub rotation: f64,
}

/// The 2D primitives the backdrop paints with. Coordinates are logical (CSS)
/// pixels; device pixel scaling is the surface's business.
pub trait Surface {
	/// Pushes blend mode and alpha.
	fn save(&mut self);
	/// Pops what the matching [`Surface::save`] pushed.
	fn restore(&mut self);
	fn set_blend(&mut self, blend: Blend);
	fn set_alpha(&mut self, alpha: f64);
	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint<'_>);
	fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: &Paint<'_>);
	fn fill_ellipse(&mut self, ellipse: &Ellipse, paint: &Paint<'_>);
	/// Strokes an open polyline through `points`.
	fn stroke_polyline(&mut self, points: &[(f64, f64)], line_width: f64, paint: &Paint<'_>);
}

/// [`Surface`] backed by an HTML canvas 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	/// Acquires the 2D context of `canvas`.
	pub fn from_canvas(canvas: &HtmlCanvasElement) -> Result<Self, BackdropError> {
		let ctx = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.ok_or(BackdropError::ContextUnavailable)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| BackdropError::ContextUnavailable)?;
		Ok(Self {
			canvas: canvas.clone(),
			ctx,
		})
	}

	/// Sizes the backing store to `viewport × dpr`, keeps the CSS size at
	/// logical pixels, and scales the context so drawing stays in CSS pixels.
	pub fn fit(&self, viewport: &Viewport) {
		let (width, height) = viewport.backing_size();
		self.canvas.set_width(width);
		self.canvas.set_height(height);
		let style = self.canvas.style();
		let _ = style.set_property("width", &format!("{}px", viewport.width));
		let _ = style.set_property("height", &format!("{}px", viewport.height));
		// Resizing the backing store resets the transform.
		let _ = self
			.ctx
			.set_transform(viewport.dpr, 0.0, 0.0, viewport.dpr, 0.0, 0.0);
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}

	fn gradient(&self, paint: &Paint<'_>) -> Option<CanvasGradient> {
		let (gradient, stops) = match *paint {
			Paint::Solid(_) => return None,
			Paint::Linear { from, to, stops } => (
				self.ctx.create_linear_gradient(from.0, from.1, to.0, to.1),
				stops,
			),
			Paint::Radial {
				center,
				inner,
				outer,
				stops,
			} => (
				self.ctx
					.create_radial_gradient(center.0, center.1, inner, center.0, center.1, outer)
					.ok()?,
				stops,
			),
		};
		for stop in stops {
			let _ = gradient.add_color_stop(stop.offset as f32, &stop.to_css());
		}
		Some(gradient)
	}

	fn apply_fill(&self, paint: &Paint<'_>) {
		match (paint, self.gradient(paint)) {
			(Paint::Solid(color), _) => self.ctx.set_fill_style_str(&color.to_css()),
			(_, Some(gradient)) => {
				#[allow(deprecated)]
				self.ctx.set_fill_style(&gradient);
			}
			(_, None) => {}
		}
	}

	fn apply_stroke(&self, paint: &Paint<'_>) {
		match (paint, self.gradient(paint)) {
			(Paint::Solid(color), _) => self.ctx.set_stroke_style_str(&color.to_css()),
			(_, Some(gradient)) => {
				#[allow(deprecated)]
				self.ctx.set_stroke_style(&gradient);
			}
			(_, None) => {}
		}
	}
}

impl Surface for CanvasSurface {
	fn save(&mut self) {
		self.ctx.save();
	}

	fn restore(&mut self) {
		self.ctx.restore();
	}

	fn set_blend(&mut self, blend: Blend) {
		let _ = self.ctx.set_global_composite_operation(blend.as_css());
	}

	fn set_alpha(&mut self, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64, paint: &Paint<'_>) {
		self.apply_fill(paint);
		self.ctx.fill_rect(x, y, width, height);
	}

	fn fill_circle(&mut self, cx: f64, cy: f64, radius: f64, paint: &Paint<'_>) {
		self.apply_fill(paint);
		self.ctx.begin_path();
		let _ = self.ctx.arc(cx, cy, radius.max(0.0), 0.0, std::f64::consts::TAU);
		self.ctx.fill();
	}

	fn fill_ellipse(&mut self, e: &Ellipse, paint: &Paint<'_>) {
		self.apply_fill(paint);
		self.ctx.begin_path();
		let _ = self.ctx.ellipse(
			e.cx,
			e.cy,
			e.rx.max(0.0),
			e.ry.max(0.0),
			e.rotation,
			0.0,
			std::f64::consts::TAU,
		);
		self.ctx.fill();
	}

	fn stroke_polyline(&mut self, points: &[(f64, f64)], line_width: f64, paint: &Paint<'_>) {
		let Some((&(x0, y0), rest)) = points.split_first() else {
			return;
		};
		self.apply_stroke(paint);
		self.ctx.set_line_width(line_width);
		self.ctx.begin_path();
		self.ctx.move_to(x0, y0);
		for &(x, y) in rest {
			self.ctx.line_to(x, y);
		}
		self.ctx.stroke();
	}
}

#[cfg(test)]
pub(crate) mod recording {
	//! In-memory [`Surface`] that records draw calls and tracks canvas-like
	//! save/restore state.

	use super::*;

	#[derive(Clone, Debug, PartialEq)]
	pub enum Op {
		FillRect,
		FillCircle { radius: f64, alpha: f64, blend: Blend },
		FillEllipse { alpha: f64, blend: Blend },
		Stroke { points: usize, alpha: f64, blend: Blend },
	}

	pub struct RecordingSurface {
		pub ops: Vec<Op>,
		pub blend: Blend,
		pub alpha: f64,
		stack: Vec<(Blend, f64)>,
	}

	impl Default for RecordingSurface {
		fn default() -> Self {
			Self {
				ops: Vec::new(),
				blend: Blend::Normal,
				alpha: 1.0,
				stack: Vec::new(),
			}
		}
	}

	impl RecordingSurface {
		pub fn depth(&self) -> usize {
			self.stack.len()
		}

		pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
			self.ops.iter().filter(|op| pred(op)).count()
		}
	}

	impl Surface for RecordingSurface {
		fn save(&mut self) {
			self.stack.push((self.blend, self.alpha));
		}

		fn restore(&mut self) {
			if let Some((blend, alpha)) = self.stack.pop() {
				self.blend = blend;
				self.alpha = alpha;
			}
		}

		fn set_blend(&mut self, blend: Blend) {
			self.blend = blend;
		}

		fn set_alpha(&mut self, alpha: f64) {
			self.alpha = alpha;
		}

		fn fill_rect(&mut self, _: f64, _: f64, _: f64, _: f64, _: &Paint<'_>) {
			self.ops.push(Op::FillRect);
		}

		fn fill_circle(&mut self, _: f64, _: f64, radius: f64, _: &Paint<'_>) {
			self.ops.push(Op::FillCircle {
				radius,
				alpha: self.alpha,
				blend: self.blend,
			});
		}

		fn fill_ellipse(&mut self, _: &Ellipse, _: &Paint<'_>) {
			self.ops.push(Op::FillEllipse {
				alpha: self.alpha,
				blend: self.blend,
			});
		}

		fn stroke_polyline(&mut self, points: &[(f64, f64)], _: f64, _: &Paint<'_>) {
			self.ops.push(Op::Stroke {
				points: points.len(),
				alpha: self.alpha,
				blend: self.blend,
			});
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn blend_css_names() {
		assert_eq!(Blend::Normal.as_css(), "source-over");
		assert_eq!(Blend::Screen.as_css(), "screen");
	}

	#[test]
	fn stop_css() {
		let accent = Rgb::new(127.0, 178.0, 255.0);
		assert_eq!(ColorStop::opaque(0.0, accent).to_css(), "rgb(127, 178, 255)");
		assert_eq!(ColorStop::transparent(1.0).to_css(), "rgba(0, 0, 0, 0)");
	}
}
