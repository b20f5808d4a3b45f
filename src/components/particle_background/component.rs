//! Leptos component hosting the particle canvas.
//!
//! On mount the component sizes the canvas to the window, installs window
//! listeners for pointer and resize events, and starts a
//! `requestAnimationFrame` loop that ticks the [`SimulationContext`]. When the
//! owning scope is cleaned up, the loop is cancelled, every listener removed
//! and a pending resize-settle timer cleared.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Event, HtmlCanvasElement, MouseEvent, Window};

use super::animation::{AnimationLoop, Timeout};
use super::config::SimulationConfig;
use super::dom::{size_canvas, viewport_size, warn_on_err};
use super::input::HeaderRegionProvider;
use super::state::SimulationContext;
use super::types::{MountOptions, Rect};

/// Header rectangle looked up in the live DOM.
struct DomHeader {
	document: Option<Document>,
	selector: String,
}

impl HeaderRegionProvider for DomHeader {
	fn header_rect(&self) -> Option<Rect> {
		let element = self.document.as_ref()?.query_selector(&self.selector).ok()??;
		let r = element.get_bounding_client_rect();
		Some(Rect::new(r.left(), r.top(), r.right(), r.bottom()))
	}
}

struct Listener {
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

/// Live browser resources of one mounted background.
struct Mount {
	window: Window,
	context: Rc<RefCell<SimulationContext>>,
	animation: Option<AnimationLoop>,
	listeners: Vec<Listener>,
	settle_timer: Rc<RefCell<Timeout>>,
}

impl Mount {
	fn attach(
		canvas: HtmlCanvasElement,
		options: &MountOptions,
		set_visible: WriteSignal<bool>,
	) -> Option<Self> {
		let Some(window) = web_sys::window() else {
			warn!("panel-particles: no window, background disabled");
			return None;
		};
		let ctx: CanvasRenderingContext2d = match canvas.get_context("2d") {
			Ok(Some(ctx)) => warn_on_err("2d context cast", ctx.dyn_into())?,
			_ => {
				warn!("panel-particles: 2d context unavailable, background disabled");
				return None;
			}
		};

		let context = Rc::new(RefCell::new(SimulationContext::with_seed(
			SimulationConfig::default(),
			options.seed,
		)));
		let settle_timer = Rc::new(RefCell::new(Timeout::new(window.clone())));
		let mut mount = Self {
			window: window.clone(),
			context: context.clone(),
			animation: None,
			listeners: Vec::new(),
			settle_timer: settle_timer.clone(),
		};

		let on_resize = {
			let (window, canvas, ctx, context) =
				(window.clone(), canvas, ctx.clone(), context.clone());
			move || {
				let (w, h) = viewport_size(&window);
				size_canvas(&window, &canvas, &ctx, w, h);

				let delay = {
					let mut c = context.borrow_mut();
					c.resize(w, h, js_sys::Date::now());
					c.settle.delay_ms()
				};
				set_visible.set(false);

				let context_fire = context.clone();
				settle_timer.borrow_mut().arm(delay, move || {
					if context_fire.borrow_mut().settle.fire() {
						set_visible.set(true);
					}
				});
			}
		};
		// First layout counts as the viewport becoming ready
		on_resize();
		mount.listen("resize", move |_| on_resize());

		let context_move = context.clone();
		mount.listen("mousemove", move |ev| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				context_move
					.borrow_mut()
					.pointer_move(ev.client_x() as f64, ev.client_y() as f64);
			}
		});

		let context_leave = context.clone();
		mount.listen("mouseout", move |ev| {
			if let Some(ev) = ev.dyn_ref::<MouseEvent>() {
				context_leave.borrow_mut().pointer_leave(
					ev.client_x() as f64,
					ev.client_y() as f64,
					ev.related_target().is_some(),
				);
			}
		});

		let header = DomHeader {
			document: window.document(),
			selector: options.header_selector.clone(),
		};
		let mut surface = ctx;
		let context_frame = context.clone();
		mount.animation = Some(AnimationLoop::start(window, move || {
			context_frame.borrow_mut().tick(&header, &mut surface);
		}));

		{
			let c = context.borrow();
			info!(
				"panel-particles: mounted {} particles on {}x{} (palette '{}')",
				c.config.particle_count,
				c.viewport().width,
				c.viewport().height,
				c.palette.name
			);
		}
		Some(mount)
	}

	fn listen(&mut self, event: &'static str, handler: impl FnMut(Event) + 'static) {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		match self
			.window
			.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
		{
			Ok(()) => self.listeners.push(Listener { event, callback }),
			Err(e) => warn!("panel-particles: failed to listen for {}: {:?}", event, e),
		}
	}

	/// Release everything. Safe to call repeatedly.
	fn teardown(&mut self) {
		if let Some(animation) = self.animation.take() {
			animation.cancel();
		}
		for Listener { event, callback } in self.listeners.drain(..) {
			warn_on_err(
				&format!("removing {event} listener"),
				self.window
					.remove_event_listener_with_callback(event, callback.as_ref().unchecked_ref()),
			);
		}
		self.settle_timer.borrow_mut().clear();
		if let Ok(mut c) = self.context.try_borrow_mut() {
			c.settle.cancel();
		}
	}
}

impl Drop for Mount {
	fn drop(&mut self) {
		self.teardown();
	}
}

thread_local! {
	// Cleanup callbacks must be Send, so they refer to mounts by id.
	static MOUNTS: RefCell<HashMap<u64, Mount>> = RefCell::new(HashMap::new());
	static NEXT_MOUNT_ID: Cell<u64> = const { Cell::new(0) };
}

fn next_mount_id() -> u64 {
	NEXT_MOUNT_ID.with(|id| {
		let next = id.get();
		id.set(next + 1);
		next
	})
}

fn is_mounted(id: u64) -> bool {
	MOUNTS.with(|m| m.borrow().contains_key(&id))
}

fn unmount(id: u64) {
	// Drop outside the registry borrow
	let mount = MOUNTS.with(|m| m.borrow_mut().remove(&id));
	if let Some(mount) = mount {
		let frames = mount.context.try_borrow().map(|c| c.frames()).unwrap_or_default();
		drop(mount);
		info!("panel-particles: unmounted after {} frames", frames);
	}
}

/// Inline style of the canvas: fixed full-viewport layer behind the panel,
/// fading out fast on resize and back in slowly.
fn canvas_style(visible: bool) -> String {
	let (opacity, transition) = if visible {
		(1, "opacity 0.6s ease")
	} else {
		(0, "opacity 0.05s ease")
	};
	format!(
		"position: fixed; top: 0; left: 0; width: 100%; height: 100%; \
		 pointer-events: none; z-index: -1; opacity: {opacity}; transition: {transition};"
	)
}

/// Ambient particle field drawn on a fixed canvas behind the panel.
///
/// Particles orbit the pointer while it is over the page (but not over the
/// header matched by `options.header_selector`) and a slowly wandering point
/// otherwise.
#[component]
pub fn ParticleBackground(
	#[prop(default = MountOptions::default())] options: MountOptions,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let (visible, set_visible) = signal(true);
	let mount_id = next_mount_id();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if is_mounted(mount_id) {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		if let Some(mount) = Mount::attach(canvas, &options, set_visible) {
			MOUNTS.with(|m| m.borrow_mut().insert(mount_id, mount));
		}
	});

	on_cleanup(move || unmount(mount_id));

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-background"
			style=move || canvas_style(visible.get())
		/>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn hidden_canvas_fades_fast() {
		let hidden = canvas_style(false);
		assert!(hidden.contains("opacity: 0;"));
		assert!(hidden.contains("0.05s"));

		let shown = canvas_style(true);
		assert!(shown.contains("opacity: 1;"));
		assert!(shown.contains("0.6s"));
		assert!(shown.contains("pointer-events: none"));
	}

	#[test]
	fn unmount_of_unknown_id_is_a_no_op() {
		let id = next_mount_id();
		assert!(!is_mounted(id));
		unmount(id);
		unmount(id);
	}
}
