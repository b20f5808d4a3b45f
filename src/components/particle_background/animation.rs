//! Browser scheduling handles: a self-rescheduling animation frame loop and a
//! one-shot timeout. Both cancel idempotently and on drop.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::dom::warn_on_err;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Runs a callback once per display refresh until cancelled.
pub struct AnimationLoop {
	window: Window,
	callback: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
	running: Rc<Cell<bool>>,
}

impl AnimationLoop {
	/// Schedule `on_frame` for the next frame; it reschedules itself after
	/// every run.
	pub fn start(window: Window, mut on_frame: impl FnMut() + 'static) -> Self {
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let frame_id = Rc::new(Cell::new(None));
		let running = Rc::new(Cell::new(true));

		let (callback_inner, frame_inner, running_inner, window_inner) = (
			callback.clone(),
			frame_id.clone(),
			running.clone(),
			window.clone(),
		);
		*callback.borrow_mut() = Some(Closure::new(move || {
			frame_inner.set(None);
			if !running_inner.get() {
				return;
			}
			on_frame();
			if let Some(ref cb) = *callback_inner.borrow() {
				match window_inner.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => frame_inner.set(Some(id)),
					Err(e) => warn!("panel-particles: requestAnimationFrame failed: {:?}", e),
				}
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => frame_id.set(Some(id)),
				Err(e) => warn!("panel-particles: requestAnimationFrame failed: {:?}", e),
			}
		}

		Self {
			window,
			callback,
			frame_id,
			running,
		}
	}

	/// Cancel the pending frame and release the callback.
	pub fn cancel(&self) {
		self.running.set(false);
		if let Some(id) = self.frame_id.take() {
			warn_on_err("cancelAnimationFrame", self.window.cancel_animation_frame(id));
		}
		// Breaks the callback's reference to itself
		self.callback.borrow_mut().take();
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// A re-armable one-shot `setTimeout`.
pub struct Timeout {
	window: Window,
	handle: Rc<Cell<Option<i32>>>,
	callback: Option<Closure<dyn FnMut()>>,
}

impl Timeout {
	pub fn new(window: Window) -> Self {
		Self {
			window,
			handle: Rc::new(Cell::new(None)),
			callback: None,
		}
	}

	/// Clear any pending timeout, then run `on_fire` after `delay_ms`.
	pub fn arm(&mut self, delay_ms: f64, mut on_fire: impl FnMut() + 'static) {
		self.clear();

		let handle = self.handle.clone();
		let callback = Closure::<dyn FnMut()>::new(move || {
			handle.set(None);
			on_fire();
		});
		match self
			.window
			.set_timeout_with_callback_and_timeout_and_arguments_0(
				callback.as_ref().unchecked_ref(),
				delay_ms.max(0.0) as i32,
			) {
			Ok(id) => self.handle.set(Some(id)),
			Err(e) => warn!("panel-particles: setTimeout failed: {:?}", e),
		}
		self.callback = Some(callback);
	}

	pub fn clear(&mut self) {
		if let Some(id) = self.handle.take() {
			self.window.clear_timeout_with_handle(id);
		}
		self.callback = None;
	}
}

impl Drop for Timeout {
	fn drop(&mut self) {
		self.clear();
	}
}
