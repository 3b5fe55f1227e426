//! macOS native screen color sampler, used to pick a row's input color.
//!
//! Uses `NSColorSampler` via Objective-C FFI. macOS shows a magnifier
//! overlay, the user clicks a pixel, and the handler fires with the sampled
//! color converted to 8-bit sRGB.

use std::cell::Cell;

use block2::RcBlock;
use objc2::rc::{Allocated, Id};
use objc2::runtime::{AnyClass, AnyObject};
use objc2::{msg_send, msg_send_id};

fn to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Invokes the screen color sampler.
///
/// `on_pick` receives the sampled pixel as 0–255 sRGB. Cancelling (Esc)
/// never calls it. Must be called from the main thread.
pub(crate) fn sample_rgb8(on_pick: impl FnOnce([u8; 3]) + 'static) {
    let Some(cls) = AnyClass::get("NSColorSampler") else {
        tracing::warn!("NSColorSampler unavailable");
        return;
    };

    let sampler: Allocated<AnyObject> = unsafe { msg_send_id![cls, alloc] };
    let sampler: Id<AnyObject> = unsafe { msg_send_id![sampler, init] };

    type Callback = Cell<Option<Box<dyn FnOnce([u8; 3])>>>;
    let callback: Callback = Cell::new(Some(Box::new(on_pick)));

    let block = RcBlock::new(move |color_ptr: *mut AnyObject| {
        if color_ptr.is_null() {
            return;
        }
        unsafe {
            let Some(space_cls) = AnyClass::get("NSColorSpace") else {
                return;
            };
            let srgb: *const AnyObject = msg_send![space_cls, sRGBColorSpace];
            if srgb.is_null() {
                return;
            }
            let converted: *const AnyObject =
                msg_send![&*color_ptr, colorUsingColorSpace: &*srgb];
            if converted.is_null() {
                return;
            }
            let (mut r, mut g, mut b, mut a) = (0.0_f64, 0.0_f64, 0.0_f64, 0.0_f64);
            let _: () = msg_send![
                &*converted,
                getRed: &mut r,
                green: &mut g,
                blue: &mut b,
                alpha: &mut a
            ];
            if let Some(cb) = callback.take() {
                cb([to_u8(r), to_u8(g), to_u8(b)]);
            }
        }
    });

    unsafe {
        let _: () = msg_send![&*sampler, showSamplerWithSelectionHandler: &*block];
    }
}
