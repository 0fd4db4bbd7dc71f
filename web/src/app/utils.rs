use suraido_core::Rect;

/// Helper function to use JavaScript's Math.random
pub(in crate::app) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

/// Visible viewport in layout-viewport coordinates. Prefers
/// `visualViewport` when available so on-screen browser chrome and pinch
/// zoom are accounted for.
pub(in crate::app) fn visible_viewport() -> Rect {
    let window = gloo::utils::window();
    if let Some(viewport) = window.visual_viewport() {
        return Rect::new(
            viewport.offset_left(),
            viewport.offset_top(),
            viewport.width(),
            viewport.height(),
        );
    }

    let document = gloo::utils::document_element();
    let width = f64::from(document.client_width())
        .max(window.inner_width().ok().and_then(|w| w.as_f64()).unwrap_or(0.0));
    let height = f64::from(document.client_height())
        .max(window.inner_height().ok().and_then(|h| h.as_f64()).unwrap_or(0.0));
    Rect::new(0.0, 0.0, width, height)
}

/// Bounds of a DOM element as a core `Rect`.
pub(in crate::app) fn element_rect(element: &web_sys::Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
}
