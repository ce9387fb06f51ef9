//! Font size preference, the one value the dashboard persists locally.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;
#[cfg(target_arch = "wasm32")]
use web_sys::Storage;

pub const FONT_KEY: &str = "reco_font_base_px";
pub const FONT_MIN_PX: i32 = 14;
pub const FONT_MAX_PX: i32 = 20;
pub const FONT_DEFAULT_PX: i32 = 16;
pub const FONT_STEP_PX: i32 = 1;

/// CSS custom property the stylesheet sizes text from.
pub const FONT_CSS_VAR: &str = "--font-base";

pub fn clamp_font_px(px: f64) -> i32 {
    if !px.is_finite() {
        return FONT_DEFAULT_PX;
    }
    (px.round() as i32).clamp(FONT_MIN_PX, FONT_MAX_PX)
}

/// Stored value back to a usable size; junk falls back to the default.
pub fn parse_font_px(raw: Option<&str>) -> i32 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .map(clamp_font_px)
        .unwrap_or(FONT_DEFAULT_PX)
}

pub fn increase_font(px: i32) -> i32 {
    clamp_font_px(f64::from(px.saturating_add(FONT_STEP_PX)))
}

pub fn decrease_font(px: i32) -> i32 {
    clamp_font_px(f64::from(px.saturating_sub(FONT_STEP_PX)))
}

pub fn font_css_value(px: i32) -> String {
    format!("{}px", clamp_font_px(f64::from(px)))
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<Storage, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let storage = window
        .local_storage()?
        .ok_or_else(|| JsValue::from_str("localStorage unavailable"))?;
    Ok(storage)
}

/// Read the saved size; any storage failure yields the default.
#[cfg(target_arch = "wasm32")]
pub fn load_font_px(key: &str) -> i32 {
    match local_storage().and_then(|s| s.get_item(key)) {
        Ok(raw) => parse_font_px(raw.as_deref()),
        Err(_) => FONT_DEFAULT_PX,
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_font_px(key: &str, px: i32) -> Result<(), JsValue> {
    let storage = local_storage()?;
    storage.set_item(key, &clamp_font_px(f64::from(px)).to_string())?;
    Ok(())
}

/// Set `--font-base` on the document root.
#[cfg(target_arch = "wasm32")]
pub fn apply_font_px(px: i32) -> Result<(), JsValue> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let root = document
        .document_element()
        .ok_or_else(|| JsValue::from_str("no root element"))?
        .dyn_into::<web_sys::HtmlElement>()?;
    root.style().set_property(FONT_CSS_VAR, &font_css_value(px))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_steps_stay_in_range() {
        let mut px = FONT_DEFAULT_PX;
        for _ in 0..20 {
            px = increase_font(px);
            assert!((FONT_MIN_PX..=FONT_MAX_PX).contains(&px));
        }
        assert_eq!(px, FONT_MAX_PX);
        for _ in 0..20 {
            px = decrease_font(px);
            assert!((FONT_MIN_PX..=FONT_MAX_PX).contains(&px));
        }
        assert_eq!(px, FONT_MIN_PX);
    }

    #[test]
    fn stored_values_are_reclamped() {
        assert_eq!(parse_font_px(None), FONT_DEFAULT_PX);
        assert_eq!(parse_font_px(Some("big")), FONT_DEFAULT_PX);
        assert_eq!(parse_font_px(Some("NaN")), FONT_DEFAULT_PX);
        assert_eq!(parse_font_px(Some("30")), FONT_MAX_PX);
        assert_eq!(parse_font_px(Some("3")), FONT_MIN_PX);
        assert_eq!(parse_font_px(Some(" 17.6 ")), 18);
    }

    #[test]
    fn css_value_has_unit() {
        assert_eq!(font_css_value(15), "15px");
        assert_eq!(font_css_value(99), "20px");
    }
}
