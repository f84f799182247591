// web_app/export/download.rs - Hand generated bytes to the browser as a file download

use super::ExportError;

pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Save `bytes` as `filename` through a temporary object URL in the current tab
#[cfg(feature = "hydrate")]
pub fn trigger_download(filename: &str, bytes: &[u8], mime: &str) -> Result<(), ExportError> {
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let js_err = |e: wasm_bindgen::JsValue| ExportError::Download(format!("{e:?}"));

    let window = web_sys::window().ok_or_else(|| ExportError::Download("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| ExportError::Download("no document".to_string()))?;
    let body = document
        .body()
        .ok_or_else(|| ExportError::Download("no document body".to_string()))?;

    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(js_err)?;
    let url = Url::create_object_url_with_blob(&blob).map_err(js_err)?;

    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(js_err)?
        .dyn_into()
        .map_err(|_| ExportError::Download("could not create a link element".to_string()))?;
    anchor.set_href(&url);
    anchor.set_download(filename);

    body.append_child(&anchor).map_err(js_err)?;
    anchor.click();
    let _ = body.remove_child(&anchor);
    let _ = Url::revoke_object_url(&url);

    tracing::info!("Download started: {} ({} bytes)", filename, bytes.len());
    Ok(())
}

#[cfg(not(feature = "hydrate"))]
pub fn trigger_download(filename: &str, _bytes: &[u8], _mime: &str) -> Result<(), ExportError> {
    Err(ExportError::Download(format!(
        "cannot save {filename}: downloads need a browser"
    )))
}
