//! C-ABI FFI bindings for cross-language integration.
//!
//! This module provides a C-compatible API for using plainpdf from other
//! languages such as C#, Python, and Node.js.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr;

use crate::{LayoutOptions, SynthesizeOptions, TextEncoding, WriteOptions};

/// Result structure returned by FFI functions.
#[repr(C)]
pub struct PlainpdfResult {
    /// Whether the operation succeeded.
    pub success: bool,
    /// Output bytes (null if failed or if the call produces no data).
    pub data: *mut u8,
    /// Length of `data` in bytes.
    pub len: usize,
    /// Error message (null if succeeded).
    pub error: *mut c_char,
}

impl PlainpdfResult {
    fn success(data: Vec<u8>) -> Self {
        let len = data.len();
        let data = Box::into_raw(data.into_boxed_slice()) as *mut u8;
        Self {
            success: true,
            data,
            len,
            error: ptr::null_mut(),
        }
    }

    fn empty() -> Self {
        Self {
            success: true,
            data: ptr::null_mut(),
            len: 0,
            error: ptr::null_mut(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            success: false,
            data: ptr::null_mut(),
            len: 0,
            error: CString::new(message).unwrap_or_default().into_raw(),
        }
    }
}

/// Options for synthesis via FFI. Zero values fall back to the defaults.
#[repr(C)]
#[derive(Default)]
pub struct PlainpdfOptions {
    /// Characters per line (0 = default).
    pub column_width: u32,
    /// Lines per page (0 = default).
    pub lines_per_page: u32,
    /// Compress content streams.
    pub compress: bool,
    /// Encode text as WinAnsi instead of UTF-8.
    pub win_ansi: bool,
}

impl From<&PlainpdfOptions> for SynthesizeOptions {
    fn from(options: &PlainpdfOptions) -> Self {
        let mut layout = LayoutOptions::default();
        if options.column_width > 0 {
            layout = layout.with_column_width(options.column_width as usize);
        }
        if options.lines_per_page > 0 {
            layout = layout.with_lines_per_page(options.lines_per_page as usize);
        }
        let encoding = if options.win_ansi {
            TextEncoding::WinAnsi
        } else {
            TextEncoding::Utf8
        };
        SynthesizeOptions::new().with_layout(layout).with_write_options(
            WriteOptions::new()
                .with_encoding(encoding)
                .with_compression(options.compress),
        )
    }
}

unsafe fn read_str<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, String> {
    if ptr.is_null() {
        return Err(format!("{} cannot be null", what));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| format!("Invalid UTF-8 {}", what))
}

/// Synthesize a PDF from text with default options.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `plainpdf_free_result`.
#[no_mangle]
pub unsafe extern "C" fn plainpdf_synthesize(text: *const c_char) -> PlainpdfResult {
    plainpdf_synthesize_with_options(text, PlainpdfOptions::default())
}

/// Synthesize a PDF from text with options.
///
/// # Safety
///
/// The `text` must be a valid null-terminated UTF-8 string.
/// The returned result must be freed with `plainpdf_free_result`.
#[no_mangle]
pub unsafe extern "C" fn plainpdf_synthesize_with_options(
    text: *const c_char,
    options: PlainpdfOptions,
) -> PlainpdfResult {
    let text = match read_str(text, "text") {
        Ok(s) => s,
        Err(e) => return PlainpdfResult::error(e),
    };

    match crate::synthesize_with_options(text, &SynthesizeOptions::from(&options)) {
        Ok(bytes) => PlainpdfResult::success(bytes),
        Err(e) => PlainpdfResult::error(e.to_string()),
    }
}

/// Synthesize a PDF from text and write it to `path`.
///
/// # Safety
///
/// Both `text` and `path` must be valid null-terminated UTF-8 strings.
/// The returned result must be freed with `plainpdf_free_result`.
#[no_mangle]
pub unsafe extern "C" fn plainpdf_write_file(
    text: *const c_char,
    path: *const c_char,
) -> PlainpdfResult {
    let (text, path) = match (read_str(text, "text"), read_str(path, "path")) {
        (Ok(t), Ok(p)) => (t, p),
        (Err(e), _) | (_, Err(e)) => return PlainpdfResult::error(e),
    };

    match crate::write_file(Path::new(path), text, &SynthesizeOptions::default()) {
        Ok(()) => PlainpdfResult::empty(),
        Err(e) => PlainpdfResult::error(e.to_string()),
    }
}

/// Get the page count of a PDF buffer produced by plainpdf.
///
/// # Safety
///
/// `data` must point to `len` readable bytes.
/// Returns -1 on error.
#[no_mangle]
pub unsafe extern "C" fn plainpdf_page_count(data: *const u8, len: usize) -> i32 {
    if data.is_null() {
        return -1;
    }
    let bytes = std::slice::from_raw_parts(data, len);
    match crate::inspect(bytes) {
        Ok(report) => page_count_code(report.page_count),
        Err(_) => -1,
    }
}

/// Page count as returned over the C ABI; counts beyond `i32::MAX` are
/// reported as errors.
fn page_count_code(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(-1)
}

/// Free a result returned by any plainpdf function.
///
/// # Safety
///
/// The `result` must have been returned by a plainpdf function.
/// This function should only be called once per result.
#[no_mangle]
pub unsafe extern "C" fn plainpdf_free_result(result: PlainpdfResult) {
    if !result.data.is_null() {
        drop(Box::from_raw(ptr::slice_from_raw_parts_mut(
            result.data,
            result.len,
        )));
    }
    if !result.error.is_null() {
        drop(CString::from_raw(result.error));
    }
}

/// Get the version of the plainpdf library.
///
/// # Safety
///
/// The returned string is statically allocated and should not be freed.
#[no_mangle]
pub extern "C" fn plainpdf_version() -> *const c_char {
    static VERSION: &[u8] = concat!(env!("CARGO_PKG_VERSION"), "\0").as_bytes();
    VERSION.as_ptr() as *const c_char
}
