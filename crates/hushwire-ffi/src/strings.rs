//! C string marshalling.

#![allow(unsafe_code)]

use std::{
    ffi::{CStr, CString},
    ptr,
};

use libc::c_char;
use zeroize::Zeroize;

use crate::error::FfiError;

/// Borrow a NUL-terminated C string as UTF-8.
///
/// # Safety
///
/// `ptr` must be NULL or point to a NUL-terminated string that stays valid
/// and unmodified for `'a`.
pub(crate) unsafe fn borrow_str<'a>(
    ptr: *const c_char,
    name: &'static str,
) -> Result<&'a str, FfiError> {
    if ptr.is_null() {
        return Err(FfiError::NullPointer(name));
    }

    // SAFETY: non-null and NUL-terminated per the caller contract
    let cstr = unsafe { CStr::from_ptr(ptr) };
    cstr.to_str().map_err(|_| FfiError::InvalidUtf8(name))
}

/// Copy text into a new C string.
pub(crate) fn to_c_string(value: &str) -> Result<CString, FfiError> {
    CString::new(value.as_bytes()).map_err(|err| {
        err.into_vec().zeroize();
        FfiError::InteriorNul
    })
}

/// Set an out-pointer to NULL if it is non-null.
///
/// # Safety
///
/// `out` must be NULL or valid for a pointer-sized write.
pub(crate) unsafe fn clear_out(out: *mut *mut c_char) {
    if !out.is_null() {
        // SAFETY: non-null and writable per the caller contract
        unsafe { out.write(ptr::null_mut()) };
    }
}

/// Transfer ownership of `value` to the caller through `out`.
///
/// # Safety
///
/// `out` must be non-null and valid for a pointer-sized write.
pub(crate) unsafe fn write_out(out: *mut *mut c_char, value: CString) {
    // SAFETY: non-null and writable per the caller contract
    unsafe { out.write(value.into_raw()) };
}

/// Zeroize and free a string previously handed out by [`write_out`].
///
/// # Safety
///
/// `ptr` must be NULL or a pointer obtained from [`write_out`] that has not
/// been released yet.
pub(crate) unsafe fn release(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: allocated by `CString::into_raw` and not yet freed
    let owned = unsafe { CString::from_raw(ptr) };
    owned.into_bytes_with_nul().zeroize();
}
