//! C interface to the dungeon generator.
//!
//! A map is handed out as an opaque [`Handle`] by [`map_create`] and must be
//! given back exactly once to [`map_destroy`]. Using a handle after it was
//! destroyed, or destroying it twice, is undefined behaviour.
//!
//! The declarations live in `c/include/dungeon.h`, checked against these
//! layouts by `tests/header.rs`. The demonstration client builds against the
//! static library:
//!
//! ```text
//! cargo build -p dungeon-ffi --release
//! cc -Ic/include c/src/main.c ../target/release/libdungeon_ffi.a -lpthread -ldl -lm -o dungeon-demo
//! ```

use std::{ffi::CString, panic::catch_unwind, ptr};

use libc::c_char;

use dungeon::{Config, Error, Map, Vector};

/// Opaque map handle
pub struct Handle {
    map: Map,
    /// NUL terminated copy of the ASCII rendering
    ascii: CString,
}

/// Outcome of [`map_try_create`]
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapStatus {
    Ok = 0,
    InvalidConfig = 1,
    PlacementExhausted = 2,
    RoutingExhausted = 3,
    SizeOverflow = 4,
    NullArgument = 5,
    Panic = 6,
}

impl From<&Error> for MapStatus {
    fn from(err: &Error) -> Self {
        match err {
            Error::InvalidConfig(_) => MapStatus::InvalidConfig,
            Error::PlacementExhausted { .. } => MapStatus::PlacementExhausted,
            Error::RoutingExhausted { .. } => MapStatus::RoutingExhausted,
            Error::SizeOverflow { .. } => MapStatus::SizeOverflow,
        }
    }
}

fn create(config: &Config) -> Result<Box<Handle>, MapStatus> {
    let map = catch_unwind(|| Map::new(config))
        .map_err(|_| {
            log::error!("seed {}: generation panicked", config.seed);
            MapStatus::Panic
        })?
        .map_err(|err| {
            log::warn!("seed {}: {err}", config.seed);
            MapStatus::from(&err)
        })?;
    // the rendering only holds '.', '#', '+' and '\n'
    let ascii = CString::new(map.as_str()).map_err(|_| MapStatus::Panic)?;
    Ok(Box::new(Handle { map, ascii }))
}

/// Generate a map, returning null on failure.
///
/// The config is only read and stays owned by the caller.
///
/// # Safety
/// `config` must be null or point to a valid `Config`.
#[no_mangle]
pub unsafe extern "C" fn map_create(config: *const Config) -> *mut Handle {
    let mut handle = ptr::null_mut();
    map_try_create(config, &mut handle);
    handle
}

/// Generate a map, storing the handle in `*handle` (null on failure).
///
/// # Safety
/// `config` must be null or point to a valid `Config`, `handle` must be null
/// or point to writable memory.
#[no_mangle]
pub unsafe extern "C" fn map_try_create(
    config: *const Config,
    handle: *mut *mut Handle,
) -> MapStatus {
    let Some(handle) = handle.as_mut() else {
        return MapStatus::NullArgument;
    };
    *handle = ptr::null_mut();
    let Some(config) = config.as_ref() else {
        return MapStatus::NullArgument;
    };
    match create(config) {
        Ok(created) => {
            *handle = Box::into_raw(created);
            MapStatus::Ok
        }
        Err(status) => status,
    }
}

/// Release a map and everything it owns. Null is ignored.
///
/// # Safety
/// `handle` must be null or come from `map_create` and not be destroyed yet.
#[no_mangle]
pub unsafe extern "C" fn map_destroy(handle: *mut Handle) {
    if !handle.is_null() {
        drop(Box::from_raw(handle));
    }
}

/// Width and height of the map, `0x0` for a null handle.
///
/// # Safety
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn map_size(handle: *const Handle) -> Vector<u8> {
    handle
        .as_ref()
        .map_or(Vector::new(0, 0), |handle| handle.map.size())
}

/// NUL terminated ASCII rendering, owned by the handle.
///
/// # Safety
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn map_as_string(handle: *const Handle) -> *const c_char {
    handle
        .as_ref()
        .map_or(ptr::null(), |handle| handle.ascii.as_ptr())
}

/// `width * height` cell codes, row-major, owned by the handle.
///
/// # Safety
/// `handle` must be null or a live handle.
#[no_mangle]
pub unsafe extern "C" fn map_as_bytes(handle: *const Handle) -> *const c_char {
    handle
        .as_ref()
        .map_or(ptr::null(), |handle| handle.map.as_bytes().as_ptr().cast())
}

/// Default config, by value
#[no_mangle]
pub extern "C" fn config_default() -> Config {
    Config::default()
}

/// A fresh default config, owned by the caller and released with `config_free`.
///
/// Every call returns a new allocation: callers never share it.
#[no_mangle]
pub extern "C" fn get_config() -> *mut Config {
    Box::into_raw(Box::new(Config::default()))
}

/// Release a config obtained from `get_config`. Null is ignored.
///
/// # Safety
/// `config` must be null or come from `get_config` and not be freed yet.
#[no_mangle]
pub unsafe extern "C" fn config_free(config: *mut Config) {
    if !config.is_null() {
        drop(Box::from_raw(config));
    }
}
