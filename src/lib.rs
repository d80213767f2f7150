use core::ffi::c_int;
use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    ptr, slice,
};

pub mod utilities;
use utilities::{
    asls::AslsOptions,
    calculate_baseline::{calculate_baseline, calculate_baseline_batch},
    errors::SmoothError,
};

const OK: c_int = 0;
const ERR_INVALID_ARGS: c_int = 1;
const ERR_PANIC: c_int = 2;
const ERR_NUMERIC: c_int = 4;

#[repr(C)]
pub struct Buf {
    pub ptr: *mut u8,
    pub len: usize,
}

#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct CSmoothOptions {
    pub smoothness: f64,
    pub asymmetry: f64,
    pub max_iterations: c_int,
    pub tolerance: f64,
}

#[cfg(all(target_arch = "wasm32", not(target_os = "wasi")))]
#[link(wasm_import_module = "env")]
unsafe extern "C" {
    fn js_log(ptr: *const u8, len: usize);
}

#[inline]
pub fn log_json<T: serde::Serialize>(v: &T) {
    if let Ok(s) = serde_json::to_string_pretty(v) {
        #[cfg(all(target_arch = "wasm32", not(target_os = "wasi")))]
        unsafe {
            js_log(s.as_ptr(), s.len());
        }

        #[cfg(not(all(target_arch = "wasm32", not(target_os = "wasi"))))]
        eprintln!("{s}");
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn alloc(size: usize) -> *mut u8 {
    if size == 0 {
        return core::ptr::null_mut();
    }
    let mut v = Vec::<u8>::with_capacity(size);
    let p = v.as_mut_ptr();
    core::mem::forget(v);
    p
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn free_(ptr_raw: *mut u8, size: usize) {
    if !ptr_raw.is_null() {
        let _ = unsafe { Vec::<u8>::from_raw_parts(ptr_raw, size, size) };
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn smooth(
    y_ptr: *const f64,
    len: usize,
    options: *const CSmoothOptions,
    out_baseline: *mut Buf,
) -> c_int {
    if y_ptr.is_null() || out_baseline.is_null() || len < 3 {
        return ERR_INVALID_ARGS;
    }
    let res = catch_unwind(AssertUnwindSafe(|| -> Result<(), c_int> {
        let ys = unsafe { slice::from_raw_parts(y_ptr, len) };
        let opts = build_smooth_options(options);
        let baseline = calculate_baseline(ys, opts).map_err(err_code)?;
        write_buf(out_baseline, f64_slice_to_u8_box(&baseline));
        Ok(())
    }));
    match res {
        Ok(Ok(())) => OK,
        Ok(Err(code)) => code,
        Err(_) => ERR_PANIC,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn smooth_matrix(
    y_ptr: *const f64,
    rows: usize,
    cols: usize,
    options: *const CSmoothOptions,
    cores: usize,
    out_baseline: *mut Buf,
) -> c_int {
    if y_ptr.is_null() || out_baseline.is_null() || rows < 3 || cols == 0 {
        return ERR_INVALID_ARGS;
    }
    let res = catch_unwind(AssertUnwindSafe(|| -> Result<(), c_int> {
        let flat = unsafe { slice::from_raw_parts(y_ptr, rows * cols) };
        let mut columns = Vec::with_capacity(cols);
        for c in 0..cols {
            columns.push(flat[c * rows..(c + 1) * rows].to_vec());
        }
        let opts = build_smooth_options(options);
        let baselines = calculate_baseline_batch(&columns, opts, cores).map_err(err_code)?;

        // column-major, same layout as the input
        let mut out = Vec::with_capacity(rows * cols);
        for col in &baselines {
            out.extend_from_slice(col);
        }
        write_buf(out_baseline, f64_slice_to_u8_box(&out));
        Ok(())
    }));
    match res {
        Ok(Ok(())) => OK,
        Ok(Err(code)) => code,
        Err(_) => ERR_PANIC,
    }
}

#[unsafe(no_mangle)]
pub unsafe extern "C" fn smooth_to_json(
    y_ptr: *const f64,
    len: usize,
    options: *const CSmoothOptions,
    out_json: *mut Buf,
) -> c_int {
    if y_ptr.is_null() || out_json.is_null() || len < 3 {
        return ERR_INVALID_ARGS;
    }
    let res = catch_unwind(AssertUnwindSafe(|| -> Result<(), c_int> {
        let ys = unsafe { slice::from_raw_parts(y_ptr, len) };
        let opts = build_smooth_options(options);
        let baseline = calculate_baseline(ys, opts).map_err(err_code)?;
        let s = serde_json::to_string(&baseline).map_err(|_| ERR_NUMERIC)?;
        write_buf(out_json, s.into_bytes().into_boxed_slice());
        Ok(())
    }));
    match res {
        Ok(Ok(())) => OK,
        Ok(Err(code)) => code,
        Err(_) => ERR_PANIC,
    }
}

fn err_code(e: SmoothError) -> c_int {
    match e {
        SmoothError::NotPositiveDefinite { .. } => ERR_NUMERIC,
        _ => ERR_INVALID_ARGS,
    }
}

fn f64_slice_to_u8_box(v: &[f64]) -> Box<[u8]> {
    let n = v.len() * 8;
    let mut out = Vec::<u8>::with_capacity(n);
    unsafe {
        out.set_len(n);
        ptr::copy_nonoverlapping(v.as_ptr() as *const u8, out.as_mut_ptr(), n);
    }
    out.into_boxed_slice()
}

fn write_buf(out: *mut Buf, bytes: Box<[u8]>) {
    let len = bytes.len();
    let ptr_bytes = Box::into_raw(bytes) as *mut u8;
    unsafe {
        ptr::write_unaligned(
            out,
            Buf {
                ptr: ptr_bytes,
                len,
            },
        )
    };
}

fn build_smooth_options(options: *const CSmoothOptions) -> AslsOptions {
    if options.is_null() {
        return AslsOptions::default();
    }
    let o = unsafe { *options };
    let smoothness = (o.smoothness.is_finite() && o.smoothness > 0.0).then_some(o.smoothness);
    let asymmetry = o.asymmetry.is_finite().then_some(o.asymmetry);
    let max_iterations = (o.max_iterations > 0).then_some(o.max_iterations as usize);
    let tolerance = (o.tolerance.is_finite() && o.tolerance > 0.0).then_some(o.tolerance);
    AslsOptions {
        smoothness,
        asymmetry,
        max_iterations,
        tolerance,
    }
}
