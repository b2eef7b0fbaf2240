//! Asynchronous cover fetcher.
//!
//! Spawns background threads to read or download cover images and decode
//! them into RGBA pixel buffers ready for egui texture creation. Requests are
//! fire-and-forget: a failed cover is logged and remembered so it is never
//! retried, and the record it belongs to simply renders untextured.

use std::collections::{HashMap, HashSet};
use std::sync::mpsc;

use super::fetch::is_remote;

/// Covers wider or taller than this are downscaled before upload.
const MAX_COVER_EDGE: u32 = 512;

/// Decoded image data (RGBA).
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Manages background cover fetching and decoding.
pub struct ImageLoader {
    pending: HashMap<String, mpsc::Receiver<Result<ImageData, String>>>,
    ready: Vec<(String, ImageData)>,
    loaded: HashSet<String>,
    failed: HashSet<String>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    pub fn new() -> Self {
        Self {
            pending: HashMap::new(),
            ready: Vec::new(),
            loaded: HashSet::new(),
            failed: HashSet::new(),
        }
    }

    /// Request a cover to be fetched in the background.
    pub fn request(&mut self, location: &str) {
        if self.loaded.contains(location)
            || self.pending.contains_key(location)
            || self.failed.contains(location)
        {
            return;
        }

        let (tx, rx) = mpsc::channel();
        let owned = location.to_string();

        std::thread::spawn(move || {
            let result = fetch_and_decode(&owned);
            let _ = tx.send(result);
        });

        self.pending.insert(location.to_string(), rx);
    }

    /// Poll for completed downloads. Call every frame.
    pub fn poll(&mut self) {
        let mut completed = Vec::new();
        for (location, rx) in &self.pending {
            match rx.try_recv() {
                Ok(Ok(data)) => {
                    self.loaded.insert(location.clone());
                    self.ready.push((location.clone(), data));
                    completed.push(location.clone());
                }
                Ok(Err(reason)) => {
                    log::warn!("Cover load failed for {}: {}", location, reason);
                    self.failed.insert(location.clone());
                    completed.push(location.clone());
                }
                Err(mpsc::TryRecvError::Disconnected) => {
                    log::warn!("Cover loader for {} exited without a result", location);
                    self.failed.insert(location.clone());
                    completed.push(location.clone());
                }
                Err(mpsc::TryRecvError::Empty) => {}
            }
        }
        for location in completed {
            self.pending.remove(&location);
        }
    }

    /// Take the covers decoded since the last call, ready for upload.
    pub fn take_ready(&mut self) -> Vec<(String, ImageData)> {
        std::mem::take(&mut self.ready)
    }

    /// Number of successfully loaded covers.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Number of covers still being fetched.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of covers that could not be loaded.
    pub fn failed_count(&self) -> usize {
        self.failed.len()
    }
}

fn read_bytes(location: &str) -> Result<Vec<u8>, String> {
    if !is_remote(location) {
        return std::fs::read(location).map_err(|e| e.to_string());
    }

    let resp = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .map_err(|e| e.to_string())?
        .get(location)
        .send()
        .map_err(|e| e.to_string())?;

    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status().as_u16()));
    }

    resp.bytes().map(|b| b.to_vec()).map_err(|e| e.to_string())
}

fn fetch_and_decode(location: &str) -> Result<ImageData, String> {
    let bytes = read_bytes(location)?;
    decode(&bytes)
}

fn decode(bytes: &[u8]) -> Result<ImageData, String> {
    let img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();

    let (w, h, pixels) = if w.max(h) > MAX_COVER_EDGE {
        let ratio = MAX_COVER_EDGE as f32 / w.max(h) as f32;
        let new_w = ((w as f32 * ratio) as u32).max(1);
        let new_h = ((h as f32 * ratio) as u32).max(1);
        let resized =
            image::imageops::resize(&rgba, new_w, new_h, image::imageops::FilterType::Triangle);
        let (rw, rh) = resized.dimensions();
        (rw, rh, resized.into_raw())
    } else {
        (w, h, rgba.into_raw())
    };

    Ok(ImageData {
        width: w,
        height: h,
        rgba: pixels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(w: u32, h: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(w, h, image::Rgba([200, 30, 30, 255]));
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn loader_deduplicates() {
        let mut loader = ImageLoader::new();
        loader.request("no/such/cover.png");
        loader.request("no/such/cover.png"); // should not duplicate
        assert_eq!(loader.pending.len(), 1);
    }

    #[test]
    fn decode_downscales_large_covers() {
        let data = decode(&png_bytes(1024, 512)).unwrap();
        assert_eq!(data.width, MAX_COVER_EDGE);
        assert_eq!(data.height, MAX_COVER_EDGE / 2);
        assert_eq!(data.rgba.len(), (data.width * data.height * 4) as usize);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode(b"not an image").is_err());
    }

    #[test]
    fn missing_file_ends_up_failed_not_retried() {
        let mut loader = ImageLoader::new();
        loader.request("no/such/cover.png");
        for _ in 0..500 {
            loader.poll();
            if loader.pending_count() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        assert_eq!(loader.failed_count(), 1);
        assert!(loader.failed.contains("no/such/cover.png"));

        loader.request("no/such/cover.png");
        assert_eq!(loader.pending_count(), 0);
    }

    #[test]
    fn local_cover_is_decoded() {
        let path = std::env::temp_dir().join(format!("record-spiral-cover-{}.png", std::process::id()));
        std::fs::write(&path, png_bytes(4, 4)).unwrap();
        let location = path.to_string_lossy().into_owned();

        let mut loader = ImageLoader::new();
        loader.request(&location);
        for _ in 0..500 {
            loader.poll();
            if loader.pending_count() == 0 {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        let ready = loader.take_ready();
        assert_eq!(ready.len(), 1);
        assert_eq!(ready[0].0, location);
        assert_eq!((ready[0].1.width, ready[0].1.height), (4, 4));
        assert_eq!(loader.loaded_count(), 1);
        assert!(loader.take_ready().is_empty());
        let _ = std::fs::remove_file(&path);
    }
}
