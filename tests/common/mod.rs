#![allow(dead_code)]

use assert_cmd::Command;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub fn daybook_cmd() -> Command {
    let mut cmd = Command::cargo_bin("daybook").unwrap();
    cmd.env_remove("DAYBOOK_ROOT");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Encoded PNG filled with one gray shade
pub fn png_bytes(shade: u8) -> Vec<u8> {
    let img = RgbImage::from_pixel(8, 8, Rgb([shade, shade, shade]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .unwrap();
    buf
}

/// Write a PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, shade: u8) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, png_bytes(shade)).unwrap();
    path
}
