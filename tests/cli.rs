extern crate assert_cmd;
extern crate image;
extern crate mandelbrot;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::Path;
use std::process::Command;
use tempfile::tempdir;

use mandelbrot::{EscapeTimeRenderer, HueArithmetic, Palette, Region};

fn mandel() -> Command {
    Command::cargo_bin("mandel").unwrap()
}

fn pixels(path: &Path) -> (u32, u32, Vec<u8>) {
    let image = image::open(path).unwrap().to_rgb();
    let (width, height) = image.dimensions();
    (width, height, image.into_raw())
}

#[test]
fn renders_the_default_region() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("fractal.png");
    mandel()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "64x48", "-t", "1"])
        .assert()
        .success();

    let (width, height, data) = pixels(&out);
    assert_eq!((width, height), (64, 48));

    let region = Region::new(-2.0, 0.5, -1.25, 1.25).unwrap();
    let counts = EscapeTimeRenderer::new(64, 48, region, 256)
        .unwrap()
        .render_single();
    assert_eq!(data, Palette::default().colourize(&counts).into_raw());
}

#[test]
fn single_and_threaded_agree() {
    let dir = tempdir().unwrap();
    let single = dir.path().join("single.png");
    let threaded = dir.path().join("threaded.png");
    for (out, extra) in &[(&single, "--single"), (&threaded, "--brightness=sigmoid")] {
        mandel()
            .arg("-o")
            .arg(out)
            .args(&["-s", "40x40", "-i", "128", "-t", "1", *extra])
            .assert()
            .success();
    }
    assert_eq!(pixels(&single), pixels(&threaded));
}

#[test]
fn region_inside_the_set_is_one_colour() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("inside.png");
    mandel()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "16x16", "-t", "1", "--region=-0.1,0.1,-0.1,0.1"])
        .assert()
        .success();
    let (_, _, data) = pixels(&out);
    let first = [data[0], data[1], data[2]];
    assert!(data.chunks(3).all(|p| p == first));
}

#[test]
fn linear_brightness_is_accepted() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("linear.png");
    mandel()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "16x16", "-t", "1", "-b", "linear"])
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn continuous_hue_matches_the_library() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("continuous.png");
    mandel()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "48x32", "-t", "1", "--hue", "continuous"])
        .assert()
        .success();

    let (_, _, data) = pixels(&out);
    let region = Region::new(-2.0, 0.5, -1.25, 1.25).unwrap();
    let counts = EscapeTimeRenderer::new(48, 32, region, 256)
        .unwrap()
        .render_single();
    let continuous = Palette::with_hue_arithmetic(HueArithmetic::Continuous);
    assert_eq!(data, continuous.colourize(&counts).into_raw());
}

#[test]
fn rejects_inverted_region() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    mandel()
        .arg("-o")
        .arg(&out)
        .arg("--region=0.5,-2.0,-1.25,1.25")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Region must be"));
    assert!(!out.exists());
}

#[test]
fn rejects_degenerate_size() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    mandel()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "1x64"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 2x2"));
    assert!(!out.exists());
}

#[test]
fn rejects_zero_iterations() {
    let dir = tempdir().unwrap();
    let out = dir.path().join("never.png");
    mandel()
        .arg("-o")
        .arg(&out)
        .args(&["-i", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iteration count must be between"));
}

#[test]
fn requires_an_output_file() {
    mandel().assert().failure();
}
