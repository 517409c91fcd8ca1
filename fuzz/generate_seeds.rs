#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: u32, height: u32, channels: u8, colorspace: u8) -> Vec<u8> {
    let mut h = b"qoif".to_vec();
    h.extend_from_slice(&width.to_be_bytes());
    h.extend_from_slice(&height.to_be_bytes());
    h.push(channels);
    h.push(colorspace);
    h
}

const END: [u8; 8] = [0, 0, 0, 0, 0, 0, 0, 1];

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // 2x1 RGBA, one run of two
    let mut run = header(2, 1, 4, 0);
    run.push(0xc1);
    run.extend_from_slice(&END);
    fs::write(format!("{dir}/run_2x1.qoi"), run).unwrap();

    // 2x2 RGB: RGB, DIFF, LUMA, INDEX
    let mut mixed = header(2, 2, 3, 1);
    mixed.extend_from_slice(&[0xfe, 10, 20, 30]);
    mixed.push(0x40 | 3 << 4 | 2 << 2 | 1);
    mixed.extend_from_slice(&[0x80 | 40, 0x88]);
    mixed.push(0x00 | 53);
    mixed.extend_from_slice(&END);
    fs::write(format!("{dir}/mixed_2x2.qoi"), mixed).unwrap();

    // 1x1 RGBA
    let mut rgba = header(1, 1, 4, 0);
    rgba.extend_from_slice(&[0xff, 1, 2, 3, 4]);
    rgba.extend_from_slice(&END);
    fs::write(format!("{dir}/rgba_1x1.qoi"), rgba).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_magic.bin"), b"qoif").unwrap();
    let mut starved = header(64, 64, 4, 0);
    starved.extend_from_slice(&END);
    fs::write(format!("{dir}/no_opcodes.qoi"), starved).unwrap();
    let mut bad_channels = header(1, 1, 2, 0);
    bad_channels.extend_from_slice(&END);
    fs::write(format!("{dir}/bad_channels.qoi"), bad_channels).unwrap();

    println!("Generated seed corpus in {dir}/");
}
