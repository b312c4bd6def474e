#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp(width: i32, height: i32, fill: u8) -> Vec<u8> {
    let row = (width.unsigned_abs() as usize * 3).div_ceil(4) * 4;
    let size = 54 + row * height.unsigned_abs() as usize;
    let mut out = vec![fill; size];
    out[..54].fill(0);
    out[0] = b'B';
    out[1] = b'M';
    out[2..6].copy_from_slice(&(size as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&54u32.to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // DIB header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&24u16.to_le_bytes()); // bpp
    out
}

fn main() {
    use std::fs;
    let decode_dir = "fuzz/corpus/fuzz_decode";
    let filter_dir = "fuzz/corpus/fuzz_filter";
    fs::create_dir_all(decode_dir).unwrap();
    fs::create_dir_all(filter_dir).unwrap();

    let seeds = [
        ("bmp_1x1.bmp", bmp(1, 1, 0xff)),
        ("bmp_5x3.bmp", bmp(5, 3, 0x40)),
        ("bmp_4x4_topdown.bmp", bmp(4, -4, 0x80)),
        ("bmp_0x0.bmp", bmp(0, 0, 0)),
    ];
    for (name, data) in &seeds {
        fs::write(format!("{decode_dir}/{name}"), data).unwrap();
        for selector in 0u8..5 {
            let mut seeded = vec![selector];
            seeded.extend_from_slice(data);
            fs::write(format!("{filter_dir}/{selector}_{name}"), seeded).unwrap();
        }
    }

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{decode_dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{decode_dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut truncated = bmp(8, 8, 0x11);
    truncated.truncate(100);
    fs::write(format!("{decode_dir}/bmp_truncated.bmp"), truncated).unwrap();
    let mut rgba = bmp(2, 2, 0x22);
    rgba[28..30].copy_from_slice(&32u16.to_le_bytes());
    fs::write(format!("{decode_dir}/bmp_32bit.bmp"), rgba).unwrap();

    println!("Generated seed corpus in {decode_dir}/ and {filter_dir}/");
}
