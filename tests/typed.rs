//! Typed pixel encode/decode (`rgb` and `imgref` features).

#![cfg(feature = "rgb")]

use rgb::{RGB8, RGBA8};
use zenqoi::*;

#[test]
fn encode_decode_rgb8_roundtrip() {
    let pixels = vec![
        RGB8::new(255, 0, 0),
        RGB8::new(0, 255, 0),
        RGB8::new(0, 0, 255),
        RGB8::new(128, 128, 128),
    ];
    let encoded = encode_rgb8(&pixels, 2, 2, Colorspace::Srgb).unwrap();
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.as_pixels::<RGB8>().unwrap(), &pixels[..]);
}

#[test]
fn encode_decode_rgba8_roundtrip() {
    let pixels = vec![
        RGBA8::new(255, 0, 0, 255),
        RGBA8::new(0, 255, 0, 128),
        RGBA8::new(0, 0, 255, 0),
    ];
    let encoded = encode_rgba8(&pixels, 3, 1, Colorspace::Linear).unwrap();
    let decoded = decode(&encoded).unwrap();
    assert_eq!(decoded.descriptor.colorspace, Colorspace::Linear);
    assert_eq!(decoded.as_pixels::<RGBA8>().unwrap(), &pixels[..]);
}

#[test]
fn typed_view_checks_layout() {
    let pixels = vec![RGBA8::new(1, 2, 3, 4); 4];
    let encoded = encode_rgba8(&pixels, 2, 2, Colorspace::Srgb).unwrap();
    let decoded = decode(&encoded).unwrap();
    match decoded.as_pixels::<RGB8>().unwrap_err() {
        QoiError::LayoutMismatch { expected, actual } => {
            assert_eq!(expected, PixelLayout::Rgb8);
            assert_eq!(actual, PixelLayout::Rgba8);
        }
        other => panic!("expected LayoutMismatch, got {other:?}"),
    }

    let rgb = decode_with_channels(&encoded, 3).unwrap();
    assert_eq!(rgb.as_pixels::<RGB8>().unwrap(), &[RGB8::new(1, 2, 3); 4]);
}

#[test]
fn typed_request_checks_descriptor() {
    let pixels = vec![RGB8::new(1, 2, 3); 4];
    let desc = QoiDescriptor::new(2, 2, 4, Colorspace::Srgb);
    let err = EncodeRequest::new(desc).encode_typed(&pixels).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[cfg(feature = "imgref")]
#[test]
fn imgref_roundtrip() {
    let pixels: Vec<RGBA8> = (0..12u8).map(|i| RGBA8::new(i, i * 2, i * 3, 255 - i)).collect();
    let img = imgref::ImgVec::new(pixels.clone(), 4, 3);
    let encoded = encode_img(img.as_ref(), Colorspace::Srgb).unwrap();

    let decoded = decode(&encoded).unwrap();
    let view = decoded.as_imgref::<RGBA8>().unwrap();
    assert_eq!(view.width(), 4);
    assert_eq!(view.height(), 3);
    assert_eq!(view.pixels().collect::<Vec<_>>(), pixels);
    assert_eq!(decoded.to_imgvec::<RGBA8>().unwrap().into_buf(), pixels);
}

#[cfg(feature = "imgref")]
#[test]
fn strided_imgref_is_compacted() {
    // 3x2 image stored with a stride of 5
    let stored: Vec<RGB8> = (0..10u8).map(|i| RGB8::new(i, i, i)).collect();
    let img = imgref::ImgRef::new_stride(&stored, 3, 2, 5);
    let encoded = encode_img(img, Colorspace::Srgb).unwrap();

    let decoded = decode(&encoded).unwrap();
    let expected: Vec<RGB8> = [0u8, 1, 2, 5, 6, 7].iter().map(|&i| RGB8::new(i, i, i)).collect();
    assert_eq!(decoded.as_pixels::<RGB8>().unwrap(), &expected[..]);
}
