use emblem_gen::asset_gen::{build_icns, encode_ico, ICO_SIZES};
use icns::IconType;
use image::{Rgba, RgbaImage};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Opaque red disc on a transparent surround, standing in for a master canvas.
fn test_master() -> RgbaImage {
    RgbaImage::from_fn(256, 256, |x, y| {
        let dx = x as f32 - 127.5;
        let dy = y as f32 - 127.5;
        if (dx * dx + dy * dy).sqrt() < 100.0 {
            Rgba([200, 40, 40, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[test]
fn ico_directory_matches_embedded_sizes() {
    let bytes = encode_ico(&test_master()).expect("encode ico");

    let u16le = |offset: usize| u16::from_le_bytes([bytes[offset], bytes[offset + 1]]);
    let u32le = |offset: usize| {
        u32::from_le_bytes([
            bytes[offset],
            bytes[offset + 1],
            bytes[offset + 2],
            bytes[offset + 3],
        ])
    };

    // ICONDIR: reserved, resource type, entry count.
    assert_eq!(u16le(0), 0);
    assert_eq!(u16le(2), 1);
    assert_eq!(u16le(4) as usize, ICO_SIZES.len());

    let mut expected_offset = 6 + ICO_SIZES.len() * 16;
    for (index, &size) in ICO_SIZES.iter().enumerate() {
        let entry = 6 + index * 16;
        let (width, height) = (bytes[entry], bytes[entry + 1]);
        if size >= 256 {
            assert_eq!((width, height), (0, 0), "max-size entry must use the zero marker");
        } else {
            assert_eq!((width as u32, height as u32), (size, size));
        }

        let length = u32le(entry + 8) as usize;
        let offset = u32le(entry + 12) as usize;
        assert_eq!(
            offset, expected_offset,
            "payloads must be contiguous and in directory order"
        );
        assert!(offset + length <= bytes.len());
        assert_eq!(
            bytes[offset..offset + 8],
            PNG_MAGIC,
            "entry {index} payload is not an encoded PNG"
        );
        expected_offset = offset + length;
    }

    assert_eq!(
        expected_offset,
        bytes.len(),
        "declared byte lengths must cover the file exactly"
    );
}

#[test]
fn icns_family_contains_every_embedded_size() {
    let family = build_icns(&test_master()).expect("build icns");

    for ostype in [
        "is32", "il32", "ic07", "ic08", "ic09", "ic10", "ic11", "ic12", "ic13", "ic14",
    ] {
        let icon_type = IconType::from_ostype(ostype.parse().unwrap()).unwrap();
        assert!(
            family.has_icon_with_type(icon_type),
            "family is missing the {ostype} entry"
        );
    }

    let mut bytes = Vec::new();
    family.write(&mut bytes).expect("write icns");
    assert_eq!(&bytes[0..4], b"icns");
    let declared = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]) as usize;
    assert_eq!(declared, bytes.len(), "icns header length must cover the file");
}
