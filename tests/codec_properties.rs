use image::{Rgb, RgbImage};
use ss_steganography::codec::{
    self, decode, decode_detailed, encode, encode_in_place, pixel_order, Capacity, StegoError,
    Traversal,
};

/// Deterministic noisy carrier, so LSBs are not trivially constant.
fn noisy(width: u32, height: u32, salt: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        let v = (x.wrapping_mul(2_654_435_761) ^ y.wrapping_mul(40_503) ^ salt).rotate_left(7);
        Rgb([v as u8, (v >> 8) as u8, (v >> 16) as u8])
    })
}

#[test]
fn test_round_trip_across_sizes_and_passwords() {
    let messages = ["x", "hello world", "ünïcödé ✓", "line one\nline two\n"];
    let passwords = [None, Some("secret"), Some("a much longer pass phrase")];

    for (i, (width, height)) in [(10, 10), (31, 7), (64, 48)].into_iter().enumerate() {
        let carrier = noisy(width, height, i as u32);
        for message in messages {
            if !Capacity::of(width, height).fits(message.len()) {
                continue;
            }
            for password in passwords {
                let stego = encode(&carrier, message.as_bytes(), password).unwrap();
                assert_eq!(
                    decode(&stego, password).as_deref(),
                    Some(message),
                    "{}x{} password={:?}",
                    width,
                    height,
                    password
                );
            }
        }
    }
}

#[test]
fn test_concrete_ten_by_ten_scenario() {
    let carrier = noisy(10, 10, 99);
    assert_eq!(Capacity::of(10, 10).available_bits, 300);

    let stego = encode(&carrier, b"hi", Some("pw1")).unwrap();
    assert_eq!(decode(&stego, Some("pw1")), Some("hi".to_string()));
    assert_eq!(decode(&stego, Some("pw2")), None);
}

#[test]
fn test_capacity_boundary() {
    // 8x4 pixels = 96 bits = exactly 11 header bytes + 1 message byte.
    let carrier = noisy(8, 4, 1);
    let stego = encode(&carrier, b"A", None).unwrap();
    assert_eq!(decode(&stego, None), Some("A".to_string()));

    let err = encode(&carrier, b"AB", None).unwrap_err();
    assert_eq!(
        err,
        StegoError::Capacity {
            required_bits: 104,
            available_bits: 96
        }
    );
}

#[test]
fn test_failed_encode_does_not_mutate() {
    let original = noisy(5, 5, 3);
    let mut image = original.clone();
    assert!(encode_in_place(&mut image, &[b'z'; 100], Some("pw")).is_err());
    assert_eq!(image, original);
}

#[test]
fn test_unpassworded_message_found_with_any_password() {
    let stego = encode(&noisy(30, 30, 5), b"open secret", None).unwrap();
    for guess in ["", "wrong", "another guess"] {
        assert_eq!(decode(&stego, Some(guess)), Some("open secret".to_string()));
    }
    assert_eq!(
        decode_detailed(&stego, Some("wrong")).unwrap().traversal,
        Traversal::Natural
    );
}

#[test]
fn test_clean_images_never_yield_a_message() {
    for salt in 0..8 {
        let image = noisy(40, 40, salt);
        assert_eq!(decode(&image, None), None);
        assert_eq!(decode(&image, Some("pw")), None);
    }
    assert_eq!(decode(&RgbImage::new(0, 0), Some("pw")), None);
}

#[test]
fn test_pixel_order_reproducible_and_password_specific() {
    let a = pixel_order(50, 20, Some("k")).unwrap();
    let b = pixel_order(50, 20, Some("k")).unwrap();
    let c = pixel_order(50, 20, Some("K")).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(codec::password_seed("k"), codec::password_seed("k"));
}

#[test]
fn test_base64_fallback_for_binary_payload() {
    let payload = [0xC3, 0x28, 0xA0, 0xA1];
    let stego = encode(&noisy(20, 20, 2), &payload, Some("bin")).unwrap();
    assert_eq!(decode(&stego, Some("bin")), Some("wyigoQ==".to_string()));
}

#[test]
fn test_password_stego_bits_land_on_fixed_pixels() {
    // With "secret" on a 10x10 carrier the walk starts (3,5), (5,6), (2,7), ...
    let order = pixel_order(10, 10, Some("secret")).unwrap();
    assert_eq!(
        order[..6],
        [(3, 5), (5, 6), (2, 7), (5, 8), (4, 7), (9, 7)]
    );

    let carrier = RgbImage::from_pixel(10, 10, Rgb([0x80, 0x80, 0x80]));
    let stego = encode(&carrier, b"hi", Some("secret")).unwrap();

    // 'S' = 0x53, LSB first: 1 1 0 | 0 1 0 | 1 0 ...
    assert_eq!(stego.get_pixel(3, 5).0, [0x81, 0x81, 0x80]);
    assert_eq!(stego.get_pixel(5, 6).0, [0x80, 0x81, 0x80]);
    assert_eq!(stego.get_pixel(2, 7).0[..2], [0x81, 0x80]);
    // Raster-order start of the image is not the first pixel visited.
    assert_eq!(stego.get_pixel(0, 0).0, [0x80, 0x80, 0x80]);
}

#[test]
fn test_concurrent_calls_match_single_threaded_results() {
    let passwords = ["a", "b", "c", "d"];
    let carrier = noisy(48, 48, 11);

    let expected: Vec<_> = passwords
        .iter()
        .map(|&password| {
            (
                pixel_order(48, 48, Some(password)).unwrap(),
                encode(&carrier, password.as_bytes(), Some(password)).unwrap(),
            )
        })
        .collect();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let carrier = carrier.clone();
            let password = passwords[i % passwords.len()];
            std::thread::spawn(move || {
                let order = pixel_order(48, 48, Some(password)).unwrap();
                let stego = encode(&carrier, password.as_bytes(), Some(password)).unwrap();
                let message = decode(&stego, Some(password));
                (i % passwords.len(), order, stego, message)
            })
        })
        .collect();

    for handle in handles {
        let (slot, order, stego, message) = handle.join().unwrap();
        assert_eq!(order, expected[slot].0);
        assert_eq!(stego, expected[slot].1);
        assert_eq!(message.as_deref(), Some(passwords[slot]));
    }
}
