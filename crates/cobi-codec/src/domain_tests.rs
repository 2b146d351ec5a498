//! Domain-critical regression tests for cobi-codec.
//!
//! Each test guards one property the format depends on. The failure
//! messages say what kind of bug a failure points at.

#[cfg(test)]
mod domain_tests {
    use crate::area::{AreaRecord, MAX_AREA_SIDE};
    use crate::codec::CobiCodec;
    use crate::coverage::CoverageTracker;
    use crate::decode::{decode, decode_channel};
    use crate::encode::{encode, encode_channel};
    use crate::error::CodecError;
    use crate::interpolate::interpolate;
    use crate::partition::{ChannelPartition, EncodedImage};
    use crate::quality::{QualityEvaluator, QualityOptions};
    use crate::raster::{ChannelKind, Image, Plane};

    /// Deterministic test image mixing the content the encoder has to deal
    /// with: a smooth red gradient, a hard green edge, noisy blue texture
    /// and a flat alpha plane.
    fn mixed_image(width: usize, height: usize) -> Image {
        let mut rgba = Vec::with_capacity(width * height * 4);
        let mut seed: u32 = 0x2545_f491;
        for y in 0..height {
            for x in 0..width {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                let r = ((x * 200) / width + (y * 50) / height) as u8;
                let g = if x * 3 < width * 2 { 30 } else { 220 };
                let b = 100 + (seed % 60) as u8;
                rgba.extend_from_slice(&[r, g, b, 255]);
            }
        }
        Image::from_rgba(width, height, &rgba).unwrap()
    }

    fn coverage_counts(partition: &ChannelPartition) -> Vec<u32> {
        let mut counts = vec![0u32; partition.width() * partition.height()];
        for area in partition.areas() {
            let rect = area.rect();
            for y in rect.y..rect.bottom() {
                for x in rect.x..rect.right() {
                    counts[y * partition.width() + x] += 1;
                }
            }
        }
        counts
    }

    // ========================================================================
    // Partition structure
    // ========================================================================

    /// If this breaks, the encoder leaves holes or emits overlapping
    /// rectangles, and the decoder would reject its own output.
    #[test]
    fn test_every_pixel_covered_exactly_once() {
        let image = mixed_image(48, 37);
        let encoded = encode(&image, &QualityOptions::default()).unwrap();

        for kind in ChannelKind::ALL {
            let partition = encoded.channel(kind);
            let counts = coverage_counts(partition);
            if let Some(index) = counts.iter().position(|&c| c != 1) {
                panic!(
                    "REGRESSION: channel {} pixel ({}, {}) covered {} times",
                    kind,
                    index % 48,
                    index / 48,
                    counts[index]
                );
            }
            assert_eq!(partition.validate(), Ok(()));
        }
    }

    /// If this breaks, records no longer respect the one-byte size fields
    /// of the container or the raster bounds.
    #[test]
    fn test_records_fit_raster_and_side_limit() {
        let image = mixed_image(300, 20);
        let encoded = encode(&image, &QualityOptions::default()).unwrap();

        for kind in ChannelKind::ALL {
            for area in encoded.channel(kind).areas() {
                let rect = area.rect();
                assert!(rect.width >= 1 && rect.width <= MAX_AREA_SIDE);
                assert!(rect.height >= 1 && rect.height <= MAX_AREA_SIDE);
                assert!(rect.right() <= 300 && rect.bottom() <= 20);
            }
        }
    }

    /// If this breaks, records are emitted out of frontier order, which the
    /// container relies on for stable output.
    #[test]
    fn test_records_follow_frontier_order() {
        let image = mixed_image(40, 30);
        let encoded = encode(&image, &QualityOptions::default()).unwrap();

        for kind in ChannelKind::ALL {
            let partition = encoded.channel(kind);
            let mut tracker = CoverageTracker::new(partition.width(), partition.height());
            for area in partition.areas() {
                assert_eq!(
                    tracker.frontier(),
                    Some((area.x as usize, area.y as usize)),
                    "REGRESSION: channel {} record not anchored at the frontier",
                    kind
                );
                tracker.commit(area.rect());
            }
            assert_eq!(tracker.frontier(), None);
        }
    }

    /// Every non-empty channel yields at least one record and the encoder
    /// terminates on the smallest possible raster.
    #[test]
    fn test_termination_yields_records() {
        for (w, h) in [(1, 1), (1, 9), (9, 1), (3, 3)] {
            let plane = Plane::filled(w, h, 77);
            let partition = encode_channel(&plane, &QualityOptions::default()).unwrap();
            assert!(!partition.is_empty(), "{}x{} produced no records", w, h);
        }
    }

    // ========================================================================
    // Reconstruction fidelity
    // ========================================================================

    /// If this breaks, corners are sampled from the wrong pixels or the
    /// interpolator overwrites them. Corners must survive exactly.
    #[test]
    fn test_corner_samples_reproduced_exactly() {
        let image = mixed_image(45, 33);
        let encoded = encode(&image, &QualityOptions::default()).unwrap();
        let decoded = decode(&encoded).unwrap();

        for kind in ChannelKind::ALL {
            let original = image.plane(kind);
            let rebuilt = decoded.plane(kind);
            for area in encoded.channel(kind).areas() {
                for (x, y) in area.rect().corner_positions() {
                    assert_eq!(
                        rebuilt.get(x, y),
                        original.get(x, y),
                        "REGRESSION: channel {} corner ({}, {}) changed",
                        kind,
                        x,
                        y
                    );
                }
            }
        }
    }

    /// If this breaks, the encoder accepted a rectangle whose reconstruction
    /// exceeds the threshold. Only rectangles widened to close a sliver may
    /// exceed it, and those always span the whole uncovered run.
    #[test]
    fn test_accepted_rectangles_meet_threshold() {
        let image = mixed_image(50, 40);
        let options = QualityOptions::default();
        let encoded = encode(&image, &options).unwrap();

        for kind in ChannelKind::ALL {
            let plane = image.plane(kind);
            let evaluator = QualityEvaluator::new(plane, &options);
            let mut tracker = CoverageTracker::new(plane.width(), plane.height());
            for area in encoded.channel(kind).areas() {
                let rect = area.rect();
                let run = tracker.run_width(rect.x, rect.y, MAX_AREA_SIDE);
                if rect.width < run {
                    let score = evaluator.score(rect);
                    assert!(
                        evaluator.accepts(score),
                        "REGRESSION: channel {} rect {:?} scored {}",
                        kind,
                        rect,
                        score
                    );
                }
                tracker.commit(rect);
            }
        }
    }

    /// If this breaks, decoding depends on hidden state.
    #[test]
    fn test_decode_is_idempotent() {
        let image = mixed_image(30, 30);
        let codec = CobiCodec::new();
        let encoded = codec.encode(&image).unwrap();

        let first = codec.decode(&encoded).unwrap();
        let second = codec.decode(&encoded).unwrap();
        assert_eq!(first, second);
    }

    /// If this breaks, parallel and sequential encodes diverge or the
    /// encoder is nondeterministic.
    #[test]
    fn test_encode_is_deterministic() {
        let image = mixed_image(33, 21);
        let options = QualityOptions::default();
        let a = encode(&image, &options).unwrap();
        let b = encode(&image, &options).unwrap();
        assert_eq!(a, b);

        for kind in ChannelKind::ALL {
            let single = encode_channel(image.plane(kind), &options).unwrap();
            assert_eq!(&single, a.channel(kind));
        }
    }

    /// If this breaks, flat content is no longer collapsed into the largest
    /// rectangles the format allows.
    #[test]
    fn test_flat_region_collapses_to_two_rectangles() {
        let rgba = vec![90u8; 300 * 10 * 4];
        let image = Image::from_rgba(300, 10, &rgba).unwrap();
        let encoded = encode(&image, &QualityOptions::default()).unwrap();

        for kind in ChannelKind::ALL {
            let shapes: Vec<_> = encoded
                .channel(kind)
                .areas()
                .iter()
                .map(|a| (a.x, a.y, a.width, a.height))
                .collect();
            assert_eq!(
                shapes,
                vec![(0, 0, 255, 10), (255, 0, 45, 10)],
                "REGRESSION: channel {} flat region not collapsed",
                kind
            );
        }
        assert_eq!(decode(&encoded).unwrap(), image);
    }

    // ========================================================================
    // Interpolation and decode fixtures
    // ========================================================================

    /// If this breaks, the rounding or pass order of the interpolator
    /// changed, which silently alters every decoded image.
    #[test]
    fn test_interpolate_reference_grid() {
        let block = interpolate(3, 4, [0, 8, 5, 10]);
        let columns: Vec<Vec<u8>> = (0..3).map(|x| block.column(x)).collect();
        assert_eq!(
            columns,
            vec![vec![0, 1, 3, 5], vec![4, 5, 6, 7], vec![8, 8, 9, 10]]
        );
    }

    /// 8x5 raster with three rectangles:
    ///
    /// ```text
    /// 11111222
    /// 11111222
    /// 11111222
    /// 11111333
    /// 11111333
    /// ```
    ///
    /// If this breaks, the decoder places blocks at the wrong offsets or
    /// confuses channels.
    #[test]
    fn test_three_rectangle_fixture_decodes_in_every_channel() {
        let base: [(u32, u32, u8, u8, [u8; 4]); 3] = [
            (0, 0, 5, 5, [0, 10, 5, 20]),
            (5, 0, 3, 3, [12, 14, 18, 10]),
            (5, 3, 3, 2, [19, 19, 20, 20]),
        ];
        let channel = |offset: u8| {
            let areas = base
                .iter()
                .map(|&(x, y, width, height, corners)| AreaRecord {
                    x,
                    y,
                    width,
                    height,
                    corners: corners.map(|c| c + offset),
                })
                .collect();
            ChannelPartition::new(8, 5, areas)
        };
        let encoded =
            EncodedImage::from_channels([channel(0), channel(40), channel(80), channel(120)])
                .unwrap();

        let image = decode(&encoded).unwrap();
        for kind in ChannelKind::ALL {
            let plane = image.plane(kind);
            for area in encoded.channel(kind).areas() {
                let block = area.interpolate();
                let rect = area.rect();
                for dy in 0..rect.height {
                    for dx in 0..rect.width {
                        assert_eq!(
                            plane.get(rect.x + dx, rect.y + dy),
                            block.get(dx, dy),
                            "channel {} pixel ({}, {})",
                            kind,
                            rect.x + dx,
                            rect.y + dy
                        );
                    }
                }
            }
        }
        assert_eq!(image.plane(ChannelKind::Green).get(0, 0), 40);
        assert_eq!(image.plane(ChannelKind::Alpha).get(7, 4), 140);
    }

    /// If this breaks, a channel of the wrong size is silently accepted.
    #[test]
    fn test_mismatched_planes_rejected() {
        let planes = [
            Plane::filled(4, 4, 0),
            Plane::filled(4, 4, 0),
            Plane::filled(4, 3, 0),
            Plane::filled(4, 4, 0),
        ];
        assert_eq!(
            Image::from_planes(planes).unwrap_err(),
            CodecError::DimensionMismatch {
                channel: ChannelKind::Blue,
                expected: (4, 4),
                actual: (4, 3),
            }
        );
    }

    /// If this breaks, the decoder accepts partitions with holes and returns
    /// uninitialised samples.
    #[test]
    fn test_decoder_rejects_incomplete_partition() {
        let partition = ChannelPartition::new(
            3,
            2,
            vec![AreaRecord {
                x: 0,
                y: 0,
                width: 3,
                height: 1,
                corners: [1; 4],
            }],
        );
        assert_eq!(
            decode_channel(&partition),
            Err(CodecError::CoverageGap { x: 0, y: 1 })
        );
    }
}
