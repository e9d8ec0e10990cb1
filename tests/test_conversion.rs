use std::path::PathBuf;

use pixgrid::{
    convert, convert_batch,
    io::{load_raw, load_tagged, load_untagged, read_text, save_tagged, to_raw_bytes, TextLayout},
    pipeline::load_jobs,
    validate, validate_buffer, AnyGrid, ConversionJob, ElementType, Error, Geometry, InputSource,
    OutputMode, PixelGrid, SampleBuffer, Stage,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_rgb(width: usize, height: usize) -> PixelGrid<u8> {
    let mut rng = StdRng::seed_from_u64(7);
    let samples = (0..width * height * 3).map(|_| rng.gen()).collect();
    PixelGrid::from_samples(samples, width, height, 3).unwrap()
}

#[test]
fn image_to_raw_and_text() {
    let dir = tempfile::tempdir().unwrap();
    let image_path = dir.path().join("111111_Color.png");
    let grid = AnyGrid::from(random_rgb(24, 16));
    save_tagged(&image_path, &grid).unwrap();

    let raw_path = dir.path().join("111111_Color.raw");
    let report = convert(
        &ConversionJob::new(
            InputSource::Tagged {
                path: image_path.clone(),
            },
            &raw_path,
            OutputMode::Raw,
        )
        .with_sidecar(true),
    )
    .unwrap();
    assert_eq!(report.geometry, Geometry::new(24, 16, 3, ElementType::U8));
    assert_eq!(std::fs::read(&raw_path).unwrap(), to_raw_bytes(&grid));

    // The raw dump is read back through its sidecar.
    let csv_path = dir.path().join("111111_Color.csv");
    convert(&ConversionJob::new(
        InputSource::Untagged {
            path: raw_path,
            geometry: None,
        },
        &csv_path,
        OutputMode::TextTagged,
    ))
    .unwrap();

    let text = std::fs::read_to_string(&csv_path).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("row,column,R,G,B"));
    assert_eq!(lines.count(), 24 * 16);
    assert_eq!(
        read_text(&csv_path, TextLayout::TaggedPixel, &grid.geometry()).unwrap(),
        grid
    );
}

#[test]
fn raw_depth_to_csv_matches_flat_layout() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("depth.raw");
    let samples: Vec<u16> = vec![0, 1000, 65535, 42, 7, 300];
    std::fs::write(&raw_path, bytemuck::cast_slice::<u16, u8>(&samples)).unwrap();

    let csv_path = dir.path().join("depth.csv");
    let geometry = Geometry::new(3, 2, 1, ElementType::U16);
    convert(&ConversionJob::new(
        InputSource::Untagged {
            path: raw_path,
            geometry: Some(geometry),
        },
        &csv_path,
        OutputMode::TextFlat,
    ))
    .unwrap();

    assert_eq!(
        std::fs::read_to_string(&csv_path).unwrap(),
        "0,1000,65535\n42,7,300\n"
    );
}

#[test]
fn wrong_dimensions_are_reported_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("depth.raw");
    std::fs::write(&raw_path, vec![0u8; 424 * 240 * 2]).unwrap();

    let csv_path = dir.path().join("depth.csv");
    let err = convert(&ConversionJob::new(
        InputSource::Untagged {
            path: raw_path.clone(),
            geometry: Some(Geometry::new(640, 480, 1, ElementType::U16)),
        },
        &csv_path,
        OutputMode::TextFlat,
    ))
    .unwrap_err();

    assert_eq!(err.stage(), Stage::Validate);
    assert!(err.to_string().contains("expected 307200 samples"));
    assert!(err.to_string().contains("got 101760 samples in 203520 bytes"));
    assert!(err.to_string().contains(&raw_path.display().to_string()));
    assert!(!csv_path.exists());
}

#[test]
fn depth_cannot_be_saved_as_container() {
    let dir = tempfile::tempdir().unwrap();
    let raw_path = dir.path().join("depth.raw");
    std::fs::write(&raw_path, vec![1u8; 8 * 4 * 2]).unwrap();
    let png_path = dir.path().join("depth.png");

    let err = convert(&ConversionJob::new(
        InputSource::Untagged {
            path: raw_path,
            geometry: Some(Geometry::new(8, 4, 1, ElementType::U16)),
        },
        &png_path,
        OutputMode::Container,
    ))
    .unwrap_err();
    assert!(matches!(err, Error::UnsupportedDepth(ElementType::U16)));
    assert_eq!(err.stage(), Stage::Serialize);
    assert!(!png_path.exists());
}

#[test]
fn raw_round_trip_for_every_element_type() {
    let u8_grid = AnyGrid::from(random_rgb(5, 3));
    let u16_grid = AnyGrid::from(
        PixelGrid::from_samples((0..30u16).map(|v| v * 2000).collect(), 5, 3, 2).unwrap(),
    );
    let f32_grid = AnyGrid::from(
        PixelGrid::from_samples((0..15).map(|v| v as f32 / 3.0).collect(), 5, 3, 1).unwrap(),
    );

    for grid in [u8_grid, u16_grid, f32_grid] {
        let bytes = to_raw_bytes(&grid);
        assert_eq!(bytes, to_raw_bytes(&grid));
        let buffer = SampleBuffer::new(bytes, grid.element_type());
        assert_eq!(validate_buffer(&buffer, &grid.geometry()).unwrap(), grid);
    }
}

#[test]
fn container_round_trip_keeps_samples() {
    let dir = tempfile::tempdir().unwrap();
    for channels in 1..=4 {
        let samples = (0..6 * 5 * channels).map(|v| (v * 3 % 256) as u8).collect();
        let grid = AnyGrid::from(validate(samples, 6, 5, channels).unwrap());
        let path = dir.path().join(format!("grid{channels}.png"));
        save_tagged(&path, &grid).unwrap();
        assert_eq!(load_tagged(&path).unwrap(), grid);
    }
}

#[test]
fn missing_raw_input_creates_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_untagged("/nonexistent", ElementType::U8).unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
    assert_eq!(err.stage(), Stage::Load);

    let err = load_raw(
        dir.path().join("missing.raw"),
        &Geometry::new(1, 1, 1, ElementType::U8),
    )
    .unwrap_err();
    assert!(matches!(err, Error::FileNotFound(_)));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn batch_keeps_going_after_failures() {
    let dir = tempfile::tempdir().unwrap();
    let geometry = Geometry::new(4, 4, 1, ElementType::U8);
    let mut jobs = Vec::new();
    for i in 0..6 {
        let input = dir.path().join(format!("frame{i}.raw"));
        // Every third frame is truncated.
        let len = if i % 3 == 2 { 15 } else { 16 };
        std::fs::write(&input, vec![i as u8; len]).unwrap();
        jobs.push(ConversionJob::new(
            InputSource::Untagged {
                path: input,
                geometry: Some(geometry),
            },
            dir.path().join(format!("frame{i}.csv")),
            OutputMode::TextFlat,
        ));
    }

    let results = convert_batch(&jobs);
    assert_eq!(results.len(), 6);
    for (i, result) in results.iter().enumerate() {
        if i % 3 == 2 {
            assert!(matches!(result, Err(Error::SizeMismatch { .. })));
        } else {
            let report = result.as_ref().unwrap();
            assert_eq!(report.output, dir.path().join(format!("frame{i}.csv")));
        }
    }
}

#[test]
fn jobs_are_read_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("jobs.json");
    std::fs::write(
        &path,
        r#"[
            {"input": {"kind": "tagged", "path": "111111_Depth.png"},
             "output": "111111_Depth_merged.raw", "mode": "raw", "write_sidecar": true},
            {"input": {"kind": "untagged", "path": "111111_Depth.raw"},
             "output": "111111_Depth1.csv", "mode": "text-flat", "precision": 3}
        ]"#,
    )
    .unwrap();

    let jobs = load_jobs(&path).unwrap();
    assert_eq!(jobs.len(), 2);
    assert!(jobs[0].write_sidecar);
    assert_eq!(jobs[0].precision, 2);
    assert_eq!(jobs[1].precision, 3);
    assert_eq!(
        jobs[1].input,
        InputSource::Untagged {
            path: PathBuf::from("111111_Depth.raw"),
            geometry: None
        }
    );
}
