use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use bayercam::image_pipeline::{
    debayer::demosaic_into, ColorFrame, ExportFrame, FrameImageManager, Geometry, ImageWriter,
    Result,
};
use std::path::Path;

fn generate_mosaic(width: usize, height: usize) -> Vec<u8> {
    (0..height)
        .flat_map(|y| (0..width).map(move |x| ((x * 3 + y * 7) % 256) as u8))
        .collect()
}

struct NullWriter;

impl ImageWriter for NullWriter {
    fn write_image(&self, frame: &ExportFrame, _path: &Path) -> Result<()> {
        black_box(frame.as_bytes());
        Ok(())
    }
}

fn benchmark_demosaic_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("demosaic_by_size");

    let sizes = vec![
        (320, 240, "320x240"),
        (640, 480, "640x480"),
        (1280, 960, "1280x960"),
    ];

    for (width, height, label) in sizes {
        let geometry = Geometry::new(width, height).unwrap();
        let mosaic = generate_mosaic(width, height);
        let mut out = vec![0u8; geometry.color_len()];

        group.bench_with_input(BenchmarkId::from_parameter(label), &mosaic, |b, data| {
            b.iter(|| demosaic_into(black_box(data), geometry, &mut out).unwrap());
        });
    }

    group.finish();
}

fn benchmark_export_repack(c: &mut Criterion) {
    let geometry = Geometry::new(640, 480).unwrap();
    let color = ColorFrame::from_bytes(geometry, generate_mosaic(640 * 3, 480)).unwrap();
    let mut frames = FrameImageManager::initialize(geometry, "bench-%d.png", NullWriter).unwrap();

    c.bench_function("export_640x480", |b| {
        b.iter(|| frames.export(black_box(&color)).unwrap());
    });
}

criterion_group!(benches, benchmark_demosaic_sizes, benchmark_export_repack);
criterion_main!(benches);
