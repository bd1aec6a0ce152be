use std::path::{Path, PathBuf};

use graphfix_core::{PixelSource, build_pixel_grid};
use image::{ImageFormat, Rgba, RgbaImage};
use rstest::{fixture, rstest};
use tempfile::TempDir;

use super::{ImageProvider, ImageProviderError};

#[fixture]
fn workdir() -> TempDir {
    tempfile::tempdir().expect("temporary directory")
}

fn write_checkerboard(dir: &Path, name: &str, format: ImageFormat) -> PathBuf {
    let image = RgbaImage::from_fn(3, 2, |x, y| {
        if (x + y) % 2 == 0 {
            Rgba([255, 0, 0, 128])
        } else {
            Rgba([0, 0, 255, 255])
        }
    });
    let path = dir.join(name);
    image
        .save_with_format(&path, format)
        .expect("image must encode");
    path
}

#[rstest]
fn loads_png_and_drops_alpha(workdir: TempDir) {
    let path = write_checkerboard(workdir.path(), "board.png", ImageFormat::Png);
    let provider = ImageProvider::try_from_path(&path).expect("png must decode");
    assert_eq!(provider.width(), 3);
    assert_eq!(provider.height(), 2);
    assert_eq!(provider.rgb(0, 0), Some([255, 0, 0]));
    assert_eq!(provider.rgb(1, 0), Some([0, 0, 255]));
    assert_eq!(provider.rgb(3, 0), None);
    assert_eq!(provider.rgb(0, 2), None);
}

#[rstest]
fn format_is_detected_from_contents(workdir: TempDir) {
    let path = write_checkerboard(workdir.path(), "board.bmp", ImageFormat::Bmp);
    let renamed = workdir.path().join("board.data");
    std::fs::rename(&path, &renamed).expect("rename must succeed");
    let provider = ImageProvider::try_from_path(&renamed).expect("bmp must decode");
    assert_eq!(provider.pixel_count(), Some(6));
}

#[rstest]
fn grid_from_decoded_image(workdir: TempDir) {
    let path = write_checkerboard(workdir.path(), "board.png", ImageFormat::Png);
    let provider = ImageProvider::try_from_path(&path).expect("png must decode");
    let graph = build_pixel_grid(&provider).expect("grid must build");
    assert_eq!(graph.node_count(), 6);
    assert_eq!(graph.edge_count(), 7);
    let color = graph.nodes()[1].color().expect("grid nodes are coloured");
    assert_eq!(color.channels(), [0.0, 0.0, 1.0, 0.0]);
}

#[rstest]
fn missing_file_is_an_io_error(workdir: TempDir) {
    let path = workdir.path().join("absent.png");
    let err = ImageProvider::try_from_path(&path).expect_err("missing file must fail");
    assert!(matches!(err, ImageProviderError::Io { .. }));
    assert_eq!(err.path(), path);
}

#[rstest]
#[case::corrupt_png("broken.png", b"\x89PNG\r\n\x1a\nnot really".as_slice())]
#[case::unknown_format("notes.txt", b"plain text".as_slice())]
fn undecodable_data_is_a_decode_error(
    workdir: TempDir,
    #[case] name: &str,
    #[case] contents: &[u8],
) {
    let path = workdir.path().join(name);
    std::fs::write(&path, contents).expect("fixture must be written");
    let err = ImageProvider::try_from_path(&path).expect_err("bad data must fail");
    assert!(matches!(err, ImageProviderError::Decode { .. }));
    assert!(err.to_string().contains(name));
}
