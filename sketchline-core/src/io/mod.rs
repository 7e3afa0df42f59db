//! # MMVS
//!
//! The native stroke file. Everything is little-endian, and every float is an `f32`:
//!
//! ```text
//! "MMVS"        magic
//! u32           version, 1
//! u32           stroke count
//! per stroke:
//!   f32 * 3     color, rgb
//!   f32         base width
//!   u32         sample count
//!   per sample:
//!     f32 * 6   x, y, pressure, tilt x, tilt y, timestamp
//! ```
//!
//! The per-sample record is exactly the in-memory layout of [`StrokeSample`], so samples are
//! converted wholesale rather than field-by-field.

use std::io::{Read, Write};

use crate::{
    color::Color,
    stroke::{Stroke, StrokeSample},
};

pub const MAGIC: [u8; 4] = *b"MMVS";
pub const VERSION: u32 = 1;
/// Upper bound on up-front allocation from counts read out of a file. Larger counts still load,
/// they just grow as they go.
const MAX_RESERVE: usize = 1 << 16;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("bad magic {0:?}, not an MMVS file")]
    BadMagic([u8; 4]),
    #[error("unsupported MMVS version {0}")]
    UnsupportedVersion(u32),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
#[derive(thiserror::Error, Debug)]
pub enum WriteError {
    #[error("too many strokes")]
    TooManyStrokes,
    #[error("too many points in one stroke")]
    TooManyPoints,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Sample in its on-disk form. Same bits as a [`StrokeSample`], in little endian.
type SampleWords = [u32; 6];

fn sample_to_le(sample: StrokeSample) -> SampleWords {
    bytemuck::cast::<StrokeSample, SampleWords>(sample).map(u32::to_le)
}
fn sample_from_le(words: SampleWords) -> StrokeSample {
    bytemuck::cast(words.map(u32::from_le))
}

fn write_u32(writer: &mut impl Write, value: u32) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}
fn write_f32(writer: &mut impl Write, value: f32) -> std::io::Result<()> {
    writer.write_all(&value.to_le_bytes())
}
fn read_u32(reader: &mut impl Read) -> std::io::Result<u32> {
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes)?;
    Ok(u32::from_le_bytes(bytes))
}
fn read_f32(reader: &mut impl Read) -> std::io::Result<f32> {
    let mut bytes = [0; 4];
    reader.read_exact(&mut bytes)?;
    Ok(f32::from_le_bytes(bytes))
}

/// Encode `strokes`, in order, into `writer`.
///
/// Counts are validated before anything is written, so a [`WriteError::TooManyStrokes`] or
/// [`WriteError::TooManyPoints`] leaves `writer` untouched.
pub fn write_into(strokes: &[Stroke], mut writer: impl Write) -> Result<(), WriteError> {
    use az::CheckedAs;

    let num_strokes: u32 = strokes
        .len()
        .checked_as()
        .ok_or(WriteError::TooManyStrokes)?;
    let point_counts = strokes
        .iter()
        .map(|stroke| stroke.len().checked_as::<u32>())
        .collect::<Option<Vec<_>>>()
        .ok_or(WriteError::TooManyPoints)?;

    writer.write_all(&MAGIC)?;
    write_u32(&mut writer, VERSION)?;
    write_u32(&mut writer, num_strokes)?;

    let mut words = Vec::<SampleWords>::new();
    for (stroke, num_points) in strokes.iter().zip(point_counts) {
        for channel in stroke.color.as_array() {
            write_f32(&mut writer, channel)?;
        }
        write_f32(&mut writer, stroke.base_width)?;
        write_u32(&mut writer, num_points)?;

        words.clear();
        words.extend(stroke.samples().iter().copied().map(sample_to_le));
        writer.write_all(bytemuck::cast_slice(&words))?;
    }
    writer.flush()?;

    log::debug!("Wrote {num_strokes} strokes");
    Ok(())
}

/// Decode every stroke from `reader`.
///
/// Strokes with no samples are dropped, as they could never have been drawn.
pub fn read_from(mut reader: impl Read) -> Result<Vec<Stroke>, ReadError> {
    let mut magic = [0; 4];
    reader.read_exact(&mut magic)?;
    if magic != MAGIC {
        return Err(ReadError::BadMagic(magic));
    }
    let version = read_u32(&mut reader)?;
    if version != VERSION {
        return Err(ReadError::UnsupportedVersion(version));
    }

    let num_strokes = read_u32(&mut reader)? as usize;
    let mut strokes = Vec::with_capacity(num_strokes.min(MAX_RESERVE));
    for idx in 0..num_strokes {
        let color = Color::new(
            read_f32(&mut reader)?,
            read_f32(&mut reader)?,
            read_f32(&mut reader)?,
        );
        let base_width = read_f32(&mut reader)?;
        let num_points = read_u32(&mut reader)? as usize;

        let mut samples = Vec::with_capacity(num_points.min(MAX_RESERVE));
        for _ in 0..num_points {
            let mut words = SampleWords::default();
            reader.read_exact(bytemuck::bytes_of_mut(&mut words))?;
            samples.push(sample_from_le(words));
        }

        if samples.is_empty() {
            log::warn!("Skipping empty stroke {idx}");
            continue;
        }
        strokes.push(Stroke::from_samples(color, base_width, samples));
    }

    log::debug!("Read {} strokes", strokes.len());
    Ok(strokes)
}

/// Create or overwrite the file at `path` with `strokes`.
pub fn save_path(strokes: &[Stroke], path: impl AsRef<std::path::Path>) -> Result<(), WriteError> {
    let file = std::fs::File::create(path)?;
    write_into(strokes, std::io::BufWriter::new(file))
}
/// Read every stroke from the file at `path`.
pub fn load_path(path: impl AsRef<std::path::Path>) -> Result<Vec<Stroke>, ReadError> {
    let file = std::fs::File::open(path)?;
    read_from(std::io::BufReader::new(file))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Point2;

    fn three_point_stroke() -> Stroke {
        Stroke::from_samples(
            Color::new(0.25, 0.5, 0.75),
            3.5,
            vec![
                StrokeSample::new(Point2::new(0.0, 0.0))
                    .with_pressure(0.5)
                    .with_tilt(-0.25, 0.125)
                    .with_timestamp(0.0),
                StrokeSample::new(Point2::new(10.0, -2.5))
                    .with_pressure(0.75)
                    .with_timestamp(16.0),
                StrokeSample::new(Point2::new(20.0, 1e-7))
                    .with_pressure(1.0)
                    .with_tilt(1.0, -1.0)
                    .with_timestamp(33.5),
            ],
        )
    }
    fn encode(strokes: &[Stroke]) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_into(strokes, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn round_trip() {
        let strokes = vec![
            three_point_stroke(),
            Stroke::from_samples(
                Color::WHITE,
                1.0,
                vec![StrokeSample::new(Point2::new(-4.0, 8.0))],
            ),
        ];
        let bytes = encode(&strokes);
        let read = read_from(bytes.as_slice()).unwrap();
        assert_eq!(read, strokes);
    }
    #[test]
    fn round_trip_generated() {
        // Awkward values: signed zero, subnormals, extremes, and ordinary fractions.
        const VALUES: [f32; 8] = [
            0.0,
            -0.0,
            f32::MIN_POSITIVE / 4.0,
            -f32::MIN_POSITIVE / 2.0,
            f32::MAX,
            f32::MIN,
            -1234.5678,
            0.1,
        ];
        let value = |idx: usize| VALUES[idx % VALUES.len()];

        let strokes: Vec<Stroke> = (0..40usize)
            .map(|stroke_idx| {
                // Empty strokes are never committed, and covered by `empty_strokes_skipped`.
                let num_samples = 1 + stroke_idx * 7 % 23;
                let samples = (0..num_samples)
                    .map(|sample_idx| {
                        let seed = stroke_idx * 31 + sample_idx;
                        StrokeSample::new(Point2::new(value(seed), value(seed + 3)))
                            .with_pressure(value(seed + 1))
                            .with_tilt(value(seed + 5), value(seed + 2))
                            .with_timestamp(sample_idx as f32 * 0.016)
                    })
                    .collect();
                Stroke::from_samples(
                    Color::new(value(stroke_idx), value(stroke_idx + 1), value(stroke_idx + 6)),
                    value(stroke_idx + 4),
                    samples,
                )
            })
            .collect();

        let bytes = encode(&strokes);
        let read = read_from(bytes.as_slice()).unwrap();
        assert_eq!(read, strokes);
        // Bit-exact, signed zeros included.
        assert_eq!(encode(&read), bytes);
    }
    #[test]
    fn layout() {
        let stroke = three_point_stroke();
        let bytes = encode(std::slice::from_ref(&stroke));
        // header + stroke header + 3 samples
        assert_eq!(bytes.len(), 12 + 20 + 3 * 24);
        assert_eq!(&bytes[0..4], b"MMVS");
        assert_eq!(&bytes[4..8], &1u32.to_le_bytes());
        assert_eq!(&bytes[8..12], &1u32.to_le_bytes());
        assert_eq!(&bytes[12..16], &0.25f32.to_le_bytes());
        assert_eq!(&bytes[24..28], &3.5f32.to_le_bytes());
        assert_eq!(&bytes[28..32], &3u32.to_le_bytes());
        // Second sample, x then y then pressure.
        let second = 32 + 24;
        assert_eq!(&bytes[second..second + 4], &10.0f32.to_le_bytes());
        assert_eq!(&bytes[second + 4..second + 8], &(-2.5f32).to_le_bytes());
        assert_eq!(&bytes[second + 8..second + 12], &0.75f32.to_le_bytes());
        assert_eq!(&bytes[second + 20..second + 24], &16.0f32.to_le_bytes());
    }
    #[test]
    fn empty_document() {
        let bytes = encode(&[]);
        assert_eq!(bytes.len(), 12);
        assert!(read_from(bytes.as_slice()).unwrap().is_empty());
    }
    #[test]
    fn bad_magic() {
        let mut bytes = encode(&[three_point_stroke()]);
        bytes[0..4].copy_from_slice(b"RIFF");
        assert!(matches!(
            read_from(bytes.as_slice()),
            Err(ReadError::BadMagic(magic)) if &magic == b"RIFF"
        ));
    }
    #[test]
    fn bad_version() {
        let mut bytes = encode(&[three_point_stroke()]);
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            read_from(bytes.as_slice()),
            Err(ReadError::UnsupportedVersion(2))
        ));
    }
    #[test]
    fn truncated() {
        let bytes = encode(&[three_point_stroke()]);
        for len in [0, 3, 10, 20, bytes.len() - 1] {
            match read_from(&bytes[..len]) {
                Err(ReadError::Io(err)) => {
                    assert_eq!(err.kind(), std::io::ErrorKind::UnexpectedEof);
                }
                other => panic!("expected eof at {len}, got {other:?}"),
            }
        }
    }
    #[test]
    fn hostile_count() {
        // Claims u32::MAX strokes, then ends. Must fail cleanly instead of allocating it all.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MMVS");
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        assert!(matches!(read_from(bytes.as_slice()), Err(ReadError::Io(_))));
    }
    #[test]
    fn empty_strokes_skipped() {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"MMVS");
        bytes.extend_from_slice(&1u32.to_le_bytes());
        bytes.extend_from_slice(&2u32.to_le_bytes());
        // Empty stroke.
        for float in [1.0f32, 0.0, 0.0, 2.0] {
            bytes.extend_from_slice(&float.to_le_bytes());
        }
        bytes.extend_from_slice(&0u32.to_le_bytes());
        // Then a real one.
        bytes.extend_from_slice(&encode(&[three_point_stroke()])[12..]);

        let read = read_from(bytes.as_slice()).unwrap();
        assert_eq!(read, vec![three_point_stroke()]);
    }
    #[test]
    fn fixture() {
        const ONE_STROKE: &[u8] = include_bytes!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/test-data/one_stroke.mmvs"
        ));
        let strokes = read_from(ONE_STROKE).unwrap();
        assert_eq!(strokes.len(), 1);
        let stroke = &strokes[0];
        assert_eq!(stroke.color, Color::new(1.0, 0.0, 0.0));
        assert_eq!(stroke.base_width, 4.0);
        let positions: Vec<Point2> = stroke.samples().iter().map(|s| s.position).collect();
        assert_eq!(
            positions,
            vec![
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0)
            ]
        );
        assert_eq!(stroke.samples()[1].pressure, 0.5);
        assert_eq!(stroke.samples()[2].timestamp, 2.0);
    }
    #[test]
    fn path_round_trip() {
        let path = std::env::temp_dir().join(format!("sketchline-io-{}.mmvs", std::process::id()));
        let strokes = vec![three_point_stroke()];
        save_path(&strokes, &path).unwrap();
        let read = load_path(&path);
        let _ = std::fs::remove_file(&path);
        assert_eq!(read.unwrap(), strokes);
    }
    #[test]
    fn missing_file() {
        let path = std::env::temp_dir().join("sketchline-definitely-not-here.mmvs");
        match load_path(path) {
            Err(ReadError::Io(err)) => assert_eq!(err.kind(), std::io::ErrorKind::NotFound),
            other => panic!("expected not found, got {other:?}"),
        }
    }
}
