//! Scenario 6: file-source byte-to-scalar mapping, through the public
//! `SampleSource` trait.

use std::io::{Seek, SeekFrom, Write};

use apollo_tv_core::source::{FileSource, SampleSource};

fn temp_file_with(bytes: &[u8]) -> std::fs::File {
    let path = std::env::temp_dir().join(format!(
        "apollo_tv_core_decoder_validation_source_{:?}",
        std::thread::current().id()
    ));
    let mut file = std::fs::File::options()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .unwrap();
    file.write_all(bytes).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();
    file
}

#[test]
fn scenario_6_file_source_maps_bytes_to_the_documented_scalars() {
    let file = temp_file_with(&[0, 128, 255, 128]);
    let mut source = FileSource::open(file);

    let mut out = vec![0.0; 4];
    let n = source.read(&mut out).unwrap();
    assert_eq!(n, 2);
    assert_eq!(out[0], -128.0);
    assert_eq!(out[1], 0.0);
    assert_eq!(out[2], 127.0);
    assert_eq!(out[3], 0.0);
}

#[test]
fn closed_source_reports_end_of_stream() {
    let file = temp_file_with(&[10, 20]);
    let mut source = FileSource::open(file);
    source.close();

    let mut out = vec![0.0; 2];
    assert_eq!(source.read(&mut out).unwrap(), 0);
}
