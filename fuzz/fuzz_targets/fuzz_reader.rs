#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use streamcore::{BinaryReader, MemorySource, ReaderOptions, SeekDirection};

#[derive(Debug, Arbitrary)]
enum Op {
    Get,
    Peek,
    Read(u16),
    ReadU32,
    ReadUntil(u8),
    Seek(i16),
}

#[derive(Debug, Arbitrary)]
struct Input {
    data: Vec<u8>,
    capacity: u16,
    max_read: u16,
    ops: Vec<Op>,
}

/// What a reader at `position` still has to hand out; seeking past the end
/// leaves nothing.
fn tail(data: &[u8], position: usize) -> &[u8] {
    data.get(position..).unwrap_or_default()
}

fuzz_target!(|input: Input| {
    let mut source =
        MemorySource::from(input.data.clone()).with_max_read(usize::from(input.max_read).max(1));
    let mut reader = BinaryReader::with_options(
        &mut source,
        ReaderOptions {
            capacity: usize::from(input.capacity),
            ..ReaderOptions::default()
        },
    );

    // Mirror of how far the caller has consumed.
    let mut position = 0usize;
    let data = &input.data;
    let mut dest = vec![0u8; usize::from(u16::MAX)];

    for op in input.ops {
        match op {
            Op::Get => {
                let byte = reader.get().unwrap();
                assert_eq!(byte, tail(data, position).first().copied());
                position += usize::from(byte.is_some());
            }
            Op::Peek => assert_eq!(reader.peek().unwrap(), tail(data, position).first().copied()),
            Op::Read(len) => {
                let count = reader.read(&mut dest[..usize::from(len)]).unwrap();
                assert_eq!(&dest[..count], &tail(data, position)[..count]);
                position += count;
            }
            Op::ReadU32 => match reader.read_little_endian::<u32>() {
                Ok(value) => {
                    assert_eq!(value.to_le_bytes(), tail(data, position)[..4]);
                    position += 4;
                }
                Err(_) => position = position.max(data.len()),
            },
            Op::ReadUntil(delimiter) => {
                let piece = reader.read_until(delimiter).unwrap();
                let rest = tail(data, position);
                assert_eq!(piece.as_slice(), &rest[..piece.len()]);
                position += piece.len();
                if let Some(&next) = rest.get(piece.len()) {
                    assert_eq!(next, delimiter);
                    position += 1;
                }
            }
            Op::Seek(offset) => {
                let target = i64::try_from(position).unwrap() + i64::from(offset);
                match reader.seek(i64::from(offset), SeekDirection::FromCurrent) {
                    Ok(()) => position = usize::try_from(target).unwrap(),
                    Err(_) => assert!(target < 0),
                }
            }
        }
    }
});
